//! Domain services.
//!
//! This module contains the services that do I/O on behalf of the
//! controller: AI analysis and file export/import.

pub mod analysis;
pub mod transfer;

use std::path::PathBuf;

use reportgen_config::{AiConfig, ResolvedCredential};
use reportgen_llm::{BridgeError, GeminiConfig, SharedBridge, create_shared_bridge};
use tracing::info;

use crate::error::Result;

pub use analysis::AnalysisService;
pub use transfer::TransferService;

/// Build the Gemini bridge for a credential.
pub fn build_bridge(credential: &ResolvedCredential, ai: &AiConfig) -> Result<SharedBridge> {
    let config = GeminiConfig::new(credential.value.clone())
        .with_base_url(ai.effective_base_url())
        .with_model(ai.effective_model())
        .with_timeout(ai.effective_timeout());
    let bridge =
        create_shared_bridge(config).map_err(|e| BridgeError::from_llm("build_bridge", e))?;
    info!(
        model = ai.effective_model(),
        credential_source = %credential.source,
        "AI bridge ready"
    );
    Ok(bridge)
}

/// Services facade.
///
/// Cheap to clone; clones share in-flight state.
#[derive(Clone)]
pub struct ReportServices {
    analysis: AnalysisService,
    transfer: TransferService,
}

impl ReportServices {
    pub fn new(bridge: Option<SharedBridge>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            analysis: AnalysisService::new(bridge),
            transfer: TransferService::new(output_dir),
        }
    }

    pub fn analysis(&self) -> &AnalysisService {
        &self.analysis
    }

    pub fn transfer(&self) -> &TransferService {
        &self.transfer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportgen_config::CredentialSource;

    #[test]
    fn test_build_bridge() {
        let credential = ResolvedCredential {
            value: "k".to_string(),
            source: CredentialSource::Stored,
        };
        let bridge = build_bridge(&credential, &AiConfig::default()).unwrap();
        assert_eq!(bridge.name(), "gemini");
    }

    #[test]
    fn test_services_share_state() {
        let services = ReportServices::new(None, ".");
        let clone = services.clone();
        let _guard = clone.analysis().upload().begin("x.png").unwrap();
        assert!(services.analysis().upload().is_busy());
    }
}
