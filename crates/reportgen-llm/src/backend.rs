//! AI bridge trait and the mock implementation.
//!
//! A bridge is stateless request/response: it turns report fields into a
//! prompt plus schema and parses the structured reply back into a
//! [`ReportPatch`]. It never retries.

use std::sync::Arc;

use async_trait::async_trait;
use reportgen_types::ReportPatch;

use crate::error::BridgeError;
use crate::request::{AnalysisInput, DocumentInput};

// ─────────────────────────────────────────────────────────────────────────────
// AI Bridge Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Structured report generation.
///
/// Both operations share one output contract: a partial report whose fields
/// may each be absent.
#[async_trait]
pub trait AiBridge: Send + Sync {
    /// Narrative commentary from existing stats. Stat numbers in the reply
    /// are not expected to be meaningful.
    async fn generate_analysis(&self, input: &AnalysisInput) -> Result<ReportPatch, BridgeError>;

    /// A full structured report inferred from an exam image or PDF.
    async fn analyze_document(&self, input: &DocumentInput) -> Result<ReportPatch, BridgeError>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// A shared bridge handle.
pub type SharedBridge = Arc<dyn AiBridge>;

// ─────────────────────────────────────────────────────────────────────────────
// Mock Bridge
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(any(test, feature = "testing"))]
pub use mock::{MockBridge, MockRequest};

#[cfg(any(test, feature = "testing"))]
mod mock {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use reportgen_types::ReportPatch;
    use tokio::sync::Semaphore;

    use super::AiBridge;
    use crate::error::BridgeError;
    use crate::request::{AnalysisInput, DocumentInput};

    /// A request recorded by [`MockBridge`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum MockRequest {
        Analysis(AnalysisInput),
        Document(DocumentInput),
    }

    /// A bridge returning queued replies in order.
    ///
    /// When the queue runs dry every call fails. With [`MockBridge::gated`]
    /// each call waits for one permit from [`MockBridge::release`] before
    /// replying, which lets tests observe in-flight state.
    #[derive(Debug, Default)]
    pub struct MockBridge {
        replies: Mutex<VecDeque<Result<ReportPatch, BridgeError>>>,
        requests: Mutex<Vec<MockRequest>>,
        gate: Option<Arc<Semaphore>>,
    }

    impl MockBridge {
        pub fn new() -> Self {
            Self::default()
        }

        /// A mock whose calls block until released.
        pub fn gated() -> Self {
            Self {
                gate: Some(Arc::new(Semaphore::new(0))),
                ..Self::default()
            }
        }

        /// Queue a successful reply.
        pub fn with_reply(self, patch: ReportPatch) -> Self {
            self.replies.lock().push_back(Ok(patch));
            self
        }

        /// Queue a failure.
        pub fn with_failure(self) -> Self {
            self.replies.lock().push_back(Err(BridgeError));
            self
        }

        /// Let one pending (or future) call complete.
        pub fn release(&self) {
            if let Some(gate) = &self.gate {
                gate.add_permits(1);
            }
        }

        pub fn requests(&self) -> Vec<MockRequest> {
            self.requests.lock().clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().len()
        }

        async fn reply(&self, request: MockRequest) -> Result<ReportPatch, BridgeError> {
            self.requests.lock().push(request);
            if let Some(gate) = &self.gate {
                let permit = gate.acquire().await.map_err(|_| BridgeError)?;
                permit.forget();
            }
            self.replies.lock().pop_front().unwrap_or(Err(BridgeError))
        }
    }

    #[async_trait]
    impl AiBridge for MockBridge {
        async fn generate_analysis(
            &self,
            input: &AnalysisInput,
        ) -> Result<ReportPatch, BridgeError> {
            self.reply(MockRequest::Analysis(input.clone())).await
        }

        async fn analyze_document(
            &self,
            input: &DocumentInput,
        ) -> Result<ReportPatch, BridgeError> {
            self.reply(MockRequest::Document(input.clone())).await
        }

        fn name(&self) -> &str {
            "mock"
        }
    }
}
