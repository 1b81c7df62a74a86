//! AI-triggered operations.
//!
//! The service runs the bridge call and returns the reply; the caller merges
//! it into whatever state is current at that moment (see [`crate::merge`]).

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use reportgen_llm::{AnalysisInput, DocumentInput, SharedBridge, media_type_for_path};
use reportgen_types::{ReportData, ReportPatch};
use tracing::{debug, info};

use crate::busy::{BusyFlag, UploadTracker};
use crate::error::{DomainError, Result};

/// Text and document analysis with per-class busy tracking.
///
/// Clones share the same bridge slot and flags, so a clone can be moved
/// into a spawned task.
#[derive(Clone, Default)]
pub struct AnalysisService {
    bridge: Arc<RwLock<Option<SharedBridge>>>,
    generating: BusyFlag,
    upload: UploadTracker,
}

impl AnalysisService {
    /// Create a service. Without a bridge every call fails until one is set.
    pub fn new(bridge: Option<SharedBridge>) -> Self {
        Self {
            bridge: Arc::new(RwLock::new(bridge)),
            ..Self::default()
        }
    }

    /// Swap the bridge, e.g. after the credential changed.
    pub fn set_bridge(&self, bridge: Option<SharedBridge>) {
        *self.bridge.write() = bridge;
    }

    pub fn has_bridge(&self) -> bool {
        self.bridge.read().is_some()
    }

    fn bridge(&self) -> Result<SharedBridge> {
        self.bridge.read().clone().ok_or(DomainError::NoCredential)
    }

    /// True while a text analysis is in flight.
    pub fn is_generating(&self) -> bool {
        self.generating.is_busy()
    }

    /// Upload state for the document affordance.
    pub fn upload(&self) -> &UploadTracker {
        &self.upload
    }

    /// Generate narrative commentary for `data`.
    ///
    /// Fails with [`DomainError::Busy`] when one is already running.
    pub async fn generate(&self, data: &ReportData) -> Result<ReportPatch> {
        let _guard = self
            .generating
            .try_acquire()
            .ok_or(DomainError::Busy("text analysis"))?;
        let bridge = self.bridge()?;

        let input = AnalysisInput::from_report(data);
        info!(bridge = bridge.name(), "starting text analysis");
        let patch = bridge.generate_analysis(&input).await?;
        debug!(empty = patch.is_empty(), "text analysis reply received");
        Ok(patch)
    }

    /// Analyze an exam image or PDF.
    ///
    /// A call made while another upload is in flight is refused with
    /// [`DomainError::Busy`] before the file is touched.
    pub async fn analyze_file(&self, path: &Path, context: &str) -> Result<ReportPatch> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let guard = self
            .upload
            .begin(file_name.clone())
            .ok_or(DomainError::Busy("document analysis"))?;

        let media_type = media_type_for_path(path)
            .ok_or_else(|| DomainError::UnsupportedFile(file_name.clone()))?;
        let bridge = self.bridge()?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DomainError::FileRead {
                path: path.display().to_string(),
                source: e,
            })?;
        guard.awaiting_ai(media_type);

        info!(
            bridge = bridge.name(),
            file = %file_name,
            media_type,
            bytes = bytes.len(),
            "starting document analysis"
        );
        let input = DocumentInput::new(bytes, media_type, context);
        let patch = bridge.analyze_document(&input).await?;
        debug!(empty = patch.is_empty(), "document analysis reply received");
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportgen_llm::{MockBridge, MockRequest};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn service(bridge: MockBridge) -> (AnalysisService, Arc<MockBridge>) {
        let bridge = Arc::new(bridge);
        let shared: SharedBridge = bridge.clone();
        (AnalysisService::new(Some(shared)), bridge)
    }

    fn exam_file(ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(ext).tempfile().unwrap();
        file.write_all(b"fake exam").unwrap();
        file
    }

    #[tokio::test]
    async fn test_generate_sends_subset() {
        let (svc, bridge) = service(MockBridge::new().with_reply(ReportPatch::default()));
        svc.generate(&ReportData::seed()).await.unwrap();
        let requests = bridge.requests();
        assert!(matches!(
            &requests[0],
            MockRequest::Analysis(input) if input.student_name == "김단우" && input.score == 88
        ));
        assert!(!svc.is_generating());
    }

    #[tokio::test]
    async fn test_failure_clears_busy_flag() {
        let (svc, _) = service(MockBridge::new().with_failure());
        let err = svc.generate(&ReportData::seed()).await.unwrap_err();
        assert!(matches!(err, DomainError::Bridge(_)));
        assert!(!svc.is_generating());
    }

    #[tokio::test]
    async fn test_no_bridge_is_error() {
        let svc = AnalysisService::new(None);
        let err = svc.generate(&ReportData::seed()).await.unwrap_err();
        assert!(matches!(err, DomainError::NoCredential));
        assert!(!svc.is_generating());
    }

    #[tokio::test]
    async fn test_second_generate_is_refused_while_in_flight() {
        let (svc, bridge) = service(MockBridge::gated().with_reply(ReportPatch::default()));
        let first = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.generate(&ReportData::seed()).await })
        };
        while bridge.request_count() == 0 {
            tokio::task::yield_now().await;
        }
        assert!(svc.is_generating());
        let second = svc.generate(&ReportData::seed()).await.unwrap_err();
        assert!(second.is_busy());

        bridge.release();
        assert!(first.await.unwrap().is_ok());
        assert!(!svc.is_generating());
        assert_eq!(bridge.request_count(), 1);
    }

    #[tokio::test]
    async fn test_analyze_file_encodes_and_resets() {
        let (svc, bridge) = service(MockBridge::new().with_reply(ReportPatch::default()));
        let file = exam_file(".png");
        svc.analyze_file(file.path(), "2학기 기말").await.unwrap();

        match &bridge.requests()[0] {
            MockRequest::Document(doc) => {
                assert_eq!(doc.media_type, "image/png");
                assert_eq!(doc.bytes, b"fake exam");
                assert_eq!(doc.context, "2학기 기말");
            }
            other => panic!("unexpected request {other:?}"),
        }
        assert!(svc.upload().state().is_idle());
    }

    #[tokio::test]
    async fn test_unsupported_file_rejected() {
        let (svc, bridge) = service(MockBridge::new());
        let file = exam_file(".txt");
        let err = svc.analyze_file(file.path(), "").await.unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedFile(_)));
        assert_eq!(bridge.request_count(), 0);
        assert!(svc.upload().state().is_idle());
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let (svc, _) = service(MockBridge::new());
        let err = svc
            .analyze_file(Path::new("/nonexistent/exam.pdf"), "")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::FileRead { .. }));
        assert!(svc.upload().state().is_idle());
    }

    #[tokio::test]
    async fn test_drop_during_upload_is_ignored() {
        let (svc, bridge) = service(MockBridge::gated().with_reply(ReportPatch::default()));
        let first_file = exam_file(".pdf");
        let first = {
            let svc = svc.clone();
            let path = first_file.path().to_path_buf();
            tokio::spawn(async move { svc.analyze_file(&path, "").await })
        };
        while bridge.request_count() == 0 {
            tokio::task::yield_now().await;
        }

        let second_file = exam_file(".png");
        let err = svc.analyze_file(second_file.path(), "").await.unwrap_err();
        assert!(err.is_busy());
        assert!(err.document_notice().is_none());

        bridge.release();
        first.await.unwrap().unwrap();
        assert_eq!(bridge.request_count(), 1);
    }

    #[tokio::test]
    async fn test_text_and_document_are_independent() {
        let (svc, bridge) = service(
            MockBridge::gated()
                .with_reply(ReportPatch::default())
                .with_reply(ReportPatch::default()),
        );
        let text = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.generate(&ReportData::seed()).await })
        };
        while bridge.request_count() == 0 {
            tokio::task::yield_now().await;
        }
        let file = exam_file(".jpg");
        let doc = {
            let svc = svc.clone();
            let path = file.path().to_path_buf();
            tokio::spawn(async move { svc.analyze_file(&path, "").await })
        };
        while bridge.request_count() < 2 {
            tokio::task::yield_now().await;
        }
        bridge.release();
        bridge.release();
        assert!(text.await.unwrap().is_ok());
        assert!(doc.await.unwrap().is_ok());
    }
}
