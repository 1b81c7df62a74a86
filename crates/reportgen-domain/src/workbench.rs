//! Root controller state.
//!
//! [`Workbench`] owns the single [`ReportData`] value for the session, the
//! current view mode and the resolved AI credential. Every transition
//! replaces the value wholesale; nothing hands out a mutable reference to it.

use reportgen_config::{CredentialResolver, CredentialSource, ResolvedCredential, StartView};
use reportgen_types::{ReportData, ReportPatch};
use tracing::{debug, info, warn};

use crate::editor;
use crate::error::Result;
use crate::merge::{sparse_merge, wide_merge};
use crate::services::transfer::import_json;

/// Confirmation asked before a full reset.
pub const RESET_CONFIRMATION: &str = "모든 데이터를 초기화하고 새로운 리포트를 작성하시겠습니까?";

/// Confirmation asked before a "next student" reset.
pub const NEXT_STUDENT_CONFIRMATION: &str =
    "시험 정보(난이도, 단원 등)는 유지하고\n학생별 점수와 분석 내용만 초기화하시겠습니까?";

/// Which panes are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Editor and preview side by side.
    #[default]
    Split,
    /// Preview only.
    Preview,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Split => Self::Preview,
            Self::Preview => Self::Split,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Split => "입력+미리보기",
            Self::Preview => "미리보기만",
        }
    }
}

impl From<StartView> for ViewMode {
    fn from(view: StartView) -> Self {
        match view {
            StartView::Split => Self::Split,
            StartView::Preview => Self::Preview,
        }
    }
}

/// Session state owned by the root controller.
#[derive(Debug)]
pub struct Workbench {
    data: ReportData,
    view: ViewMode,
    credential: Option<ResolvedCredential>,
    resolver: CredentialResolver,
}

impl Workbench {
    /// Start a session on the seed report and resolve the credential.
    pub fn new(resolver: CredentialResolver, view: ViewMode) -> Self {
        let credential = resolver.resolve();
        match &credential {
            Some(c) => info!(source = %c.source, "AI credential resolved"),
            None => info!("no AI credential found; prompting"),
        }
        Self {
            data: ReportData::seed(),
            view,
            credential,
            resolver,
        }
    }

    /// Swap the starting report, e.g. when launched with a data file.
    pub fn with_data(mut self, data: ReportData) -> Self {
        self.data = data;
        self
    }

    pub fn data(&self) -> &ReportData {
        &self.data
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggle();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Report transitions
    // ─────────────────────────────────────────────────────────────────────

    /// Replace the report with a new value.
    pub fn replace(&mut self, data: ReportData) {
        self.data = data;
    }

    /// Derive the next value from the current one.
    pub fn apply(&mut self, edit: impl FnOnce(&ReportData) -> ReportData) {
        self.data = edit(&self.data);
    }

    /// Like [`Self::apply`], but a failed edit leaves the report untouched.
    pub fn try_apply(&mut self, edit: impl FnOnce(&ReportData) -> Result<ReportData>) -> Result<()> {
        self.data = edit(&self.data)?;
        Ok(())
    }

    /// Merge a text-analysis reply into the current report.
    pub fn apply_text_analysis(&mut self, reply: &ReportPatch) {
        debug!(empty = reply.is_empty(), "applying text analysis");
        self.apply(|data| sparse_merge(data, reply));
    }

    /// Merge a document-analysis reply into the current report.
    pub fn apply_document_analysis(&mut self, reply: &ReportPatch) {
        debug!(empty = reply.is_empty(), "applying document analysis");
        self.apply(|data| wide_merge(data, reply));
    }

    /// Back to the seed report, in split view.
    pub fn reset(&mut self) {
        info!("report reset to seed");
        self.data = ReportData::seed();
        self.view = ViewMode::Split;
    }

    /// Keep the exam structure and clear the student's results.
    pub fn next_student(&mut self) {
        info!("report reset for next student");
        self.apply(editor::next_student);
        self.view = ViewMode::Split;
    }

    /// Replace the report with an imported payload.
    ///
    /// On error the current report is unchanged.
    pub fn import_text(&mut self, text: &str) -> Result<()> {
        let data = import_json(text)?;
        info!(student = %data.student_name, "report data imported");
        self.data = data;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Credential
    // ─────────────────────────────────────────────────────────────────────

    pub fn credential(&self) -> Option<&ResolvedCredential> {
        self.credential.as_ref()
    }

    /// True until some source yields a credential.
    pub fn needs_credential(&self) -> bool {
        self.credential.is_none()
    }

    /// Persist a credential typed by the user and use it from now on.
    pub fn submit_credential(&mut self, value: &str) -> Result<&ResolvedCredential> {
        self.resolver.store().save(value)?;
        info!(path = %self.resolver.store().path().display(), "credential stored");
        Ok(self.credential.insert(ResolvedCredential {
            value: value.trim().to_string(),
            source: CredentialSource::Stored,
        }))
    }

    /// Wipe persisted state and start over, as after a crash.
    ///
    /// The credential is re-resolved, so build-time and environment values
    /// survive the wipe.
    pub fn clear_local_state(&mut self) {
        if let Err(e) = self.resolver.store().clear() {
            warn!(error = %e, "failed to remove stored credential");
        }
        self.data = ReportData::seed();
        self.view = ViewMode::Split;
        self.credential = self.resolver.resolve();
        info!(
            credential = self.credential.is_some(),
            "local state cleared"
        );
    }
}
