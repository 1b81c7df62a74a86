//! In-flight tracking for the two AI operations.
//!
//! Each operation class owns its own flag; the classes are independent.
//! Guards reset their flag on drop, so success, failure, an empty reply, a
//! cancelled task and a panic all leave the flag idle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

// ─────────────────────────────────────────────────────────────────────────────
// Busy Flag
// ─────────────────────────────────────────────────────────────────────────────

/// A shareable single-occupancy flag.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the flag, or `None` if it is already held.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(Arc::clone(&self.0)))
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Holds a [`BusyFlag`] until dropped.
#[derive(Debug)]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Upload State Machine
// ─────────────────────────────────────────────────────────────────────────────

/// State of the document-upload affordance.
///
/// ```text
/// Idle ──file──▶ Reading ──bytes read──▶ AwaitingAi ──reply──▶ Idle
///  ▲  \_dragging_/  │                         │
///  └────────────────┴───────── failure ───────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    /// Nothing in flight; `dragging` is cosmetic hover feedback.
    Idle { dragging: bool },
    /// Extracting bytes and media type from the file.
    Reading { file: String },
    /// Waiting for the AI bridge.
    AwaitingAi { file: String, media_type: String },
}

impl Default for UploadState {
    fn default() -> Self {
        Self::Idle { dragging: false }
    }
}

impl UploadState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Idle { dragging: true })
    }

    /// File name shown while an upload is in progress.
    pub fn in_flight_file(&self) -> Option<&str> {
        match self {
            Self::Idle { .. } => None,
            Self::Reading { file } | Self::AwaitingAi { file, .. } => Some(file),
        }
    }
}

/// Shared handle to the upload state.
#[derive(Debug, Clone, Default)]
pub struct UploadTracker(Arc<Mutex<UploadState>>);

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> UploadState {
        self.0.lock().clone()
    }

    pub fn is_busy(&self) -> bool {
        !self.0.lock().is_idle()
    }

    /// Hover feedback; ignored while an upload is in flight.
    pub fn drag_enter(&self) {
        let mut state = self.0.lock();
        if state.is_idle() {
            *state = UploadState::Idle { dragging: true };
        }
    }

    pub fn drag_leave(&self) {
        let mut state = self.0.lock();
        if state.is_idle() {
            *state = UploadState::Idle { dragging: false };
        }
    }

    /// Start an upload from `Idle`. Returns `None` (a no-op drop) otherwise.
    pub fn begin(&self, file: impl Into<String>) -> Option<UploadGuard> {
        let mut state = self.0.lock();
        if !state.is_idle() {
            return None;
        }
        *state = UploadState::Reading { file: file.into() };
        Some(UploadGuard(Arc::clone(&self.0)))
    }
}

/// An upload in progress. Dropping it returns the tracker to `Idle`.
#[derive(Debug)]
pub struct UploadGuard(Arc<Mutex<UploadState>>);

impl UploadGuard {
    /// Bytes are read; the bridge call is about to start.
    pub fn awaiting_ai(&self, media_type: impl Into<String>) {
        let mut state = self.0.lock();
        if let UploadState::Reading { file } = &*state {
            *state = UploadState::AwaitingAi {
                file: file.clone(),
                media_type: media_type.into(),
            };
        }
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        *self.0.lock() = UploadState::default();
    }
}
