//! AI bridge for reportgen.
//!
//! The core abstraction is the [`AiBridge`] trait with two operations that
//! share one structured-output contract: the reply is a [`ReportPatch`].
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  AiBridge trait                             │
//! │  - generate_analysis(stats) -> ReportPatch  │
//! │  - analyze_document(file)   -> ReportPatch  │
//! └─────────────────────────────────────────────┘
//!                    │
//!          ┌─────────┴─────────┐
//!          ▼                   ▼
//!     ┌─────────┐        ┌────────────┐
//!     │ Gemini  │        │ MockBridge │
//!     └─────────┘        └────────────┘
//! ```
//!
//! Failures surface as the opaque [`BridgeError`]; details go to the log.

pub mod backend;
pub mod error;
pub mod prompt;
pub mod request;
pub mod schema;

// Provider implementations
pub mod gemini;

pub use backend::{AiBridge, SharedBridge};
#[cfg(any(test, feature = "testing"))]
pub use backend::{MockBridge, MockRequest};
pub use error::{BridgeError, LlmError, Result};
pub use gemini::{GeminiBackend, GeminiConfig, create_shared_bridge};
pub use request::{AnalysisInput, DocumentInput, media_type_for_path};
pub use schema::report_schema;

pub use reportgen_types::ReportPatch;
