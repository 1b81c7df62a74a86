//! Shared types for the reportgen workspace.
//!
//! The central type is [`ReportData`], the single record describing one
//! student's exam report. Every other crate reads or produces it:
//!
//! ```text
//! ┌────────────┐  ReportPatch   ┌──────────────┐  ReportData  ┌──────────┐
//! │ AI bridge  │ ─────────────▶ │ form editor  │ ───────────▶ │ renderer │
//! └────────────┘                └──────────────┘              └──────────┘
//! ```
//!
//! [`ReportPatch`] is the partial shape returned by the AI bridge; every field
//! may be absent.

pub mod numeric;
pub mod patch;
pub mod report;
pub mod stats;

pub use patch::ReportPatch;
pub use report::{
    AssessmentStat, DifficultyStat, IncorrectAnswer, PLACEHOLDER_TEXT, RadarStat, ReportData,
};
pub use stats::{Tally, completion_percent};
