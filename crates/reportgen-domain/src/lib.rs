//! Report editing and session state for reportgen.
//!
//! This crate sits between the interactive surface and the infrastructure
//! crates. It owns every rule about how a [`ReportData`] value changes:
//!
//! - **Form editing**: field and list-element setters, numeric steppers and
//!   the "next student" reset ([`editor`], [`stepper`])
//! - **AI merges**: sparse merge for text analysis, wide merge for document
//!   analysis ([`merge`])
//! - **Services**: AI calls with per-class busy tracking, JSON export and
//!   import ([`services`])
//! - **Session state**: the [`Workbench`] root controller and the
//!   [`CrashBoundary`] that supervises rendering
//!
//! # Example
//!
//! ```ignore
//! use reportgen_domain::{ReportServices, ViewMode, Workbench};
//!
//! let mut workbench = Workbench::new(resolver, ViewMode::Split);
//! let services = ReportServices::new(bridge, "./out");
//!
//! let reply = services.analysis().generate(workbench.data()).await?;
//! workbench.apply_text_analysis(&reply);
//! ```
//!
//! [`ReportData`]: reportgen_types::ReportData

pub mod busy;
pub mod crash;
pub mod editor;
mod error;
pub mod merge;
mod notice;
pub mod services;
pub mod stepper;
pub mod workbench;

pub use busy::{BusyFlag, BusyGuard, UploadGuard, UploadState, UploadTracker};
pub use crash::{CrashBoundary, CrashReport};
pub use editor::{ElementKey, ElementValue, ListField, TextField};
pub use error::{DomainError, Result};
pub use merge::{sparse_merge, wide_merge};
pub use notice::Notice;
pub use services::transfer::{export_file_name, image_file_name};
pub use services::{AnalysisService, ReportServices, TransferService, build_bridge};
pub use stepper::Stepper;
pub use workbench::{ViewMode, Workbench};

// Re-export key types from infrastructure crates for convenience
pub use reportgen_config::{CredentialResolver, CredentialSource, ResolvedCredential};
pub use reportgen_types::{ReportData, ReportPatch};
