//! Report rendering for reportgen.
//!
//! Rendering is a pure function of [`ReportData`]:
//!
//! - [`ReportDocument`] - the view model, with completion percentages,
//!   radar ratios and fallback texts computed
//! - [`render_html`] - a self-contained HTML page
//! - [`Rasterizer`] / [`HeadlessBrowser`] - PNG export of that page
//!
//! [`ReportData`]: reportgen_types::ReportData

pub mod document;
mod error;
pub mod html;
pub mod raster;

pub use document::{AssessmentRow, RadarAxis, RateRow, ReportDocument, radar_ratio};
pub use error::{RenderError, Result};
pub use html::{render_document, render_html};
pub use raster::{HeadlessBrowser, Rasterizer};
