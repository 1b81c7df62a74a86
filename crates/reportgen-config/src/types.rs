//! Configuration types mapping to the TOML schema.
//!
//! Top-level config:
//! ```toml
//! [ai]                     # generative backend
//! model = "gemini-2.5-flash"
//!
//! [export]                 # JSON / PNG output
//! output_dir = "~/Reports"
//!
//! [ui]
//! start_view = "split"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default HTTP timeout for AI requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default browser command used for PNG export.
pub const DEFAULT_BROWSER: &str = "chromium";

/// Default raster scale factor for PNG export.
pub const DEFAULT_EXPORT_SCALE: u32 = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
///
/// All sections are optional so that partial configs (e.g. project-local
/// overrides) can be loaded and merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportgenConfig {
    /// Generative backend settings.
    pub ai: Option<AiConfig>,

    /// Export settings.
    pub export: Option<ExportConfig>,

    /// Interactive UI settings.
    pub ui: Option<UiConfig>,
}

impl ReportgenConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> crate::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority).
    ///
    /// Sections merge field by field, so a project file that only sets
    /// `[ai] model` keeps the user file's `[ai] timeout_secs`.
    pub fn merge(&mut self, other: ReportgenConfig) {
        self.ai = merge_section(self.ai.take(), other.ai, AiConfig::merge);
        self.export = merge_section(self.export.take(), other.export, ExportConfig::merge);
        self.ui = merge_section(self.ui.take(), other.ui, UiConfig::merge);
    }

    /// AI settings with defaults applied.
    pub fn ai(&self) -> AiConfig {
        self.ai.clone().unwrap_or_default()
    }

    /// Export settings with defaults applied.
    pub fn export(&self) -> ExportConfig {
        self.export.clone().unwrap_or_default()
    }

    /// UI settings with defaults applied.
    pub fn ui(&self) -> UiConfig {
        self.ui.clone().unwrap_or_default()
    }
}

fn merge_section<T>(base: Option<T>, other: Option<T>, merge: fn(&mut T, T)) -> Option<T> {
    match (base, other) {
        (Some(mut base), Some(other)) => {
            merge(&mut base, other);
            Some(base)
        }
        (base, None) => base,
        (None, other) => other,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AI Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Settings for the generative backend.
///
/// The credential is deliberately absent: it is resolved through
/// [`crate::CredentialResolver`], never read from a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Model identifier.
    pub model: Option<String>,
    /// Custom API base URL (for proxies, custom endpoints).
    pub base_url: Option<String>,
    /// HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl AiConfig {
    fn merge(&mut self, other: AiConfig) {
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }

    pub fn effective_model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn effective_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Export Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Settings for JSON and image export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported files are written to (default: current directory).
    pub output_dir: Option<PathBuf>,
    /// Headless browser command used to rasterize reports.
    pub browser: Option<String>,
    /// Device scale factor for PNG export.
    pub scale: Option<u32>,
}

impl ExportConfig {
    fn merge(&mut self, other: ExportConfig) {
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.browser.is_some() {
            self.browser = other.browser;
        }
        if other.scale.is_some() {
            self.scale = other.scale;
        }
    }

    pub fn effective_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn effective_browser(&self) -> &str {
        self.browser.as_deref().unwrap_or(DEFAULT_BROWSER)
    }

    pub fn effective_scale(&self) -> u32 {
        self.scale.unwrap_or(DEFAULT_EXPORT_SCALE).max(1)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UI Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Settings for the interactive UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// View shown at startup.
    pub start_view: Option<StartView>,
}

impl UiConfig {
    fn merge(&mut self, other: UiConfig) {
        if other.start_view.is_some() {
            self.start_view = other.start_view;
        }
    }
}

/// Initial view mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartView {
    /// Editor and preview side by side.
    #[default]
    Split,
    /// Preview only.
    Preview,
}
