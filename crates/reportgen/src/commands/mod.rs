//! CLI command handlers.

pub mod config;
pub mod render;
pub mod tui;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use reportgen_config::{CredentialResolver, CredentialStore, LoadedConfig};
use reportgen_domain::TransferService;
use reportgen_types::ReportData;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
    /// Explicit configuration directory, if given.
    pub config_dir: Option<PathBuf>,
}

impl Context {
    /// Configuration directory in effect.
    pub fn config_dir(&self) -> Option<PathBuf> {
        self.config_dir
            .clone()
            .or_else(reportgen_config::xdg_config_dir)
    }

    /// Discover and merge the config layers.
    pub fn load_config(&self) -> Result<LoadedConfig> {
        let loaded = reportgen_config::load_config_with_options(None, self.config_dir.as_deref())?;
        Ok(loaded)
    }

    /// Where the user-entered credential lives.
    pub fn credential_store(&self) -> Result<CredentialStore> {
        match self.config_dir() {
            Some(dir) => Ok(CredentialStore::in_dir(&dir)),
            None => Ok(CredentialStore::default_location()?),
        }
    }

    pub fn credential_resolver(&self) -> Result<CredentialResolver> {
        Ok(CredentialResolver::new(self.credential_store()?))
    }
}

/// Read a report data file with the same checks as the in-app import.
pub fn read_report(path: &Path) -> Result<ReportData> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    TransferService::new(dir)
        .import(path)
        .with_context(|| format!("failed to import {}", path.display()))
}
