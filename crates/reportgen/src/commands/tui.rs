//! TUI command handler.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use reportgen_tui::{LogBuffer, TuiConfig};

use super::{Context, read_report};

/// TUI command arguments.
#[derive(Args, Debug, Default)]
pub struct TuiArgs {
    /// Report data file to open instead of the example report
    pub file: Option<PathBuf>,
}

/// Run the TUI.
pub async fn run(args: TuiArgs, ctx: &Context, log_buffer: LogBuffer) -> Result<()> {
    let loaded = ctx.load_config()?;
    for source in loaded.loaded_from() {
        tracing::debug!(path = %source.display(), "config layer loaded");
    }

    let mut config = TuiConfig::new(loaded.config, ctx.credential_resolver()?)
        .with_log_buffer(log_buffer);

    // load before the terminal switches screens so errors print normally
    if let Some(path) = args.file {
        config = config.with_initial_data(read_report(&path)?);
    }

    reportgen_tui::run_with_config(config).await
}
