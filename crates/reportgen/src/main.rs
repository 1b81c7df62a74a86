//! Reportgen - AI-assisted exam report generator
//!
//! Main entry point for the reportgen CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;

use commands::{config, render, tui, validate};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Reportgen - AI-assisted exam report generator
#[derive(Parser)]
#[command(name = "reportgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration directory (default: platform config dir)
    #[arg(long, global = true, env = "REPORTGEN_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive report editor (default)
    Tui(tui::TuiArgs),

    /// Render a report data file to HTML and/or PNG
    Render(render::RenderArgs),

    /// Check that a report data file can be imported
    Validate(validate::ValidateArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging
// ─────────────────────────────────────────────────────────────────────────────

const CONSOLE_FILTER: &str = "reportgen=info,reportgen_domain=info,reportgen_llm=info,reportgen_render=info,reportgen_config=info,warn";
const VERBOSE_FILTER: &str = "reportgen=debug,reportgen_domain=debug,reportgen_llm=debug,reportgen_render=debug,reportgen_config=debug,reportgen_tui=debug,info";
const FILE_FILTER: &str = "reportgen=trace,reportgen_domain=trace,reportgen_llm=trace,reportgen_render=trace,reportgen_config=trace,reportgen_tui=trace,info";

/// Console (or in-app log panel) plus a rotating JSON file.
///
/// The returned guard flushes the file writer and must outlive the command.
fn init_tracing(
    verbose: bool,
    config_dir: Option<&PathBuf>,
    log_buffer: Option<reportgen_tui::LogBuffer>,
) -> tracing_appender::non_blocking::WorkerGuard {
    let filter = if verbose { VERBOSE_FILTER } else { CONSOLE_FILTER };

    let log_dir = config_dir
        .cloned()
        .or_else(reportgen_config::xdg_config_dir)
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "reportgen.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // the interactive screen owns the terminal, so console output goes to the panel
    let (console, panel) = match log_buffer {
        Some(buffer) => (
            None,
            Some(reportgen_tui::TuiLogLayer::new(buffer).with_filter(EnvFilter::new(filter))),
        ),
        None => (
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .with_filter(EnvFilter::new(filter)),
            ),
            None,
        ),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(panel)
        .with(
            fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(EnvFilter::new(FILE_FILTER)),
        )
        .init();

    guard
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Tui(tui::TuiArgs::default()));

    let log_buffer = matches!(command, Commands::Tui(_)).then(reportgen_tui::LogBuffer::new);
    let _guard = init_tracing(cli.verbose, cli.config_dir.as_ref(), log_buffer.clone());

    // Create context for commands
    let ctx = commands::Context {
        json_output: cli.json,
        verbose: cli.verbose,
        config_dir: cli.config_dir,
    };

    // Dispatch to command handlers
    match command {
        Commands::Tui(args) => tui::run(args, &ctx, log_buffer.unwrap_or_default()).await,
        Commands::Render(args) => render::run(args, &ctx).await,
        Commands::Validate(args) => validate::run(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx).await,
    }
}
