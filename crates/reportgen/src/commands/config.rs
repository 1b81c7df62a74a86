//! Config command - configuration management.

use anyhow::Result;
use clap::{Args, Subcommand};

use super::Context;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show resolved configuration and where the API key comes from
    Show,

    /// Show configuration file path
    Path,

    /// Store the Gemini API key (read from stdin)
    SetKey,

    /// Remove the stored Gemini API key
    ClearKey,
}

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => cmd_show(ctx).await,
        ConfigCommand::Path => cmd_path(ctx).await,
        ConfigCommand::SetKey => cmd_set_key(ctx).await,
        ConfigCommand::ClearKey => cmd_clear_key(ctx).await,
    }
}

async fn cmd_show(ctx: &Context) -> Result<()> {
    let loaded = ctx.load_config()?;
    let config = &loaded.config;

    println!("# Reportgen Configuration\n");

    // Sources
    let sources = loaded.loaded_from();
    if sources.is_empty() {
        println!("No config files loaded (using defaults)\n");
    } else {
        println!("Config files:");
        for source in &sources {
            println!("  {}", source.display());
        }
        println!();
    }

    let ai = config.ai();
    println!("AI:");
    println!("  model: {}", ai.effective_model());
    println!("  base_url: {}", ai.effective_base_url());
    println!("  timeout: {}s", ai.effective_timeout().as_secs());
    println!();

    let export = config.export();
    println!("Export:");
    println!("  output_dir: {}", export.effective_output_dir().display());
    println!("  browser: {}", export.effective_browser());
    println!("  scale: {}", export.effective_scale());
    println!();

    if let Some(view) = config.ui().start_view {
        println!("UI:");
        println!("  start_view: {view:?}");
        println!();
    }

    // the key itself is never printed
    let resolver = ctx.credential_resolver()?;
    match resolver.resolve() {
        Some(credential) => println!("API key: set ({})", credential.source),
        None => println!("API key: not set"),
    }
    println!();

    // Warnings
    if !loaded.warnings.is_empty() {
        println!("Warnings:");
        for w in &loaded.warnings {
            println!("  ⚠ {}", w);
        }
        println!();
    }

    if ctx.verbose {
        // Show raw TOML
        println!("---\nRaw config:\n");
        if let Ok(toml_str) = config.to_toml() {
            println!("{}", toml_str);
        }
    }

    Ok(())
}

async fn cmd_path(ctx: &Context) -> Result<()> {
    if let Some(dir) = ctx.config_dir() {
        println!("{}", reportgen_config::user_config_path(&dir).display());
    } else {
        eprintln!("Could not determine config directory");
    }
    Ok(())
}

async fn cmd_set_key(ctx: &Context) -> Result<()> {
    let store = ctx.credential_store()?;

    println!("Enter Gemini API key:");

    let mut api_key = String::new();
    std::io::stdin().read_line(&mut api_key)?;
    let api_key = api_key.trim();

    if api_key.is_empty() {
        println!("No key provided, aborting.");
        return Ok(());
    }

    store.save(api_key)?;
    println!("✓ API key stored in {}", store.path().display());

    Ok(())
}

async fn cmd_clear_key(ctx: &Context) -> Result<()> {
    let store = ctx.credential_store()?;
    store.clear()?;
    println!("✓ Stored API key removed");
    Ok(())
}
