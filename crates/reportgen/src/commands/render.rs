//! Render command - turn a report data file into HTML or PNG.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use reportgen_domain::image_file_name;
use reportgen_render::{HeadlessBrowser, Rasterizer, render_html};

use super::{Context, read_report};

/// Arguments for the render command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Report data file (JSON)
    pub file: PathBuf,

    /// Write the HTML page to this file
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Export a PNG image through the configured headless browser
    #[arg(long)]
    pub png: bool,

    /// PNG destination (default: {studentName}_성적분석리포트.png in the export directory)
    #[arg(short, long, value_name = "PATH", requires = "png")]
    pub output: Option<PathBuf>,
}

/// Run the render command.
pub async fn run(args: RenderArgs, ctx: &Context) -> Result<()> {
    let data = read_report(&args.file)?;
    let html = render_html(&data);

    // with no target, the page goes to stdout
    if args.html.is_none() && !args.png {
        print!("{html}");
        return Ok(());
    }

    if let Some(path) = &args.html {
        std::fs::write(path, &html)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("✓ HTML written to {}", path.display());
    }

    if args.png {
        let export = ctx.load_config()?.config.export();
        let output = args
            .output
            .unwrap_or_else(|| export.effective_output_dir().join(image_file_name(&data)));
        let browser = HeadlessBrowser::new(export.effective_browser())
            .with_scale(export.effective_scale());

        if ctx.verbose {
            println!("Rasterizing with {} ...", browser.command());
        }
        browser
            .rasterize(&html, &output)
            .await
            .with_context(|| format!("failed to export {}", output.display()))?;
        println!("✓ Image written to {}", output.display());
    }

    Ok(())
}
