//! Validate command - check a report data file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use reportgen_render::ReportDocument;

use super::{Context, read_report};

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Report data file (JSON)
    pub file: PathBuf,
}

/// Run the validate command.
pub async fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let data = match read_report(&args.file) {
        Ok(data) => data,
        Err(e) if ctx.json_output => {
            let output = serde_json::json!({
                "valid": false,
                "file": args.file.display().to_string(),
                "error": format!("{e:#}"),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            anyhow::bail!("invalid report data");
        }
        Err(e) => return Err(e),
    };

    let doc = ReportDocument::build(&data);

    if ctx.json_output {
        let output = serde_json::json!({
            "valid": true,
            "file": args.file.display().to_string(),
            "examTitle": data.exam_title,
            "studentName": data.student_name,
            "score": data.score,
            "incorrectAnswers": data.incorrect_answers.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("✓ {} is valid", args.file.display());
    println!("  {}", doc.exam_title);
    println!("  {}  {}점", doc.student_line(), doc.score);
    if ctx.verbose {
        for row in doc.difficulty_rows.iter().chain(&doc.question_type_rows) {
            println!("  {:<8} {:>3}%", row.label, row.percent);
        }
    }

    Ok(())
}
