//! JSON export and import.
//!
//! Export writes the report verbatim as pretty-printed JSON. Import is all
//! or nothing: the payload must parse, must be an object carrying both
//! `examTitle` and `score`, and only then replaces the current value.

use std::path::{Path, PathBuf};

use reportgen_types::ReportData;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{DomainError, Result};

/// Name used in export file names when the student name is blank.
pub const FALLBACK_STUDENT_NAME: &str = "학생";

/// Keys an import payload must carry.
pub const REQUIRED_IMPORT_KEYS: [&str; 2] = ["examTitle", "score"];

/// Replace characters that cannot appear in a file name.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// `{studentName}_성적데이터.json`, with a placeholder for a blank name.
pub fn export_file_name(data: &ReportData) -> String {
    let name = data.student_name.trim();
    let name = if name.is_empty() {
        FALLBACK_STUDENT_NAME
    } else {
        name
    };
    format!("{}_성적데이터.json", file_stem(name))
}

/// `{studentName}_성적분석리포트.png`. A blank name yields a bare suffix.
pub fn image_file_name(data: &ReportData) -> String {
    format!("{}_성적분석리포트.png", file_stem(data.student_name.trim()))
}

/// Serialize a report for export.
pub fn export_json(data: &ReportData) -> Result<String> {
    Ok(data.to_json_pretty()?)
}

/// Parse and validate an import payload.
pub fn import_json(text: &str) -> Result<ReportData> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| DomainError::InvalidImport(e.to_string()))?;

    let Some(object) = value.as_object() else {
        return Err(DomainError::InvalidImport("not a JSON object".to_string()));
    };
    if let Some(missing) = REQUIRED_IMPORT_KEYS
        .iter()
        .find(|key| !object.contains_key(**key))
    {
        return Err(DomainError::InvalidImport(format!("missing '{missing}'")));
    }

    serde_json::from_value(value).map_err(|e| DomainError::InvalidImport(e.to_string()))
}

/// Export and import against the filesystem.
#[derive(Debug, Clone)]
pub struct TransferService {
    output_dir: PathBuf,
}

impl TransferService {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where [`Self::export`] would write `data`.
    pub fn export_path(&self, data: &ReportData) -> PathBuf {
        self.output_dir.join(export_file_name(data))
    }

    /// Where an image export of `data` belongs.
    pub fn image_path(&self, data: &ReportData) -> PathBuf {
        self.output_dir.join(image_file_name(data))
    }

    /// Write `data` as JSON into the output directory.
    pub fn export(&self, data: &ReportData) -> Result<PathBuf> {
        let path = self.export_path(data);
        let json = export_json(data)?;
        let write_err = |e| DomainError::FileWrite {
            path: path.display().to_string(),
            source: e,
        };
        std::fs::create_dir_all(&self.output_dir).map_err(write_err)?;
        std::fs::write(&path, json).map_err(write_err)?;
        info!(path = %path.display(), "report data exported");
        Ok(path)
    }

    /// Read and validate a JSON payload from `path`.
    pub fn import(&self, path: &Path) -> Result<ReportData> {
        let text = std::fs::read_to_string(path).map_err(|e| DomainError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;
        import_json(&text).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "import rejected");
        })
    }
}
