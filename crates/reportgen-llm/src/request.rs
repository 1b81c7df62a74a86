//! Inputs to the two bridge operations.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use reportgen_types::{AssessmentStat, DifficultyStat, IncorrectAnswer, RadarStat, ReportData};

/// The subset of a report sent for text analysis.
///
/// Narrative fields are deliberately absent: the reply regenerates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    pub student_name: String,
    pub score: u32,
    pub assessment_stats: Vec<AssessmentStat>,
    pub difficulty_stats: Vec<DifficultyStat>,
    pub question_type_stats: Vec<DifficultyStat>,
    pub radar_stats: Vec<RadarStat>,
    pub incorrect_answers: Vec<IncorrectAnswer>,
}

impl AnalysisInput {
    pub fn from_report(data: &ReportData) -> Self {
        Self {
            student_name: data.student_name.clone(),
            score: data.score,
            assessment_stats: data.assessment_stats.clone(),
            difficulty_stats: data.difficulty_stats.clone(),
            question_type_stats: data.question_type_stats.clone(),
            radar_stats: data.radar_stats.clone(),
            incorrect_answers: data.incorrect_answers.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document Input
// ─────────────────────────────────────────────────────────────────────────────

/// Extensions accepted for document analysis and their media types.
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("bmp", "image/bmp"),
    ("pdf", "application/pdf"),
];

/// Media type for an exam document, inferred from its extension.
///
/// Returns `None` for anything that is not an image or a PDF.
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    MEDIA_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, media_type)| *media_type)
}

/// An uploaded exam document plus the user's free-text context.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentInput {
    pub bytes: Vec<u8>,
    pub media_type: String,
    pub context: String,
}

impl std::fmt::Debug for DocumentInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentInput")
            .field("bytes", &self.bytes.len())
            .field("media_type", &self.media_type)
            .field("context", &self.context)
            .finish()
    }
}

impl DocumentInput {
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            bytes,
            media_type: media_type.into(),
            context: context.into(),
        }
    }

    /// Base64 form of the document for inline transmission.
    pub fn encoded(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_types() {
        assert_eq!(media_type_for_path(Path::new("a.png")), Some("image/png"));
        assert_eq!(media_type_for_path(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(
            media_type_for_path(Path::new("/x/시험지.pdf")),
            Some("application/pdf")
        );
        assert_eq!(media_type_for_path(Path::new("notes.txt")), None);
        assert_eq!(media_type_for_path(Path::new("noext")), None);
    }

    #[test]
    fn test_encoded() {
        let doc = DocumentInput::new(b"hello".to_vec(), "image/png", "");
        assert_eq!(doc.encoded(), "aGVsbG8=");
    }

    #[test]
    fn test_analysis_input_shape() {
        let input = AnalysisInput::from_report(&ReportData::seed());
        let value = serde_json::to_value(&input).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 7);
        assert!(obj.contains_key("studentName"));
        assert!(!obj.contains_key("summary"));
        assert_eq!(obj["score"], 88);
    }
}
