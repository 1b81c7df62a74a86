//! End-user notices.
//!
//! Messages are written for the person filling in the report, never for a
//! developer. Technical detail goes to the log instead.

use std::fmt;

/// A blocking message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Text analysis failed.
    AnalysisFailed,
    /// Document analysis (or reading the document) failed.
    FileAnalysisFailed,
    /// A dropped file is neither an image nor a PDF.
    UnsupportedFile,
    /// An import payload was rejected.
    InvalidImport,
    /// Writing the JSON export failed.
    ExportFailed,
    /// Rasterizing the report failed.
    ImageExportFailed,
    /// Neutral information, e.g. where an export was written.
    Info(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::AnalysisFailed => {
                "AI 분석 중 오류가 발생했습니다. 환경변수 API Key를 확인해주세요."
            }
            Self::FileAnalysisFailed => "파일 분석에 실패했습니다. 다시 시도해주세요.",
            Self::UnsupportedFile => "이미지 또는 PDF 파일만 업로드 가능합니다.",
            Self::InvalidImport => "올바르지 않은 데이터 파일입니다.",
            Self::ExportFailed => "데이터 저장 중 오류가 발생했습니다.",
            Self::ImageExportFailed => "이미지 저장 중 오류가 발생했습니다.",
            Self::Info(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Info(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Notice::InvalidImport.to_string(),
            "올바르지 않은 데이터 파일입니다."
        );
        assert!(Notice::AnalysisFailed.message().contains("API Key"));
        assert!(!Notice::Info("저장됨".into()).is_error());
        assert!(Notice::ImageExportFailed.is_error());
        assert!(Notice::ExportFailed.is_error());
        assert_eq!(
            Notice::ExportFailed.message(),
            "데이터 저장 중 오류가 발생했습니다."
        );
    }
}
