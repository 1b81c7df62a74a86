//! Partial report returned by the AI bridge.

use serde::{Deserialize, Serialize};

use crate::numeric::lenient_opt_u32;
use crate::report::{AssessmentStat, DifficultyStat, IncorrectAnswer, RadarStat, ReportData};

/// A sparse [`ReportData`]: every field may be absent.
///
/// Absence is meaningful. How an absent field is treated (keep the prior
/// value, or reset it) is decided by the merge policy that consumes the
/// patch, not by the patch itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_u32"
    )]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radar_analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strengths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weaknesses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_stats: Option<Vec<DifficultyStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_type_stats: Option<Vec<DifficultyStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_stats: Option<Vec<AssessmentStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radar_stats: Option<Vec<RadarStat>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub incorrect_answers: Option<Vec<IncorrectAnswer>>,
}

impl ReportPatch {
    /// Parse a patch from the JSON text of a structured reply.
    ///
    /// Blank text is an empty patch, not an error.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text)
    }

    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// A patch carrying every field of `data`.
    pub fn full(data: &ReportData) -> Self {
        Self {
            exam_title: Some(data.exam_title.clone()),
            student_name: Some(data.student_name.clone()),
            score: Some(data.score),
            exam_date: Some(data.exam_date.clone()),
            summary: Some(data.summary.clone()),
            difficulty_analysis: Some(data.difficulty_analysis.clone()),
            radar_analysis: Some(data.radar_analysis.clone()),
            strengths: Some(data.strengths.clone()),
            weaknesses: Some(data.weaknesses.clone()),
            parent_message: Some(data.parent_message.clone()),
            difficulty_stats: Some(data.difficulty_stats.clone()),
            question_type_stats: Some(data.question_type_stats.clone()),
            assessment_stats: Some(data.assessment_stats.clone()),
            radar_stats: Some(data.radar_stats.clone()),
            incorrect_answers: Some(data.incorrect_answers.clone()),
        }
    }
}
