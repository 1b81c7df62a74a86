//! Report view model.
//!
//! [`ReportDocument::build`] is a pure function of [`ReportData`]: it copies
//! what the page shows, computes every derived number, and applies the
//! fallback texts. Both the HTML renderer and the terminal preview draw from
//! this model, so they always agree on percentages and section presence.

use reportgen_types::{IncorrectAnswer, ReportData, Tally};

/// Shown when the difficulty analysis is blank.
pub const NO_DIFFICULTY_ANALYSIS: &str = "난이도 분석 정보가 없습니다.";

/// Shown when the radar analysis is blank.
pub const NO_RADAR_ANALYSIS: &str = "역량 분석 데이터가 없습니다.";

/// Subtitle under the exam title.
pub const REPORT_SUBTITLE: &str = "성적 분석 리포트";

/// Second footer line.
pub const FOOTER_NOTE: &str = "학부모님 전달용 공식 분석 자료";

/// Section headings, in page order.
pub mod headings {
    pub const SUMMARY: &str = "시험 총평";
    pub const RATES: &str = "정답률 분석 (난이도/유형)";
    pub const DIFFICULTY: &str = "난이도별";
    pub const QUESTION_TYPE: &str = "문항 유형별";
    pub const ASSESSMENT: &str = "단원별 성취도";
    pub const ASSESSMENT_NOTE: &str = "* 각 단원별 배점 대비 득점 현황";
    pub const DIFFICULTY_ANALYSIS: &str = "지역 난이도 비교 분석";
    pub const RADAR: &str = "5대 역량 분석";
    pub const INCORRECT: &str = "오답 문항 분석";
    pub const INCORRECT_COLUMNS: [&str; 4] = ["문항", "단원", "틀린 이유", "해결 방안"];
    pub const DIRECTION: &str = "앞으로의 학습 방향";
    pub const STRENGTHS: &str = "강점 (Keep)";
    pub const WEAKNESSES: &str = "보완 (Improve)";
    pub const PARENT_MESSAGE: &str = "부모님께 드리는 말씀";
}

/// One tier or question-type row: `label  correct / total 문제  rate%`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRow {
    pub label: String,
    pub correct: u32,
    pub total: u32,
    pub percent: u32,
}

impl RateRow {
    /// Bar fill in percent, capped for drawing.
    pub fn bar_percent(&self) -> u32 {
        self.percent.min(100)
    }
}

/// One assessment unit: `name  earned / max점` with a percentage bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentRow {
    pub name: String,
    pub earned: u32,
    pub max: u32,
    pub percent: u32,
}

impl AssessmentRow {
    pub fn bar_percent(&self) -> u32 {
        self.percent.min(100)
    }
}

/// One radar axis. `ratio` is the student's value over the full mark,
/// clamped into `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarAxis {
    pub subject: String,
    pub student: u32,
    pub full_mark: u32,
    pub ratio: f64,
}

/// Everything the report page shows, with derived values filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub exam_title: String,
    pub score: u32,
    pub student_name: String,
    pub summary: String,
    pub difficulty_rows: Vec<RateRow>,
    pub question_type_rows: Vec<RateRow>,
    pub assessment_rows: Vec<AssessmentRow>,
    pub difficulty_analysis: String,
    pub radar_axes: Vec<RadarAxis>,
    pub radar_analysis: String,
    /// `None` when there are no incorrect answers; the section is omitted.
    pub incorrect_answers: Option<Vec<IncorrectAnswer>>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub parent_message: String,
    pub footer: String,
}

fn or_fallback(text: &str, fallback: &str) -> String {
    if text.is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

/// Radar ratio: `student / full_mark` in `[0, 1]`, or 0 for a zero full mark.
pub fn radar_ratio(student: u32, full_mark: u32) -> f64 {
    if full_mark == 0 {
        return 0.0;
    }
    (f64::from(student) / f64::from(full_mark)).clamp(0.0, 1.0)
}

impl ReportDocument {
    pub fn build(data: &ReportData) -> Self {
        let rate_rows = |stats: &[reportgen_types::DifficultyStat]| {
            stats
                .iter()
                .map(|s| RateRow {
                    label: s.label.clone(),
                    correct: s.correct,
                    total: s.total,
                    percent: s.percent(),
                })
                .collect()
        };

        Self {
            exam_title: data.exam_title.clone(),
            score: data.score,
            student_name: data.student_name.clone(),
            summary: data.summary.clone(),
            difficulty_rows: rate_rows(&data.difficulty_stats),
            question_type_rows: rate_rows(&data.question_type_stats),
            assessment_rows: data
                .assessment_stats
                .iter()
                .map(|a| AssessmentRow {
                    name: a.name.clone(),
                    earned: a.earned_score,
                    max: a.max_score,
                    percent: a.percent(),
                })
                .collect(),
            difficulty_analysis: or_fallback(&data.difficulty_analysis, NO_DIFFICULTY_ANALYSIS),
            radar_axes: data
                .radar_stats
                .iter()
                .map(|r| RadarAxis {
                    subject: r.subject.clone(),
                    student: r.student,
                    full_mark: r.full_mark,
                    ratio: radar_ratio(r.student, r.full_mark),
                })
                .collect(),
            radar_analysis: or_fallback(&data.radar_analysis, NO_RADAR_ANALYSIS),
            incorrect_answers: (!data.incorrect_answers.is_empty())
                .then(|| data.incorrect_answers.clone()),
            strengths: data.strengths.clone(),
            weaknesses: data.weaknesses.clone(),
            parent_message: data.parent_message.clone(),
            footer: format!(
                "본 리포트는 {} 시행된 평가를 바탕으로 작성되었습니다.",
                data.exam_date
            ),
        }
    }

    /// Header line under the score: `{name} 학생`.
    pub fn student_line(&self) -> String {
        format!("{} 학생", self.student_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use reportgen_types::{AssessmentStat, DifficultyStat, RadarStat};

    #[test]
    fn test_seed_middle_tier_is_86_percent() {
        let doc = ReportDocument::build(&ReportData::seed());
        let mid = doc
            .difficulty_rows
            .iter()
            .find(|r| r.label == "중")
            .unwrap();
        assert_eq!((mid.correct, mid.total, mid.percent), (6, 7, 86));
        assert_eq!(doc.score, 88);
    }

    #[test]
    fn test_zero_totals_render_zero() {
        let data = ReportData {
            difficulty_stats: vec![DifficultyStat::new("상", 0, 0)],
            assessment_stats: vec![AssessmentStat::new("빈 단원", 0, 5)],
            radar_stats: vec![RadarStat {
                subject: "계산".into(),
                student: 50,
                full_mark: 0,
            }],
            ..ReportData::default()
        };
        let doc = ReportDocument::build(&data);
        assert_eq!(doc.difficulty_rows[0].percent, 0);
        assert_eq!(doc.assessment_rows[0].percent, 0);
        assert_eq!(doc.radar_axes[0].ratio, 0.0);
    }

    #[test]
    fn test_stale_pair_caps_bar_only() {
        let data = ReportData {
            difficulty_stats: vec![DifficultyStat::new("하", 2, 3)],
            ..ReportData::default()
        };
        let row = &ReportDocument::build(&data).difficulty_rows[0];
        assert_eq!(row.percent, 150);
        assert_eq!(row.bar_percent(), 100);
    }

    #[test]
    fn test_fallbacks_and_omitted_sections() {
        let doc = ReportDocument::build(&ReportData::default());
        assert_eq!(doc.difficulty_analysis, NO_DIFFICULTY_ANALYSIS);
        assert_eq!(doc.radar_analysis, NO_RADAR_ANALYSIS);
        assert!(doc.incorrect_answers.is_none());
        assert!(doc.strengths.is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let seed = ReportData::seed();
        let doc = ReportDocument::build(&seed);
        let labels: Vec<_> = doc.difficulty_rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["상", "중", "하"]);
        let subjects: Vec<_> = doc.radar_axes.iter().map(|a| a.subject.as_str()).collect();
        let expected: Vec<_> = seed.radar_stats.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(subjects, expected);
        assert_eq!(doc.incorrect_answers.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_footer_and_student_line() {
        let seed = ReportData::seed();
        let doc = ReportDocument::build(&seed);
        assert!(doc.footer.starts_with("본 리포트는 "));
        assert!(doc.footer.contains(&seed.exam_date));
        assert_eq!(doc.student_line(), "김단우 학생");
    }

    #[test]
    fn test_build_does_not_touch_input() {
        let seed = ReportData::seed();
        let copy = seed.clone();
        let _ = ReportDocument::build(&seed);
        assert_eq!(seed, copy);
    }

    proptest! {
        #[test]
        fn prop_radar_ratio_in_unit_range(student in 0u32..1000, full in 0u32..1000) {
            let ratio = radar_ratio(student, full);
            prop_assert!((0.0..=1.0).contains(&ratio));
        }
    }
}
