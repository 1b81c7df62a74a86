//! The report record and its fixed-shape statistic rows.
//!
//! Serialized field names are camelCase so that exported files stay
//! interchangeable with payloads produced by earlier versions of the tool.
//! All fields default when absent: a payload that omits a list is read as an
//! empty list, never as an error.

use serde::{Deserialize, Serialize};

use crate::numeric::{lenient_string, lenient_u32, null_as_empty};
use crate::stats::Tally;

/// Text written into narrative fields when a report is cleared for the next
/// student.
pub const PLACEHOLDER_TEXT: &str = "내용을 생성하거나 입력해주세요.";

// ─────────────────────────────────────────────────────────────────────────────
// Statistic rows
// ─────────────────────────────────────────────────────────────────────────────

/// Correct answers out of attempted questions for one bucket
/// (difficulty tier or question type).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DifficultyStat {
    #[serde(deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub total: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub correct: u32,
}

impl DifficultyStat {
    pub fn new(label: impl Into<String>, total: u32, correct: u32) -> Self {
        Self {
            label: label.into(),
            total,
            correct,
        }
    }
}

impl Tally for DifficultyStat {
    fn achieved(&self) -> u32 {
        self.correct
    }

    fn possible(&self) -> u32 {
        self.total
    }
}

/// Points earned out of the points available for one curriculum unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentStat {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub max_score: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub earned_score: u32,
}

impl AssessmentStat {
    pub fn new(name: impl Into<String>, max_score: u32, earned_score: u32) -> Self {
        Self {
            name: name.into(),
            max_score,
            earned_score,
        }
    }
}

/// A freshly added unit row starts at 10 of 20 points.
impl Default for AssessmentStat {
    fn default() -> Self {
        Self::new("", 20, 10)
    }
}

impl Tally for AssessmentStat {
    fn achieved(&self) -> u32 {
        self.earned_score
    }

    fn possible(&self) -> u32 {
        self.max_score
    }
}

/// One axis of the five-competency radar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RadarStat {
    #[serde(deserialize_with = "lenient_string")]
    pub subject: String,
    /// Student score on a 0–100 scale.
    #[serde(deserialize_with = "lenient_u32")]
    pub student: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub full_mark: u32,
}

impl RadarStat {
    pub fn new(subject: impl Into<String>, student: u32) -> Self {
        Self {
            subject: subject.into(),
            student,
            full_mark: 100,
        }
    }
}

impl Default for RadarStat {
    fn default() -> Self {
        Self::new("", 0)
    }
}

impl Tally for RadarStat {
    fn achieved(&self) -> u32 {
        self.student
    }

    fn possible(&self) -> u32 {
        self.full_mark
    }
}

/// A question the student got wrong, with the diagnosis and a remedy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IncorrectAnswer {
    #[serde(deserialize_with = "lenient_string")]
    pub question_number: String,
    #[serde(deserialize_with = "lenient_string")]
    pub topic: String,
    #[serde(deserialize_with = "lenient_string")]
    pub reason: String,
    #[serde(deserialize_with = "lenient_string")]
    pub solution: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Report
// ─────────────────────────────────────────────────────────────────────────────

/// The canonical record for one student's exam report.
///
/// Values are replaced wholesale: every edit produces a new `ReportData`
/// rather than mutating one that has been handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportData {
    #[serde(deserialize_with = "lenient_string")]
    pub exam_title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub student_name: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub score: u32,
    #[serde(deserialize_with = "lenient_string")]
    pub exam_date: String,

    /// Overall performance summary.
    #[serde(deserialize_with = "lenient_string")]
    pub summary: String,
    /// Objective difficulty of the paper itself, independent of the student.
    #[serde(deserialize_with = "lenient_string")]
    pub difficulty_analysis: String,
    /// Commentary on the five competencies in `radar_stats`.
    #[serde(deserialize_with = "lenient_string")]
    pub radar_analysis: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub strengths: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub weaknesses: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub parent_message: String,

    /// Conventionally three tiers: 상, 중, 하.
    #[serde(deserialize_with = "null_as_empty")]
    pub difficulty_stats: Vec<DifficultyStat>,
    /// Conventionally two buckets: 객관식, 서술형.
    #[serde(deserialize_with = "null_as_empty")]
    pub question_type_stats: Vec<DifficultyStat>,
    #[serde(deserialize_with = "null_as_empty")]
    pub assessment_stats: Vec<AssessmentStat>,
    /// Fixed five-entry competency vector.
    #[serde(deserialize_with = "null_as_empty")]
    pub radar_stats: Vec<RadarStat>,

    #[serde(deserialize_with = "null_as_empty")]
    pub incorrect_answers: Vec<IncorrectAnswer>,
}

impl ReportData {
    /// The example report shown on first launch.
    pub fn seed() -> Self {
        Self {
            exam_title: "2025학년도 2학기 수학 기말고사".to_string(),
            student_name: "김단우".to_string(),
            score: 88,
            exam_date: "2025년 12월 10일".to_string(),
            summary: "총 100점 만점 중 88점을 획득했습니다. 기본적인 연산 능력과 이해력은 매우 우수하나, 서술형 문제에서의 부분 감점과 응용 심화 문제에서 다소 어려움을 겪었습니다.".to_string(),
            difficulty_analysis: "이번 시험은 지역 내 일반적인 기출 문제들과 비교했을 때 난이도가 '중상' 수준으로 출제되었습니다. 특히 함수 단원에서의 그래프 활용 문제들이 복합적인 사고를 요구하여 변별력을 높였으며, 서술형 문항의 경우 정확한 풀이 과정을 요하는 까다로운 문제들이 다수 포함되어 있었습니다.".to_string(),
            radar_analysis: "계산력과 개념이해 역량이 매우 뛰어난 반면, 응용력 부분에서는 다소 편차가 보입니다. 기본기는 훌륭하지만 복합적인 문제 상황을 해결하는 추론 능력을 보완한다면 더욱 균형 잡힌 육각형 인재로 성장할 것입니다.".to_string(),
            strengths: vec![
                "수와 연산 단원에서의 정답률이 매우 높음 (배점 30점 중 30점 득점)".to_string(),
                "기본 개념에 대한 이해도가 탄탄함".to_string(),
                "계산 실수가 거의 없음".to_string(),
            ],
            weaknesses: vec![
                "함수 그래프 작성 시 절편 표기 누락으로 인한 감점".to_string(),
                "도형의 응용 심화 문제에 대한 접근 방식 보완 필요".to_string(),
            ],
            parent_message: "단우는 기본기가 매우 튼튼하고 성실한 학생입니다. 수와 연산 문항에서는 압도적인 실력을 보여주었으나, 함수와 기하 영역의 심화 문제에서 아쉬운 감점이 있었습니다. 다양한 유형의 문제를 접하며 응용력을 기른다면 다음 시험에서는 만점을 기대해볼 수 있습니다.".to_string(),
            difficulty_stats: vec![
                DifficultyStat::new("상", 4, 2),
                DifficultyStat::new("중", 7, 6),
                DifficultyStat::new("하", 9, 9),
            ],
            question_type_stats: vec![
                DifficultyStat::new("객관식", 14, 13),
                DifficultyStat::new("서술형", 6, 4),
            ],
            assessment_stats: vec![
                AssessmentStat::new("수와 연산", 30, 30),
                AssessmentStat::new("문자와 식", 20, 18),
                AssessmentStat::new("함수", 30, 25),
                AssessmentStat::new("기하", 20, 15),
            ],
            radar_stats: vec![
                RadarStat::new("계산력", 95),
                RadarStat::new("문제해결", 85),
                RadarStat::new("개념이해", 100),
                RadarStat::new("응용력", 80),
                RadarStat::new("정확성", 90),
            ],
            incorrect_answers: vec![IncorrectAnswer {
                question_number: "서술형 2번".to_string(),
                topic: "도형의 성질".to_string(),
                reason: "풀이 과정 중 합동 조건 명시 누락".to_string(),
                solution: "합동/닮음 조건(SSS, SAS 등)을 반드시 기호로 표기하는 연습 필요"
                    .to_string(),
            }],
        }
    }

    /// Parse a report from JSON text. Absent fields take their defaults.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
