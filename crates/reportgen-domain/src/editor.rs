//! Field-level edits on a report.
//!
//! Every edit takes the current [`ReportData`] by reference and returns a
//! complete new value; nothing is mutated in place. List positions are
//! plain indices that the caller must take from the value it is editing,
//! never from an earlier one: a removal shifts everything after it.

use reportgen_types::{AssessmentStat, IncorrectAnswer, PLACEHOLDER_TEXT, ReportData};

use crate::error::{DomainError, Result};
use crate::stepper::Stepper;

// ─────────────────────────────────────────────────────────────────────────────
// Scalar Fields
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    ExamTitle,
    ExamDate,
    StudentName,
    Summary,
    DifficultyAnalysis,
    RadarAnalysis,
    ParentMessage,
}

impl TextField {
    pub const ALL: [TextField; 7] = [
        TextField::ExamTitle,
        TextField::ExamDate,
        TextField::StudentName,
        TextField::Summary,
        TextField::DifficultyAnalysis,
        TextField::RadarAnalysis,
        TextField::ParentMessage,
    ];

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            Self::ExamTitle => "시험명",
            Self::ExamDate => "시험일",
            Self::StudentName => "학생 이름",
            Self::Summary => "시험 총평",
            Self::DifficultyAnalysis => "시험 난이도 분석",
            Self::RadarAnalysis => "역량 종합 평가",
            Self::ParentMessage => "부모님께",
        }
    }

    /// Multi-line narrative fields get a larger editor.
    pub fn is_multiline(self) -> bool {
        matches!(
            self,
            Self::Summary | Self::DifficultyAnalysis | Self::RadarAnalysis | Self::ParentMessage
        )
    }

    pub fn get(self, data: &ReportData) -> &str {
        match self {
            Self::ExamTitle => &data.exam_title,
            Self::ExamDate => &data.exam_date,
            Self::StudentName => &data.student_name,
            Self::Summary => &data.summary,
            Self::DifficultyAnalysis => &data.difficulty_analysis,
            Self::RadarAnalysis => &data.radar_analysis,
            Self::ParentMessage => &data.parent_message,
        }
    }

    fn slot(self, data: &mut ReportData) -> &mut String {
        match self {
            Self::ExamTitle => &mut data.exam_title,
            Self::ExamDate => &mut data.exam_date,
            Self::StudentName => &mut data.student_name,
            Self::Summary => &mut data.summary,
            Self::DifficultyAnalysis => &mut data.difficulty_analysis,
            Self::RadarAnalysis => &mut data.radar_analysis,
            Self::ParentMessage => &mut data.parent_message,
        }
    }
}

/// Replace one text field.
pub fn set_text(data: &ReportData, field: TextField, value: impl Into<String>) -> ReportData {
    let mut next = data.clone();
    *field.slot(&mut next) = value.into();
    next
}

/// Replace the total score.
pub fn set_score(data: &ReportData, score: u32) -> ReportData {
    ReportData {
        score,
        ..data.clone()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// List Fields
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered sequence fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    DifficultyStats,
    QuestionTypeStats,
    AssessmentStats,
    RadarStats,
    IncorrectAnswers,
    Strengths,
    Weaknesses,
}

impl ListField {
    pub fn label(self) -> &'static str {
        match self {
            Self::DifficultyStats => "난이도별",
            Self::QuestionTypeStats => "문항 유형별",
            Self::AssessmentStats => "단원별 성취도",
            Self::RadarStats => "5대 역량 분석 (학생)",
            Self::IncorrectAnswers => "오답 노트",
            Self::Strengths => "강점",
            Self::Weaknesses => "보완점",
        }
    }

    pub fn len(self, data: &ReportData) -> usize {
        match self {
            Self::DifficultyStats => data.difficulty_stats.len(),
            Self::QuestionTypeStats => data.question_type_stats.len(),
            Self::AssessmentStats => data.assessment_stats.len(),
            Self::RadarStats => data.radar_stats.len(),
            Self::IncorrectAnswers => data.incorrect_answers.len(),
            Self::Strengths => data.strengths.len(),
            Self::Weaknesses => data.weaknesses.len(),
        }
    }

    /// Lists the user can grow and shrink. Tier, question-type and radar
    /// rows are fixed structure that only the AI or an import replaces.
    pub fn is_resizable(self) -> bool {
        matches!(
            self,
            Self::AssessmentStats | Self::IncorrectAnswers | Self::Strengths | Self::Weaknesses
        )
    }
}

/// Record keys within list elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKey {
    /// The whole element of a string list.
    Item,
    Label,
    Total,
    Correct,
    Name,
    MaxScore,
    EarnedScore,
    Subject,
    Student,
    FullMark,
    QuestionNumber,
    Topic,
    Reason,
    Solution,
}

impl ElementKey {
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Total
                | Self::Correct
                | Self::MaxScore
                | Self::EarnedScore
                | Self::Student
                | Self::FullMark
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Item => "",
            Self::Label => "구분",
            Self::Total => "전체",
            Self::Correct => "정답",
            Self::Name => "단원명",
            Self::MaxScore => "배점",
            Self::EarnedScore => "내 점수",
            Self::Subject => "역량",
            Self::Student => "학생",
            Self::FullMark => "만점",
            Self::QuestionNumber => "문항",
            Self::Topic => "단원/주제",
            Self::Reason => "오답 원인",
            Self::Solution => "해결 방안",
        }
    }
}

/// New content for one key of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementValue {
    Text(String),
    Number(u32),
}

impl From<&str> for ElementValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ElementValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u32> for ElementValue {
    fn from(value: u32) -> Self {
        Self::Number(value)
    }
}

fn mismatch(list: ListField, key: ElementKey) -> DomainError {
    DomainError::InvalidEdit(format!("{list:?} has no key {key:?}"))
}

fn out_of_range(list: ListField, index: usize, len: usize) -> DomainError {
    DomainError::InvalidEdit(format!("{list:?}[{index}] out of range (len {len})"))
}

fn element_mut<T>(items: &mut [T], list: ListField, index: usize) -> Result<&mut T> {
    let len = items.len();
    items.get_mut(index).ok_or_else(|| out_of_range(list, index, len))
}

/// Replace one key of one element, keeping the element's other keys.
pub fn set_element(
    data: &ReportData,
    list: ListField,
    index: usize,
    key: ElementKey,
    value: impl Into<ElementValue>,
) -> Result<ReportData> {
    use ElementKey as K;
    use ElementValue as V;

    let mut next = data.clone();
    let value = value.into();
    match list {
        ListField::DifficultyStats | ListField::QuestionTypeStats => {
            let items = if list == ListField::DifficultyStats {
                &mut next.difficulty_stats
            } else {
                &mut next.question_type_stats
            };
            let stat = element_mut(items, list, index)?;
            match (key, value) {
                (K::Label, V::Text(v)) => stat.label = v,
                (K::Total, V::Number(v)) => stat.total = v,
                (K::Correct, V::Number(v)) => stat.correct = v,
                _ => return Err(mismatch(list, key)),
            }
        }
        ListField::AssessmentStats => {
            let stat = element_mut(&mut next.assessment_stats, list, index)?;
            match (key, value) {
                (K::Name, V::Text(v)) => stat.name = v,
                (K::MaxScore, V::Number(v)) => stat.max_score = v,
                (K::EarnedScore, V::Number(v)) => stat.earned_score = v,
                _ => return Err(mismatch(list, key)),
            }
        }
        ListField::RadarStats => {
            let stat = element_mut(&mut next.radar_stats, list, index)?;
            match (key, value) {
                (K::Subject, V::Text(v)) => stat.subject = v,
                (K::Student, V::Number(v)) => stat.student = v,
                (K::FullMark, V::Number(v)) => stat.full_mark = v,
                _ => return Err(mismatch(list, key)),
            }
        }
        ListField::IncorrectAnswers => {
            let answer = element_mut(&mut next.incorrect_answers, list, index)?;
            match (key, value) {
                (K::QuestionNumber, V::Text(v)) => answer.question_number = v,
                (K::Topic, V::Text(v)) => answer.topic = v,
                (K::Reason, V::Text(v)) => answer.reason = v,
                (K::Solution, V::Text(v)) => answer.solution = v,
                _ => return Err(mismatch(list, key)),
            }
        }
        ListField::Strengths | ListField::Weaknesses => {
            let items = if list == ListField::Strengths {
                &mut next.strengths
            } else {
                &mut next.weaknesses
            };
            let item = element_mut(items, list, index)?;
            match (key, value) {
                (K::Item, V::Text(v)) => *item = v,
                _ => return Err(mismatch(list, key)),
            }
        }
    }
    Ok(next)
}

/// Append a blank element to a resizable list.
///
/// Assessment rows start at 10 of 20 points; other elements start empty.
pub fn append_element(data: &ReportData, list: ListField) -> Result<ReportData> {
    let mut next = data.clone();
    match list {
        ListField::AssessmentStats => next.assessment_stats.push(AssessmentStat::default()),
        ListField::IncorrectAnswers => next.incorrect_answers.push(IncorrectAnswer::default()),
        ListField::Strengths => next.strengths.push(String::new()),
        ListField::Weaknesses => next.weaknesses.push(String::new()),
        _ => {
            return Err(DomainError::InvalidEdit(format!(
                "{list:?} has a fixed length"
            )));
        }
    }
    Ok(next)
}

/// Remove an element from a resizable list; later elements shift down.
pub fn remove_element(data: &ReportData, list: ListField, index: usize) -> Result<ReportData> {
    fn remove<T>(items: &mut Vec<T>, list: ListField, index: usize) -> Result<()> {
        if index >= items.len() {
            return Err(out_of_range(list, index, items.len()));
        }
        items.remove(index);
        Ok(())
    }

    let mut next = data.clone();
    match list {
        ListField::AssessmentStats => remove(&mut next.assessment_stats, list, index)?,
        ListField::IncorrectAnswers => remove(&mut next.incorrect_answers, list, index)?,
        ListField::Strengths => remove(&mut next.strengths, list, index)?,
        ListField::Weaknesses => remove(&mut next.weaknesses, list, index)?,
        _ => {
            return Err(DomainError::InvalidEdit(format!(
                "{list:?} has a fixed length"
            )));
        }
    }
    Ok(next)
}

// ─────────────────────────────────────────────────────────────────────────────
// Numeric Bounds
// ─────────────────────────────────────────────────────────────────────────────

/// Current numeric value of one key of one element.
pub fn element_number(
    data: &ReportData,
    list: ListField,
    index: usize,
    key: ElementKey,
) -> Option<u32> {
    use ElementKey as K;
    match (list, key) {
        (ListField::DifficultyStats, K::Total) => data.difficulty_stats.get(index).map(|s| s.total),
        (ListField::DifficultyStats, K::Correct) => {
            data.difficulty_stats.get(index).map(|s| s.correct)
        }
        (ListField::QuestionTypeStats, K::Total) => {
            data.question_type_stats.get(index).map(|s| s.total)
        }
        (ListField::QuestionTypeStats, K::Correct) => {
            data.question_type_stats.get(index).map(|s| s.correct)
        }
        (ListField::AssessmentStats, K::MaxScore) => {
            data.assessment_stats.get(index).map(|s| s.max_score)
        }
        (ListField::AssessmentStats, K::EarnedScore) => {
            data.assessment_stats.get(index).map(|s| s.earned_score)
        }
        (ListField::RadarStats, K::Student) => data.radar_stats.get(index).map(|s| s.student),
        (ListField::RadarStats, K::FullMark) => data.radar_stats.get(index).map(|s| s.full_mark),
        _ => None,
    }
}

/// Current text of one key of one element.
pub fn element_text(data: &ReportData, list: ListField, index: usize, key: ElementKey) -> Option<&str> {
    use ElementKey as K;
    match (list, key) {
        (ListField::DifficultyStats, K::Label) => {
            data.difficulty_stats.get(index).map(|s| s.label.as_str())
        }
        (ListField::QuestionTypeStats, K::Label) => {
            data.question_type_stats.get(index).map(|s| s.label.as_str())
        }
        (ListField::AssessmentStats, K::Name) => {
            data.assessment_stats.get(index).map(|s| s.name.as_str())
        }
        (ListField::RadarStats, K::Subject) => {
            data.radar_stats.get(index).map(|s| s.subject.as_str())
        }
        (ListField::IncorrectAnswers, _) => data.incorrect_answers.get(index).and_then(|a| {
            match key {
                K::QuestionNumber => Some(a.question_number.as_str()),
                K::Topic => Some(a.topic.as_str()),
                K::Reason => Some(a.reason.as_str()),
                K::Solution => Some(a.solution.as_str()),
                _ => None,
            }
        }),
        (ListField::Strengths, K::Item) => data.strengths.get(index).map(String::as_str),
        (ListField::Weaknesses, K::Item) => data.weaknesses.get(index).map(String::as_str),
        _ => None,
    }
}

/// Stepper bounds for a numeric key, read from the value being rendered.
///
/// "Correct" and "earned" are capped by their paired total/max; everything
/// else uses the default range.
pub fn stepper_for(data: &ReportData, list: ListField, index: usize, key: ElementKey) -> Stepper {
    let paired = match key {
        ElementKey::Correct => element_number(data, list, index, ElementKey::Total),
        ElementKey::EarnedScore => element_number(data, list, index, ElementKey::MaxScore),
        _ => None,
    };
    paired.map(Stepper::up_to).unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Resets
// ─────────────────────────────────────────────────────────────────────────────

/// Clear per-student content while keeping the exam's structure.
///
/// Name, score, narrative, strengths, weaknesses and incorrect answers are
/// cleared; every achieved count drops to 0. Titles, dates, labels, totals,
/// maxima, full marks and the difficulty analysis (a property of the paper,
/// not the student) are kept.
pub fn next_student(data: &ReportData) -> ReportData {
    let mut next = data.clone();
    next.student_name.clear();
    next.score = 0;
    next.summary = PLACEHOLDER_TEXT.to_string();
    next.radar_analysis = PLACEHOLDER_TEXT.to_string();
    next.parent_message = PLACEHOLDER_TEXT.to_string();
    next.strengths.clear();
    next.weaknesses.clear();
    next.incorrect_answers.clear();
    for stat in next
        .difficulty_stats
        .iter_mut()
        .chain(next.question_type_stats.iter_mut())
    {
        stat.correct = 0;
    }
    for stat in &mut next.assessment_stats {
        stat.earned_score = 0;
    }
    for stat in &mut next.radar_stats {
        stat.student = 0;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_leaves_other_fields() {
        let seed = ReportData::seed();
        let next = set_text(&seed, TextField::StudentName, "이하늘");
        assert_eq!(next.student_name, "이하늘");
        assert_eq!(
            ReportData {
                student_name: seed.student_name.clone(),
                ..next.clone()
            },
            seed
        );
    }

    #[test]
    fn test_set_score() {
        assert_eq!(set_score(&ReportData::seed(), 0).score, 0);
    }

    #[test]
    fn test_element_readers() {
        let seed = ReportData::seed();
        assert_eq!(
            element_text(&seed, ListField::DifficultyStats, 1, ElementKey::Label),
            Some("중")
        );
        assert_eq!(
            element_text(&seed, ListField::IncorrectAnswers, 0, ElementKey::Topic),
            Some("도형의 성질")
        );
        assert_eq!(
            element_text(&seed, ListField::Strengths, 9, ElementKey::Item),
            None
        );
        assert_eq!(
            element_number(&seed, ListField::AssessmentStats, 2, ElementKey::EarnedScore),
            Some(25)
        );
        assert_eq!(
            element_number(&seed, ListField::RadarStats, 0, ElementKey::Label),
            None
        );
    }

    #[test]
    fn test_set_element_shallow_merge() {
        let seed = ReportData::seed();
        let next = set_element(&seed, ListField::DifficultyStats, 1, ElementKey::Correct, 3u32)
            .unwrap();
        assert_eq!(next.difficulty_stats[1].correct, 3);
        assert_eq!(next.difficulty_stats[1].total, seed.difficulty_stats[1].total);
        assert_eq!(next.difficulty_stats[1].label, seed.difficulty_stats[1].label);
        assert_eq!(next.difficulty_stats[0], seed.difficulty_stats[0]);
    }

    #[test]
    fn test_set_string_item() {
        let seed = ReportData::seed();
        let next = set_element(&seed, ListField::Strengths, 0, ElementKey::Item, "집중력").unwrap();
        assert_eq!(next.strengths[0], "집중력");
    }

    #[test]
    fn test_set_element_errors() {
        let seed = ReportData::seed();
        assert!(set_element(&seed, ListField::RadarStats, 99, ElementKey::Student, 1u32).is_err());
        assert!(set_element(&seed, ListField::RadarStats, 0, ElementKey::Topic, "x").is_err());
        assert!(set_element(&seed, ListField::RadarStats, 0, ElementKey::Student, "x").is_err());
    }

    #[test]
    fn test_append_defaults() {
        let empty = ReportData::default();
        let next = append_element(&empty, ListField::AssessmentStats).unwrap();
        assert_eq!(next.assessment_stats[0].max_score, 20);
        assert_eq!(next.assessment_stats[0].earned_score, 10);

        let next = append_element(&next, ListField::IncorrectAnswers).unwrap();
        assert_eq!(next.incorrect_answers[0], IncorrectAnswer::default());

        let next = append_element(&next, ListField::Weaknesses).unwrap();
        assert_eq!(next.weaknesses, vec![String::new()]);

        assert!(append_element(&next, ListField::RadarStats).is_err());
    }

    #[test]
    fn test_remove_shifts_indices() {
        let mut data = ReportData::default();
        data.strengths = vec!["a".into(), "b".into(), "c".into()];
        let next = remove_element(&data, ListField::Strengths, 0).unwrap();
        assert_eq!(next.strengths, vec!["b".to_string(), "c".to_string()]);
        assert!(remove_element(&next, ListField::Strengths, 2).is_err());
        assert!(remove_element(&next, ListField::DifficultyStats, 0).is_err());
    }

    #[test]
    fn test_stepper_bounds_follow_pair() {
        let seed = ReportData::seed();
        // 중: total 7
        assert_eq!(
            stepper_for(&seed, ListField::DifficultyStats, 1, ElementKey::Correct),
            Stepper::up_to(7)
        );
        assert_eq!(
            stepper_for(&seed, ListField::DifficultyStats, 1, ElementKey::Total),
            Stepper::default()
        );
        let max = seed.assessment_stats[0].max_score;
        assert_eq!(
            stepper_for(&seed, ListField::AssessmentStats, 0, ElementKey::EarnedScore),
            Stepper::up_to(max)
        );
    }

    #[test]
    fn test_lowering_total_does_not_clamp_correct() {
        let seed = ReportData::seed();
        let next =
            set_element(&seed, ListField::DifficultyStats, 1, ElementKey::Total, 4u32).unwrap();
        assert_eq!(next.difficulty_stats[1].correct, 6);
        assert_eq!(
            stepper_for(&next, ListField::DifficultyStats, 1, ElementKey::Correct).max,
            4
        );
    }

    #[test]
    fn test_next_student_on_seed() {
        let seed = ReportData::seed();
        let next = next_student(&seed);

        assert_eq!(next.student_name, "");
        assert_eq!(next.score, 0);
        assert_eq!(next.summary, PLACEHOLDER_TEXT);
        assert_eq!(next.radar_analysis, PLACEHOLDER_TEXT);
        assert_eq!(next.parent_message, PLACEHOLDER_TEXT);
        assert!(next.strengths.is_empty());
        assert!(next.weaknesses.is_empty());
        assert!(next.incorrect_answers.is_empty());

        for (before, after) in seed.difficulty_stats.iter().zip(&next.difficulty_stats) {
            assert_eq!(after.label, before.label);
            assert_eq!(after.total, before.total);
            assert_eq!(after.correct, 0);
        }
        for (before, after) in seed.question_type_stats.iter().zip(&next.question_type_stats) {
            assert_eq!(after.total, before.total);
            assert_eq!(after.correct, 0);
        }
        for (before, after) in seed.assessment_stats.iter().zip(&next.assessment_stats) {
            assert_eq!(after.name, before.name);
            assert_eq!(after.max_score, before.max_score);
            assert_eq!(after.earned_score, 0);
        }
        for (before, after) in seed.radar_stats.iter().zip(&next.radar_stats) {
            assert_eq!(after.subject, before.subject);
            assert_eq!(after.full_mark, before.full_mark);
            assert_eq!(after.student, 0);
        }
        assert_eq!(next.exam_title, seed.exam_title);
        assert_eq!(next.exam_date, seed.exam_date);
        assert_eq!(next.difficulty_analysis, seed.difficulty_analysis);
    }
}
