//! Form layout.
//!
//! The form is a flat list of rows rebuilt from the current report on every
//! frame. The cursor is a position in that list, not a captured list index,
//! so removing an element never leaves it pointing at a stale record.

use reportgen_domain::editor::{element_number, element_text, stepper_for};
use reportgen_domain::{ElementKey, ListField, Stepper, TextField};
use reportgen_types::ReportData;

/// One line of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    /// Section heading; not selectable.
    Heading(&'static str),
    /// Free-text context sent with document analysis.
    ExamContext,
    /// Exam file upload affordance.
    Upload,
    Text(TextField),
    Score,
    Element {
        list: ListField,
        index: usize,
        key: ElementKey,
    },
    /// "add another" row under a resizable list.
    Append(ListField),
}

impl FormRow {
    pub fn is_selectable(&self) -> bool {
        !matches!(self, Self::Heading(_))
    }

    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Score => true,
            Self::Element { key, .. } => key.is_numeric(),
            _ => false,
        }
    }

    /// The list this row belongs to, with its element index if any.
    pub fn list_position(&self) -> Option<(ListField, Option<usize>)> {
        match *self {
            Self::Element { list, index, .. } => Some((list, Some(index))),
            Self::Append(list) => Some((list, None)),
            _ => None,
        }
    }

    /// Label shown in the left column.
    pub fn label(&self, data: &ReportData) -> String {
        match *self {
            Self::Heading(title) => title.to_string(),
            Self::ExamContext => "시험지 정보 및 분석 요청 (선택사항)".to_string(),
            Self::Upload => "시험지 파일 업로드 (이미지, PDF)".to_string(),
            Self::Text(field) => field.label().to_string(),
            Self::Score => "점수".to_string(),
            Self::Append(list) => format!("+ {} 추가", list.label()),
            Self::Element { list, index, key } => match list {
                ListField::DifficultyStats | ListField::QuestionTypeStats => {
                    let tier = element_text(data, list, index, ElementKey::Label).unwrap_or("");
                    format!("{tier} · {}", key.label())
                }
                ListField::AssessmentStats => format!("단원 {} · {}", index + 1, key.label()),
                ListField::RadarStats => {
                    element_text(data, list, index, ElementKey::Subject)
                        .unwrap_or("")
                        .to_string()
                }
                ListField::IncorrectAnswers => format!("오답 {} · {}", index + 1, key.label()),
                ListField::Strengths | ListField::Weaknesses => {
                    format!("{} {}", list.label(), index + 1)
                }
            },
        }
    }

    /// Current value text, or `None` for rows that show no value.
    pub fn value(&self, data: &ReportData, exam_context: &str) -> Option<String> {
        match *self {
            Self::Heading(_) | Self::Upload | Self::Append(_) => None,
            Self::ExamContext => Some(exam_context.to_string()),
            Self::Text(field) => Some(field.get(data).to_string()),
            Self::Score => Some(data.score.to_string()),
            Self::Element { list, index, key } if key.is_numeric() => {
                element_number(data, list, index, key).map(|n| n.to_string())
            }
            Self::Element { list, index, key } => {
                element_text(data, list, index, key).map(str::to_string)
            }
        }
    }

    /// Bounds for a numeric row, computed from `data` as rendered now.
    pub fn stepper(&self, data: &ReportData) -> Option<Stepper> {
        match *self {
            Self::Score => Some(Stepper::default()),
            Self::Element { list, index, key } if key.is_numeric() => {
                Some(stepper_for(data, list, index, key))
            }
            _ => None,
        }
    }

    pub fn is_multiline(&self) -> bool {
        match self {
            Self::ExamContext => true,
            Self::Text(field) => field.is_multiline(),
            Self::Element {
                list: ListField::IncorrectAnswers,
                key: ElementKey::Reason | ElementKey::Solution,
                ..
            } => true,
            _ => false,
        }
    }
}

fn elements(rows: &mut Vec<FormRow>, data: &ReportData, list: ListField, keys: &[ElementKey]) {
    for index in 0..list.len(data) {
        for &key in keys {
            rows.push(FormRow::Element { list, index, key });
        }
    }
    if list.is_resizable() {
        rows.push(FormRow::Append(list));
    }
}

/// All rows for `data`, in display order.
pub fn form_rows(data: &ReportData) -> Vec<FormRow> {
    use ElementKey as K;

    let mut rows = vec![
        FormRow::Heading("시험지 자동 분석"),
        FormRow::ExamContext,
        FormRow::Upload,
        FormRow::Heading("📝 데이터 직접 수정"),
        FormRow::Heading("기본 정보"),
        FormRow::Text(TextField::ExamTitle),
        FormRow::Text(TextField::ExamDate),
        FormRow::Text(TextField::StudentName),
        FormRow::Score,
        FormRow::Heading("오답 노트"),
    ];
    elements(
        &mut rows,
        data,
        ListField::IncorrectAnswers,
        &[K::QuestionNumber, K::Topic, K::Reason, K::Solution],
    );

    rows.push(FormRow::Heading("난이도 및 유형별 성취도"));
    rows.push(FormRow::Text(TextField::DifficultyAnalysis));
    elements(&mut rows, data, ListField::DifficultyStats, &[K::Total, K::Correct]);
    elements(&mut rows, data, ListField::QuestionTypeStats, &[K::Total, K::Correct]);

    rows.push(FormRow::Heading("단원별 성취도"));
    elements(
        &mut rows,
        data,
        ListField::AssessmentStats,
        &[K::Name, K::MaxScore, K::EarnedScore],
    );

    rows.push(FormRow::Heading("5대 역량 분석 (학생)"));
    rows.push(FormRow::Text(TextField::RadarAnalysis));
    elements(&mut rows, data, ListField::RadarStats, &[K::Student]);

    rows.push(FormRow::Heading("종합 분석"));
    rows.push(FormRow::Text(TextField::Summary));
    elements(&mut rows, data, ListField::Strengths, &[K::Item]);
    elements(&mut rows, data, ListField::Weaknesses, &[K::Item]);
    rows.push(FormRow::Text(TextField::ParentMessage));
    rows
}

/// Selection within the form.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormCursor {
    /// Position among all rows; always lands on a selectable one.
    selected: usize,
}

impl FormCursor {
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The selected row of `rows`, after clamping.
    pub fn current(&mut self, rows: &[FormRow]) -> Option<FormRow> {
        self.clamp(rows);
        rows.get(self.selected).copied()
    }

    /// Pull the cursor back into range and off headings.
    pub fn clamp(&mut self, rows: &[FormRow]) {
        if rows.is_empty() {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.min(rows.len() - 1);
        if !rows[self.selected].is_selectable() {
            if !self.step(rows, 1) {
                self.step(rows, -1);
            }
        }
    }

    pub fn down(&mut self, rows: &[FormRow]) {
        self.clamp(rows);
        self.step(rows, 1);
    }

    pub fn up(&mut self, rows: &[FormRow]) {
        self.clamp(rows);
        self.step(rows, -1);
    }

    pub fn first(&mut self, rows: &[FormRow]) {
        self.selected = 0;
        self.clamp(rows);
    }

    /// Jump to `row` if present.
    pub fn select(&mut self, rows: &[FormRow], row: FormRow) {
        if let Some(pos) = rows.iter().position(|r| *r == row) {
            self.selected = pos;
        }
    }

    fn step(&mut self, rows: &[FormRow], delta: isize) -> bool {
        let mut pos = self.selected as isize;
        loop {
            pos += delta;
            if pos < 0 || pos as usize >= rows.len() {
                return false;
            }
            if rows[pos as usize].is_selectable() {
                self.selected = pos as usize;
                return true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_rows() {
        let seed = ReportData::seed();
        let rows = form_rows(&seed);
        assert_eq!(rows[0], FormRow::Heading("시험지 자동 분석"));
        // four keys per incorrect answer, one answer in the seed
        let incorrect = rows
            .iter()
            .filter(|r| matches!(r, FormRow::Element { list: ListField::IncorrectAnswers, .. }))
            .count();
        assert_eq!(incorrect, 4);
        assert!(rows.contains(&FormRow::Append(ListField::AssessmentStats)));
        assert!(!rows.contains(&FormRow::Append(ListField::RadarStats)));
    }

    #[test]
    fn test_labels_and_values() {
        let seed = ReportData::seed();
        let row = FormRow::Element {
            list: ListField::DifficultyStats,
            index: 1,
            key: ElementKey::Correct,
        };
        assert_eq!(row.label(&seed), "중 · 정답");
        assert_eq!(row.value(&seed, "").as_deref(), Some("6"));
        assert_eq!(row.stepper(&seed), Some(Stepper::up_to(7)));
        assert_eq!(FormRow::Score.value(&seed, "").as_deref(), Some("88"));
        assert_eq!(
            FormRow::ExamContext.value(&seed, "기말").as_deref(),
            Some("기말")
        );
    }

    #[test]
    fn test_cursor_skips_headings() {
        let rows = form_rows(&ReportData::seed());
        let mut cursor = FormCursor::default();
        assert_eq!(cursor.current(&rows), Some(FormRow::ExamContext));
        cursor.down(&rows);
        cursor.down(&rows);
        assert_eq!(
            cursor.current(&rows),
            Some(FormRow::Text(TextField::ExamTitle))
        );
        cursor.up(&rows);
        assert_eq!(cursor.current(&rows), Some(FormRow::Upload));
    }

    #[test]
    fn test_cursor_clamped_after_shrink() {
        let seed = ReportData::seed();
        let rows = form_rows(&seed);
        let mut cursor = FormCursor::default();
        cursor.select(&rows, FormRow::Text(TextField::ParentMessage));

        let mut shorter = seed.clone();
        shorter.strengths.clear();
        shorter.weaknesses.clear();
        let rows = form_rows(&shorter);
        let row = cursor.current(&rows).unwrap();
        assert!(row.is_selectable());
    }
}
