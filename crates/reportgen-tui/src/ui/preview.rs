//! Report preview rendering.
//!
//! Draws the same [`ReportDocument`] the HTML export uses, so percentages
//! and section presence match the saved image.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use reportgen_render::document::{FOOTER_NOTE, REPORT_SUBTITLE, headings};
use reportgen_render::{RateRow, ReportDocument};

/// Width of a percentage bar in cells.
const BAR_WIDTH: usize = 20;

/// `████░░░░` filled to `percent` of [`BAR_WIDTH`].
pub fn bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH).div_ceil(100);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn heading(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn sub_heading(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

fn paragraph(lines: &mut Vec<Line<'static>>, text: &str) {
    for line in text.split('\n') {
        lines.push(Line::from(line.to_string()));
    }
}

fn rate_lines(lines: &mut Vec<Line<'static>>, rows: &[RateRow], color: Color) {
    for row in rows {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", row.label),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} / {} 문제 ", row.correct, row.total),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(bar(row.bar_percent()), Style::default().fg(color)),
            Span::styled(
                format!(" {}%", row.percent),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
    }
}

/// All preview lines for `doc`, top to bottom.
pub fn preview_lines(doc: &ReportDocument) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            doc.exam_title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        sub_heading(REPORT_SUBTITLE),
        Line::from(vec![
            Span::styled(
                format!("{}점", doc.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::raw(doc.student_line()),
        ]),
        Line::default(),
        heading(&format!("🏆 {}", headings::SUMMARY)),
    ];
    paragraph(&mut lines, &doc.summary);

    lines.push(Line::default());
    lines.push(heading(&format!("🎯 {}", headings::RATES)));
    lines.push(sub_heading(headings::DIFFICULTY));
    rate_lines(&mut lines, &doc.difficulty_rows, Color::Blue);
    lines.push(sub_heading(headings::QUESTION_TYPE));
    rate_lines(&mut lines, &doc.question_type_rows, Color::Magenta);

    lines.push(Line::default());
    lines.push(heading(&format!("📊 {}", headings::ASSESSMENT)));
    for row in &doc.assessment_rows {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", row.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} / {}점 ", row.earned, row.max),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(bar(row.bar_percent()), Style::default().fg(Color::Green)),
            Span::raw(format!(" {}%", row.percent)),
        ]));
    }
    lines.push(sub_heading(headings::ASSESSMENT_NOTE));

    lines.push(Line::default());
    lines.push(heading(&format!("💡 {}", headings::DIFFICULTY_ANALYSIS)));
    paragraph(&mut lines, &doc.difficulty_analysis);

    lines.push(Line::default());
    lines.push(heading(&format!("📈 {}", headings::RADAR)));
    for axis in &doc.radar_axes {
        let percent = (axis.ratio * 100.0).round() as u32;
        lines.push(Line::from(vec![
            Span::raw(format!(" {} ", axis.subject)),
            Span::styled(bar(percent), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!(" {} / {}", axis.student, axis.full_mark),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    paragraph(&mut lines, &doc.radar_analysis);

    if let Some(answers) = &doc.incorrect_answers {
        lines.push(Line::default());
        lines.push(heading(&format!("✖ {}", headings::INCORRECT)));
        let [number, topic, reason, solution] = headings::INCORRECT_COLUMNS;
        for answer in answers {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {number} {} ", answer.question_number),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{topic}: {}", answer.topic),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            lines.push(Line::from(format!("   {reason}: {}", answer.reason)));
            lines.push(Line::from(Span::styled(
                format!("   {solution}: {}", answer.solution),
                Style::default().fg(Color::Green),
            )));
        }
    }

    lines.push(Line::default());
    lines.push(heading(&format!("📚 {}", headings::DIRECTION)));
    lines.push(sub_heading(&format!("✨ {}", headings::STRENGTHS)));
    for item in &doc.strengths {
        lines.push(Line::from(format!(" • {item}")));
    }
    lines.push(sub_heading(&format!("🎯 {}", headings::WEAKNESSES)));
    for item in &doc.weaknesses {
        lines.push(Line::from(format!(" • {item}")));
    }
    lines.push(sub_heading(&format!("💌 {}", headings::PARENT_MESSAGE)));
    paragraph(&mut lines, &doc.parent_message);

    lines.push(Line::default());
    lines.push(sub_heading(&doc.footer));
    lines.push(sub_heading(FOOTER_NOTE));
    lines
}

/// Render the preview pane.
pub fn render_preview(doc: &ReportDocument, scroll: usize, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" 미리보기 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = preview_lines(doc);
    let max_scroll = lines.len().saturating_sub(inner.height as usize);
    let scroll = scroll.min(max_scroll);

    let preview = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(preview, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportgen_types::ReportData;

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_bar_fill() {
        assert_eq!(bar(0), "░".repeat(BAR_WIDTH));
        assert_eq!(bar(100), "█".repeat(BAR_WIDTH));
        assert_eq!(bar(250), "█".repeat(BAR_WIDTH));
        assert_eq!(bar(50).chars().filter(|c| *c == '█').count(), 10);
    }

    #[test]
    fn test_seed_preview_shows_rates() {
        let doc = ReportDocument::build(&ReportData::seed());
        let lines = text(&preview_lines(&doc));
        assert!(lines.iter().any(|l| l.contains("중") && l.contains("6 / 7 문제") && l.ends_with("86%")));
        assert!(lines.iter().any(|l| l == "88점  김단우 학생"));
        assert!(lines.iter().any(|l| l.contains(headings::INCORRECT)));
    }

    #[test]
    fn test_empty_incorrect_section_omitted() {
        let data = ReportData {
            incorrect_answers: vec![],
            ..ReportData::seed()
        };
        let lines = text(&preview_lines(&ReportDocument::build(&data)));
        assert!(!lines.iter().any(|l| l.contains(headings::INCORRECT)));
    }

    #[test]
    fn test_blank_analysis_fallbacks() {
        let data = ReportData {
            difficulty_analysis: String::new(),
            radar_analysis: String::new(),
            ..ReportData::seed()
        };
        let lines = text(&preview_lines(&ReportDocument::build(&data)));
        assert!(lines.iter().any(|l| l == "난이도 분석 정보가 없습니다."));
        assert!(lines.iter().any(|l| l == "역량 분석 데이터가 없습니다."));
    }
}
