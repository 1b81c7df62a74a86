//! Form pane rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use reportgen_domain::UploadState;

use crate::app::App;
use crate::form::FormRow;

/// Width of the label column.
const LABEL_WIDTH: usize = 22;

/// Text for the upload row.
pub fn upload_text(state: &UploadState) -> String {
    match state {
        UploadState::Reading { file } => format!("분석 중... {file}"),
        UploadState::AwaitingAi { file, media_type } => {
            format!("분석 중... {file} ({media_type})")
        }
        UploadState::Idle { dragging: true } => "여기에 놓으세요".to_string(),
        UploadState::Idle { dragging: false } => {
            "시험지 파일 업로드 (이미지, PDF) · Enter 또는 경로 붙여넣기".to_string()
        }
    }
}

/// First line of `value`, marked when more lines follow.
fn first_line(value: &str) -> String {
    let mut lines = value.lines();
    let first = lines.next().unwrap_or("");
    if lines.next().is_some() {
        format!("{first} …")
    } else {
        first.to_string()
    }
}

fn pad(label: &str) -> String {
    let width = Span::raw(label).width();
    format!("{label}{}", " ".repeat(LABEL_WIDTH.saturating_sub(width)))
}

fn row_line(app: &App, row: FormRow, selected: bool) -> Line<'static> {
    let data = app.data();
    let base = if selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    match row {
        FormRow::Heading(title) => Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        FormRow::Upload => {
            let state = app.services().analysis().upload().state();
            let color = if state.is_idle() && !state.is_dragging() {
                Color::Gray
            } else {
                Color::Yellow
            };
            Line::from(Span::styled(format!("  {}", upload_text(&state)), base.fg(color)))
        }
        FormRow::Append(_) => Line::from(Span::styled(
            format!("  {}", row.label(data)),
            base.fg(Color::Green),
        )),
        _ => {
            let value = row.value(data, &app.exam_context).unwrap_or_default();
            let mut spans = vec![
                Span::styled(format!("  {}", pad(&row.label(data))), base.fg(Color::Gray)),
                Span::styled(first_line(&value), base),
            ];
            if let Some(stepper) = row.stepper(data) {
                spans.push(Span::styled(
                    format!("  [{}–{}]", stepper.min, stepper.max),
                    base.fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        }
    }
}

/// Render the form pane.
pub fn render_form(app: &App, frame: &mut Frame, area: Rect) {
    let title = if app.is_generating() {
        " 입력 · 분석글 생성 중... ".to_string()
    } else {
        " 입력 · ^G 현재 데이터로 분석글 재생성 ".to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = app.rows();
    let selected = app.cursor.selected().min(rows.len().saturating_sub(1));
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| row_line(app, *row, i == selected))
        .collect();

    // keep the selection on screen
    let height = inner.height as usize;
    let scroll = (selected + 1).saturating_sub(height);

    let form = Paragraph::new(lines).scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(form, inner);
}
