//! Main layout rendering.

use crate::app::{App, Mode};
use crate::ui::dialogs::{render_confirm, render_notice, render_prompt};
use crate::ui::form::render_form;
use crate::ui::logs::{render_logs_footer, render_logs_panel};
use crate::ui::preview::render_preview;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use reportgen_domain::ViewMode;
use reportgen_render::ReportDocument;

/// Render the entire application UI.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let (main_area, logs_area) = if app.show_logs {
        let chunks = Layout::horizontal([
            Constraint::Min(40),        // Main area (minimum width)
            Constraint::Percentage(35), // Logs panel
        ])
        .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Body
        Constraint::Length(1), // Status bar
    ])
    .split(main_area);

    render_header(app, frame, chunks[0]);
    render_body(app, frame, chunks[1]);
    render_status_bar(app, frame, chunks[2]);

    if let Some(logs_area) = logs_area {
        let logs_chunks = Layout::vertical([
            Constraint::Min(3),    // Logs content
            Constraint::Length(1), // Footer
        ])
        .split(logs_area);

        let focused = matches!(app.mode, Mode::Logs);
        render_logs_panel(&app.log_buffer, app.log_scroll, focused, frame, logs_chunks[0]);
        render_logs_footer(frame, logs_chunks[1]);
    }

    render_overlay(app, frame, area);
}

/// Render the header bar.
fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Span::styled(
        " Smart Report Gen ",
        Style::default().add_modifier(Modifier::BOLD),
    );
    let subtitle = Span::styled("AI 성적 분석 리포트 ", Style::default().fg(Color::DarkGray));

    let view = app.workbench().view();
    let tab = |mode: ViewMode| {
        let style = if view == mode {
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!(" {} ", mode.label()), style)
    };
    let split = tab(ViewMode::Split);
    let preview = tab(ViewMode::Preview);

    let left_width = title.width() + subtitle.width();
    let right_width = split.width() + preview.width() + 1;
    let spacer_width = (area.width as usize).saturating_sub(left_width + right_width);
    let spacer = Span::raw("─".repeat(spacer_width));

    let line = Line::from(vec![title, subtitle, spacer, split, Span::raw(" "), preview]);
    let header = Paragraph::new(line).style(Style::default().fg(Color::Cyan));
    frame.render_widget(header, area);
}

/// Render the form and/or the preview.
fn render_body(app: &App, frame: &mut Frame, area: Rect) {
    let doc = ReportDocument::build(app.data());
    match app.workbench().view() {
        ViewMode::Split => {
            let chunks = Layout::horizontal([
                Constraint::Percentage(45), // Form
                Constraint::Percentage(55), // Preview
            ])
            .split(area);
            render_form(app, frame, chunks[0]);
            render_preview(&doc, app.preview_scroll, frame, chunks[1]);
        }
        ViewMode::Preview => render_preview(&doc, app.preview_scroll, frame, area),
    }
}

/// Key hints for the current mode.
fn hints(app: &App) -> &'static str {
    match &app.mode {
        Mode::Normal if app.workbench().view() == ViewMode::Preview => {
            "↑↓ scroll │ Tab 입력+미리보기 │ ^P 이미지 │ ^S 저장 │ ^Q quit"
        }
        Mode::Normal => {
            "↑↓ move │ Enter edit │ +/- step │ a add │ d delete │ ^G AI │ ^O 시험지 │ ^S 저장 │ ^I 불러오기 │ ^P 이미지 │ ^N 다음 학생 │ ^R 초기화 │ Tab view │ ^L logs │ ^K key │ ^Q quit"
        }
        Mode::Edit { input, .. } if input.is_multiline() => {
            "Enter newline │ ^S save │ Esc cancel"
        }
        Mode::Edit { .. } | Mode::Path { .. } | Mode::Credential(_) => "Enter save │ Esc cancel",
        Mode::Confirm(_) => "y confirm │ n cancel",
        Mode::Logs => "↑↓ scroll │ ^C clear │ Esc close",
    }
}

/// Render the status bar.
fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let left_text = app
        .status_message
        .clone()
        .unwrap_or_else(|| hints(app).to_string());

    let mut right_spans: Vec<Span> = Vec::new();
    if app.is_generating() {
        right_spans.push(Span::styled(" 분석글 생성 중... ", Style::default().fg(Color::Yellow)));
    }
    if !app.services().analysis().upload().state().is_idle() {
        right_spans.push(Span::styled(" 시험지 분석 중... ", Style::default().fg(Color::Yellow)));
    }
    if app.is_exporting_image() {
        right_spans.push(Span::styled(" 이미지 저장 중... ", Style::default().fg(Color::Yellow)));
    }
    match app.workbench().credential() {
        Some(credential) => right_spans.push(Span::styled(
            format!(" key: {} ", credential.source),
            Style::default().fg(Color::DarkGray),
        )),
        None => right_spans.push(Span::styled(" no key ", Style::default().fg(Color::Red))),
    }

    let right_width: usize = right_spans.iter().map(|s| s.width()).sum();
    let left_max = (area.width as usize).saturating_sub(right_width + 1);
    let left: String = truncate_to_width(&left_text, left_max);
    let padding = (area.width as usize).saturating_sub(Span::raw(left.as_str()).width() + right_width);

    let mut spans = vec![
        Span::styled(left, Style::default().fg(Color::DarkGray)),
        Span::raw(" ".repeat(padding)),
    ];
    spans.extend(right_spans);
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Longest prefix of `text` fitting in `width` cells.
fn truncate_to_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let mut buf = [0u8; 4];
        let w = Span::raw(&*c.encode_utf8(&mut buf)).width();
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Render the active modal, if any. Notices sit above everything else.
fn render_overlay(app: &App, frame: &mut Frame, area: Rect) {
    match &app.mode {
        Mode::Edit { row, input } => {
            let title = row.label(app.data());
            render_prompt(&title, input, hints(app), frame, area);
        }
        Mode::Credential(input) => render_prompt(
            "Gemini API Key 입력",
            input,
            "Enter 저장 │ Esc 나중에",
            frame,
            area,
        ),
        Mode::Path { purpose, input } => {
            render_prompt(purpose.title(), input, hints(app), frame, area)
        }
        Mode::Confirm(confirmation) => render_confirm(confirmation.prompt(), frame, area),
        Mode::Normal | Mode::Logs => {}
    }

    if let Some(notice) = &app.notice {
        render_notice(notice, frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
        assert_eq!(truncate_to_width("가나다", 5), "가나");
        assert_eq!(truncate_to_width("", 5), "");
    }
}
