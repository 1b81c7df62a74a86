//! Modal overlays: notices, confirmations and prompts.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use reportgen_domain::Notice;

use super::input::{calculate_input_height, render_input};
use crate::input::InputState;

/// Centered rectangle taking the given percentages of `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Centered rectangle with a fixed height.
fn centered_band(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let y = area.y + (area.height - height) / 2;
    let band = Rect::new(area.x, y, area.width, height);
    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(band)[1]
}

fn hint(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Blocking message; any key closes it.
pub fn render_notice(notice: &Notice, frame: &mut Frame, area: Rect) {
    let color = if notice.is_error() {
        Color::Red
    } else {
        Color::Green
    };
    let lines = notice.message().lines().count() as u16;
    let overlay = centered_band(60, lines + 4, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(" 알림 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let mut text: Vec<Line> = notice
        .message()
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();
    text.push(Line::default());
    text.push(hint("아무 키나 눌러 닫기"));
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
}

/// Yes/no question.
pub fn render_confirm(prompt: &str, frame: &mut Frame, area: Rect) {
    let lines = prompt.lines().count() as u16;
    let overlay = centered_band(60, lines + 4, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(" 확인 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let mut text: Vec<Line> = prompt.lines().map(|l| Line::from(l.to_string())).collect();
    text.push(Line::default());
    text.push(Line::from(vec![
        Span::styled("y", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" 확인  ", Style::default().fg(Color::DarkGray)),
        Span::styled("n", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" 취소", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
}

/// Input box with a title and a footer hint.
pub fn render_prompt(
    title: &str,
    input: &InputState,
    footer: &str,
    frame: &mut Frame,
    area: Rect,
) {
    let body = calculate_input_height(input, area.height);
    // borders + footer
    let overlay = centered_band(70, body + 3, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
    render_input(input, frame, chunks[0]);
    frame.render_widget(Paragraph::new(hint(footer)), chunks[1]);
}
