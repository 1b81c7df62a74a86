//! Logs panel rendering.

use crate::logs::LogBuffer;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the logs panel.
pub fn render_logs_panel(
    log_buffer: &LogBuffer,
    scroll: usize,
    focused: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let entries = log_buffer.entries();

    let block = Block::default()
        .title(format!(" logs ({}) ", entries.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::DarkGray }));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if entries.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "  No log entries yet...",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(empty, inner);
        return;
    }

    // Format: HH:MM:SS [LEVEL] target: message key=value
    let lines: Vec<Line> = entries
        .iter()
        .map(|entry| {
            let mut spans = vec![
                Span::styled(
                    entry.time.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("[{}]", entry.level_prefix()),
                    Style::default()
                        .fg(entry.level_color())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}: ", entry.short_target()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(entry.message.clone()),
            ];
            if !entry.fields.is_empty() {
                spans.push(Span::styled(
                    format!(" {}", entry.fields),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let visible_height = inner.height as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    let actual_scroll = scroll.min(max_scroll);

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .skip(actual_scroll)
        .take(visible_height)
        .collect();

    let logs = Paragraph::new(visible_lines).wrap(Wrap { trim: false });
    frame.render_widget(logs, inner);
}

/// Render the logs footer with keyboard hints.
pub fn render_logs_footer(frame: &mut Frame, area: Rect) {
    let hint = Style::default().fg(Color::DarkGray);
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  ↑↓", hint),
        Span::styled(" scroll", hint),
        Span::styled(" │ ", hint),
        Span::styled("^C", hint),
        Span::styled(" clear", hint),
        Span::styled(" │ ", hint),
        Span::styled("esc", hint),
        Span::styled(" close", hint),
    ]));
    frame.render_widget(footer, area);
}
