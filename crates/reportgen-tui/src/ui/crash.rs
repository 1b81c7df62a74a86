//! Fallback screen shown after a rendering fault.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use reportgen_domain::CrashReport;
use reportgen_domain::crash::{CRASH_MESSAGE, CRASH_TITLE, RECOVERY_ACTION};

use super::dialogs::centered_rect;

/// Replace the whole screen with the crash notice and its one action.
pub fn render_crash(fault: Option<&CrashReport>, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let panel = centered_rect(70, 60, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::vertical([
        Constraint::Length(2), // title
        Constraint::Length(2), // message
        Constraint::Min(3),    // diagnostic
        Constraint::Length(1), // action
    ])
    .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        CRASH_TITLE,
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let message = Paragraph::new(CRASH_MESSAGE).alignment(Alignment::Center);
    frame.render_widget(message, chunks[1]);

    let diagnostic = fault.map(CrashReport::diagnostic).unwrap_or_default();
    let diagnostic = Paragraph::new(diagnostic)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)))
        .wrap(Wrap { trim: false });
    frame.render_widget(diagnostic, chunks[2]);

    let action = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {RECOVERY_ACTION} "),
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Enter", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(action, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use reportgen_domain::CrashBoundary;

    #[test]
    fn test_crash_screen_shows_title_and_action() {
        let mut boundary = CrashBoundary::new();
        let _: Option<()> = boundary.guard(|| panic!("bad index"));

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| render_crash(boundary.fault(), frame))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|c| c.symbol()).collect();
        // wide glyphs occupy two cells; the second is blank
        let squashed: String = screen.chars().filter(|c| *c != ' ').collect();
        assert!(squashed.contains("오류가발생했습니다"));
        assert!(squashed.contains("badindex"));
    }
}
