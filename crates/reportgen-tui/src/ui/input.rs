//! Input box rendering with multi-line support.

use crate::input::InputState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Minimum height for an input box body (in lines).
pub const MIN_INPUT_HEIGHT: u16 = 1;

/// Maximum height for an input box as fraction of screen (50%).
pub const MAX_INPUT_FRACTION: f32 = 0.50;

/// Body height wanted for `input`, bounded by the screen.
pub fn calculate_input_height(input: &InputState, available_height: u16) -> u16 {
    let desired = if input.is_multiline() {
        // room to grow while typing
        input.line_count() as u16 + 2
    } else {
        1
    };
    let max_height = ((available_height as f32) * MAX_INPUT_FRACTION) as u16;
    desired.clamp(MIN_INPUT_HEIGHT, max_height.max(MIN_INPUT_HEIGHT))
}

/// Render the content of `input` into `area` and place the cursor.
pub fn render_input(input: &InputState, frame: &mut Frame, area: Rect) {
    let content = input.display();
    let (cursor_line, cursor_col) = input.cursor_position();

    // keep the cursor line visible
    let scroll = (cursor_line + 1).saturating_sub(area.height as usize);

    let lines: Vec<Line> = content
        .split('\n')
        .enumerate()
        .map(|(i, line_text)| {
            let prompt = if i == 0 { "> " } else { "  " };
            Line::from(vec![
                Span::styled(prompt, Style::default().fg(Color::Cyan)),
                Span::raw(line_text.to_string()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);

    // +2 for the prompt
    let cursor_x = area.x + 2 + cursor_col as u16;
    let cursor_y = area.y + (cursor_line - scroll) as u16;
    if cursor_x < area.x + area.width && cursor_y < area.y + area.height {
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_height() {
        let input = InputState::with_text("abc");
        assert_eq!(calculate_input_height(&input, 40), 1);
    }

    #[test]
    fn test_multiline_height_bounded() {
        let text = "line\n".repeat(50);
        let input = InputState::with_text(&text).multiline(true);
        assert_eq!(calculate_input_height(&input, 40), 20);
        let short = InputState::with_text("a\nb").multiline(true);
        assert_eq!(calculate_input_height(&short, 40), 4);
    }
}
