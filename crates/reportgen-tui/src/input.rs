//! Text editing state for field editors and prompts.

use ratatui::text::Span;

/// Text under edit with a cursor.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current content.
    content: String,
    /// Cursor position (byte offset).
    cursor: usize,
    /// Whether Enter inserts a newline instead of submitting.
    multiline: bool,
    /// Whether the content is shown as bullets.
    masked: bool,
}

impl InputState {
    /// Create an empty single-line input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `text` with the cursor at the end.
    pub fn with_text(text: &str) -> Self {
        Self {
            content: text.to_string(),
            cursor: text.len(),
            ..Self::default()
        }
    }

    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    /// Hide the content, e.g. for a credential.
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Content as it should be drawn.
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.content.chars().count())
        } else {
            self.content.clone()
        }
    }

    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    /// Cursor line and display column (wide characters count double).
    pub fn cursor_position(&self) -> (usize, usize) {
        let safe_cursor = self.cursor.min(self.content.len());
        let before_cursor = &self.content[..safe_cursor];
        let line = before_cursor.matches('\n').count();
        let line_start = before_cursor.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = if self.masked {
            before_cursor[line_start..].chars().count()
        } else {
            Span::raw(&before_cursor[line_start..]).width()
        };
        (line, column)
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text. Newlines are dropped in single-line inputs.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| *c != '\r') {
            self.insert_char(c);
        }
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Backspace.
    pub fn delete_char_before(&mut self) {
        if self.cursor > 0 {
            let prev_char_start = self.content[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.content.remove(prev_char_start);
            self.cursor = prev_char_start;
        }
    }

    /// Delete.
    pub fn delete_char_at(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.content[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.len() {
            self.cursor = self.content[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.content.len());
        }
    }

    pub fn move_to_line_start(&mut self) {
        let before_cursor = &self.content[..self.cursor];
        self.cursor = before_cursor.rfind('\n').map(|i| i + 1).unwrap_or(0);
    }

    pub fn move_to_line_end(&mut self) {
        let after_cursor = &self.content[self.cursor..];
        self.cursor = after_cursor
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.content.len());
    }

    /// Take the content, leaving the input empty.
    pub fn submit(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_input() {
        let mut input = InputState::new();
        assert!(input.is_empty());

        input.insert_char('h');
        input.insert_char('i');
        assert_eq!(input.content(), "hi");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_korean_cursor_column() {
        let mut input = InputState::with_text("김단우");
        assert_eq!(input.cursor(), "김단우".len());
        assert_eq!(input.cursor_position(), (0, 6));

        input.move_left();
        input.delete_char_before();
        assert_eq!(input.content(), "김우");
        assert_eq!(input.cursor_position(), (0, 2));
    }

    #[test]
    fn test_single_line_drops_newlines() {
        let mut input = InputState::new();
        input.insert_str("/tmp/a\r\nb.png");
        assert_eq!(input.content(), "/tmp/ab.png");
        input.insert_newline();
        assert_eq!(input.line_count(), 1);
    }

    #[test]
    fn test_multiline() {
        let mut input = InputState::new().multiline(true);
        input.insert_char('a');
        input.insert_newline();
        input.insert_char('b');

        assert_eq!(input.content(), "a\nb");
        assert_eq!(input.line_count(), 2);
        assert_eq!(input.cursor_position(), (1, 1));

        input.move_to_line_start();
        assert_eq!(input.cursor_position(), (1, 0));
        input.move_to_line_end();
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_masked_display() {
        let mut input = InputState::new().masked();
        input.insert_str("secret");
        assert_eq!(input.display(), "••••••");
        assert_eq!(input.cursor_position(), (0, 6));
        assert_eq!(input.submit(), "secret");
        assert!(input.is_empty());
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut input = InputState::with_text("abc");
        input.move_left();
        input.move_left();
        input.delete_char_at();
        assert_eq!(input.content(), "ac");
        input.move_right();
        assert_eq!(input.cursor(), 2);
    }
}
