//! Single-line query input with cursor handling and placeholder text.

use crate::ui::theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

/// A single-line text input.
///
/// Cursor positions are character indices, so multi-byte input edits
/// correctly. Scrolls horizontally when content exceeds the visible width.
#[derive(Debug, Clone, Default)]
pub struct InputBox {
    content: String,
    /// Cursor position as a character index into `content`.
    cursor: usize,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte offset of the given character index.
    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Render inside a bordered block, showing `placeholder` dimmed when
    /// the input is empty.
    pub fn render(&self, area: Rect, buf: &mut Buffer, placeholder: &str, focused: bool) {
        let border_color = if focused {
            theme::COLOR_ACCENT
        } else {
            theme::COLOR_BORDER
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let width = inner.width as usize;

        if self.content.is_empty() {
            let visible: String = placeholder.chars().take(width).collect();
            buf.set_string(
                inner.x,
                inner.y,
                visible,
                Style::default().fg(theme::COLOR_DIM),
            );
        } else {
            // Keep the cursor in view.
            let scroll = self.cursor.saturating_sub(width.saturating_sub(1));
            let visible: String = self.content.chars().skip(scroll).take(width).collect();
            buf.set_string(
                inner.x,
                inner.y,
                visible,
                Style::default().fg(theme::COLOR_TEXT),
            );

            if focused {
                let cursor_x = (self.cursor - scroll) as u16;
                if cursor_x < inner.width {
                    let under = self.content.chars().nth(self.cursor).unwrap_or(' ');
                    buf.set_string(
                        inner.x + cursor_x,
                        inner.y,
                        under.to_string(),
                        Style::default()
                            .fg(theme::COLOR_BG)
                            .bg(theme::COLOR_ACCENT)
                            .add_modifier(Modifier::BOLD),
                    );
                }
            }
        }

        // Cursor block at end-of-text for the empty case.
        if focused && self.content.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                " ",
                Style::default().bg(theme::COLOR_ACCENT),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let input = InputBox::new();
        assert!(input.is_empty());
        assert_eq!(input.content(), "");
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut input = InputBox::new();
        input.insert_char('a');
        input.insert_char('b');
        assert_eq!(input.content(), "ab");
        input.backspace();
        assert_eq!(input.content(), "a");
    }

    #[test]
    fn test_insert_mid_content() {
        let mut input = InputBox::new();
        input.set_content("ac");
        input.move_left();
        input.insert_char('b');
        assert_eq!(input.content(), "abc");
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut input = InputBox::new();
        input.set_content("abc");
        input.move_home();
        input.delete_char();
        assert_eq!(input.content(), "bc");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = InputBox::new();
        input.set_content("x");
        input.move_home();
        input.move_left();
        input.insert_char('y');
        assert_eq!(input.content(), "yx");

        input.move_end();
        input.move_right();
        input.insert_char('z');
        assert_eq!(input.content(), "yxz");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputBox::new();
        input.insert_char('π');
        input.insert_char('r');
        input.insert_char('²');
        assert_eq!(input.content(), "πr²");
        input.backspace();
        assert_eq!(input.content(), "πr");
        input.move_home();
        input.delete_char();
        assert_eq!(input.content(), "r");
    }

    #[test]
    fn test_clear() {
        let mut input = InputBox::new();
        input.set_content("Fourier Series");
        input.clear();
        assert!(input.is_empty());
    }
}
