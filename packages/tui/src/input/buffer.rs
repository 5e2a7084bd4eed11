use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Single-line text buffer with a grapheme-aware cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    content: String,
    /// Byte index into `content`, always on a grapheme boundary
    cursor_position: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Length in graphemes, not bytes
    pub fn len(&self) -> usize {
        self.content.graphemes(true).count()
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor_position = 0;
    }

    /// Replace the content and park the cursor at the end
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.cursor_position = self.content.len();
    }

    pub fn insert_char(&mut self, ch: char) {
        // Single-line buffer
        if ch == '\n' || ch == '\r' {
            return;
        }
        self.content.insert(self.cursor_position, ch);
        self.cursor_position += ch.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.insert_char(ch);
        }
    }

    /// Delete key
    pub fn delete_char(&mut self) -> bool {
        let Some((start, grapheme)) = self
            .content
            .grapheme_indices(true)
            .find(|(idx, _)| *idx >= self.cursor_position)
        else {
            return false;
        };
        let end = start + grapheme.len();
        self.content.drain(start..end);
        true
    }

    /// Backspace key
    pub fn backspace(&mut self) -> bool {
        let Some((start, grapheme)) = self
            .content
            .grapheme_indices(true)
            .take_while(|(idx, _)| *idx < self.cursor_position)
            .last()
        else {
            return false;
        };
        let end = start + grapheme.len();
        self.content.drain(start..end);
        self.cursor_position = start;
        true
    }

    pub fn move_left(&mut self) -> bool {
        match self
            .content
            .grapheme_indices(true)
            .take_while(|(idx, _)| *idx < self.cursor_position)
            .last()
        {
            Some((start, _)) => {
                self.cursor_position = start;
                true
            }
            None => false,
        }
    }

    pub fn move_right(&mut self) -> bool {
        match self
            .content
            .grapheme_indices(true)
            .find(|(idx, _)| *idx >= self.cursor_position)
        {
            Some((start, grapheme)) => {
                self.cursor_position = start + grapheme.len();
                true
            }
            None => false,
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor_position = self.content.len();
    }

    /// Text as it should appear on screen, one `mask` per grapheme when set
    pub fn display_text(&self, mask: Option<char>) -> String {
        match mask {
            Some(mask) => std::iter::repeat(mask).take(self.len()).collect(),
            None => self.content.clone(),
        }
    }

    /// Terminal column of the cursor, accounting for wide characters
    pub fn cursor_display_column(&self, mask: Option<char>) -> u16 {
        let before = &self.content[..self.cursor_position];
        let width = match mask {
            Some(_) => before.graphemes(true).count(),
            None => before.width(),
        };
        width.min(u16::MAX as usize) as u16
    }
}
