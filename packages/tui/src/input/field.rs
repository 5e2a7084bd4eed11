use super::InputBuffer;

/// Labelled input on the login and signup forms
#[derive(Debug, Clone)]
pub struct TextField {
    pub label: &'static str,
    pub buffer: InputBuffer,
    /// Password-style masking
    pub mask: Option<char>,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            buffer: InputBuffer::new(),
            mask: None,
        }
    }

    pub fn masked(mut self) -> Self {
        self.mask = Some('*');
        self
    }

    pub fn value(&self) -> &str {
        self.buffer.content()
    }

    pub fn display(&self) -> String {
        self.buffer.display_text(self.mask)
    }
}

/// Index of the focused element in a vertical form, wrapping at both ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldFocus {
    index: usize,
    count: usize,
}

impl FieldFocus {
    pub fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        if self.count > 0 {
            self.index = (self.index + 1) % self.count;
        }
    }

    pub fn previous(&mut self) {
        if self.count > 0 {
            self.index = (self.index + self.count - 1) % self.count;
        }
    }

    pub fn set(&mut self, index: usize) {
        if index < self.count {
            self.index = index;
        }
    }
}
