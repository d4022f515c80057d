//! Single-line text input used by prompts

/// Editable text value with a label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub label: String,
    value: String,
}

impl TextInput {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Push a character to the value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character from the value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}
