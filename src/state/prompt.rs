//! Modal prompts opened from a question

use super::text_input::TextInput;
use crate::survey::Choice;

/// Filterable choice list for dropdown questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicePicker {
    pub question: String,
    pub multi: bool,
    pub filter: TextInput,
    /// Index into the filtered list
    pub selected: usize,
}

impl ChoicePicker {
    pub fn new(question: &str, multi: bool) -> Self {
        Self {
            question: question.to_string(),
            multi,
            filter: TextInput::new("Filter"),
            selected: 0,
        }
    }

    /// Choices whose label contains the filter text, ignoring case
    pub fn filtered<'a>(&self, choices: &'a [Choice]) -> Vec<&'a Choice> {
        let needle = self.filter.value().trim().to_lowercase();
        choices
            .iter()
            .filter(|c| needle.is_empty() || c.text.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn push_filter(&mut self, c: char) {
        self.filter.push_char(c);
        self.selected = 0;
    }

    pub fn pop_filter(&mut self) {
        self.filter.pop_char();
        self.selected = 0;
    }

    pub fn next(&mut self, count: usize) {
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// The prompt currently capturing input, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Prompt {
    #[default]
    None,
    /// Path entry for a file question
    FilePath { question: String, input: TextInput },
    /// Choice list for a dropdown question
    Picker(ChoicePicker),
}

impl Prompt {
    pub fn file_path(question: &str) -> Self {
        Prompt::FilePath {
            question: question.to_string(),
            input: TextInput::new("Path to image (JPEG or PNG, max 1 MB)"),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Prompt::None)
    }
}
