//! Application state and core logic

use crate::choices::RestChoiceClient;
use crate::config::TuiConfig;
use crate::host::{HostTimings, SurveyHost};
use crate::state::{AppState, ChoicePicker, Prompt};
use crate::survey::{Advance, Element, ElementKind, NavigationError, SurveyDefinition};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::Path;
use std::sync::Arc;

/// Main application struct
pub struct App {
    /// The survey component; owns the single model instance
    pub host: SurveyHost,
    /// Front-end state
    pub state: AppState,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance and start loading remote choices
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let definition = SurveyDefinition::erat()?;
        let mut host = SurveyHost::new(definition, HostTimings::from(config));
        host.load_remote_choices(Arc::new(RestChoiceClient::new(config.countries_url())));
        Ok(Self::with_host(host))
    }

    pub fn with_host(host: SurveyHost) -> Self {
        Self {
            host,
            state: AppState::default(),
            quit: false,
        }
    }

    /// Apply background messages. Returns true if a redraw is needed.
    pub fn tick(&mut self) -> bool {
        let handled = self.host.process_messages();
        let phase_changed = self.state.observe_phase(self.host.phase());
        let count = self.questions_in_view().len();
        self.state.focus.clamp(count);
        handled || phase_changed
    }

    pub fn is_loading(&self) -> bool {
        self.host.phase().is_loading()
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    fn questions_in_view(&self) -> Vec<Element> {
        self.host
            .model()
            .questions_in_view()
            .into_iter()
            .cloned()
            .collect()
    }

    /// The question that has keyboard focus
    pub fn focused_question(&self) -> Option<Element> {
        self.questions_in_view()
            .into_iter()
            .nth(self.state.focus.question)
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Input is blocked while the survey is hidden
        if self.is_loading() {
            return Ok(());
        }

        if self.state.has_error() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.prompt {
            Prompt::FilePath { .. } => self.handle_file_prompt_key(key),
            Prompt::Picker(_) => self.handle_picker_key(key),
            Prompt::None => self.handle_survey_key(key),
        }
    }

    fn handle_survey_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let question_count = self.questions_in_view().len();

        match key.code {
            KeyCode::Char('n') if ctrl => self.next_page(),
            KeyCode::Char('p') if ctrl => self.prev_page(),
            KeyCode::PageDown => self.next_page(),
            KeyCode::PageUp => self.prev_page(),
            KeyCode::Down | KeyCode::Tab => self.state.focus.next_question(question_count),
            KeyCode::Up | KeyCode::BackTab => self.state.focus.prev_question(question_count),
            KeyCode::Right => {
                let choice_count = self
                    .focused_question()
                    .map(|q| self.host.model().choices(&q).len())
                    .unwrap_or(0);
                self.state.focus.next_choice(choice_count);
            }
            KeyCode::Left => self.state.focus.prev_choice(),
            KeyCode::Char(' ') => self.activate_choice(),
            KeyCode::Enter if question_count == 0 => self.next_page(),
            KeyCode::Enter => self.activate_question(),
            KeyCode::Backspace | KeyCode::Delete => self.clear_focused_file(),
            _ => {}
        }
        Ok(())
    }

    /// Select or toggle the focused choice of a radio group or checkbox
    fn activate_choice(&mut self) {
        let Some(question) = self.focused_question() else {
            return;
        };
        let is_multi = match question.kind {
            ElementKind::Radiogroup { .. } => false,
            ElementKind::Checkbox { .. } => true,
            _ => return self.activate_question(),
        };
        let choices = self.host.model().choices(&question);
        let Some(choice) = choices.get(self.state.focus.choice) else {
            return;
        };

        let model = self.host.model_mut();
        if is_multi {
            model.toggle_choice(&question.name, &choice.value);
        } else {
            model.select_choice(&question.name, &choice.value);
        }
    }

    /// Open the input appropriate for the focused question
    fn activate_question(&mut self) {
        let Some(question) = self.focused_question() else {
            return;
        };
        match question.kind {
            ElementKind::File { .. } => {
                self.state.prompt = Prompt::file_path(&question.name);
            }
            ElementKind::Dropdown { multi_select, .. } => {
                if self.host.model().choices(&question).is_empty() {
                    self.state.set_status("Choices are not available yet");
                    return;
                }
                self.state.prompt =
                    Prompt::Picker(ChoicePicker::new(&question.name, multi_select));
            }
            ElementKind::Radiogroup { .. } | ElementKind::Checkbox { .. } => {
                self.activate_choice();
            }
            _ => {}
        }
    }

    fn clear_focused_file(&mut self) {
        if let Some(question) = self.focused_question() {
            if matches!(question.kind, ElementKind::File { .. }) {
                self.host.model_mut().clear_value(&question.name);
                self.state.set_status(format!("Removed file from {}", question.display_title()));
            }
        }
    }

    fn handle_file_prompt_key(&mut self, key: KeyEvent) -> Result<()> {
        let Prompt::FilePath { question, input } = &mut self.state.prompt else {
            return Ok(());
        };

        match key.code {
            KeyCode::Esc => self.state.prompt = Prompt::None,
            KeyCode::Backspace => input.pop_char(),
            KeyCode::Char(c) => input.push_char(c),
            KeyCode::Enter => {
                if input.is_empty() {
                    return Ok(());
                }
                let question = question.clone();
                let path = input.value().trim().to_string();
                self.state.prompt = Prompt::None;
                self.upload(&question, Path::new(&path));
            }
            _ => {}
        }
        Ok(())
    }

    fn upload(&mut self, question: &str, path: &Path) {
        match self.host.upload_file(question, path) {
            Ok(()) => {
                tracing::info!("Attached {} to {question}", path.display());
                self.state.set_status(format!("Attached {}", path.display()));
            }
            Err(e) => {
                tracing::warn!("Upload to {question} rejected: {e}");
                self.state.push_error(e.to_string());
            }
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> Result<()> {
        let Prompt::Picker(picker) = &self.state.prompt else {
            return Ok(());
        };
        let Some(question) = self
            .host
            .model()
            .definition()
            .question(&picker.question)
            .cloned()
        else {
            self.state.prompt = Prompt::None;
            return Ok(());
        };
        let choices = self.host.model().choices(&question);
        let Prompt::Picker(picker) = &mut self.state.prompt else {
            return Ok(());
        };
        let filtered_count = picker.filtered(&choices).len();

        match key.code {
            KeyCode::Esc => self.state.prompt = Prompt::None,
            KeyCode::Down => picker.next(filtered_count),
            KeyCode::Up => picker.prev(),
            KeyCode::Backspace => picker.pop_filter(),
            KeyCode::Char(c) => picker.push_filter(c),
            KeyCode::Enter => {
                let Some(choice) = picker.filtered(&choices).get(picker.selected).copied() else {
                    return Ok(());
                };
                let multi = picker.multi;
                let value = choice.value.clone();
                if multi {
                    self.host.model_mut().toggle_choice(&question.name, &value);
                } else {
                    self.host.model_mut().select_choice(&question.name, &value);
                    self.state.prompt = Prompt::None;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn next_page(&mut self) {
        match self.host.next_page() {
            Ok(Advance::PageChanged(_)) => {
                self.state.reset_page();
                self.state.status_message = None;
            }
            Ok(Advance::Completed) => {
                self.state.reset_page();
                self.state.set_status("Assessment submitted");
            }
            Err(NavigationError::Invalid(report)) => {
                if let Some(first) = report.errors.first() {
                    if let Some(index) = self
                        .questions_in_view()
                        .iter()
                        .position(|q| q.name == first.question)
                    {
                        self.state.focus.question = index;
                        self.state.focus.choice = 0;
                    }
                }
                self.state.set_status(report.to_string());
                self.state.validation = report;
            }
            Err(e) => self.state.set_status(e.to_string()),
        }
    }

    fn prev_page(&mut self) {
        match self.host.prev_page() {
            Ok(_) => {
                self.state.reset_page();
                self.state.status_message = None;
            }
            Err(e) => self.state.set_status(e.to_string()),
        }
    }
}
