//! File path prompt for file questions

use super::base::{key_hint, render_dialog, DialogConfig};
use crate::state::TextInput;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

/// Render the path entry dialog for `question_title`
pub fn render_path_prompt(frame: &mut Frame, question_title: &str, input: &TextInput) {
    let field = Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::DarkGray)),
        Span::raw(input.value()),
        Span::styled("▌", Style::default().fg(Color::Cyan)),
    ]);
    let message = format!("{question_title}\n{}", input.label);

    render_dialog(
        frame,
        DialogConfig {
            title: "Attach file",
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            message: &message,
            input: Some(field),
            hint: Some(key_hint(&[("Enter", "attach"), ("Esc", "cancel")])),
            max_width: 72,
        },
    );
}
