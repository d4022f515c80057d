//! UI module for rendering the TUI

mod components;
mod html;
mod layout;
mod loading;
mod picker;
mod survey;
mod widgets;

use crate::app::App;
use crate::state::Prompt;
use components::{render_error_dialog, render_path_prompt};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, body_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    // Exactly one of the two regions is shown
    if app.is_loading() {
        let caption = if app.host.is_finished() {
            completion_caption(app)
        } else {
            "Loading...".to_string()
        };
        loading::draw(frame, body_area, &app.state.loading, &caption);
    } else {
        survey::draw(frame, body_area, app);
        draw_prompt(frame, app);
    }

    layout::draw_status_bar(frame, status_area, app);

    if let Some(message) = &app.state.error_message {
        render_error_dialog(frame, message);
    }
}

/// Plain text of the document's completion message
fn completion_caption(app: &App) -> String {
    let text = app
        .host
        .model()
        .definition()
        .completed_html
        .as_deref()
        .map(|html| {
            html::html_to_lines(html)
                .iter()
                .map(|line| line.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        "Thank you".to_string()
    } else {
        text
    }
}

fn draw_prompt(frame: &mut Frame, app: &App) {
    match &app.state.prompt {
        Prompt::None => {}
        Prompt::FilePath { question, input } => {
            let title = app
                .host
                .model()
                .definition()
                .question(question)
                .map(|q| q.display_title())
                .unwrap_or(question.as_str());
            render_path_prompt(frame, title, input);
        }
        Prompt::Picker(picker) => picker::draw(frame, app, picker),
    }
}
