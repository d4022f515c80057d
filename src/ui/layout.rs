//! Layout components (header, status bar)

use crate::app::App;
use crate::state::Prompt;
use crate::survey::PageMode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Split the screen into header, body and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Page position shown in the header
fn page_indicator(app: &App) -> String {
    let model = app.host.model();
    if model.is_completed() {
        return "Submitted".to_string();
    }
    match model.mode() {
        PageMode::SinglePage => "Final questions".to_string(),
        PageMode::Paged => format!("Page {} of {}", model.current_page_no() + 1, model.page_count()),
    }
}

/// Draw the header with the survey title and page position
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = &app.host.model().definition().title;
    let indicator = page_indicator(app);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(indicator.chars().count() as u16 + 1),
        ])
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {title}"),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, chunks[0]);

    if !app.is_loading() {
        frame.render_widget(
            Paragraph::new(indicator).style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    spans.push(Span::styled(
        get_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        let color = if app.state.validation.is_empty() {
            Color::Green
        } else {
            Color::LightRed
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(color)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current input context
fn get_hints(app: &App) -> &'static str {
    if app.is_loading() {
        return if app.host.is_finished() {
            "Thank you"
        } else {
            "Please wait"
        };
    }
    if app.state.has_error() {
        return "Enter/Esc:dismiss";
    }
    match app.state.prompt {
        Prompt::FilePath { .. } => "type path  Enter:attach  Esc:cancel",
        Prompt::Picker(_) => "type to filter  ↑/↓:move  Enter:choose  Esc:close",
        Prompt::None => "↑/↓:question  ←/→:choice  Space:select  Enter:open  PgUp/PgDn:page",
    }
}
