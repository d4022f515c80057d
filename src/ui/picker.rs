//! Filterable choice picker for dropdown questions

use super::components::centered_rect;
use super::widgets::{choice_marker, render_scrollable_list};
use crate::app::App;
use crate::state::ChoicePicker;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

/// Draw the picker overlay
pub fn draw(frame: &mut Frame, app: &App, picker: &ChoicePicker) {
    let model = app.host.model();
    let Some(question) = model.definition().question(&picker.question) else {
        return;
    };
    let choices = model.choices(question);
    let filtered = picker.filtered(&choices);
    let selected_values = model.data().list(&picker.question);
    let single_value = model.data().text(&picker.question);

    let area = centered_rect(56, frame.area().height.saturating_sub(4), frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", question.display_title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Filter
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Choices
            Constraint::Length(1), // Hint
        ])
        .split(inner);

    let filter = Line::from(vec![
        Span::styled(
            format!("{}: ", picker.filter.label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(picker.filter.value()),
        Span::styled("▌", Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(Paragraph::new(filter), chunks[0]);

    if filtered.is_empty() {
        frame.render_widget(
            Paragraph::new("No matching choices").style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );
    } else {
        let items: Vec<ListItem> = filtered
            .iter()
            .map(|choice| {
                let is_selected = selected_values.iter().any(|v| *v == choice.value)
                    || single_value == Some(choice.value.as_str());
                ListItem::new(format!(
                    "{} {}",
                    choice_marker(is_selected, picker.multi),
                    choice.text
                ))
            })
            .collect();
        let list = List::new(items).highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::REVERSED),
        );
        render_scrollable_list(frame, chunks[2], list, picker.selected);
    }

    let hint = if picker.multi {
        format!("{} of {} shown  Enter:toggle  Esc:done", filtered.len(), choices.len())
    } else {
        format!("{} of {} shown  Enter:select  Esc:cancel", filtered.len(), choices.len())
    };
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}
