//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_primary: bool,
    is_enabled: bool,
) {
    let border_style = if is_primary && is_enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_primary {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} "))
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render a page navigation button with its shortcut
pub fn render_nav_button(
    frame: &mut Frame,
    area: Rect,
    key: &str,
    label: &str,
    is_primary: bool,
    is_enabled: bool,
) {
    let content = format!("{label} ({key})");
    render_button(frame, area, &content, is_primary, is_enabled);
}

/// Columns a navigation button needs
pub fn nav_button_width(key: &str, label: &str) -> u16 {
    // label, " (", key, ")", padding and borders
    (label.chars().count() + key.chars().count() + 3 + 2 + 2) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_button_width() {
        assert_eq!(nav_button_width("PgDn", "Next"), 15);
    }
}
