//! Loading region: logo and animated dots

use crate::state::LoadingAnimation;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LOGO: [&str; 6] = [
    "███████╗██████╗  █████╗ ████████╗",
    "██╔════╝██╔══██╗██╔══██╗╚══██╔══╝",
    "█████╗  ██████╔╝███████║   ██║   ",
    "██╔══╝  ██╔══██╗██╔══██║   ██║   ",
    "███████╗██║  ██║██║  ██║   ██║   ",
    "╚══════╝╚═╝  ╚═╝╚═╝  ╚═╝   ╚═╝   ",
];

/// Width of the logo in columns
pub const LOGO_WIDTH: u16 = 33;

/// The ERAT logo, also used for image elements
pub fn logo_lines() -> Vec<Line<'static>> {
    let style = Style::default().fg(Color::Cyan);
    LOGO.iter()
        .map(|row| Line::from(Span::styled(*row, style)))
        .collect()
}

/// Blend from dim gray to cyan
fn dot_color(intensity: f32) -> Color {
    let t = intensity.clamp(0.0, 1.0);
    let lerp = |from: f32, to: f32| (from + (to - from) * t).round() as u8;
    Color::Rgb(lerp(60.0, 0.0), lerp(60.0, 215.0), lerp(60.0, 215.0))
}

fn dots_line(animation: &LoadingAnimation) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, intensity) in animation.intensities().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled("●", Style::default().fg(dot_color(intensity))));
    }
    Line::from(spans)
}

/// Draw the loading region centered in `area`
pub fn draw(frame: &mut Frame, area: Rect, animation: &LoadingAnimation, caption: &str) {
    let mut lines = logo_lines();
    lines.push(Line::from(""));
    lines.push(dots_line(animation));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        caption.to_string(),
        Style::default().fg(Color::DarkGray),
    )));

    let height = lines.len() as u16;
    let width = LOGO_WIDTH.max(caption.chars().count() as u16);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;

    let block_area = Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    };

    let paragraph = Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, block_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_rows_share_width() {
        for row in LOGO {
            assert_eq!(row.chars().count(), LOGO_WIDTH as usize);
        }
    }

    #[test]
    fn test_dot_color_endpoints() {
        assert_eq!(dot_color(0.0), Color::Rgb(60, 60, 60));
        assert_eq!(dot_color(1.0), Color::Rgb(0, 215, 215));
        assert_eq!(dot_color(2.0), dot_color(1.0));
    }
}
