//! Survey region rendering

use super::components::{nav_button_width, render_nav_button, BUTTON_HEIGHT};
use super::html::{html_to_lines, wrap_lines};
use super::loading::logo_lines;
use super::widgets::choice_marker;
use crate::app::App;
use crate::survey::{Element, ElementKind, SurveyModel};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw the pages in view and the navigation buttons
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Page content
            Constraint::Length(BUTTON_HEIGHT), // Navigation
        ])
        .split(area);

    let body = chunks[0].inner(Margin {
        horizontal: 2,
        vertical: 1,
    });
    let (lines, focus_line) = build_lines(app, body.width as usize);
    let scroll = scroll_offset(focus_line, lines.len(), body.height as usize);

    frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), body);
    draw_buttons(frame, chunks[1], app);
}

/// Scroll so the focused question sits in the upper third of the view
fn scroll_offset(focus_line: Option<usize>, total: usize, height: usize) -> usize {
    if total <= height {
        return 0;
    }
    let Some(focus) = focus_line else {
        return 0;
    };
    focus.saturating_sub(height / 3).min(total - height)
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App) {
    let model = app.host.model();
    let definition = model.definition();
    let completes = model.is_single_page() || model.is_last_page();

    let back_label = definition.page_prev_text.as_str();
    let next_label = if completes {
        definition.complete_text.as_str()
    } else if model.is_first_page() {
        definition
            .start_survey_text
            .as_deref()
            .unwrap_or(&definition.page_next_text)
    } else {
        definition.page_next_text.as_str()
    };
    let back_enabled = !model.is_single_page() && !model.is_first_page();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(nav_button_width("PgUp", back_label)),
            Constraint::Min(0),
            Constraint::Length(nav_button_width("PgDn", next_label)),
            Constraint::Length(2),
        ])
        .split(area);

    if back_enabled {
        render_nav_button(frame, chunks[1], "PgUp", back_label, false, true);
    }
    render_nav_button(frame, chunks[3], "PgDn", next_label, true, true);
}

/// Accumulates rendered lines and remembers where the focused question starts
struct PageLines<'a> {
    app: &'a App,
    model: &'a SurveyModel,
    focused: Option<String>,
    width: usize,
    lines: Vec<Line<'static>>,
    focus_line: Option<usize>,
}

fn build_lines(app: &App, width: usize) -> (Vec<Line<'static>>, Option<usize>) {
    let model = app.host.model();
    let mut page = PageLines {
        app,
        model,
        focused: app.focused_question().map(|q| q.name),
        width,
        lines: Vec::new(),
        focus_line: None,
    };

    let definition = model.definition();
    if model.is_first_page() && !model.is_single_page() && !definition.description.is_empty() {
        page.push(
            Line::from(Span::styled(
                definition.description.clone(),
                Style::default().fg(Color::Gray),
            )),
            0,
        );
        page.blank();
    }

    for (i, page_index) in model.pages_in_view().into_iter().enumerate() {
        let Some(page_def) = definition.pages.get(page_index) else {
            continue;
        };
        if i > 0 {
            page.lines.push(Line::from(Span::styled(
                "─".repeat(width),
                Style::default().fg(Color::DarkGray),
            )));
            page.blank();
        }
        if let Some(title) = &page_def.title {
            page.push(
                Line::from(Span::styled(
                    title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                0,
            );
            page.blank();
        }
        page.elements(&page_def.elements, 0);
    }

    while page.lines.last().is_some_and(|l| l.width() == 0) {
        page.lines.pop();
    }
    (page.lines, page.focus_line)
}

impl PageLines<'_> {
    fn push(&mut self, line: Line<'static>, depth: usize) {
        let indent = "  ".repeat(depth);
        let mut spans = vec![Span::raw(indent)];
        spans.extend(line.spans);
        self.lines
            .extend(wrap_lines(vec![Line::from(spans)], self.width));
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| l.width() > 0) {
            self.lines.push(Line::from(""));
        }
    }

    fn elements(&mut self, elements: &[Element], depth: usize) {
        for element in elements {
            if !self.model.is_element_visible(element) {
                continue;
            }
            match &element.kind {
                ElementKind::Html { html } => {
                    for line in html_to_lines(html) {
                        self.push(line, depth);
                    }
                    self.blank();
                }
                ElementKind::Image { .. } => {
                    for line in logo_lines() {
                        self.push(line, depth);
                    }
                    self.blank();
                }
                ElementKind::Panel { elements } => {
                    if let Some(title) = &element.title {
                        self.push(
                            Line::from(Span::styled(
                                title.clone(),
                                Style::default().add_modifier(Modifier::BOLD),
                            )),
                            depth,
                        );
                    }
                    self.elements(elements, depth + 1);
                }
                _ => self.question(element, depth),
            }
        }
    }

    fn question(&mut self, question: &Element, depth: usize) {
        let is_focused = self.focused.as_deref() == Some(question.name.as_str());
        if is_focused {
            self.focus_line = Some(self.lines.len());
        }

        let title_style = if is_focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let mut title = vec![
            Span::styled(
                if is_focused { "▸ " } else { "  " },
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(question.display_title().to_string(), title_style),
        ];
        if question.is_required {
            title.push(Span::styled(" *", Style::default().fg(Color::Red)));
        }
        self.push(Line::from(title), depth);

        match &question.kind {
            ElementKind::Radiogroup { .. } | ElementKind::Checkbox { .. } => {
                self.choice_rows(question, is_focused, depth)
            }
            ElementKind::Dropdown { .. } => self.dropdown_rows(question, is_focused, depth),
            ElementKind::File { max_size, .. } => {
                self.file_rows(question, *max_size, is_focused, depth)
            }
            _ => {}
        }

        if let Some(error) = self.app.state.validation.for_question(&question.name) {
            self.push(
                Line::from(Span::styled(
                    format!("    ! {}", error.message),
                    Style::default().fg(Color::LightRed),
                )),
                depth,
            );
        }
        self.blank();
    }

    fn choice_rows(&mut self, question: &Element, is_focused: bool, depth: usize) {
        let data = self.model.data();
        let multi = question.is_multi_value();
        for (i, choice) in self.model.choices(question).iter().enumerate() {
            let is_selected = if multi {
                data.list(&question.name).iter().any(|v| *v == choice.value)
            } else {
                data.text(&question.name) == Some(choice.value.as_str())
            };
            let style = if is_focused && i == self.app.state.focus.choice {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::REVERSED)
            } else if is_selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            self.push(
                Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("{} {}", choice_marker(is_selected, multi), choice.text),
                        style,
                    ),
                ]),
                depth,
            );
        }
    }

    fn dropdown_rows(&mut self, question: &Element, is_focused: bool, depth: usize) {
        let dim = Style::default().fg(Color::DarkGray);
        let value = self
            .model
            .data()
            .get(&question.name)
            .map(|v| v.display())
            .filter(|v| !v.is_empty());

        let row = match value {
            Some(value) => Span::styled(value, Style::default().fg(Color::Cyan)),
            None if self.model.choices(question).is_empty() => {
                if self.model.has_remote_choices(&question.name) {
                    Span::styled("No choices available", dim)
                } else {
                    Span::styled("Loading choices...", dim)
                }
            }
            None => Span::styled("Nothing selected", dim),
        };
        self.push(Line::from(vec![Span::raw("    "), row]), depth);
        if is_focused {
            self.push(Line::from(Span::styled("    Enter to choose", dim)), depth);
        }
    }

    fn file_rows(
        &mut self,
        question: &Element,
        max_size: Option<u64>,
        is_focused: bool,
        depth: usize,
    ) {
        let dim = Style::default().fg(Color::DarkGray);
        let row = match self.model.data().get(&question.name) {
            Some(value) => Span::styled(value.display(), Style::default().fg(Color::Cyan)),
            None => Span::styled("No file attached", dim),
        };
        self.push(Line::from(vec![Span::raw("    "), row]), depth);

        let mut accepts = question.accepted_types().join(", ");
        if let Some(max) = max_size {
            accepts.push_str(&format!(", up to {} KB", max / 1000));
        }
        self.push(Line::from(Span::styled(format!("    {accepts}"), dim)), depth);
        if is_focused {
            self.push(
                Line::from(Span::styled(
                    "    Enter to attach, Backspace to remove",
                    dim,
                )),
                depth,
            );
        }
    }
}
