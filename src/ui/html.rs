//! Minimal HTML to styled text conversion for content elements

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Convert the small HTML subset used by content elements into lines.
///
/// Headings are bold cyan and followed by a blank line, `<p>` starts a new
/// paragraph, `<strong>`/`<b>` are bold and `<em>`/`<i>` italic. Unknown
/// tags are dropped.
pub fn html_to_lines(html: &str) -> Vec<Line<'static>> {
    let mut builder = LineBuilder::default();
    let mut rest = html;

    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix('<') {
            let Some(end) = stripped.find('>') else {
                builder.push_text(rest);
                break;
            };
            builder.tag(&stripped[..end]);
            rest = &stripped[end + 1..];
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            builder.push_text(&decode_entities(&rest[..end]));
            rest = &rest[end..];
        }
    }

    builder.finish()
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    bold: usize,
    italic: usize,
    heading: bool,
}

impl LineBuilder {
    fn style(&self) -> Style {
        let mut style = Style::default();
        if self.heading {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        if self.bold > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }

    fn push_text(&mut self, text: &str) {
        // Collapse whitespace like a browser would
        let mut collapsed = String::with_capacity(text.len());
        let mut last_space = self
            .current
            .last()
            .map_or(true, |s| s.content.ends_with(' '));
        for c in text.chars() {
            if c.is_whitespace() {
                if !last_space {
                    collapsed.push(' ');
                }
                last_space = true;
            } else {
                collapsed.push(c);
                last_space = false;
            }
        }
        if !collapsed.is_empty() {
            let style = self.style();
            self.current.push(Span::styled(collapsed, style));
        }
    }

    fn break_line(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut spans = std::mem::take(&mut self.current);
        if let Some(last) = spans.last_mut() {
            let trimmed = last.content.trim_end().to_string();
            last.content = trimmed.into();
        }
        self.lines.push(Line::from(spans));
    }

    fn blank_line(&mut self) {
        self.break_line();
        if self.lines.last().is_some_and(|l| l.width() > 0) {
            self.lines.push(Line::from(""));
        }
    }

    fn tag(&mut self, tag: &str) {
        let tag = tag.trim().trim_end_matches('/').trim();
        let closing = tag.starts_with('/');
        let name = tag
            .trim_start_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match name.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                if closing {
                    self.heading = false;
                    self.blank_line();
                } else {
                    self.blank_line();
                    self.heading = true;
                }
            }
            "p" | "div" => self.blank_line(),
            "br" => self.break_line(),
            "strong" | "b" => {
                if closing {
                    self.bold = self.bold.saturating_sub(1);
                } else {
                    self.bold += 1;
                }
            }
            "em" | "i" => {
                if closing {
                    self.italic = self.italic.saturating_sub(1);
                } else {
                    self.italic += 1;
                }
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.break_line();
        while self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Word-wrap styled lines to `width` columns, keeping span styles
pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut out = Vec::new();

    for line in lines {
        if line.width() <= width {
            out.push(line);
            continue;
        }

        let mut current: Vec<Span<'static>> = Vec::new();
        let mut current_width = 0;
        for span in line.spans {
            for word in span.content.split_inclusive(' ') {
                let word_width = word.trim_end().chars().count();
                if current_width + word_width > width && current_width > 0 {
                    out.push(Line::from(std::mem::take(&mut current)));
                    current_width = 0;
                }
                current.push(Span::styled(word.to_string(), span.style));
                current_width += word.chars().count();
            }
        }
        if !current.is_empty() {
            out.push(Line::from(current));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    mod conversion {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_heading_and_paragraph() {
            let lines = html_to_lines("<h2>Welcome to ERAT</h2><p>This tool helps.</p>");
            assert_eq!(plain(&lines), vec!["Welcome to ERAT", "", "This tool helps."]);
            assert!(lines[0].spans[0]
                .style
                .add_modifier
                .contains(Modifier::BOLD));
        }

        #[test]
        fn test_strong_inline() {
            let lines = html_to_lines("<p>Click <strong>Next</strong> to proceed.</p>");
            assert_eq!(plain(&lines), vec!["Click Next to proceed."]);
            let next = &lines[0].spans[1];
            assert_eq!(next.content, "Next");
            assert!(next.style.add_modifier.contains(Modifier::BOLD));
            assert!(!lines[0].spans[0]
                .style
                .add_modifier
                .contains(Modifier::BOLD));
        }

        #[test]
        fn test_plain_text_passes_through() {
            let lines = html_to_lines("Retrieving your account status. Please wait...");
            assert_eq!(
                plain(&lines),
                vec!["Retrieving your account status. Please wait..."]
            );
        }

        #[test]
        fn test_entities_and_whitespace() {
            let lines = html_to_lines("<p>Fish &amp;   chips\n  &lt;3</p>");
            assert_eq!(plain(&lines), vec!["Fish & chips <3"]);
        }

        #[test]
        fn test_unclosed_tag_is_text() {
            let lines = html_to_lines("a < b");
            assert_eq!(plain(&lines), vec!["a < b"]);
        }

        #[test]
        fn test_empty_input() {
            assert!(html_to_lines("").is_empty());
        }
    }

    mod wrapping {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_short_line_untouched() {
            let lines = wrap_lines(vec![Line::from("short")], 20);
            assert_eq!(plain(&lines), vec!["short"]);
        }

        #[test]
        fn test_wraps_on_words() {
            let lines = wrap_lines(vec![Line::from("one two three four")], 9);
            assert_eq!(plain(&lines), vec!["one two ", "three ", "four"]);
        }

        #[test]
        fn test_keeps_styles_across_breaks() {
            let line = Line::from(vec![
                Span::raw("Click "),
                Span::styled("Next", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" to go on"),
            ]);
            let lines = wrap_lines(vec![line], 10);
            assert_eq!(plain(&lines), vec!["Click Next ", "to go on"]);
            assert!(lines[0].spans[1]
                .style
                .add_modifier
                .contains(Modifier::BOLD));
        }
    }
}
