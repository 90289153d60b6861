//! Read-only markdown document viewer with line-based highlighting.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

/// An artifact opened for reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDocument {
    pub title: String,
    pub content: String,
}

impl OpenDocument {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

fn heading_style(level: usize) -> Style {
    let color = match level {
        1 => Color::Cyan,
        2 => Color::Blue,
        3 => Color::LightBlue,
        _ => Color::LightCyan,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Style one markdown line
pub fn highlight_line(line: &str) -> Line<'static> {
    let trimmed = line.trim_start();
    let indent = " ".repeat(line.len() - trimmed.len());

    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) && trimmed[hashes..].starts_with(' ') {
        return Line::from(Span::styled(line.to_string(), heading_style(hashes)));
    }

    if trimmed.starts_with("```") || matches!(trimmed, "---" | "***" | "___") {
        return Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if trimmed.starts_with("> ") {
        return Line::from(Span::styled(
            line.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    if trimmed.starts_with('|') {
        return Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::Gray),
        ));
    }

    let marker_len = if trimmed.starts_with("- ") || trimmed.starts_with("* ") {
        2
    } else {
        trimmed
            .find(". ")
            .filter(|&pos| pos > 0 && pos <= 3 && trimmed[..pos].chars().all(|c| c.is_ascii_digit()))
            .map(|pos| pos + 2)
            .unwrap_or(0)
    };

    let mut spans = vec![Span::raw(indent)];
    if marker_len > 0 {
        spans.push(Span::styled(
            trimmed[..marker_len].to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.extend(inline_spans(&trimmed[marker_len..]));
    Line::from(spans)
}

/// Split `**bold**` and `` `code` `` runs out of a line
fn inline_spans(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut bold = false;
    let mut code = false;
    let mut chars = text.chars().peekable();

    let flush = |current: &mut String, spans: &mut Vec<Span<'static>>, bold: bool, code: bool| {
        if current.is_empty() {
            return;
        }
        let style = if code {
            Style::default().fg(Color::Green)
        } else if bold {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(std::mem::take(current), style));
    };

    while let Some(c) = chars.next() {
        if c == '`' {
            flush(&mut current, &mut spans, bold, code);
            code = !code;
        } else if c == '*' && !code && chars.peek() == Some(&'*') {
            chars.next();
            flush(&mut current, &mut spans, bold, code);
            bold = !bold;
        } else {
            current.push(c);
        }
    }
    flush(&mut current, &mut spans, bold, code);
    spans
}

/// Widget showing a scrolled window of a document
pub struct DocumentWidget<'a> {
    document: &'a OpenDocument,
    scroll_offset: usize,
}

impl<'a> DocumentWidget<'a> {
    pub fn new(document: &'a OpenDocument) -> Self {
        Self {
            document,
            scroll_offset: 0,
        }
    }

    /// Set the scroll offset
    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }
}

impl Widget for DocumentWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self.document.content.lines().map(highlight_line).collect();
        let total_lines = lines.len();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.document.title));
        let inner = block.inner(area);
        block.render(area, buf);

        let visible_height = inner.height as usize;
        let scroll = self
            .scroll_offset
            .min(total_lines.saturating_sub(visible_height));

        let visible: Vec<Line> = lines
            .into_iter()
            .skip(scroll)
            .take(visible_height)
            .collect();
        Paragraph::new(visible).render(inner, buf);

        if total_lines > visible_height && area.width > 0 {
            let mut scrollbar_state = ScrollbarState::new(total_lines)
                .position(scroll)
                .viewport_content_length(visible_height);

            let scrollbar_area = Rect {
                x: area.x + area.width - 1,
                y: area.y + 1,
                width: 1,
                height: area.height.saturating_sub(2),
            };

            Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"))
                .render(scrollbar_area, buf, &mut scrollbar_state);
        }
    }
}

/// Scroll position of the document viewer
#[derive(Debug, Default)]
pub struct DocumentViewerState {
    scroll_offset: usize,
    total_lines: usize,
    visible_height: usize,
}

impl DocumentViewerState {
    pub fn new(total_lines: usize) -> Self {
        Self {
            total_lines,
            ..Self::default()
        }
    }

    /// Set the visible height
    pub fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height;
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        let max_scroll = self.total_lines.saturating_sub(self.visible_height);
        self.scroll_offset = (self.scroll_offset + amount).min(max_scroll);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.total_lines.saturating_sub(self.visible_height);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.visible_height.saturating_sub(2));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.visible_height.saturating_sub(2));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::buffer_text;

    #[test]
    fn test_document_viewer_state_scroll() {
        let mut state = DocumentViewerState::new(100);
        state.set_visible_height(20);
        assert_eq!(state.scroll_offset(), 0);

        state.scroll_down(10);
        assert_eq!(state.scroll_offset(), 10);

        state.scroll_up(5);
        assert_eq!(state.scroll_offset(), 5);

        state.scroll_to_bottom();
        assert_eq!(state.scroll_offset(), 80);

        state.scroll_down(50);
        assert_eq!(state.scroll_offset(), 80);

        state.scroll_to_top();
        assert_eq!(state.scroll_offset(), 0);
    }

    #[test]
    fn test_highlight_headings_and_bullets() {
        let heading = highlight_line("## Navigation");
        assert_eq!(heading.spans[0].style, heading_style(2));

        // not a heading without the space
        let tag = highlight_line("#hashtag");
        assert_ne!(tag.spans.last().map(|s| s.style), Some(heading_style(1)));

        let bullet = highlight_line("  - **Incidents** → triage");
        let text: String = bullet.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "  - Incidents → triage");
        assert!(bullet
            .spans
            .iter()
            .any(|s| s.content == "Incidents" && s.style.add_modifier.contains(Modifier::BOLD)));
    }

    #[test]
    fn test_render_document() {
        let doc = OpenDocument::new("spec.md", "# Incidents\n\nTriage queue.\n");
        assert_eq!(doc.line_count(), 3);

        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        DocumentWidget::new(&doc).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("spec.md"));
        assert!(text.contains("Triage queue."));
    }
}
