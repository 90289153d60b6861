//! Screen designs authored as markdown documents.
//!
//! A screen design is parsed once, when its loader first runs, into a list of
//! blocks. Rendering only lays those blocks out against the current palette.

use super::{Component, Palette};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

/// Inline run of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
}

/// Block-level element of a screen design
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, runs: Vec<Run> },
    Paragraph(Vec<Run>),
    Bullet { depth: usize, runs: Vec<Run> },
    Table { header: Vec<String>, rows: Vec<Vec<String>> },
    Code(Vec<String>),
    Rule,
}

/// A screen design parsed from markdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownScreen {
    name: String,
    blocks: Vec<Block>,
}

#[derive(Default)]
struct InlineState {
    runs: Vec<Run>,
    strong: usize,
    emphasis: usize,
}

impl InlineState {
    fn push(&mut self, text: &str, code: bool) {
        if text.is_empty() {
            return;
        }
        self.runs.push(Run {
            text: text.to_string(),
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            code,
        });
    }

    fn take(&mut self) -> Vec<Run> {
        std::mem::take(&mut self.runs)
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

impl MarkdownScreen {
    /// Parse a markdown document into a screen design
    pub fn parse(name: impl Into<String>, markdown: &str) -> Self {
        let mut blocks = Vec::new();
        let mut inline = InlineState::default();
        let mut list_depth = 0usize;
        let mut in_item = false;
        let mut code: Option<Vec<String>> = None;
        let mut table: Option<(Vec<String>, Vec<Vec<String>>)> = None;
        let mut row: Vec<String> = Vec::new();
        let mut cell = String::new();
        let mut in_cell = false;

        let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);

        for event in parser {
            match event {
                Event::Start(Tag::Strong) => inline.strong += 1,
                Event::End(Tag::Strong) => inline.strong = inline.strong.saturating_sub(1),
                Event::Start(Tag::Emphasis) => inline.emphasis += 1,
                Event::End(Tag::Emphasis) => inline.emphasis = inline.emphasis.saturating_sub(1),
                Event::Start(Tag::List(_)) => {
                    if in_item {
                        flush_bullet(&mut blocks, &mut inline, list_depth);
                    }
                    list_depth += 1;
                }
                Event::End(Tag::List(_)) => list_depth = list_depth.saturating_sub(1),
                Event::Start(Tag::Item) => in_item = true,
                Event::End(Tag::Item) => {
                    flush_bullet(&mut blocks, &mut inline, list_depth);
                    in_item = list_depth > 1;
                }
                Event::End(Tag::Heading(level, _, _)) => {
                    blocks.push(Block::Heading {
                        level: heading_level(level),
                        runs: inline.take(),
                    });
                }
                Event::End(Tag::Paragraph) if !in_item => {
                    let runs = inline.take();
                    if !runs.is_empty() {
                        blocks.push(Block::Paragraph(runs));
                    }
                }
                Event::End(Tag::Paragraph) => inline.push(" ", false),
                Event::Start(Tag::CodeBlock(_)) => code = Some(Vec::new()),
                Event::End(Tag::CodeBlock(_)) => {
                    if let Some(lines) = code.take() {
                        blocks.push(Block::Code(lines));
                    }
                }
                Event::Start(Tag::Table(_)) => table = Some((Vec::new(), Vec::new())),
                Event::End(Tag::Table(_)) => {
                    if let Some((header, rows)) = table.take() {
                        blocks.push(Block::Table { header, rows });
                    }
                }
                Event::End(Tag::TableHead) => {
                    if let Some((header, _)) = table.as_mut() {
                        *header = std::mem::take(&mut row);
                    }
                }
                Event::End(Tag::TableRow) => {
                    if let Some((_, rows)) = table.as_mut() {
                        rows.push(std::mem::take(&mut row));
                    }
                }
                Event::Start(Tag::TableCell) => in_cell = true,
                Event::End(Tag::TableCell) => {
                    in_cell = false;
                    row.push(std::mem::take(&mut cell).trim().to_string());
                }
                Event::Text(text) | Event::Code(text) if in_cell => cell.push_str(&text),
                Event::Text(text) => match code.as_mut() {
                    Some(lines) => lines.extend(text.lines().map(str::to_string)),
                    None => inline.push(&text, false),
                },
                Event::Code(text) => inline.push(&text, true),
                Event::SoftBreak | Event::HardBreak => inline.push(" ", false),
                Event::Rule => blocks.push(Block::Rule),
                Event::TaskListMarker(done) => inline.push(if done { "[x] " } else { "[ ] " }, false),
                _ => {}
            }
        }

        Self {
            name: name.into(),
            blocks,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Lay the blocks out as styled lines for a given width
    fn lines(&self, width: u16, palette: &Palette) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Heading { level, runs } => {
                    let color = if *level <= 1 { palette.accent } else { palette.foreground };
                    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
                    lines.push(Line::from(styled_runs(runs, palette, style)));
                    if *level <= 2 {
                        lines.push(Line::from(Span::styled(
                            "─".repeat(width as usize),
                            Style::default().fg(palette.border),
                        )));
                    }
                }
                Block::Paragraph(runs) => {
                    lines.push(Line::from(styled_runs(
                        runs,
                        palette,
                        Style::default().fg(palette.foreground),
                    )));
                    lines.push(Line::default());
                }
                Block::Bullet { depth, runs } => {
                    let mut spans = vec![Span::styled(
                        format!("{}• ", "  ".repeat(depth.saturating_sub(1))),
                        Style::default().fg(palette.accent),
                    )];
                    spans.extend(styled_runs(runs, palette, Style::default().fg(palette.foreground)));
                    lines.push(Line::from(spans));
                }
                Block::Table { header, rows } => {
                    lines.extend(table_lines(header, rows, width, palette));
                    lines.push(Line::default());
                }
                Block::Code(code) => {
                    for line in code {
                        lines.push(Line::from(Span::styled(
                            format!("  {}", line),
                            Style::default().fg(palette.muted).bg(palette.surface),
                        )));
                    }
                    lines.push(Line::default());
                }
                Block::Rule => lines.push(Line::from(Span::styled(
                    "─".repeat(width as usize),
                    Style::default().fg(palette.border),
                ))),
            }
        }
        lines
    }
}

fn flush_bullet(blocks: &mut Vec<Block>, inline: &mut InlineState, depth: usize) {
    let mut runs = inline.take();
    if let Some(last) = runs.last_mut() {
        last.text = last.text.trim_end().to_string();
    }
    runs.retain(|r| !r.text.is_empty());
    if !runs.is_empty() {
        blocks.push(Block::Bullet {
            depth: depth.max(1),
            runs,
        });
    }
}

fn styled_runs(runs: &[Run], palette: &Palette, base: Style) -> Vec<Span<'static>> {
    runs.iter()
        .map(|run| {
            let mut style = base;
            if run.strong {
                style = style.add_modifier(Modifier::BOLD);
            }
            if run.emphasis {
                style = style.add_modifier(Modifier::ITALIC);
            }
            if run.code {
                style = style.fg(palette.accent).bg(palette.surface);
            }
            Span::styled(run.text.clone(), style)
        })
        .collect()
}

fn table_lines(
    header: &[String],
    rows: &[Vec<String>],
    width: u16,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let columns = std::iter::once(header.len())
        .chain(rows.iter().map(Vec::len))
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return Vec::new();
    }

    let mut widths = vec![0usize; columns];
    for r in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        for (i, cell) in r.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    // shrink the widest columns until the table fits
    let separators = 3 * columns.saturating_sub(1);
    let budget = (width as usize).saturating_sub(separators).max(columns);
    while widths.iter().sum::<usize>() > budget {
        let Some(widest) = widths.iter_mut().max() else {
            break;
        };
        if *widest <= 1 {
            break;
        }
        *widest -= 1;
    }

    let format_row = |cells: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let text: String = cells.get(i).map(String::as_str).unwrap_or("").chars().take(*w).collect();
                format!("{:<width$}", text, width = *w)
            })
            .collect::<Vec<_>>()
            .join(" │ ")
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format_row(header),
            Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            widths.iter().map(|w| "─".repeat(*w)).collect::<Vec<_>>().join("─┼─"),
            Style::default().fg(palette.border),
        )),
    ];
    lines.extend(rows.iter().map(|r| {
        Line::from(Span::styled(format_row(r), Style::default().fg(palette.foreground)))
    }));
    lines
}

impl Component for MarkdownScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, area: Rect, buf: &mut Buffer, palette: &Palette) {
        let inner = Rect {
            x: area.x.saturating_add(1),
            y: area.y,
            width: area.width.saturating_sub(2),
            height: area.height,
        };
        Paragraph::new(self.lines(inner.width, palette))
            .style(Style::default().bg(palette.background))
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::component::buffer_text;

    const INCIDENT_LIST: &str = "# Incidents\n\n\
        Review **open** incidents and assign owners.\n\n\
        - Filter by *severity*\n\
        - Search by `title`\n  - nested hint\n\n\
        | Id | Title | Severity |\n\
        |----|-------|----------|\n\
        | 1 | Outage | High |\n\
        | 2 | Slow login | Low |\n\n\
        ---\n";

    #[test]
    fn test_parse_blocks() {
        let screen = MarkdownScreen::parse("IncidentList", INCIDENT_LIST);
        let blocks = screen.blocks();

        assert!(matches!(&blocks[0], Block::Heading { level: 1, runs } if runs[0].text == "Incidents"));
        match &blocks[1] {
            Block::Paragraph(runs) => {
                assert!(runs.iter().any(|r| r.text == "open" && r.strong));
            }
            other => panic!("expected paragraph, got {:?}", other),
        }

        let bullets: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Bullet { depth, runs } => Some((*depth, runs.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(bullets.len(), 3);
        assert_eq!(bullets[0].0, 1);
        assert!(bullets[1].1.iter().any(|r| r.code && r.text == "title"));
        assert_eq!(bullets[2].0, 2);

        let table = blocks.iter().find_map(|b| match b {
            Block::Table { header, rows } => Some((header.clone(), rows.clone())),
            _ => None,
        });
        let (header, rows) = table.unwrap();
        assert_eq!(header, ["Id", "Title", "Severity"]);
        assert_eq!(rows[1], ["2", "Slow login", "Low"]);
        assert_eq!(blocks.last(), Some(&Block::Rule));
    }

    #[test]
    fn test_render_shows_table_content() {
        let screen = MarkdownScreen::parse("IncidentList", INCIDENT_LIST);
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf, &Palette::LIGHT);

        let text = buffer_text(&buf);
        assert!(text.contains("Incidents"));
        assert!(text.contains("Slow login"));
        assert!(text.contains("│"));
    }

    #[test]
    fn test_narrow_table_is_truncated() {
        let header = vec!["Name".to_string(), "Description".to_string()];
        let rows = vec![vec!["A very long name".to_string(), "Even longer description".to_string()]];
        let lines = table_lines(&header, &rows, 20, &Palette::DARK);
        for line in lines {
            assert!(line.width() <= 20, "line too wide: {}", line.width());
        }
    }

    #[test]
    fn test_empty_document() {
        let screen = MarkdownScreen::parse("Empty", "");
        assert!(screen.blocks().is_empty());
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf, &Palette::DARK);
    }
}
