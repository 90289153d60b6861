//! Help view listing keybindings and status glyphs.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

/// Help categories
const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("↑/k", "Move up"),
            ("↓/j", "Move down"),
            ("g", "Go to top"),
            ("G", "Go to bottom"),
            ("PgUp/PgDn", "Page up / down"),
        ],
    ),
    (
        "Selection & Actions",
        &[
            ("Enter/Space", "Open phase, section or screen design"),
            ("Esc", "Back"),
            ("v", "View the product overview or section spec"),
            ("p", "Preview the selected screen design"),
            ("r/F5", "Rescan product artifacts"),
            ("q", "Quit"),
        ],
    ),
    (
        "Preview",
        &[
            ("1", "Mobile width (30%)"),
            ("2", "Tablet width (60%)"),
            ("3", "Desktop width (100%)"),
            ("[ / ]", "Shrink / grow by 5%"),
            ("Drag edge", "Resize the frame with the mouse"),
        ],
    ),
    (
        "Status",
        &[
            ("●", "Completed"),
            ("◐", "Current step"),
            ("○", "Upcoming"),
        ],
    ),
];

/// Help overlay, scrolled by the app's viewer state
pub struct HelpWidget {
    scroll_offset: usize,
}

impl HelpWidget {
    pub fn new(scroll_offset: usize) -> Self {
        Self { scroll_offset }
    }

    /// Help text, one entry per rendered line
    pub fn lines() -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "  design-tui Help  ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Walk a product through its design phases and preview its screens.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];

        for (title, bindings) in HELP_SECTIONS {
            lines.push(Line::from(Span::styled(
                format!("─── {} ───", title),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.extend(bindings.iter().map(|(key, description)| {
                Line::from(vec![
                    Span::styled(format!("  {:12}", key), Style::default().fg(Color::Green)),
                    Span::raw(*description),
                ])
            }));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("  Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Green)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Green)),
            Span::styled(" to close help", Style::default().fg(Color::DarkGray)),
        ]));
        lines
    }
}

impl Widget for HelpWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let lines = Self::lines();
        let total_lines = lines.len();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help (?) ");
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
            let mut scrollbar_state = ScrollbarState::new(total_lines).position(scroll);
            let scrollbar_area = Rect {
                x: area.x + area.width - 1,
                y: area.y + 1,
                width: 1,
                height: area.height.saturating_sub(2),
            };
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"))
                .render(scrollbar_area, buf, &mut scrollbar_state);
        }
    }
}
