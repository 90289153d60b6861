//! Renderable preview components and the shell capability.

use super::Palette;
use crate::domain::NavigationEntry;
use crate::error::PreviewError;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// A renderable preview: a screen design, a placeholder, or a shell-wrapped screen
pub trait Component: Send + Sync {
    /// Name shown in headers and logs
    fn name(&self) -> &str;

    /// Draw into `area` using the frame's palette
    fn render(&self, area: Rect, buf: &mut Buffer, palette: &Palette);
}

/// Placeholder identity shown by the shell's user menu. No real auth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellUser {
    pub name: String,
    pub email: String,
}

impl ShellUser {
    pub fn placeholder() -> Self {
        Self {
            name: "Alex Morgan".to_string(),
            email: "alex@example.com".to_string(),
        }
    }

    /// Two-letter avatar text
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

/// Inputs handed to a shell on every render
#[derive(Debug, Clone, Copy)]
pub struct ShellContext<'a> {
    pub navigation: &'a [NavigationEntry],
    pub active_section: &'a str,
    pub user: &'a ShellUser,
}

/// Application chrome that hosts a screen design in its content slot
pub trait Shell: Send + Sync {
    fn name(&self) -> &str;

    fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        ctx: &ShellContext<'_>,
        content: &dyn Component,
        palette: &Palette,
    );
}

/// Neutral message shown instead of a preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    kind: PlaceholderKind,
    title: String,
    message: String,
}

/// Why a placeholder is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Loading,
    NotFound,
    LoadFailure,
}

impl Placeholder {
    /// Shown while a load is pending
    pub fn loading(target: &str) -> Self {
        Self {
            kind: PlaceholderKind::Loading,
            title: "Loading".to_string(),
            message: format!("Loading {}...", target),
        }
    }

    /// Shown when no screen design is registered for the target
    pub fn not_found(target: &str) -> Self {
        Self {
            kind: PlaceholderKind::NotFound,
            title: "Screen design not found".to_string(),
            message: format!(
                "No screen design named {}.\n\nAdd it under the section's screens/ directory and press F5.",
                target
            ),
        }
    }

    /// Shown when a registered screen design failed to load
    pub fn load_failure(target: &str, error: &PreviewError) -> Self {
        Self {
            kind: PlaceholderKind::LoadFailure,
            title: "Preview failed to load".to_string(),
            message: format!("{} could not be rendered.\n\n{}", target, error),
        }
    }

    pub fn kind(&self) -> PlaceholderKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Component for Placeholder {
    fn name(&self) -> &str {
        &self.title
    }

    fn render(&self, area: Rect, buf: &mut Buffer, palette: &Palette) {
        let color = match self.kind {
            PlaceholderKind::Loading => palette.muted,
            PlaceholderKind::NotFound => palette.muted,
            PlaceholderKind::LoadFailure => palette.danger,
        };

        Paragraph::new(self.message.as_str())
            .style(Style::default().fg(color).bg(palette.background))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(format!(" {} ", self.title)),
            )
            .render(area, buf);
    }
}

/// Adapts a component to ratatui's `Widget` so frames can render it
pub struct ComponentView<'a> {
    component: &'a dyn Component,
    palette: Palette,
}

impl<'a> ComponentView<'a> {
    pub fn new(component: &'a dyn Component, palette: Palette) -> Self {
        Self { component, palette }
    }
}

impl Widget for ComponentView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(
            area,
            Style::default()
                .bg(self.palette.background)
                .fg(self.palette.foreground),
        );
        self.component.render(area, buf, &self.palette);
    }
}

/// Flatten a buffer into newline-separated rows
#[cfg(test)]
pub(crate) fn buffer_text(buf: &Buffer) -> String {
    let width = buf.area.width.max(1) as usize;
    buf.content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_user_initials() {
        assert_eq!(ShellUser::placeholder().initials(), "AM");
    }

    #[test]
    fn test_not_found_placeholder_renders() {
        let placeholder = Placeholder::not_found("incidents/MissingScreen");
        assert_eq!(placeholder.kind(), PlaceholderKind::NotFound);

        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        ComponentView::new(&placeholder, Palette::DARK).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Screen design not found"));
        assert!(text.contains("MissingScreen"));
    }

    #[test]
    fn test_failure_placeholder_shows_error() {
        let error = PreviewError::load_failed("incidents/Broken", "invalid UTF-8");
        let placeholder = Placeholder::load_failure("incidents/Broken", &error);
        assert!(placeholder.message().contains("invalid UTF-8"));
    }

    #[test]
    fn test_render_into_empty_area() {
        let placeholder = Placeholder::loading("x");
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        placeholder.render(area, &mut buf, &Palette::LIGHT);
    }
}
