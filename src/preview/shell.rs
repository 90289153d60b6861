//! Sidebar application shell and the wrapper nesting a screen design in it.

use super::{Component, Palette, Shell, ShellContext, ShellUser};
use crate::domain::NavigationEntry;
use crate::error::PreviewError;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use serde::Deserialize;
use std::sync::Arc;

const MIN_SIDEBAR_WIDTH: u16 = 12;
const MAX_SIDEBAR_WIDTH: u16 = 60;

/// Shell component description, read from `shell/layout.toml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShellLayout {
    pub title: String,
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: u16,
    #[serde(default = "default_show_user_menu")]
    pub show_user_menu: bool,
    #[serde(default)]
    pub footer: Option<String>,
}

fn default_sidebar_width() -> u16 {
    22
}

fn default_show_user_menu() -> bool {
    true
}

impl ShellLayout {
    /// Parse the TOML description of the shell
    pub fn from_toml(source: &str) -> Result<Self, PreviewError> {
        use config::{Config, File, FileFormat};

        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| PreviewError::InvalidShell(e.to_string()))
    }

    /// Check the layout can actually be rendered
    pub fn validate(self) -> Result<Self, PreviewError> {
        if self.title.trim().is_empty() {
            return Err(PreviewError::InvalidShell("title is empty".to_string()));
        }
        if !(MIN_SIDEBAR_WIDTH..=MAX_SIDEBAR_WIDTH).contains(&self.sidebar_width) {
            return Err(PreviewError::InvalidShell(format!(
                "sidebar_width {} outside {}..={}",
                self.sidebar_width, MIN_SIDEBAR_WIDTH, MAX_SIDEBAR_WIDTH
            )));
        }
        Ok(self)
    }
}

/// Shell with a title bar, a navigation sidebar and an optional footer
#[derive(Debug, Clone)]
pub struct SidebarShell {
    layout: ShellLayout,
}

impl SidebarShell {
    /// Build a shell from a validated layout
    pub fn new(layout: ShellLayout) -> Result<Self, PreviewError> {
        Ok(Self {
            layout: layout.validate()?,
        })
    }

    fn nav_lines(navigation: &[NavigationEntry], palette: &Palette) -> Vec<Line<'static>> {
        navigation
            .iter()
            .map(|entry| {
                let icon = entry.icon.map(|i| i.glyph()).unwrap_or(" ");
                let text = format!(" {} {}", icon, entry.label);
                let style = if entry.is_active {
                    Style::default()
                        .fg(palette.background)
                        .bg(palette.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.foreground)
                };
                Line::from(Span::styled(text, style))
            })
            .collect()
    }
}

impl Shell for SidebarShell {
    fn name(&self) -> &str {
        &self.layout.title
    }

    fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        ctx: &ShellContext<'_>,
        content: &dyn Component,
        palette: &Palette,
    ) {
        let footer_height = if self.layout.footer.is_some() { 1 } else { 0 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(footer_height),
            ])
            .split(area);

        // Title bar with the user menu on the right
        let mut title_spans = vec![Span::styled(
            format!(" {} ", self.layout.title),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )];
        if self.layout.show_user_menu {
            let user = format!("({}) {} ", ctx.user.initials(), ctx.user.name);
            let used = self.layout.title.chars().count() + 2;
            let pad = (rows[0].width as usize).saturating_sub(used + user.chars().count());
            title_spans.push(Span::raw(" ".repeat(pad)));
            title_spans.push(Span::styled(user, Style::default().fg(palette.muted)));
        }
        Paragraph::new(Line::from(title_spans))
            .style(Style::default().bg(palette.surface))
            .render(rows[0], buf);

        let sidebar_width = self.layout.sidebar_width.min(rows[1].width / 2);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
            .split(rows[1]);

        Paragraph::new(Self::nav_lines(ctx.navigation, palette))
            .style(Style::default().bg(palette.surface))
            .block(
                Block::default()
                    .borders(Borders::RIGHT)
                    .border_style(Style::default().fg(palette.border)),
            )
            .render(columns[0], buf);

        content.render(columns[1], buf, palette);

        if let Some(ref footer) = self.layout.footer {
            Paragraph::new(format!(" {}", footer))
                .style(Style::default().fg(palette.muted).bg(palette.surface))
                .render(rows[2], buf);
        }
    }
}

/// A screen design rendered inside the shell's content slot
pub struct ShellWrapped {
    name: String,
    shell: Arc<dyn Shell>,
    navigation: Vec<NavigationEntry>,
    active_section: String,
    user: ShellUser,
    content: Arc<dyn Component>,
}

impl ShellWrapped {
    pub fn new(
        shell: Arc<dyn Shell>,
        navigation: Vec<NavigationEntry>,
        active_section: impl Into<String>,
        user: ShellUser,
        content: Arc<dyn Component>,
    ) -> Self {
        let name = format!("{} in {}", content.name(), shell.name());
        Self {
            name,
            shell,
            navigation,
            active_section: active_section.into(),
            user,
            content,
        }
    }

    pub fn navigation(&self) -> &[NavigationEntry] {
        &self.navigation
    }

    pub fn content(&self) -> &Arc<dyn Component> {
        &self.content
    }
}

impl Component for ShellWrapped {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, area: Rect, buf: &mut Buffer, palette: &Palette) {
        let ctx = ShellContext {
            navigation: &self.navigation,
            active_section: &self.active_section,
            user: &self.user,
        };
        self.shell
            .render(area, buf, &ctx, self.content.as_ref(), palette);
    }
}
