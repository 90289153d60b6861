//! Screen design previews.
//!
//! This module contains:
//! - Component: the renderable capability and placeholders
//! - Screen: markdown screen designs
//! - Shell: the sidebar application shell and the wrapped component
//! - Composer: shell binding for a section's screen design
//! - Host: the resizable preview viewport
//! - Session: one open preview and its background load
//! - Theme: the theme flag and its subscription

mod component;
mod composer;
mod host;
mod screen;
mod session;
mod shell;
mod theme;

pub use component::{
    Component, ComponentView, Placeholder, PlaceholderKind, Shell, ShellContext, ShellUser,
};
pub use composer::ShellComposer;
pub use host::{DevicePreset, DragState, PreviewHost, NUDGE_PERCENT};
pub use screen::MarkdownScreen;
pub use session::{PreviewSession, PreviewStatus};
pub use shell::{ShellLayout, ShellWrapped, SidebarShell};
pub use theme::{
    subscribe_theme, FileThemeStore, MemoryThemeStore, Palette, Theme, ThemeStore,
    ThemeSubscription, THEME_KEY,
};

#[cfg(test)]
pub(crate) use component::buffer_text;
