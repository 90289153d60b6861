//! Preview toolbar and the resizable frame around a component.

use crate::preview::{ComponentView, DevicePreset, PreviewSession, PreviewStatus};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Preset buttons, current width and theme
pub struct PreviewToolbarWidget<'a> {
    session: &'a PreviewSession,
}

impl<'a> PreviewToolbarWidget<'a> {
    pub fn new(session: &'a PreviewSession) -> Self {
        Self { session }
    }

    fn build_line(&self) -> Line<'static> {
        let host = &self.session.host;
        let active = host.active_preset();

        let mut spans = Vec::new();
        for (idx, preset) in DevicePreset::ALL.iter().enumerate() {
            let style = if active == Some(*preset) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            spans.push(Span::styled(
                format!(" {} {} ", idx + 1, preset.label()),
                style,
            ));
            spans.push(Span::raw(" "));
        }

        spans.push(Span::styled(
            format!(" {:>3.0}% ", host.width_percent()),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" theme: {} ", self.session.theme().display_name()),
            Style::default().fg(Color::DarkGray),
        ));

        let status = match self.session.status() {
            PreviewStatus::Pending => Some(("loading", Color::Yellow)),
            PreviewStatus::NotFound => Some(("not found", Color::Red)),
            PreviewStatus::Ready => None,
        };
        if let Some((label, color)) = status {
            spans.push(Span::styled(format!(" {} ", label), Style::default().fg(color)));
        }
        if host.is_dragging() {
            spans.push(Span::styled(
                " resizing ",
                Style::default().fg(Color::Yellow),
            ));
        }

        Line::from(spans)
    }
}

impl Widget for PreviewToolbarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.build_line()).render(area, buf);
    }
}

/// The component inside a frame sized by the preview host.
///
/// Render it into the same area the host was given as its viewport.
pub struct PreviewFrameWidget<'a> {
    session: &'a PreviewSession,
}

impl<'a> PreviewFrameWidget<'a> {
    pub fn new(session: &'a PreviewSession) -> Self {
        Self { session }
    }
}

impl Widget for PreviewFrameWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = self.session.host.frame_area().intersection(area);
        if frame.width == 0 || frame.height == 0 {
            return;
        }

        let border_style = if self.session.host.is_dragging() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(border_style)
            .title(format!(" {} ", self.session.component().name()));
        let inner = block.inner(frame);
        block.render(frame, buf);

        ComponentView::new(self.session.component(), self.session.palette()).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShellConfig;
    use crate::domain::ScreenDesignRef;
    use crate::preview::{
        buffer_text, subscribe_theme, MemoryThemeStore, PreviewHost, ShellComposer, Theme,
    };
    use crate::services::artifacts::tests::create_test_product;
    use crate::services::ComponentRegistry;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_frame_follows_host_width() {
        let (_temp, probe) = create_test_product();
        let registry = Arc::new(ComponentRegistry::from_artifacts(&probe));
        let composer =
            ShellComposer::new(Arc::new(probe), registry.clone(), ShellConfig::default());
        let theme = subscribe_theme(
            Arc::new(MemoryThemeStore::new(Theme::Dark)),
            Duration::from_secs(60),
        );
        let mut session = PreviewSession::open(
            ScreenDesignRef::new("incidents", "MissingScreen"),
            &registry,
            composer,
            PreviewHost::new(24, 1),
            theme,
            Theme::Dark,
        )
        .unwrap();

        let viewport = Rect::new(0, 1, 100, 14);
        session.host.set_viewport(viewport);
        session.host.apply_preset(DevicePreset::Tablet);

        let mut buf = Buffer::empty(Rect::new(0, 0, 100, 15));
        PreviewToolbarWidget::new(&session).render(Rect::new(0, 0, 100, 1), &mut buf);
        PreviewFrameWidget::new(&session).render(viewport, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("2 Tablet"));
        assert!(text.contains(" 60% "));
        assert!(text.contains("not found"));
        assert!(text.contains("Screen design not found"));

        // frame spans columns 20..80, outside stays blank
        let row: u16 = 5;
        assert_eq!(buf[(10u16, row)].symbol(), " ");
        assert_eq!(buf[(20u16, row)].symbol(), "┃");
        assert_eq!(buf[(79u16, row)].symbol(), "┃");
    }
}
