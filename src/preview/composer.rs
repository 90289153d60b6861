//! Decides whether a section's screen design is shown inside the shell.

use super::{Component, ShellUser, ShellWrapped};
use crate::config::ShellConfig;
use crate::domain::parse_navigation;
use crate::services::{ArtifactProbe, ComponentRegistry};
use std::sync::Arc;

/// Binds screen designs to the product shell
#[derive(Clone)]
pub struct ShellComposer {
    probe: Arc<ArtifactProbe>,
    registry: Arc<ComponentRegistry>,
    config: ShellConfig,
}

impl ShellComposer {
    pub fn new(
        probe: Arc<ArtifactProbe>,
        registry: Arc<ComponentRegistry>,
        config: ShellConfig,
    ) -> Self {
        Self {
            probe,
            registry,
            config,
        }
    }

    /// Wrap `screen` in the shell, or hand it back unchanged when the section
    /// opts out or no usable shell exists
    pub async fn compose(
        &self,
        section_id: &str,
        screen: Arc<dyn Component>,
    ) -> Arc<dyn Component> {
        if !self.config.uses_shell(section_id) {
            tracing::debug!("Section {} opts out of the shell", section_id);
            return screen;
        }

        if !self.probe.has_shell_components() {
            return screen;
        }

        let Some(loader) = self.registry.resolve_shell() else {
            tracing::warn!(
                "Shell components exist but no shell is registered; refresh to pick them up"
            );
            return screen;
        };

        let shell = match loader.load().await {
            Ok(shell) => shell,
            Err(e) => {
                tracing::warn!("Shell not applied to {}: {}", section_id, e);
                return screen;
            }
        };

        let navigation = self
            .probe
            .load_shell_spec()
            .await
            .map(|spec| parse_navigation(&spec))
            .unwrap_or_default()
            .into_iter()
            .map(|entry| entry.with_lookup_icon().with_active_section(section_id))
            .collect();

        Arc::new(ShellWrapped::new(
            shell,
            navigation,
            section_id,
            ShellUser::placeholder(),
            screen,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{buffer_text, ComponentView, MarkdownScreen, Palette};
    use crate::services::artifacts::tests::create_test_product;
    use ratatui::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    const SHELL_SPEC: &str = "# Shell\n\n## Navigation\n\n- **Incidents** → triage queue\n- **Lawyers** → roster\n\n## Layout\n\n- **Not nav** → ignored\n";

    fn add_shell(temp: &TempDir, layout: &str) {
        let shell = temp.path().join("product/shell");
        fs::create_dir_all(&shell).unwrap();
        fs::write(shell.join("spec.md"), SHELL_SPEC).unwrap();
        fs::write(shell.join("layout.toml"), layout).unwrap();
    }

    fn composer(probe: ArtifactProbe, exclude: &[&str]) -> ShellComposer {
        let registry = ComponentRegistry::from_artifacts(&probe);
        let config = ShellConfig {
            exclude_sections: exclude.iter().map(|s| s.to_string()).collect(),
        };
        ShellComposer::new(Arc::new(probe), Arc::new(registry), config)
    }

    fn screen() -> Arc<dyn Component> {
        Arc::new(MarkdownScreen::parse("IncidentList", "# Open incidents\n"))
    }

    #[tokio::test]
    async fn test_wraps_screen_in_shell() {
        let (temp, probe) = create_test_product();
        add_shell(&temp, "title = \"Counsel Desk\"\n");
        let composer = composer(probe, &[]);

        let composed = composer.compose("incidents", screen()).await;
        assert_eq!(composed.name(), "IncidentList in Counsel Desk");

        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        ComponentView::new(composed.as_ref(), Palette::LIGHT).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Incidents"));
        assert!(text.contains("Lawyers"));
        assert!(!text.contains("Not nav"));
        assert!(text.contains("Open incidents"));
    }

    #[tokio::test]
    async fn test_excluded_section_is_unwrapped() {
        let (temp, probe) = create_test_product();
        add_shell(&temp, "title = \"Counsel Desk\"\n");
        let composer = composer(probe, &["incidents"]);

        let original = screen();
        let composed = composer.compose("incidents", original.clone()).await;
        assert!(Arc::ptr_eq(&original, &composed));

        let other = composer.compose("lawyers", screen()).await;
        assert_eq!(other.name(), "IncidentList in Counsel Desk");
    }

    #[tokio::test]
    async fn test_no_shell_components_is_unwrapped() {
        let (_temp, probe) = create_test_product();
        let composer = composer(probe, &[]);

        let original = screen();
        let composed = composer.compose("incidents", original.clone()).await;
        assert!(Arc::ptr_eq(&original, &composed));
    }

    #[tokio::test]
    async fn test_unregistered_shell_is_unwrapped() {
        let (temp, probe) = create_test_product();
        // registry built before the shell appeared on disk
        let registry = ComponentRegistry::from_artifacts(&probe);
        add_shell(&temp, "title = \"Counsel Desk\"\n");
        let composer = ShellComposer::new(
            Arc::new(probe),
            Arc::new(registry),
            ShellConfig::default(),
        );

        let original = screen();
        let composed = composer.compose("incidents", original.clone()).await;
        assert!(Arc::ptr_eq(&original, &composed));
    }

    #[tokio::test]
    async fn test_invalid_shell_is_unwrapped() {
        let (temp, probe) = create_test_product();
        add_shell(&temp, "sidebar_width = 30\n");
        let composer = composer(probe, &[]);

        let original = screen();
        let composed = composer.compose("incidents", original.clone()).await;
        assert!(Arc::ptr_eq(&original, &composed));
    }

    #[tokio::test]
    async fn test_compose_is_deterministic() {
        let (temp, probe) = create_test_product();
        add_shell(&temp, "title = \"Counsel Desk\"\n");
        let composer = composer(probe, &[]);

        let a = composer.compose("incidents", screen()).await;
        let b = composer.compose("incidents", screen()).await;
        assert_eq!(a.name(), b.name());
    }
}
