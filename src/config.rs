//! Configuration management for design-tui.
//!
//! Supports layered configuration: defaults → project → user → env

use crate::error::ConfigError;
use crate::preview::Theme;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub product: ProductConfig,
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl ProjectConfig {
    /// Load configuration with hierarchy: defaults → project → user → env
    pub fn load(project_root: Option<&PathBuf>) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // 1. Start with defaults
        builder = builder.add_source(
            config::File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Project-specific config (.design-tui.toml in project root)
        if let Some(root) = project_root {
            let project_config = root.join(".design-tui.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }
        }

        // 3. User config (~/.config/design-tui/config.toml)
        if let Some(config_dir) = directories::ProjectDirs::from("com", "design-tui", "design-tui")
        {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. Environment variables (DESIGN_TUI__*)
        builder = builder.add_source(
            Environment::with_prefix("DESIGN_TUI")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the preview cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preview.min_frame_width == 0 {
            return Err(ConfigError::Invalid(
                "preview.min_frame_width must be at least 1".to_string(),
            ));
        }
        if self.theme.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "theme.poll_interval_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Location of the product artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    /// Directory holding product artifacts (relative to project root)
    #[serde(default = "default_product_directory")]
    pub directory: PathBuf,
    /// Directory the export phase writes to (relative to project root)
    #[serde(default = "default_export_directory")]
    pub export_directory: PathBuf,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            directory: default_product_directory(),
            export_directory: default_export_directory(),
        }
    }
}

fn default_product_directory() -> PathBuf {
    PathBuf::from("product")
}

fn default_export_directory() -> PathBuf {
    PathBuf::from("product-plan")
}

/// Application shell configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Sections previewed without the application shell
    #[serde(default)]
    pub exclude_sections: Vec<String>,
}

impl ShellConfig {
    /// Whether a section is wrapped in the shell when previewed
    pub fn uses_shell(&self, section_id: &str) -> bool {
        !self.exclude_sections.iter().any(|s| s == section_id)
    }
}

/// Preview frame configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Smallest frame width in columns, whatever the percentage
    #[serde(default = "default_min_frame_width")]
    pub min_frame_width: u16,
    /// Columns around a frame edge that still grab the resize handle
    #[serde(default = "default_drag_handle_tolerance")]
    pub drag_handle_tolerance: u16,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            min_frame_width: default_min_frame_width(),
            drag_handle_tolerance: default_drag_handle_tolerance(),
        }
    }
}

fn default_min_frame_width() -> u16 {
    24
}

fn default_drag_handle_tolerance() -> u16 {
    1
}

/// Shared theme store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// JSON file holding the shared `theme` key (relative to project root)
    #[serde(default = "default_theme_store_path")]
    pub store_path: PathBuf,
    /// Polling interval when the store cannot push changes
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            store_path: default_theme_store_path(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_theme_store_path() -> PathBuf {
    PathBuf::from(".design-tui/settings.json")
}

fn default_poll_interval_ms() -> u64 {
    1000
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// UI refresh rate in milliseconds
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,
    /// Enable vim-style navigation (j/k/h/l)
    #[serde(default = "default_vim_navigation")]
    pub vim_navigation: bool,
    /// Theme used when the shared store says `system`
    #[serde(default = "default_system_theme")]
    pub system_theme: Theme,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate_ms(),
            vim_navigation: default_vim_navigation(),
            system_theme: default_system_theme(),
        }
    }
}

fn default_refresh_rate_ms() -> u64 {
    100
}

fn default_vim_navigation() -> bool {
    true
}

fn default_system_theme() -> Theme {
    Theme::Dark
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ProjectConfig::default();
        assert_eq!(config.product.directory, PathBuf::from("product"));
        assert_eq!(config.product.export_directory, PathBuf::from("product-plan"));
        assert!(config.shell.exclude_sections.is_empty());
        assert_eq!(config.preview.min_frame_width, 24);
        assert_eq!(config.theme.poll_interval_ms, 1000);
        assert_eq!(config.ui.refresh_rate_ms, 100);
        assert!(config.ui.vim_navigation);
        assert_eq!(config.ui.system_theme, Theme::Dark);
    }

    #[test]
    fn test_project_config_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(".design-tui.toml"),
            "[shell]\nexclude_sections = [\"login\"]\n\n[preview]\nmin_frame_width = 40\n",
        )
        .unwrap();

        let root = temp.path().to_path_buf();
        let config = ProjectConfig::load(Some(&root)).unwrap();
        assert_eq!(config.shell.exclude_sections, vec!["login".to_string()]);
        assert_eq!(config.preview.min_frame_width, 40);
        assert_eq!(config.product.directory, PathBuf::from("product"));
    }

    #[test]
    fn test_uses_shell() {
        let shell = ShellConfig {
            exclude_sections: vec!["login".to_string()],
        };
        assert!(!shell.uses_shell("login"));
        assert!(shell.uses_shell("incidents"));
    }

    #[test]
    fn test_validate_rejects_zero_frame_width() {
        let mut config = ProjectConfig::default();
        config.preview.min_frame_width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
