//! Project entity representing the product workspace.

use crate::config::ProjectConfig;
use std::path::{Path, PathBuf};

/// Markers that identify a project root, checked in order
const ROOT_MARKERS: &[&str] = &[".design-tui.toml", "product", ".git"];

/// Represents the workspace holding the product artifacts
#[derive(Debug, Clone)]
pub struct Project {
    /// Workspace root path
    pub root_path: PathBuf,
    /// Directory containing product artifacts (absolute path)
    pub product_directory: PathBuf,
    /// Directory written by the export phase (absolute path)
    pub export_directory: PathBuf,
    /// Shared theme store file (absolute path)
    pub theme_store_path: PathBuf,
    /// Loaded configuration
    pub config: ProjectConfig,
}

impl Project {
    /// Create a new Project from a root path and configuration
    pub fn new(root_path: PathBuf, config: ProjectConfig) -> Self {
        let product_directory = root_path.join(&config.product.directory);
        let export_directory = root_path.join(&config.product.export_directory);
        let theme_store_path = root_path.join(&config.theme.store_path);

        Self {
            root_path,
            product_directory,
            export_directory,
            theme_store_path,
            config,
        }
    }

    /// Discover the project root by walking up from the current directory
    pub fn discover(start_path: Option<PathBuf>) -> Option<PathBuf> {
        let start = start_path
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        let mut current = start.as_path();
        loop {
            if is_project_root(current) {
                return Some(current.to_path_buf());
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => return None,
            }
        }
    }

    /// Check if the product directory exists
    pub fn has_product_directory(&self) -> bool {
        self.product_directory.is_dir()
    }
}

fn is_project_root(path: &Path) -> bool {
    ROOT_MARKERS.iter().any(|marker| path.join(marker).exists())
}
