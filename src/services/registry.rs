//! Registration table of deferred component loaders.
//!
//! Screen designs and the shell are registered once, at startup, as load
//! sources. Resolving a key hands out a cheap `Loader`; nothing is read until
//! `load` is awaited, and every clone of a loader shares one `OnceCell` so the
//! source runs at most once per registry.

use crate::error::{PreviewError, PreviewResult};
use crate::preview::{Component, MarkdownScreen, Placeholder, Shell, ShellLayout, SidebarShell};
use crate::services::ArtifactProbe;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Boxed future produced by a load source
pub type LoadFuture<T> = Pin<Box<dyn Future<Output = PreviewResult<Arc<T>>> + Send>>;

/// Produces a component on demand
pub type LoadSource<T> = Arc<dyn Fn() -> LoadFuture<T> + Send + Sync>;

/// Registry key of a screen design
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScreenDesignKey {
    pub section_id: String,
    pub name: String,
}

impl ScreenDesignKey {
    pub fn new(section_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ScreenDesignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.section_id, self.name)
    }
}

/// Deferred, memoized load of one component
pub struct Loader<T: ?Sized> {
    key: String,
    source: LoadSource<T>,
    cell: Arc<OnceCell<PreviewResult<Arc<T>>>>,
}

impl<T: ?Sized> Clone for Loader<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            source: Arc::clone(&self.source),
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Loader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("key", &self.key)
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl<T: ?Sized> Loader<T> {
    fn new(key: impl Into<String>, source: LoadSource<T>) -> Self {
        Self {
            key: key.into(),
            source,
            cell: Arc::new(OnceCell::new()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether a load has already completed, successfully or not
    pub fn is_settled(&self) -> bool {
        self.cell.initialized()
    }

    /// Run the source on first call; later and concurrent calls share its result
    pub async fn load(&self) -> PreviewResult<Arc<T>> {
        self.cell
            .get_or_init(|| {
                tracing::debug!("Loading component {}", self.key);
                (self.source)()
            })
            .await
            .clone()
    }
}

/// Loader of a screen design. Failures become a placeholder component.
#[derive(Debug, Clone)]
pub struct ScreenDesignLoader {
    key: ScreenDesignKey,
    inner: Loader<dyn Component>,
}

impl ScreenDesignLoader {
    pub fn key(&self) -> &ScreenDesignKey {
        &self.key
    }

    pub fn is_settled(&self) -> bool {
        self.inner.is_settled()
    }

    /// Load the screen design, or a failure placeholder if the source errors
    pub async fn load(&self) -> Arc<dyn Component> {
        match self.inner.load().await {
            Ok(component) => component,
            Err(e) => {
                tracing::warn!("Screen design {} failed to load: {}", self.key, e);
                Arc::new(Placeholder::load_failure(&self.key.to_string(), &e))
            }
        }
    }
}

/// Wrap an async closure as a load source
pub fn load_source<T, F, Fut>(f: F) -> LoadSource<T>
where
    T: ?Sized + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = PreviewResult<Arc<T>>> + Send + 'static,
{
    Arc::new(move || -> LoadFuture<T> { Box::pin(f()) })
}

/// Static table of screen design and shell sources
#[derive(Default)]
pub struct ComponentRegistry {
    screen_designs: HashMap<ScreenDesignKey, Loader<dyn Component>>,
    shell: Option<Loader<dyn Shell>>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every screen design and the shell component found on disk
    pub fn from_artifacts(probe: &ArtifactProbe) -> Self {
        let mut registry = Self::new();

        for section in probe.list_sections() {
            for design in probe.list_screen_designs(&section.id) {
                let Some(path) = probe.screen_design_path(&design) else {
                    continue;
                };
                let key = ScreenDesignKey::new(&design.section_id, &design.name);
                let name = design.name.clone();
                registry.register_screen_design(
                    design.section_id.clone(),
                    design.name.clone(),
                    move || read_screen_design(key.clone(), name.clone(), path.clone()),
                );
            }
        }

        if probe.has_shell_components() {
            let path = probe.shell_layout_path();
            registry.register_shell(move || read_shell(path.clone()));
        }

        tracing::debug!(
            "Registered {} screen designs, shell: {}",
            registry.screen_designs.len(),
            registry.shell.is_some()
        );
        registry
    }

    /// Register a screen design source, replacing any previous one
    pub fn register_screen_design<F, Fut>(
        &mut self,
        section_id: impl Into<String>,
        name: impl Into<String>,
        source: F,
    ) where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = PreviewResult<Arc<dyn Component>>> + Send + 'static,
    {
        let key = ScreenDesignKey::new(section_id, name);
        let loader = Loader::new(key.to_string(), load_source(source));
        self.screen_designs.insert(key, loader);
    }

    /// Register the shell source
    pub fn register_shell<F, Fut>(&mut self, source: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = PreviewResult<Arc<dyn Shell>>> + Send + 'static,
    {
        self.shell = Some(Loader::new("shell", load_source(source)));
    }

    /// Loader for a screen design; `None` when nothing is registered under the key
    pub fn resolve_screen_design(
        &self,
        section_id: &str,
        name: &str,
    ) -> PreviewResult<Option<ScreenDesignLoader>> {
        if section_id.trim().is_empty() {
            return Err(PreviewError::InvalidIdentifier(
                "section id is empty".to_string(),
            ));
        }
        if name.trim().is_empty() {
            return Err(PreviewError::InvalidIdentifier(
                "screen design name is empty".to_string(),
            ));
        }

        let key = ScreenDesignKey::new(section_id, name);
        Ok(self
            .screen_designs
            .get(&key)
            .map(|inner| ScreenDesignLoader {
                key,
                inner: inner.clone(),
            }))
    }

    /// Loader for the shell component, if one is registered
    pub fn resolve_shell(&self) -> Option<Loader<dyn Shell>> {
        self.shell.clone()
    }

    pub fn screen_design_count(&self) -> usize {
        self.screen_designs.len()
    }
}

async fn read_screen_design(
    key: ScreenDesignKey,
    name: String,
    path: PathBuf,
) -> PreviewResult<Arc<dyn Component>> {
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| PreviewError::load_failed(key.to_string(), e))?;
    Ok(Arc::new(MarkdownScreen::parse(name, &text)))
}

async fn read_shell(path: PathBuf) -> PreviewResult<Arc<dyn Shell>> {
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| PreviewError::load_failed("shell", e))?;
    let shell = SidebarShell::new(ShellLayout::from_toml(&text)?)?;
    Ok(Arc::new(shell))
}
