//! Light/dark theme flag shared with the preview frame.
//!
//! The flag lives in an externally owned store under the `theme` key. Stores
//! that can push changes hand out a `watch` receiver; the rest are polled on a
//! bounded interval by a task that dies with its subscription.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Key of the theme flag in the shared store
pub const THEME_KEY: &str = "theme";

/// Theme flag as written by the store's owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Parse a stored value; unknown values are ignored
    pub fn parse(value: &str) -> Option<Theme> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    /// Resolve `System` to a concrete theme
    pub fn resolve(self, system: Theme) -> Theme {
        match self {
            Self::System if system == Self::Light => Self::Light,
            Self::System => Self::Dark,
            other => other,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

/// Colors applied to the preview frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub danger: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: Color::Rgb(250, 250, 250),
        surface: Color::Rgb(238, 238, 242),
        foreground: Color::Rgb(24, 24, 27),
        muted: Color::Rgb(113, 113, 122),
        accent: Color::Rgb(79, 70, 229),
        border: Color::Rgb(212, 212, 216),
        danger: Color::Rgb(220, 38, 38),
    };

    pub const DARK: Palette = Palette {
        background: Color::Rgb(9, 9, 11),
        surface: Color::Rgb(24, 24, 27),
        foreground: Color::Rgb(244, 244, 245),
        muted: Color::Rgb(161, 161, 170),
        accent: Color::Rgb(129, 140, 248),
        border: Color::Rgb(63, 63, 70),
        danger: Color::Rgb(248, 113, 113),
    };

    /// Palette for a theme flag, resolving `System` first
    pub fn for_theme(theme: Theme, system: Theme) -> Palette {
        match theme.resolve(system) {
            Theme::Light => Self::LIGHT,
            _ => Self::DARK,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DARK
    }
}

/// Externally owned store holding the theme flag. Read only from here.
pub trait ThemeStore: Send + Sync {
    /// Current value, `None` when unset or unreadable
    fn read(&self) -> Option<Theme>;

    /// Push channel, when the store can notify about changes
    fn changes(&self) -> Option<watch::Receiver<Theme>> {
        None
    }
}

/// Theme store backed by a JSON object file, e.g. `{"theme": "dark"}`
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ThemeStore for FileThemeStore {
    fn read(&self) -> Option<Theme> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!("Ignoring unreadable theme store {:?}: {}", self.path, e);
                return None;
            }
        };
        value.get(THEME_KEY)?.as_str().and_then(Theme::parse)
    }
}

/// In-process theme store whose owner pushes every change
#[derive(Debug)]
pub struct MemoryThemeStore {
    tx: watch::Sender<Theme>,
}

impl MemoryThemeStore {
    pub fn new(initial: Theme) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Owner-side write
    pub fn set(&self, theme: Theme) {
        self.tx.send_replace(theme);
    }
}

impl ThemeStore for MemoryThemeStore {
    fn read(&self) -> Option<Theme> {
        Some(*self.tx.borrow())
    }

    fn changes(&self) -> Option<watch::Receiver<Theme>> {
        Some(self.tx.subscribe())
    }
}

/// Live view of the theme flag for one preview session.
///
/// Dropping it stops the polling task, if one was started.
pub struct ThemeSubscription {
    rx: watch::Receiver<Theme>,
    poller: Option<JoinHandle<()>>,
}

impl ThemeSubscription {
    /// Latest known theme
    pub fn current(&self) -> Theme {
        *self.rx.borrow()
    }

    /// Take the latest value if it changed since the last call
    pub fn poll_change(&mut self) -> Option<Theme> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            _ => None,
        }
    }

    /// Wait for the next change; `None` once the store is gone
    pub async fn changed(&mut self) -> Option<Theme> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    /// Whether changes are detected by polling
    pub fn is_polling(&self) -> bool {
        self.poller.is_some()
    }
}

impl Drop for ThemeSubscription {
    fn drop(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.abort();
        }
    }
}

/// Subscribe to theme changes, pushing when possible and polling otherwise.
///
/// Polling requires a running tokio runtime.
pub fn subscribe_theme(store: Arc<dyn ThemeStore>, poll_interval: Duration) -> ThemeSubscription {
    if let Some(rx) = store.changes() {
        return ThemeSubscription { rx, poller: None };
    }

    let initial = store.read().unwrap_or_default();
    let (tx, rx) = watch::channel(initial);
    let poll_interval = poll_interval.max(Duration::from_millis(10));

    let poller = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = tx.closed() => break,
            }
            let reader = Arc::clone(&store);
            let theme = match tokio::task::spawn_blocking(move || reader.read()).await {
                Ok(theme) => theme.unwrap_or_default(),
                Err(e) => {
                    tracing::debug!("Theme store read did not finish: {}", e);
                    continue;
                }
            };
            tx.send_if_modified(|current| {
                if *current == theme {
                    false
                } else {
                    tracing::debug!("Theme changed to {}", theme.display_name());
                    *current = theme;
                    true
                }
            });
        }
    });

    ThemeSubscription {
        rx,
        poller: Some(poller),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_and_resolve() {
        assert_eq!(Theme::parse(" Dark "), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::System.resolve(Theme::Light), Theme::Light);
        assert_eq!(Theme::System.resolve(Theme::System), Theme::Dark);
        assert_eq!(Theme::Light.resolve(Theme::Dark), Theme::Light);
        assert_eq!(Palette::for_theme(Theme::Light, Theme::Dark), Palette::LIGHT);
    }

    #[test]
    fn test_file_store_reads_theme_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        let store = FileThemeStore::new(path.clone());
        assert_eq!(store.read(), None);

        std::fs::write(&path, r#"{"theme": "light", "other": 1}"#).unwrap();
        assert_eq!(store.read(), Some(Theme::Light));

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_memory_store_pushes_changes() {
        tokio_test::block_on(async {
            let store = Arc::new(MemoryThemeStore::new(Theme::Dark));
            let mut sub = subscribe_theme(store.clone(), Duration::from_secs(60));
            assert!(!sub.is_polling());
            assert_eq!(sub.current(), Theme::Dark);
            assert_eq!(sub.poll_change(), None);

            store.set(Theme::Light);
            assert_eq!(sub.changed().await, Some(Theme::Light));
            assert_eq!(sub.poll_change(), None);
        });
    }

    #[tokio::test]
    async fn test_file_store_is_polled() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let store: Arc<dyn ThemeStore> = Arc::new(FileThemeStore::new(path.clone()));
        let mut sub = subscribe_theme(store, Duration::from_millis(10));
        assert!(sub.is_polling());
        assert_eq!(sub.current(), Theme::Dark);

        std::fs::write(&path, r#"{"theme": "light"}"#).unwrap();
        let changed = tokio::time::timeout(Duration::from_secs(5), sub.changed())
            .await
            .unwrap();
        assert_eq!(changed, Some(Theme::Light));
    }

    #[tokio::test]
    async fn test_drop_stops_poller() {
        let store: Arc<dyn ThemeStore> = Arc::new(FileThemeStore::new(PathBuf::from("/nonexistent")));
        let sub = subscribe_theme(store.clone(), Duration::from_millis(10));
        drop(sub);
        tokio::time::sleep(Duration::from_millis(30)).await;
        // the poller held the only other reference to the store
        assert_eq!(Arc::strong_count(&store), 1);
    }
}
