//! One open preview: the resolve/compose task, the viewport and the theme.
//!
//! The render path never waits on the task. It shows a loading placeholder
//! until the composed component arrives on a oneshot channel, and dropping
//! the session aborts the task and the theme subscription with it.

use super::{
    Component, Palette, Placeholder, PreviewHost, ShellComposer, Theme, ThemeSubscription,
};
use crate::domain::ScreenDesignRef;
use crate::error::{PreviewError, PreviewResult};
use crate::services::ComponentRegistry;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Where the preview is in its load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStatus {
    Pending,
    NotFound,
    Ready,
}

pub struct PreviewSession {
    design: ScreenDesignRef,
    pub host: PreviewHost,
    status: PreviewStatus,
    component: Arc<dyn Component>,
    rx: Option<oneshot::Receiver<Arc<dyn Component>>>,
    task: Option<JoinHandle<()>>,
    theme: ThemeSubscription,
    system_theme: Theme,
}

impl PreviewSession {
    /// Resolve the screen design and start loading it in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(
        design: ScreenDesignRef,
        registry: &ComponentRegistry,
        composer: ShellComposer,
        host: PreviewHost,
        theme: ThemeSubscription,
        system_theme: Theme,
    ) -> PreviewResult<Self> {
        let target = design.to_string();
        let mut session = Self {
            host,
            status: PreviewStatus::Pending,
            component: Arc::new(Placeholder::loading(&target)),
            rx: None,
            task: None,
            theme,
            system_theme,
            design,
        };

        let resolved =
            registry.resolve_screen_design(&session.design.section_id, &session.design.name)?;
        let Some(loader) = resolved else {
            tracing::debug!("No screen design registered for {}", target);
            session.status = PreviewStatus::NotFound;
            session.component = Arc::new(Placeholder::not_found(&target));
            return Ok(session);
        };

        let (tx, rx) = oneshot::channel();
        let section_id = session.design.section_id.clone();
        session.task = Some(tokio::spawn(async move {
            let screen = loader.load().await;
            let composed = composer.compose(&section_id, screen).await;
            // receiver gone means the preview was closed
            let _ = tx.send(composed);
        }));
        session.rx = Some(rx);
        Ok(session)
    }

    pub fn design(&self) -> &ScreenDesignRef {
        &self.design
    }

    pub fn status(&self) -> PreviewStatus {
        self.status
    }

    /// Component to render right now, a placeholder until the load settles
    pub fn component(&self) -> &dyn Component {
        self.component.as_ref()
    }

    /// Current theme flag as last seen in the store
    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme.current(), self.system_theme)
    }

    /// Pick up a finished load and theme changes. Returns whether anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        if let Some(rx) = self.rx.as_mut() {
            match rx.try_recv() {
                Ok(component) => {
                    self.component = component;
                    self.status = PreviewStatus::Ready;
                    self.rx = None;
                    self.task = None;
                    changed = true;
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    let target = self.design.to_string();
                    let error = PreviewError::load_failed(&target, "preview task ended early");
                    tracing::warn!("{}", error);
                    self.component = Arc::new(Placeholder::load_failure(&target, &error));
                    self.status = PreviewStatus::Ready;
                    self.rx = None;
                    self.task = None;
                    changed = true;
                }
            }
        }

        if let Some(theme) = self.theme.poll_change() {
            tracing::debug!("Preview theme now {}", theme.display_name());
            changed = true;
        }

        changed
    }

    pub fn is_pending(&self) -> bool {
        self.status == PreviewStatus::Pending
    }
}

impl Drop for PreviewSession {
    fn drop(&mut self) {
        self.host.cancel_drag();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
