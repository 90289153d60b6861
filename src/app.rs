//! Application state and main event loop.

use crate::config::ProjectConfig;
use crate::domain::{section_route, PhaseStep, Project, ScreenDesignRef, StepStatus};
use crate::error::{AppError, Result};
use crate::preview::{
    subscribe_theme, DevicePreset, FileThemeStore, PreviewHost, PreviewSession, ShellComposer,
    ThemeStore, NUDGE_PERCENT,
};
use crate::services::{
    ArtifactProbe, ComponentRegistry, PipelineProgress, ProgressService, SectionProgress,
};
use crate::ui::input::{Action, InputHandler};
use crate::ui::widgets::document::{DocumentViewerState, OpenDocument};
use crate::ui::widgets::help::HelpWidget;
use crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Application view state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppView {
    /// The five global phases
    #[default]
    Phases,
    /// Section list
    Sections,
    /// One section's steps and screen designs
    SectionDetail(String),
    /// Screen design preview
    Preview,
    /// Read-only markdown document
    Document,
    /// Help view showing keybindings
    Help,
}

/// Main application state
pub struct App {
    /// Project context
    pub project: Project,
    /// Global phase statuses
    pub pipeline: PipelineProgress,
    /// Per-section progress in roadmap order
    pub sections: Vec<SectionProgress>,

    // UI State
    /// Current view
    pub view: AppView,
    /// View to return to from documents and help
    return_view: AppView,
    pub selected_phase_index: usize,
    pub selected_section_index: usize,
    pub selected_design_index: usize,
    /// Error message to display
    pub error_message: Option<String>,
    /// Non-blocking status line
    pub status_message: Option<String>,

    // Preview and document state
    /// Open preview; dropping it stops its load and theme polling
    pub preview: Option<PreviewSession>,
    pub document: Option<OpenDocument>,
    pub document_viewer_state: DocumentViewerState,
    pub help_view_state: DocumentViewerState,

    // Services
    probe: Arc<ArtifactProbe>,
    progress: ProgressService,
    registry: Arc<ComponentRegistry>,
    theme_store: Arc<dyn ThemeStore>,

    // Input handler
    input_handler: InputHandler,
}

impl App {
    /// Create a new application instance
    pub fn new(project_root: PathBuf) -> Result<Self> {
        let config = match ProjectConfig::load(Some(&project_root)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default configuration: {}", e);
                ProjectConfig::default()
            }
        };
        let project = Project::new(project_root, config);
        if !project.has_product_directory() {
            tracing::warn!(
                "Product directory {:?} does not exist yet",
                project.product_directory
            );
        }

        let probe = Arc::new(ArtifactProbe::new(
            project.product_directory.clone(),
            project.export_directory.clone(),
        ));
        let progress = ProgressService::new(probe.clone());
        let registry = Arc::new(ComponentRegistry::from_artifacts(&probe));
        let theme_store: Arc<dyn ThemeStore> =
            Arc::new(FileThemeStore::new(project.theme_store_path.clone()));
        let input_handler = InputHandler::new(project.config.ui.vim_navigation);

        let pipeline = progress.pipeline();
        let sections = progress.sections();
        let selected_phase_index = pipeline.current.map(|p| p.index()).unwrap_or(0);

        Ok(Self {
            project,
            pipeline,
            sections,
            view: AppView::Phases,
            return_view: AppView::Phases,
            selected_phase_index,
            selected_section_index: 0,
            selected_design_index: 0,
            error_message: None,
            status_message: None,
            preview: None,
            document: None,
            document_viewer_state: DocumentViewerState::default(),
            help_view_state: DocumentViewerState::default(),
            probe,
            progress,
            registry,
            theme_store,
            input_handler,
        })
    }

    /// Rescan artifacts, rebuilding the component registry
    pub fn refresh(&mut self) {
        self.registry = Arc::new(ComponentRegistry::from_artifacts(&self.probe));
        self.pipeline = self.progress.pipeline();
        self.sections = self.progress.sections();

        self.selected_section_index = self
            .selected_section_index
            .min(self.sections.len().saturating_sub(1));
        let designs = self
            .current_section()
            .map(|s| s.screen_designs.len())
            .unwrap_or(0);
        self.selected_design_index = self.selected_design_index.min(designs.saturating_sub(1));

        if let Some(design) = self.preview.as_ref().map(|p| p.design().clone()) {
            self.open_preview(design);
        }
        tracing::debug!("Refreshed {} sections", self.sections.len());
    }

    /// Phase under the cursor on the phases view
    pub fn selected_phase(&self) -> PhaseStep {
        PhaseStep::ALL[self.selected_phase_index.min(PhaseStep::ALL.len() - 1)]
    }

    /// Section shown by the detail view, or under the cursor on the list
    pub fn current_section(&self) -> Option<&SectionProgress> {
        match &self.view {
            AppView::SectionDetail(id) => self.sections.iter().find(|s| &s.section.id == id),
            _ => self.sections.get(self.selected_section_index),
        }
    }

    /// Screen design under the cursor on the section detail view
    pub fn selected_design(&self) -> Option<&ScreenDesignRef> {
        self.current_section()?
            .screen_designs
            .get(self.selected_design_index)
    }

    /// Route of what is on screen, shown as a breadcrumb
    pub fn route(&self) -> String {
        match &self.view {
            AppView::Document | AppView::Help => self.view_route(&self.return_view),
            view => self.view_route(view),
        }
    }

    fn view_route(&self, view: &AppView) -> String {
        match view {
            AppView::Phases => self.selected_phase().route_path().to_string(),
            AppView::SectionDetail(id) => section_route(id),
            AppView::Preview => self
                .preview
                .as_ref()
                .map(|p| p.design().route())
                .unwrap_or_default(),
            AppView::Sections | AppView::Document | AppView::Help => {
                PhaseStep::Sections.route_path().to_string()
            }
        }
    }

    fn open_selected_phase(&mut self) {
        let phase = self.selected_phase();
        if self.pipeline.status_of(phase) == StepStatus::Upcoming {
            if let Some(current) = self.pipeline.current {
                self.status_message = Some(format!(
                    "{} is upcoming; {} is the current phase",
                    phase.label(),
                    current.label()
                ));
            }
        }

        match phase {
            PhaseStep::Sections => {
                self.view = AppView::Sections;
            }
            PhaseStep::Export => {
                if self.probe.has_export() {
                    self.status_message = Some(format!(
                        "Exported to {}",
                        self.project.export_directory.display()
                    ));
                } else {
                    self.error_message = Some("Nothing exported yet".to_string());
                }
            }
            _ => self.view_phase_document(phase),
        }
    }

    fn view_phase_document(&mut self, phase: PhaseStep) {
        let (title, content) = match phase {
            PhaseStep::Product => ("product-overview.md", self.probe.read_product_overview()),
            PhaseStep::DataModel => ("data-model.md", self.probe.read_data_model()),
            PhaseStep::Design => ("shell/spec.md", self.probe.read_shell_spec()),
            PhaseStep::Sections | PhaseStep::Export => {
                self.error_message = Some(format!("{} has no document", phase.label()));
                return;
            }
        };
        self.open_document(title, content);
    }

    fn view_section_spec(&mut self) {
        let Some(section) = self.current_section() else {
            return;
        };
        let id = section.section.id.clone();
        let content = self.probe.read_section_spec(&id);
        self.open_document(format!("sections/{}/spec.md", id), content);
    }

    /// Show a document, or report it missing
    pub fn open_document(&mut self, title: impl Into<String>, content: Option<String>) {
        let title = title.into();
        let Some(content) = content else {
            self.error_message = Some(format!("{} not found", title));
            return;
        };

        let document = OpenDocument::new(title, content);
        self.document_viewer_state = DocumentViewerState::new(document.line_count());
        self.document = Some(document);
        self.return_view = self.view.clone();
        self.view = AppView::Document;
    }

    /// Close the document and go back
    pub fn close_document(&mut self) {
        self.document = None;
        self.view = self.return_view.clone();
    }

    /// Open the preview of a screen design
    pub fn open_preview(&mut self, design: ScreenDesignRef) {
        // drop the old session first so its tasks stop
        let previous_width = self.preview.take().map(|p| p.host.width_percent());

        let config = &self.project.config;
        let mut host = PreviewHost::new(
            config.preview.min_frame_width,
            config.preview.drag_handle_tolerance,
        );
        if let Some(width) = previous_width {
            host = host.with_width(width);
        }

        let composer = ShellComposer::new(
            self.probe.clone(),
            self.registry.clone(),
            config.shell.clone(),
        );
        let theme = subscribe_theme(
            self.theme_store.clone(),
            Duration::from_millis(config.theme.poll_interval_ms),
        );

        match PreviewSession::open(
            design,
            &self.registry,
            composer,
            host,
            theme,
            config.ui.system_theme,
        ) {
            Ok(session) => {
                self.preview = Some(session);
                self.view = AppView::Preview;
            }
            Err(e) => {
                self.error_message = Some(format!("Cannot preview: {}", e));
            }
        }
    }

    /// Leave the preview, tearing down its session
    pub fn close_preview(&mut self) {
        if let Some(session) = self.preview.take() {
            self.view = AppView::SectionDetail(session.design().section_id.clone());
        } else {
            self.view = AppView::Sections;
        }
    }

    /// Open help view
    pub fn open_help(&mut self) {
        if let Some(session) = self.preview.as_mut() {
            session.host.cancel_drag();
        }
        self.help_view_state = DocumentViewerState::new(HelpWidget::lines().len());
        self.return_view = self.view.clone();
        self.view = AppView::Help;
    }

    /// Close help view
    pub fn close_help(&mut self) {
        self.view = self.return_view.clone();
    }

    fn list_len(&self) -> usize {
        match &self.view {
            AppView::Phases => PhaseStep::ALL.len(),
            AppView::Sections => self.sections.len(),
            AppView::SectionDetail(_) => self
                .current_section()
                .map(|s| s.screen_designs.len())
                .unwrap_or(0),
            _ => 0,
        }
    }

    fn selection_mut(&mut self) -> Option<&mut usize> {
        match &self.view {
            AppView::Phases => Some(&mut self.selected_phase_index),
            AppView::Sections => Some(&mut self.selected_section_index),
            AppView::SectionDetail(_) => Some(&mut self.selected_design_index),
            _ => None,
        }
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        if let Some(index) = self.selection_mut() {
            *index = index.saturating_sub(1);
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        let last = self.list_len().saturating_sub(1);
        if let Some(index) = self.selection_mut() {
            *index = (*index + 1).min(last);
        }
    }

    fn select_edge(&mut self, end: bool) {
        let last = self.list_len().saturating_sub(1);
        if let Some(index) = self.selection_mut() {
            *index = if end { last } else { 0 };
        }
    }

    /// Handle keyboard input and return true if should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Clear messages on any key press
        self.error_message = None;
        self.status_message = None;

        let Some(action) = self.input_handler.handle_key(key) else {
            return false;
        };

        match self.view {
            AppView::Help => self.handle_help_action(action),
            AppView::Document => self.handle_document_action(action),
            AppView::Preview => self.handle_preview_action(action),
            _ => self.handle_list_action(action),
        }
    }

    fn handle_list_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveUp => self.select_previous(),
            Action::MoveDown => self.select_next(),
            Action::Home | Action::PageUp => self.select_edge(false),
            Action::End | Action::PageDown => self.select_edge(true),
            Action::Select => match self.view.clone() {
                AppView::Phases => self.open_selected_phase(),
                AppView::Sections => {
                    if let Some(section) = self.current_section() {
                        let id = section.section.id.clone();
                        self.selected_design_index = 0;
                        self.view = AppView::SectionDetail(id);
                    }
                }
                AppView::SectionDetail(_) => self.preview_selected_design(),
                _ => {}
            },
            Action::Preview => {
                if matches!(self.view, AppView::SectionDetail(_)) {
                    self.preview_selected_design();
                }
            }
            Action::ViewDocument => match self.view {
                AppView::Phases => self.view_phase_document(self.selected_phase()),
                _ => self.view_section_spec(),
            },
            Action::Back => match self.view {
                AppView::SectionDetail(_) => self.view = AppView::Sections,
                AppView::Sections => self.view = AppView::Phases,
                _ => {}
            },
            Action::Refresh => self.refresh(),
            Action::Help => self.open_help(),
            Action::Quit => return true,
            _ => {}
        }
        false
    }

    fn preview_selected_design(&mut self) {
        match self.selected_design().cloned() {
            Some(design) => self.open_preview(design),
            None => {
                self.error_message = Some("This section has no screen designs yet".to_string());
            }
        }
    }

    fn handle_preview_action(&mut self, action: Action) -> bool {
        if action == Action::Quit {
            return true;
        }
        match action {
            Action::Back => self.close_preview(),
            Action::Help => self.open_help(),
            Action::Refresh => self.refresh(),
            _ => {
                let Some(session) = self.preview.as_mut() else {
                    return false;
                };
                match action {
                    Action::PresetMobile => session.host.apply_preset(DevicePreset::Mobile),
                    Action::PresetTablet => session.host.apply_preset(DevicePreset::Tablet),
                    Action::PresetDesktop => session.host.apply_preset(DevicePreset::Desktop),
                    Action::Shrink => session.host.nudge(-NUDGE_PERCENT),
                    Action::Grow => session.host.nudge(NUDGE_PERCENT),
                    _ => {}
                }
            }
        }
        false
    }

    fn handle_document_action(&mut self, action: Action) -> bool {
        let state = &mut self.document_viewer_state;
        match action {
            Action::Back | Action::Quit => self.close_document(),
            Action::MoveUp => state.scroll_up(1),
            Action::MoveDown => state.scroll_down(1),
            Action::PageUp => state.page_up(),
            Action::PageDown => state.page_down(),
            Action::Home => state.scroll_to_top(),
            Action::End => state.scroll_to_bottom(),
            _ => {}
        }
        false
    }

    fn handle_help_action(&mut self, action: Action) -> bool {
        let state = &mut self.help_view_state;
        match action {
            Action::Back | Action::Quit | Action::Help => self.close_help(),
            Action::MoveUp => state.scroll_up(1),
            Action::MoveDown => state.scroll_down(1),
            Action::PageUp => state.page_up(),
            Action::PageDown => state.page_down(),
            _ => {}
        }
        false
    }

    /// Route mouse events to the preview's resize handles
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(session) = self.preview.as_mut() else {
            return;
        };

        // a release ends the gesture whatever is on screen
        if let MouseEventKind::Up(_) = mouse.kind {
            session.host.pointer_up();
            return;
        }
        if self.view != AppView::Preview {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                session.host.pointer_down(mouse.column, mouse.row);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                session.host.pointer_move(mouse.column);
            }
            _ => {}
        }
    }

    /// Give the preview host and scrolled views the geometry of the next frame
    pub fn sync_layout(&mut self, area: Rect) {
        if let Some(session) = self.preview.as_mut() {
            session.host.set_viewport(crate::ui::layout::preview_viewport(area));
        }
        let body = crate::ui::layout::body_area(area).height.saturating_sub(2) as usize;
        self.document_viewer_state.set_visible_height(body);
        self.help_view_state
            .set_visible_height(area.height.saturating_sub(2) as usize);
    }

    /// Pick up finished loads and theme changes
    pub fn tick(&mut self) {
        if let Some(session) = self.preview.as_mut() {
            session.poll();
        }
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick_rate = Duration::from_millis(self.project.config.ui.refresh_rate_ms);
        let mut last_tick = Instant::now();

        loop {
            self.tick();

            let size = terminal
                .size()
                .map_err(|e| AppError::Terminal(e.to_string()))?;
            self.sync_layout(Rect::new(0, 0, size.width, size.height));

            terminal.draw(|f| crate::ui::layout::draw(f, self))?;

            // Poll faster while a preview is still loading
            let timeout = if self.preview.as_ref().is_some_and(|p| p.is_pending()) {
                Duration::from_millis(20)
            } else {
                tick_rate.saturating_sub(last_tick.elapsed())
            };

            if event::poll(timeout).map_err(|e| AppError::Terminal(e.to_string()))? {
                match event::read().map_err(|e| AppError::Terminal(e.to_string()))? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            break;
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        tracing::debug!("Terminal resized to {}x{}", width, height);
                    }
                    Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
            }
        }

        // Stop background work before the runtime shuts down
        self.preview = None;
        Ok(())
    }
}
