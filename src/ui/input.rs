//! Keyboard input handling with vim-style navigation support.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Home,
    End,

    // Selection
    Select,
    Back,

    // Artifacts
    ViewDocument,
    Preview,

    // Preview frame
    PresetMobile,
    PresetTablet,
    PresetDesktop,
    Shrink,
    Grow,

    // Misc
    Help,
    Quit,
    Refresh,
}

/// Keyboard bindings configuration
pub struct KeyBindings {
    pub vim_navigation: bool,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            vim_navigation: true,
        }
    }
}

/// Input handler for processing keyboard events
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create a new input handler
    pub fn new(vim_navigation: bool) -> Self {
        Self {
            bindings: KeyBindings { vim_navigation },
        }
    }

    /// Handle a key event and return the corresponding action
    pub fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match key.code {
            // Navigation - arrow keys always work
            KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Down => Some(Action::MoveDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::Home => Some(Action::Home),
            KeyCode::End => Some(Action::End),

            // Vim-style navigation
            KeyCode::Char('j') if self.bindings.vim_navigation => Some(Action::MoveDown),
            KeyCode::Char('k') if self.bindings.vim_navigation => Some(Action::MoveUp),
            KeyCode::Char('g') if self.bindings.vim_navigation => Some(Action::Home),
            KeyCode::Char('G') if self.bindings.vim_navigation => Some(Action::End),

            // Selection
            KeyCode::Enter => Some(Action::Select),
            KeyCode::Char(' ') => Some(Action::Select),

            // Back/Quit
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Char('q') => Some(Action::Quit),

            // Actions
            KeyCode::Char('v') => Some(Action::ViewDocument),
            KeyCode::Char('p') => Some(Action::Preview),
            KeyCode::Char('1') => Some(Action::PresetMobile),
            KeyCode::Char('2') => Some(Action::PresetTablet),
            KeyCode::Char('3') => Some(Action::PresetDesktop),
            KeyCode::Char('[') => Some(Action::Shrink),
            KeyCode::Char(']') => Some(Action::Grow),

            // Misc
            KeyCode::Char('?') => Some(Action::Help),
            KeyCode::Char('r') | KeyCode::F(5) => Some(Action::Refresh),

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_vim_navigation() {
        let handler = InputHandler::new(true);
        assert_eq!(handler.handle_key(key(KeyCode::Char('j'))), Some(Action::MoveDown));
        assert_eq!(handler.handle_key(key(KeyCode::Char('k'))), Some(Action::MoveUp));
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new(false); // vim disabled
        assert_eq!(handler.handle_key(key(KeyCode::Up)), Some(Action::MoveUp));
        assert_eq!(handler.handle_key(key(KeyCode::Down)), Some(Action::MoveDown));
        assert_eq!(handler.handle_key(key(KeyCode::Char('j'))), None);
    }

    #[test]
    fn test_preview_keys() {
        let handler = InputHandler::new(true);
        assert_eq!(handler.handle_key(key(KeyCode::Char('p'))), Some(Action::Preview));
        assert_eq!(handler.handle_key(key(KeyCode::Char('1'))), Some(Action::PresetMobile));
        assert_eq!(handler.handle_key(key(KeyCode::Char('3'))), Some(Action::PresetDesktop));
        assert_eq!(handler.handle_key(key(KeyCode::Char('['))), Some(Action::Shrink));
        assert_eq!(handler.handle_key(key(KeyCode::Char(']'))), Some(Action::Grow));
    }

    #[test]
    fn test_quit_and_refresh_keys() {
        let handler = InputHandler::new(true);
        assert_eq!(handler.handle_key(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(handler.handle_key(key(KeyCode::Esc)), Some(Action::Back));
        assert_eq!(handler.handle_key(key(KeyCode::F(5))), Some(Action::Refresh));
        assert_eq!(
            handler.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }
}
