// ABOUTME: Application state - session set, selection, UI mode and pending error

use crate::app::messages::{Command, LoopExit};
use crate::app::reconcile::{reconcile, Reconciled};
use crate::byobu::GatewayError;
use crate::config::AppConfig;
use crate::models::Session;
use tracing::{debug, info};

/// Rows moved by PageUp / PageDown
const PAGE_SIZE: usize = 10;

/// Single-line text input with cursor support for session names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    chars: Vec<char>,
    cursor: usize,
    limit: usize,
}

impl TextInput {
    pub const fn new(limit: usize) -> Self {
        Self {
            chars: Vec::new(),
            cursor: 0,
            limit,
        }
    }

    /// Pre-filled input with the cursor at the end
    pub fn with_value(value: &str, limit: usize) -> Self {
        let chars: Vec<char> = value.chars().take(limit).collect();
        let cursor = chars.len();
        Self { chars, cursor, limit }
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Cursor position in characters
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert_char(&mut self, ch: char) {
        if self.chars.len() >= self.limit || ch.is_control() {
            return;
        }
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.chars.remove(self.cursor - 1);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.chars.len();
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }
}

/// The one active UI mode. Transient state lives inside its variant so it
/// is dropped the moment the mode is left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Listing,
    ConfirmingKill { target: String },
    CreatingSession { input: TextInput },
    RenamingSession { original: String, input: TextInput },
}

impl Mode {
    pub const fn is_listing(&self) -> bool {
        matches!(self, Self::Listing)
    }

    pub fn input_mut(&mut self) -> Option<&mut TextInput> {
        match self {
            Self::CreatingSession { input } | Self::RenamingSession { input, .. } => Some(input),
            _ => None,
        }
    }
}

/// Which session the user is focused on, by name. `Default` means the
/// first row (or nothing when the list is empty).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Default,
    Named(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

#[derive(Debug)]
pub struct AppState {
    pub sessions: Vec<Session>,
    pub selection: Selection,
    /// Focused name captured right before a fetch is dispatched
    pub remembered_selection: Option<String>,
    pub mode: Mode,
    pub pending_error: Option<GatewayError>,
    /// Set once the loop should end; the core ignores everything after that
    pub exit: Option<LoopExit>,
    /// True after the first fetch completed, successfully or not
    pub loaded: bool,
    pub name_char_limit: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            sessions: Vec::new(),
            selection: Selection::Default,
            remembered_selection: None,
            mode: Mode::Listing,
            pending_error: None,
            exit: None,
            loaded: false,
            name_char_limit: config.name_char_limit,
        }
    }

    pub const fn is_terminated(&self) -> bool {
        self.exit.is_some()
    }

    /// Commands to issue when the loop starts
    pub fn initial_commands(&self) -> Vec<Command> {
        vec![Command::FetchSessions]
    }

    pub fn focused_index(&self) -> Option<usize> {
        if self.sessions.is_empty() {
            return None;
        }
        match &self.selection {
            Selection::Named(name) => Some(
                self.sessions
                    .iter()
                    .position(|s| &s.name == name)
                    .unwrap_or(0),
            ),
            Selection::Default => Some(0),
        }
    }

    pub fn focused_session(&self) -> Option<&Session> {
        self.focused_index().and_then(|idx| self.sessions.get(idx))
    }

    pub fn focused_name(&self) -> Option<String> {
        self.focused_session().map(|s| s.name.clone())
    }

    pub fn navigate(&mut self, navigation: Navigation) {
        let Some(current) = self.focused_index() else {
            return;
        };
        let last = self.sessions.len() - 1;
        let next = match navigation {
            Navigation::Up => current.saturating_sub(1),
            Navigation::Down => (current + 1).min(last),
            Navigation::PageUp => current.saturating_sub(PAGE_SIZE),
            Navigation::PageDown => (current + PAGE_SIZE).min(last),
            Navigation::Top => 0,
            Navigation::Bottom => last,
        };
        self.selection = Selection::Named(self.sessions[next].name.clone());
    }

    /// Remember the focused name and request a fetch
    pub fn request_fetch(&mut self) -> Command {
        self.remembered_selection = self.focused_name();
        debug!(
            "Dispatching fetch, remembered selection: {:?}",
            self.remembered_selection
        );
        Command::FetchSessions
    }

    /// Merge a fetch result into the visible state
    pub fn apply_fetch(&mut self, fetched: Result<Vec<Session>, GatewayError>) {
        self.loaded = true;
        let Reconciled {
            sessions,
            selection,
            error,
        } = reconcile(
            &self.sessions,
            &self.selection,
            self.remembered_selection.as_deref(),
            fetched,
        );
        self.sessions = sessions;
        self.selection = selection;
        if let Some(error) = error {
            self.set_error(error);
        }
    }

    /// The newest error replaces any earlier one
    pub fn set_error(&mut self, error: GatewayError) {
        info!("Surfacing error: {}", error);
        self.pending_error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.pending_error = None;
    }

    pub fn enter_create_mode(&mut self) {
        self.mode = Mode::CreatingSession {
            input: TextInput::new(self.name_char_limit),
        };
    }

    pub fn enter_rename_mode(&mut self) -> bool {
        let Some(name) = self.focused_name() else {
            return false;
        };
        self.mode = Mode::RenamingSession {
            input: TextInput::with_value(&name, self.name_char_limit),
            original: name,
        };
        true
    }

    pub fn enter_kill_mode(&mut self) -> bool {
        let Some(target) = self.focused_name() else {
            return false;
        };
        self.mode = Mode::ConfirmingKill { target };
        true
    }

    /// Leave any transient mode, returning what it held
    pub fn return_to_listing(&mut self) -> Mode {
        std::mem::replace(&mut self.mode, Mode::Listing)
    }

    pub fn quit(&mut self) {
        self.exit = Some(LoopExit::Quit);
    }

    pub fn attach_selected(&mut self) -> bool {
        let Some(name) = self.focused_name() else {
            return false;
        };
        info!("Selected session '{}' for attach", name);
        self.exit = Some(LoopExit::Attach(name));
        true
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
