// ABOUTME: Event handling system - maps keys to app events and applies every message to state

use crate::app::messages::{AppMessage, Command, MutateAction};
use crate::app::state::{AppState, Mode, Navigation};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

/// Intent derived from a key press in the current mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    AttachSelected,
    Navigate(Navigation),
    // Mode entry from the list
    StartNewSession,
    StartRenameSession,
    StartKillSession,
    // Kill confirmation
    ConfirmKill,
    // Text entry
    SubmitInput,
    InputChar(char),
    InputBackspace,
    InputDelete,
    InputCursorLeft,
    InputCursorRight,
    InputCursorStart,
    InputCursorEnd,
    InputClear,
    /// Leave the transient mode with no side effect
    CancelMode,
}

pub struct EventHandler;

impl EventHandler {
    /// Apply one message from the loop queue. Returns the commands to dispatch.
    ///
    /// Messages arriving after the loop has been told to exit are dropped.
    pub fn handle_message(message: AppMessage, state: &mut AppState) -> Vec<Command> {
        if state.is_terminated() {
            debug!("Ignoring message after exit: {:?}", message);
            return Vec::new();
        }

        match message {
            AppMessage::Key(key_event) => Self::handle_key_event(key_event, state)
                .map(|event| Self::process_event(event, state))
                .unwrap_or_default(),
            AppMessage::Resize(..) => Vec::new(),
            AppMessage::RefreshTick => vec![state.request_fetch()],
            AppMessage::SessionsLoaded(result) => {
                state.apply_fetch(result);
                Vec::new()
            }
            AppMessage::ActionCompleted { action, result } => {
                Self::handle_action_completed(action, result, state)
            }
            AppMessage::DisplayConfigured { name, result } => {
                if let Err(e) = result {
                    debug!("Ignoring status bar failure for '{}': {}", name, e);
                }
                // Deferred follow-up of the create that preceded it
                vec![state.request_fetch()]
            }
        }
    }

    fn handle_action_completed(
        action: MutateAction,
        result: Result<(), crate::byobu::GatewayError>,
        state: &mut AppState,
    ) -> Vec<Command> {
        match result {
            Ok(()) => {
                info!("Completed {}", action);
                // byobu must see set-option before the follow-up fetch, so the
                // fetch waits for DisplayConfigured
                if let MutateAction::Create(name) = action {
                    if !name.is_empty() {
                        return vec![Command::ConfigureDisplay(name)];
                    }
                }
            }
            Err(e) => {
                info!("Failed to {}: {}", action, e);
                state.set_error(e);
            }
        }
        vec![state.request_fetch()]
    }

    /// Map a key press to an event for the active mode.
    ///
    /// Every key press clears the pending error first, whatever the mode.
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        state.clear_error();

        match state.mode {
            Mode::Listing => Self::handle_listing_keys(key_event),
            Mode::ConfirmingKill { .. } => Some(Self::handle_confirm_kill_keys(key_event)),
            Mode::CreatingSession { .. } | Mode::RenamingSession { .. } => {
                Self::handle_text_entry_keys(key_event)
            }
        }
    }

    fn handle_listing_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppEvent::Quit)
            }
            KeyCode::Char('q') => Some(AppEvent::Quit),
            KeyCode::Enter => Some(AppEvent::AttachSelected),
            KeyCode::Char('n') => Some(AppEvent::StartNewSession),
            KeyCode::Char('r') => Some(AppEvent::StartRenameSession),
            KeyCode::Char('k') => Some(AppEvent::StartKillSession),
            // 'k' is taken by kill, so up is arrow-only
            KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::Navigate(Navigation::Down)),
            KeyCode::Up => Some(AppEvent::Navigate(Navigation::Up)),
            KeyCode::Char('g') | KeyCode::Home => Some(AppEvent::Navigate(Navigation::Top)),
            KeyCode::Char('G') | KeyCode::End => Some(AppEvent::Navigate(Navigation::Bottom)),
            KeyCode::PageUp => Some(AppEvent::Navigate(Navigation::PageUp)),
            KeyCode::PageDown => Some(AppEvent::Navigate(Navigation::PageDown)),
            _ => None,
        }
    }

    fn handle_confirm_kill_keys(key_event: KeyEvent) -> AppEvent {
        match key_event.code {
            KeyCode::Char('y' | 'Y') => AppEvent::ConfirmKill,
            _ => AppEvent::CancelMode,
        }
    }

    fn handle_text_entry_keys(key_event: KeyEvent) -> Option<AppEvent> {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Enter => Some(AppEvent::SubmitInput),
            KeyCode::Esc => Some(AppEvent::CancelMode),
            KeyCode::Char('u') if ctrl => Some(AppEvent::InputClear),
            KeyCode::Char('a') if ctrl => Some(AppEvent::InputCursorStart),
            KeyCode::Char('e') if ctrl => Some(AppEvent::InputCursorEnd),
            KeyCode::Char(_) if ctrl || key_event.modifiers.contains(KeyModifiers::ALT) => None,
            KeyCode::Char(ch) => Some(AppEvent::InputChar(ch)),
            KeyCode::Backspace => Some(AppEvent::InputBackspace),
            KeyCode::Delete => Some(AppEvent::InputDelete),
            KeyCode::Left => Some(AppEvent::InputCursorLeft),
            KeyCode::Right => Some(AppEvent::InputCursorRight),
            KeyCode::Home => Some(AppEvent::InputCursorStart),
            KeyCode::End => Some(AppEvent::InputCursorEnd),
            _ => None,
        }
    }

    /// Apply an event to state. Returns the commands it triggers.
    pub fn process_event(event: AppEvent, state: &mut AppState) -> Vec<Command> {
        debug!("Processing {:?} in {:?}", event, state.mode);
        match event {
            AppEvent::Quit => {
                info!("Quit requested");
                state.quit();
            }
            AppEvent::AttachSelected => {
                state.attach_selected();
            }
            AppEvent::Navigate(navigation) => state.navigate(navigation),
            AppEvent::StartNewSession => state.enter_create_mode(),
            AppEvent::StartRenameSession => {
                state.enter_rename_mode();
            }
            AppEvent::StartKillSession => {
                state.enter_kill_mode();
            }
            AppEvent::ConfirmKill => {
                if let Mode::ConfirmingKill { target } = state.return_to_listing() {
                    info!("Killing session '{}'", target);
                    return vec![Command::KillSession(target)];
                }
            }
            AppEvent::SubmitInput => return Self::submit_input(state),
            AppEvent::CancelMode => {
                let left = state.return_to_listing();
                debug!("Cancelled {:?}", left);
            }
            AppEvent::InputChar(ch) => Self::edit_input(state, |input| input.insert_char(ch)),
            AppEvent::InputBackspace => Self::edit_input(state, |input| input.backspace()),
            AppEvent::InputDelete => Self::edit_input(state, |input| input.delete()),
            AppEvent::InputCursorLeft => {
                Self::edit_input(state, |input| input.move_cursor_left());
            }
            AppEvent::InputCursorRight => {
                Self::edit_input(state, |input| input.move_cursor_right());
            }
            AppEvent::InputCursorStart => Self::edit_input(state, |input| input.move_to_start()),
            AppEvent::InputCursorEnd => Self::edit_input(state, |input| input.move_to_end()),
            AppEvent::InputClear => Self::edit_input(state, |input| input.clear()),
        }
        Vec::new()
    }

    fn edit_input(state: &mut AppState, edit: impl FnOnce(&mut crate::app::state::TextInput)) {
        if let Some(input) = state.mode.input_mut() {
            edit(input);
        }
    }

    /// Enter in a text-entry mode: the collaborator validates the name,
    /// so an empty buffer is submitted as-is
    fn submit_input(state: &mut AppState) -> Vec<Command> {
        match state.return_to_listing() {
            Mode::CreatingSession { input } => {
                let name = input.value();
                info!("Creating session '{}'", name);
                vec![Command::CreateSession(name)]
            }
            Mode::RenamingSession { original, input } => {
                let new = input.value();
                info!("Renaming session '{}' -> '{}'", original, new);
                vec![Command::RenameSession { old: original, new }]
            }
            other => {
                state.mode = other;
                Vec::new()
            }
        }
    }
}
