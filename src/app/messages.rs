// ABOUTME: Commands emitted by the state machine and the messages that flow back into it

use crate::byobu::GatewayError;
use crate::models::Session;
use crossterm::event::KeyEvent;

/// Side effect requested by the core. Each one is executed off the UI
/// loop and reports back with exactly one `AppMessage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchSessions,
    CreateSession(String),
    RenameSession { old: String, new: String },
    KillSession(String),
    /// Best-effort minimal status bar for a newly created session
    ConfigureDisplay(String),
}

/// The mutate half of `Command`, echoed back in its completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutateAction {
    Create(String),
    Rename { old: String, new: String },
    Kill(String),
}

impl std::fmt::Display for MutateAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create(name) => write!(f, "create '{name}'"),
            Self::Rename { old, new } => write!(f, "rename '{old}' -> '{new}'"),
            Self::Kill(name) => write!(f, "kill '{name}'"),
        }
    }
}

/// Everything the single consumer loop reacts to
#[derive(Debug, Clone)]
pub enum AppMessage {
    Key(KeyEvent),
    Resize(u16, u16),
    RefreshTick,
    SessionsLoaded(Result<Vec<Session>, GatewayError>),
    ActionCompleted {
        action: MutateAction,
        result: Result<(), GatewayError>,
    },
    DisplayConfigured {
        name: String,
        result: Result<(), GatewayError>,
    },
}

/// How the interactive loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopExit {
    Quit,
    Attach(String),
}
