// ABOUTME: Session repository gateway - the byobu CLI behind an async trait
//
// The interactive core only ever talks to `SessionGateway`. `ByobuClient`
// is the production implementation; tests substitute their own.

pub mod client;
pub mod parse;

pub use client::ByobuClient;

use crate::models::Session;
use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Errors reported by the session gateway.
///
/// `Clone` so the interactive core can hold the latest one as its pending error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// No multiplexer server is running. `list_sessions` and
    /// `running_commands` collapse this into an empty result.
    #[error("no server running")]
    NoServerRunning,

    #[error("session '{0}' already exists")]
    DuplicateName(String),

    #[error("session '{0}' not found")]
    NotFound(String),

    #[error("session name cannot be empty")]
    EmptyOrInvalidName,

    #[error("{0}")]
    NotInstalled(String),

    #[error("{0}")]
    Other(String),
}

/// Pane commands keyed by session name
pub type PaneCommands = HashMap<String, BTreeSet<String>>;

/// Capability interface for listing and mutating sessions.
///
/// Calls may be in flight concurrently; implementations must tolerate that.
pub trait SessionGateway: Send + Sync + 'static {
    fn list_sessions(&self) -> impl Future<Output = Result<Vec<Session>, GatewayError>> + Send;

    fn running_commands(&self) -> impl Future<Output = Result<PaneCommands, GatewayError>> + Send;

    /// Create a detached session. An empty name lets byobu pick one.
    fn create_session(&self, name: &str) -> impl Future<Output = Result<(), GatewayError>> + Send;

    fn rename_session(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    fn kill_session(&self, name: &str) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Apply the minimal status bar to one session. Best-effort.
    fn configure_display(&self, name: &str)
        -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Executable and argv for attaching; the caller replaces its process image.
    fn attach_args(&self, name: &str) -> Result<(PathBuf, Vec<String>), GatewayError>;
}

/// Session list with running commands merged in. A failed pane listing
/// leaves the command sets empty rather than failing the fetch.
pub async fn fetch_sessions<G: SessionGateway>(
    gateway: &G,
) -> Result<Vec<Session>, GatewayError> {
    let mut sessions = gateway.list_sessions().await?;
    if sessions.is_empty() {
        return Ok(sessions);
    }
    match gateway.running_commands().await {
        Ok(commands) => parse::merge_commands(&mut sessions, commands),
        Err(e) => warn!("Failed to list running commands: {}", e),
    }
    Ok(sessions)
}

/// Verify the multiplexer binary is on `PATH`
pub fn check_installed(binary: &str) -> Result<PathBuf, GatewayError> {
    which::which(binary).map_err(|_| {
        GatewayError::NotInstalled(format!(
            "{binary} is not installed.\n\nInstall with:\n  macOS:   brew install byobu\n  Ubuntu:  sudo apt install byobu\n  Fedora:  sudo dnf install byobu"
        ))
    })
}
