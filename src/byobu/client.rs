// ABOUTME: ByobuClient - SessionGateway implementation that shells out to the byobu CLI

use super::parse::{
    classify_stderr, parse_pane_commands, parse_sessions, StderrKind, LIST_PANES_FORMAT,
    LIST_SESSIONS_FORMAT,
};
use super::{GatewayError, PaneCommands, SessionGateway};
use crate::config::AppConfig;
use crate::models::Session;
use std::path::PathBuf;
use std::process::Output;
use tokio::process::Command;
use tracing::{debug, info};

/// Status-right format applied to freshly created sessions
pub const DEFAULT_STATUS_RIGHT: &str = "%H:%M %d-%b";

#[derive(Debug, Clone)]
pub struct ByobuClient {
    /// Multiplexer executable (byobu, or any tmux-compatible wrapper)
    binary: String,
    status_right: String,
}

impl Default for ByobuClient {
    fn default() -> Self {
        Self::new("byobu")
    }
}

impl ByobuClient {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            status_right: DEFAULT_STATUS_RIGHT.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            status_right: config.status_right.clone(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Run one byobu sub-command and collect its output
    async fn run(&self, args: &[&str]) -> Result<Output, GatewayError> {
        debug!("Running {} {}", self.binary, args.join(" "));
        Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|e| GatewayError::Other(format!("failed to run {}: {}", self.binary, e)))
    }

    fn stderr_of(output: &Output) -> String {
        String::from_utf8_lossy(&output.stderr).trim().to_string()
    }

    fn other(&self, subcommand: &str, stderr: &str) -> GatewayError {
        GatewayError::Other(format!("{} {}: {}", self.binary, subcommand, stderr))
    }
}

impl SessionGateway for ByobuClient {
    async fn list_sessions(&self) -> Result<Vec<Session>, GatewayError> {
        let output = self
            .run(&["list-sessions", "-F", LIST_SESSIONS_FORMAT])
            .await?;

        if !output.status.success() {
            let stderr = Self::stderr_of(&output);
            return match classify_stderr(&stderr) {
                StderrKind::NoServer => {
                    debug!("No byobu server running, treating as zero sessions");
                    Ok(Vec::new())
                }
                _ => Err(self.other("list-sessions", &stderr)),
            };
        }

        let sessions = parse_sessions(&String::from_utf8_lossy(&output.stdout));
        debug!("Listed {} sessions", sessions.len());
        Ok(sessions)
    }

    async fn running_commands(&self) -> Result<PaneCommands, GatewayError> {
        let output = self
            .run(&["list-panes", "-a", "-F", LIST_PANES_FORMAT])
            .await?;

        if !output.status.success() {
            let stderr = Self::stderr_of(&output);
            return match classify_stderr(&stderr) {
                StderrKind::NoServer => Ok(PaneCommands::new()),
                _ => Err(self.other("list-panes", &stderr)),
            };
        }

        Ok(parse_pane_commands(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn create_session(&self, name: &str) -> Result<(), GatewayError> {
        let mut args = vec!["new-session", "-d"];
        if !name.is_empty() {
            args.extend(["-s", name]);
        }

        let output = self.run(&args).await?;
        if !output.status.success() {
            let stderr = Self::stderr_of(&output);
            return Err(match classify_stderr(&stderr) {
                StderrKind::DuplicateSession => GatewayError::DuplicateName(name.to_string()),
                _ => self.other("new-session", &stderr),
            });
        }

        info!("Created byobu session '{}'", name);
        Ok(())
    }

    async fn rename_session(&self, old_name: &str, new_name: &str) -> Result<(), GatewayError> {
        if new_name.is_empty() {
            return Err(GatewayError::EmptyOrInvalidName);
        }

        let output = self
            .run(&["rename-session", "-t", old_name, new_name])
            .await?;
        if !output.status.success() {
            let stderr = Self::stderr_of(&output);
            return Err(match classify_stderr(&stderr) {
                StderrKind::DuplicateSession => GatewayError::DuplicateName(new_name.to_string()),
                StderrKind::SessionNotFound => GatewayError::NotFound(old_name.to_string()),
                _ => self.other("rename-session", &stderr),
            });
        }

        info!("Renamed byobu session '{}' -> '{}'", old_name, new_name);
        Ok(())
    }

    async fn kill_session(&self, name: &str) -> Result<(), GatewayError> {
        let output = self.run(&["kill-session", "-t", name]).await?;
        if !output.status.success() {
            let stderr = Self::stderr_of(&output);
            return Err(match classify_stderr(&stderr) {
                StderrKind::SessionNotFound => GatewayError::NotFound(name.to_string()),
                _ => self.other("kill-session", &stderr),
            });
        }

        info!("Killed byobu session '{}'", name);
        Ok(())
    }

    async fn configure_display(&self, name: &str) -> Result<(), GatewayError> {
        let output = self
            .run(&["set-option", "-t", name, "status-right", self.status_right.as_str()])
            .await?;
        if !output.status.success() {
            let stderr = Self::stderr_of(&output);
            debug!("Failed to configure status bar for '{}': {}", name, stderr);
            return Err(match classify_stderr(&stderr) {
                StderrKind::SessionNotFound => GatewayError::NotFound(name.to_string()),
                _ => self.other("set-option", &stderr),
            });
        }
        Ok(())
    }

    fn attach_args(&self, name: &str) -> Result<(PathBuf, Vec<String>), GatewayError> {
        let path = which::which(&self.binary)
            .map_err(|e| GatewayError::Other(format!("{} not found: {}", self.binary, e)))?;
        let args = vec![
            self.binary.clone(),
            "attach-session".to_string(),
            "-t".to_string(),
            name.to_string(),
        ];
        Ok((path, args))
    }
}
