// ABOUTME: Shared test helpers - a scripted in-memory SessionGateway that records every call

#![allow(dead_code)]

use byoman::byobu::{GatewayError, PaneCommands, SessionGateway};
use byoman::models::Session;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    ListSessions,
    RunningCommands,
    Create(String),
    Rename(String, String),
    Kill(String),
    ConfigureDisplay(String),
}

impl GatewayCall {
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::ListSessions)
    }
}

#[derive(Debug)]
struct Script {
    sessions: Vec<Session>,
    pane_commands: PaneCommands,
    list_error: Option<GatewayError>,
    create_error: Option<GatewayError>,
    configure_error: Option<GatewayError>,
    list_gate: Option<Arc<Notify>>,
    calls: Vec<GatewayCall>,
}

/// Mutations succeed by default and update the in-memory session set, so
/// follow-up fetches observe them the way byobu would.
#[derive(Debug)]
pub struct FakeGateway {
    script: Mutex<Script>,
}

impl FakeGateway {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self {
            script: Mutex::new(Script {
                sessions,
                pane_commands: PaneCommands::new(),
                list_error: None,
                create_error: None,
                configure_error: None,
                list_gate: None,
                calls: Vec::new(),
            }),
        }
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    pub fn set_sessions(&self, sessions: Vec<Session>) {
        self.script().sessions = sessions;
    }

    pub fn set_pane_commands(&self, commands: PaneCommands) {
        self.script().pane_commands = commands;
    }

    pub fn fail_list(&self, error: Option<GatewayError>) {
        self.script().list_error = error;
    }

    pub fn fail_create(&self, error: GatewayError) {
        self.script().create_error = Some(error);
    }

    pub fn fail_configure(&self, error: GatewayError) {
        self.script().configure_error = Some(error);
    }

    /// The next `list_sessions` call snapshots the current sessions, then
    /// waits until the returned gate is notified before reporting them
    pub fn hold_next_list(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.script().list_gate = Some(Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.script().calls.clone()
    }

    pub fn count(&self, call: &GatewayCall) -> usize {
        self.script().calls.iter().filter(|c| *c == call).count()
    }

    pub fn fetch_count(&self) -> usize {
        self.script().calls.iter().filter(|c| c.is_fetch()).count()
    }

    /// Calls other than fetches, in order
    pub fn mutations(&self) -> Vec<GatewayCall> {
        self.script()
            .calls
            .iter()
            .filter(|c| !matches!(c, GatewayCall::ListSessions | GatewayCall::RunningCommands))
            .cloned()
            .collect()
    }

    fn record(&self, call: GatewayCall) -> MutexGuard<'_, Script> {
        let mut script = self.script();
        script.calls.push(call);
        script
    }
}

impl SessionGateway for FakeGateway {
    async fn list_sessions(&self) -> Result<Vec<Session>, GatewayError> {
        let (result, gate) = {
            let mut script = self.record(GatewayCall::ListSessions);
            let result = match &script.list_error {
                Some(error) => Err(error.clone()),
                None => Ok(script.sessions.clone()),
            };
            (result, script.list_gate.take())
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }

    async fn running_commands(&self) -> Result<PaneCommands, GatewayError> {
        let script = self.record(GatewayCall::RunningCommands);
        Ok(script.pane_commands.clone())
    }

    async fn create_session(&self, name: &str) -> Result<(), GatewayError> {
        let mut script = self.record(GatewayCall::Create(name.to_string()));
        if let Some(error) = &script.create_error {
            return Err(error.clone());
        }
        if script.sessions.iter().any(|s| s.name == name) {
            return Err(GatewayError::DuplicateName(name.to_string()));
        }
        let id = format!("${}", script.sessions.len());
        script.sessions.push(Session::new(name, id).with_windows(1));
        Ok(())
    }

    async fn rename_session(&self, old_name: &str, new_name: &str) -> Result<(), GatewayError> {
        let mut script = self.record(GatewayCall::Rename(
            old_name.to_string(),
            new_name.to_string(),
        ));
        if new_name.is_empty() {
            return Err(GatewayError::EmptyOrInvalidName);
        }
        if script.sessions.iter().any(|s| s.name == new_name) {
            return Err(GatewayError::DuplicateName(new_name.to_string()));
        }
        match script.sessions.iter_mut().find(|s| s.name == old_name) {
            Some(session) => {
                session.name = new_name.to_string();
                Ok(())
            }
            None => Err(GatewayError::NotFound(old_name.to_string())),
        }
    }

    async fn kill_session(&self, name: &str) -> Result<(), GatewayError> {
        let mut script = self.record(GatewayCall::Kill(name.to_string()));
        let before = script.sessions.len();
        script.sessions.retain(|s| s.name != name);
        if script.sessions.len() == before {
            return Err(GatewayError::NotFound(name.to_string()));
        }
        Ok(())
    }

    async fn configure_display(&self, name: &str) -> Result<(), GatewayError> {
        let script = self.record(GatewayCall::ConfigureDisplay(name.to_string()));
        match &script.configure_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn attach_args(&self, name: &str) -> Result<(PathBuf, Vec<String>), GatewayError> {
        Ok((
            PathBuf::from("/usr/bin/byobu"),
            vec![
                "byobu".to_string(),
                "attach-session".to_string(),
                "-t".to_string(),
                name.to_string(),
            ],
        ))
    }
}

pub fn session(name: &str, windows: usize, attached: usize) -> Session {
    Session::new(name, format!("${name}"))
        .with_windows(windows)
        .with_attached(attached)
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn chars(text: &str) -> Vec<KeyEvent> {
    text.chars().map(|c| key(KeyCode::Char(c))).collect()
}
