// ABOUTME: Parsers for byobu's tab-separated `-F` output and stderr classification

use crate::models::Session;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// `-F` format for `list-sessions`; field order must match `parse_sessions`
pub const LIST_SESSIONS_FORMAT: &str = "#{session_name}\t#{session_id}\t#{session_created}\t#{session_last_attached}\t#{session_attached}\t#{session_windows}";

/// `-F` format for `list-panes -a`
pub const LIST_PANES_FORMAT: &str = "#{session_name}\t#{pane_current_command}";

/// Coarse meaning of a failed byobu invocation, derived from its stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StderrKind {
    NoServer,
    DuplicateSession,
    SessionNotFound,
    Unknown,
}

pub fn classify_stderr(stderr: &str) -> StderrKind {
    if stderr.contains("no server running") || stderr.contains("error connecting to") {
        StderrKind::NoServer
    } else if stderr.contains("duplicate session") {
        StderrKind::DuplicateSession
    } else if stderr.contains("can't find session") || stderr.contains("session not found") {
        StderrKind::SessionNotFound
    } else {
        StderrKind::Unknown
    }
}

fn parse_timestamp(field: &str) -> Option<DateTime<Utc>> {
    match field.trim().parse::<i64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => DateTime::from_timestamp(secs, 0),
    }
}

/// Parse `list-sessions` output. Short lines are skipped, bad numbers become 0.
pub fn parse_sessions(output: &str) -> Vec<Session> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() < 6 {
                debug!("Skipping malformed list-sessions line: {:?}", line);
                return None;
            }

            let mut session = Session::new(parts[0], parts[1]);
            session.created_at = parse_timestamp(parts[2]);
            session.last_attached_at = parse_timestamp(parts[3]);
            session.attached_clients = parts[4].trim().parse().unwrap_or(0);
            session.window_count = parts[5].trim().parse().unwrap_or(0);
            Some(session)
        })
        .collect()
}

/// Parse `list-panes -a` output into session name -> distinct commands
pub fn parse_pane_commands(output: &str) -> HashMap<String, BTreeSet<String>> {
    let mut commands: HashMap<String, BTreeSet<String>> = HashMap::new();

    for line in output.lines() {
        let Some((session, command)) = line.split_once('\t') else {
            continue;
        };
        if command.is_empty() {
            continue;
        }
        commands
            .entry(session.to_string())
            .or_default()
            .insert(command.to_string());
    }

    commands
}

/// Fill each session's `running_commands` from a pane listing
pub fn merge_commands(sessions: &mut [Session], mut commands: HashMap<String, BTreeSet<String>>) {
    for session in sessions {
        if let Some(cmds) = commands.remove(&session.name) {
            session.running_commands = cmds;
        }
    }
}
