// ABOUTME: Session data model representing one byobu session as reported by list-sessions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A byobu session snapshot.
///
/// Sessions are never patched in place: every poll replaces the whole set,
/// so this is plain data with no identity beyond `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique, user-visible session name (mutable via rename)
    pub name: String,
    /// Internal multiplexer id, e.g. `$0`
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub last_attached_at: Option<DateTime<Utc>>,
    /// Number of attached clients (0 = detached)
    pub attached_clients: usize,
    pub window_count: usize,
    /// Distinct foreground commands across all panes
    #[serde(default)]
    pub running_commands: BTreeSet<String>,
}

impl Session {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            created_at: None,
            last_attached_at: None,
            attached_clients: 0,
            window_count: 0,
            running_commands: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn with_windows(mut self, window_count: usize) -> Self {
        self.window_count = window_count;
        self
    }

    #[must_use]
    pub const fn with_attached(mut self, attached_clients: usize) -> Self {
        self.attached_clients = attached_clients;
        self
    }

    #[must_use]
    pub fn with_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.running_commands = commands.into_iter().map(Into::into).collect();
        self
    }

    pub const fn is_detached(&self) -> bool {
        self.attached_clients == 0
    }

    /// "attached" or "detached"
    pub const fn status(&self) -> &'static str {
        if self.is_detached() {
            "detached"
        } else {
            "attached"
        }
    }

    /// "1 window" / "3 windows"
    pub fn window_label(&self) -> String {
        let word = if self.window_count == 1 { "window" } else { "windows" };
        format!("{} {}", self.window_count, word)
    }

    pub fn commands_label(&self) -> String {
        self.running_commands
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn title(&self) -> &str {
        &self.name
    }

    /// One-line summary used by the list row and the text `list` output
    pub fn description(&self) -> String {
        let mut description = format!("{}  ({})", self.window_label(), self.status());
        if !self.running_commands.is_empty() {
            description.push_str("  ");
            description.push_str(&self.commands_label());
        }
        description
    }

    /// Text a list filter matches against
    pub fn filter_key(&self) -> &str {
        &self.name
    }
}
