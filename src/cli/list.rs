// ABOUTME: CLI list command - print the current byobu sessions once as text or JSON

use super::OutputFormat;
use crate::byobu::{fetch_sessions, SessionGateway};
use crate::models::Session;
use anyhow::{Context, Result};

/// Execute the list command
pub async fn execute<G: SessionGateway>(gateway: &G, format: OutputFormat) -> Result<()> {
    let sessions = fetch_sessions(gateway)
        .await
        .context("Failed to list byobu sessions")?;

    match format {
        OutputFormat::Json => println!("{}", render_json(&sessions)?),
        OutputFormat::Text => print!("{}", render_text(&sessions)),
    }

    Ok(())
}

pub fn render_json(sessions: &[Session]) -> Result<String> {
    Ok(serde_json::to_string_pretty(sessions)?)
}

/// Text table, one session per line
pub fn render_text(sessions: &[Session]) -> String {
    if sessions.is_empty() {
        return "No byobu sessions.\n".to_string();
    }

    let name_width = sessions
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = format!("{:<name_width$}  {:<10} {:<9} COMMANDS\n", "NAME", "WINDOWS", "STATUS");
    for session in sessions {
        out.push_str(&format!(
            "{:<name_width$}  {:<10} {:<9} {}\n",
            session.name,
            session.window_label(),
            session.status(),
            session.commands_label()
        ));
    }
    out
}
