// ABOUTME: Main entry point for byoman with TUI and CLI support
//
// Binary: byoman
// Usage: byoman [OPTIONS] [COMMAND]
// - No command: launches TUI, then attaches to the chosen session
// - list: print sessions and exit

#![allow(missing_docs)]

use anyhow::{Context, Result};
use byoman::{
    app::{scheduler::spawn_input_reader, App, LoopExit},
    byobu::{self, ByobuClient, SessionGateway},
    cli::{self, Cli, Commands},
    components::{LayoutComponent, Theme},
    config::AppConfig,
};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*, Terminal};
use std::{
    io::{self, IsTerminal},
    os::unix::process::CommandExt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use tracing::{error, info};

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = Cli::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);

    byobu::check_installed(&config.binary)?;
    let gateway = Arc::new(ByobuClient::from_config(&config));

    match args.command {
        Some(Commands::List) => cli::list::execute(gateway.as_ref(), args.format).await,

        // TUI mode (explicit or default)
        Some(Commands::Tui) | None => {
            let result = run_tui(Arc::clone(&gateway), &config).await;
            if result.is_err() {
                cleanup_terminal();
            }
            match result? {
                LoopExit::Attach(name) => attach_to_session(gateway.as_ref(), &name),
                LoopExit::Quit => Ok(()),
            }
        }
    }
}

async fn run_tui(gateway: Arc<ByobuClient>, config: &AppConfig) -> Result<LoopExit> {
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try `byoman list` for non-interactive output."
        ));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut layout = LayoutComponent::new(config.ui.title.clone(), Theme::from_config(config));
    let mut app = App::new(gateway, config);

    let shutdown = Arc::new(AtomicBool::new(false));
    let input_reader = spawn_input_reader(app.sender(), Arc::clone(&shutdown));

    let result = app
        .run(|state| {
            terminal.draw(|frame| layout.render(frame, state))?;
            Ok(())
        })
        .await;

    // The reader must be gone before byobu takes over the terminal
    shutdown.store(true, Ordering::Relaxed);
    if let Err(e) = input_reader.await {
        error!("Input reader task failed: {}", e);
    }

    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    result
}

/// Replace this process with `byobu attach-session -t <name>`
fn attach_to_session(gateway: &ByobuClient, name: &str) -> Result<()> {
    let (path, args) = gateway.attach_args(name)?;
    let Some((arg0, rest)) = args.split_first() else {
        anyhow::bail!("Empty attach command for session '{name}'");
    };
    info!("Attaching to session '{}' via {}", name, path.display());

    // Exec replaces the current process with byobu attach
    let err = std::process::Command::new(&path).arg0(arg0).args(rest).exec();

    // If we get here, exec failed
    Err(err).with_context(|| format!("Failed to attach to session '{name}'"))
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use tracing_subscriber::prelude::*;

    let log_dir = dirs::data_local_dir()
        .map(|dir| dir.join("byoman").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".byoman/logs"));

    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }

    // JSONL log file with timestamp
    let log_file = log_dir.join(format!(
        "byoman-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    // Logging stays off rather than writing into the TUI
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "byoman=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
