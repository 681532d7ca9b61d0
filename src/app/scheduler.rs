// ABOUTME: Runs commands off the UI loop and feeds results, timer ticks and input into one queue

use crate::app::messages::{AppMessage, Command, MutateAction};
use crate::byobu::{fetch_sessions, SessionGateway};
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How long the input reader blocks before rechecking shutdown
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Owns the message queue. Every producer holds a clone of the sender; the
/// interactive loop is the single consumer.
pub struct Scheduler<G: SessionGateway> {
    gateway: Arc<G>,
    tx: UnboundedSender<AppMessage>,
    rx: UnboundedReceiver<AppMessage>,
}

impl<G: SessionGateway> Scheduler<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { gateway, tx, rx }
    }

    pub fn sender(&self) -> UnboundedSender<AppMessage> {
        self.tx.clone()
    }

    /// Run the command on its own task. It reports back exactly once.
    pub fn dispatch(&self, command: Command) {
        debug!("Dispatching {:?}", command);
        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let message = execute(gateway.as_ref(), command).await;
            if tx.send(message).is_err() {
                debug!("Loop gone, dropping command result");
            }
        });
    }

    pub fn dispatch_all(&self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.dispatch(command);
        }
    }

    /// Post `RefreshTick` every `interval` until the queue closes or the
    /// handle is aborted
    pub fn start_refresh_timer(&self, interval: Duration) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                if tx.send(AppMessage::RefreshTick).is_err() {
                    break;
                }
            }
        })
    }

    /// Next message in arrival order. `None` only if every sender is gone,
    /// which cannot happen while the scheduler holds its own.
    pub async fn next_message(&mut self) -> Option<AppMessage> {
        self.rx.recv().await
    }
}

/// Perform one command against the gateway and wrap the outcome
pub async fn execute<G: SessionGateway>(gateway: &G, command: Command) -> AppMessage {
    match command {
        Command::FetchSessions => AppMessage::SessionsLoaded(fetch_sessions(gateway).await),
        Command::CreateSession(name) => {
            let result = gateway.create_session(&name).await;
            AppMessage::ActionCompleted {
                action: MutateAction::Create(name),
                result,
            }
        }
        Command::RenameSession { old, new } => {
            let result = gateway.rename_session(&old, &new).await;
            AppMessage::ActionCompleted {
                action: MutateAction::Rename { old, new },
                result,
            }
        }
        Command::KillSession(name) => {
            let result = gateway.kill_session(&name).await;
            AppMessage::ActionCompleted {
                action: MutateAction::Kill(name),
                result,
            }
        }
        Command::ConfigureDisplay(name) => {
            let result = gateway.configure_display(&name).await;
            AppMessage::DisplayConfigured { name, result }
        }
    }
}

/// Forward terminal key presses and resizes into the queue from a blocking
/// thread. Stops when `shutdown` is set or the queue closes.
pub fn spawn_input_reader(
    tx: UnboundedSender<AppMessage>,
    shutdown: Arc<AtomicBool>,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !shutdown.load(Ordering::Relaxed) {
            match event::poll(INPUT_POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    warn!("Input poll failed: {}", e);
                    break;
                }
            }

            let message = match event::read() {
                // Release and repeat events only arrive with keyboard enhancement
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppMessage::Key(key),
                Ok(Event::Resize(width, height)) => AppMessage::Resize(width, height),
                Ok(_) => continue,
                Err(e) => {
                    warn!("Input read failed: {}", e);
                    break;
                }
            };

            if tx.send(message).is_err() {
                break;
            }
        }
        debug!("Input reader stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byobu::{GatewayError, PaneCommands};
    use crate::models::Session;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    /// Gateway whose pane listing always fails
    struct NoPanes;

    impl SessionGateway for NoPanes {
        async fn list_sessions(&self) -> Result<Vec<Session>, GatewayError> {
            Ok(vec![Session::new("work", "$0").with_windows(2)])
        }

        async fn running_commands(&self) -> Result<PaneCommands, GatewayError> {
            Err(GatewayError::Other("byobu list-panes: boom".to_string()))
        }

        async fn create_session(&self, name: &str) -> Result<(), GatewayError> {
            Err(GatewayError::DuplicateName(name.to_string()))
        }

        async fn rename_session(&self, _old: &str, _new: &str) -> Result<(), GatewayError> {
            Ok(())
        }

        async fn kill_session(&self, name: &str) -> Result<(), GatewayError> {
            Err(GatewayError::NotFound(name.to_string()))
        }

        async fn configure_display(&self, _name: &str) -> Result<(), GatewayError> {
            Ok(())
        }

        fn attach_args(&self, name: &str) -> Result<(PathBuf, Vec<String>), GatewayError> {
            Ok((PathBuf::from("/bin/true"), vec![name.to_string()]))
        }
    }

    #[tokio::test]
    async fn test_fetch_ignores_pane_listing_failure() {
        match execute(&NoPanes, Command::FetchSessions).await {
            AppMessage::SessionsLoaded(Ok(sessions)) => {
                assert_eq!(sessions.len(), 1);
                assert_eq!(sessions[0].running_commands, BTreeSet::new());
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mutations_echo_their_action() {
        match execute(&NoPanes, Command::KillSession("gone".to_string())).await {
            AppMessage::ActionCompleted { action, result } => {
                assert_eq!(action, MutateAction::Kill("gone".to_string()));
                assert_eq!(result, Err(GatewayError::NotFound("gone".to_string())));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_timer_ticks_each_interval() {
        let mut scheduler = Scheduler::new(Arc::new(NoPanes));
        let timer = scheduler.start_refresh_timer(Duration::from_secs(5));

        for _ in 0..3 {
            let message = scheduler.next_message().await;
            assert!(matches!(message, Some(AppMessage::RefreshTick)));
        }
        timer.abort();
    }
}
