// ABOUTME: Main application structure - owns state and drives the single-consumer message loop

pub mod events;
pub mod messages;
pub mod reconcile;
pub mod scheduler;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use messages::{AppMessage, Command, LoopExit, MutateAction};
pub use scheduler::Scheduler;
pub use state::{AppState, Mode, Selection};

use crate::byobu::SessionGateway;
use crate::config::AppConfig;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub struct App<G: SessionGateway> {
    pub state: AppState,
    scheduler: Scheduler<G>,
    refresh_interval: Duration,
    timer: Option<JoinHandle<()>>,
}

impl<G: SessionGateway> App<G> {
    pub fn new(gateway: Arc<G>, config: &AppConfig) -> Self {
        Self {
            state: AppState::new(config),
            scheduler: Scheduler::new(gateway),
            refresh_interval: config.refresh_interval(),
            timer: None,
        }
    }

    /// Sender for external producers such as the input reader
    pub fn sender(&self) -> UnboundedSender<AppMessage> {
        self.scheduler.sender()
    }

    /// Issue the initial fetch and start the refresh timer
    pub fn start(&mut self) {
        info!(
            "Starting session manager, refresh every {:?}",
            self.refresh_interval
        );
        self.scheduler.dispatch_all(self.state.initial_commands());
        if self.timer.is_none() {
            self.timer = Some(self.scheduler.start_refresh_timer(self.refresh_interval));
        }
    }

    /// Apply one message and dispatch whatever it produced
    pub fn handle_message(&mut self, message: AppMessage) {
        let commands = EventHandler::handle_message(message, &mut self.state);
        self.scheduler.dispatch_all(commands);
    }

    /// Wait for the next message and apply it. Returns false once the queue
    /// has closed.
    pub async fn step(&mut self) -> bool {
        match self.scheduler.next_message().await {
            Some(message) => {
                self.handle_message(message);
                true
            }
            None => false,
        }
    }

    /// Run until the user quits or picks a session to attach. `render` is
    /// called with the current state after every applied message.
    pub async fn run<F>(&mut self, mut render: F) -> Result<LoopExit>
    where
        F: FnMut(&AppState) -> Result<()>,
    {
        self.start();
        render(&self.state)?;

        loop {
            if !self.step().await {
                debug!("Message queue closed");
                self.stop();
                return Ok(LoopExit::Quit);
            }
            if let Some(exit) = self.state.exit.clone() {
                info!("Loop finished: {:?}", exit);
                self.stop();
                return Ok(exit);
            }
            render(&self.state)?;
        }
    }

    fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<G: SessionGateway> Drop for App<G> {
    fn drop(&mut self) {
        self.stop();
    }
}
