use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::common::{OutgoingPayload, Visitor, WidgetCommand, WidgetEvent};

use super::backend::Backend;
use super::poller::TranscriptPoller;

/// Background worker: polls the transcript on a timer and executes UI commands.
pub struct WidgetClient {
    poller: TranscriptPoller,
    visitor: Visitor,
    poll_interval: Duration,
    command_receiver: mpsc::Receiver<WidgetCommand>,
    shutdown: CancellationToken,
    tasks: TaskTracker,
}

impl WidgetClient {
    pub fn new(
        backend: Backend,
        visitor: Visitor,
        poll_interval: Duration,
        event_sender: mpsc::Sender<WidgetEvent>,
        command_receiver: mpsc::Receiver<WidgetCommand>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            poller: TranscriptPoller::new(backend, event_sender),
            visitor,
            poll_interval,
            command_receiver,
            shutdown,
            tasks: TaskTracker::new(),
        }
    }

    /// Runs until the shutdown token fires or the command channel closes.
    ///
    /// The first tick fires immediately, so the transcript is fetched on start.
    pub async fn run(mut self) {
        log::info!(
            "Session {} polling {} every {:?}",
            self.visitor.session,
            self.poller.backend().transcript_url(),
            self.poll_interval
        );

        let mut ticker = time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                command = self.command_receiver.recv() => {
                    if let Some(command) = command {
                        self.handle_command(command);
                    } else {
                        log::info!("Command channel closed");
                        break;
                    }
                }
                _ = ticker.tick() => self.spawn_poll(),
            }
        }

        self.shutdown.cancel();
        self.tasks.close();
        self.tasks.wait().await;
        log::info!("Network worker stopped");
    }

    fn handle_command(&mut self, command: WidgetCommand) {
        match command {
            WidgetCommand::SendMessage(text) => {
                let Some(payload) = self.visitor.compose(&text) else {
                    log::debug!("Ignoring blank submission");
                    return;
                };
                let poller = self.poller.clone();
                let shutdown = self.shutdown.clone();
                self.tasks.spawn(async move {
                    tokio::select! {
                        _ = shutdown.cancelled() => {}
                        _ = deliver(&poller, payload) => {}
                    }
                });
            }
        }
    }

    fn spawn_poll(&self) {
        let poller = self.poller.clone();
        let shutdown = self.shutdown.clone();
        self.tasks.spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                _ = poller.poll() => {}
            }
        });
    }
}

async fn deliver(poller: &TranscriptPoller, payload: OutgoingPayload) {
    match poller.backend().post_message(&payload).await {
        Ok(()) => {
            log::info!("Message sent ({} chars)", payload.message.chars().count());
            poller.notify(WidgetEvent::MessageSent).await;
            poller.poll().await;
        }
        Err(err) => {
            log::error!("Send error: {err}");
            poller.notify(WidgetEvent::SendFailed(err.to_string())).await;
        }
    }
}
