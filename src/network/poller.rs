use tokio::sync::mpsc;

use crate::common::WidgetEvent;

use super::backend::Backend;

/// One transcript fetch, forwarded to the UI on success and logged on failure.
#[derive(Debug, Clone)]
pub struct TranscriptPoller {
    backend: Backend,
    event_sender: mpsc::Sender<WidgetEvent>,
}

impl TranscriptPoller {
    pub fn new(backend: Backend, event_sender: mpsc::Sender<WidgetEvent>) -> Self {
        Self {
            backend,
            event_sender,
        }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub async fn poll(&self) {
        match self.backend.fetch_transcript().await {
            Ok(messages) => {
                log::debug!("Transcript: {} messages", messages.len());
                self.notify(WidgetEvent::TranscriptReceived(messages)).await;
            }
            Err(err) => log::error!("Transcript error: {err}"),
        }
    }

    pub async fn notify(&self, event: WidgetEvent) {
        if let Err(err) = self.event_sender.send(event).await {
            log::debug!("UI is gone, dropping event: {err}");
        }
    }
}
