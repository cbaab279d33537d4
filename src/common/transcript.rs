use serde::{Deserialize, Serialize};

use super::types::ChatMessage;

/// What a `/transcript` response contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptMode {
    /// The whole conversation so far, oldest first.
    #[default]
    Full,
    /// Only messages the backend has not returned before.
    Incremental,
}

/// Decides which messages of a poll result still need a bubble.
///
/// In `Full` mode each batch is compared position by position with the last
/// accepted transcript. Only the part past the common prefix is new, so a
/// message repeated verbatim still gets its own bubble. A batch that is a
/// prefix of what was already shown is either unchanged or an older request
/// answered late; neither yields anything.
///
/// In `Incremental` mode batches never overlap and everything is forwarded.
#[derive(Debug, Default)]
pub struct Transcript {
    mode: TranscriptMode,
    shown: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new(mode: TranscriptMode) -> Self {
        Self {
            mode,
            shown: Vec::new(),
        }
    }

    /// Returns the messages of `batch` that have not been rendered yet, in order.
    pub fn reconcile(&mut self, batch: Vec<ChatMessage>) -> Vec<ChatMessage> {
        match self.mode {
            TranscriptMode::Incremental => batch,
            TranscriptMode::Full => self.reconcile_full(batch),
        }
    }

    fn reconcile_full(&mut self, batch: Vec<ChatMessage>) -> Vec<ChatMessage> {
        let common = common_prefix(&self.shown, &batch);
        if common == batch.len() {
            return Vec::new();
        }
        if common < self.shown.len() {
            log::warn!(
                "Transcript diverged after {common} of {} shown messages; rendering the rest",
                self.shown.len()
            );
        }

        let fresh = batch[common..].to_vec();
        self.shown = batch;
        fresh
    }
}

fn common_prefix(shown: &[ChatMessage], batch: &[ChatMessage]) -> usize {
    shown
        .iter()
        .zip(batch)
        .take_while(|(seen, incoming)| seen == incoming)
        .count()
}
