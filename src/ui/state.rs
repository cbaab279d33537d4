use crate::common::{ChatMessage, Transcript, TranscriptMode};

use super::pane::ChatPane;

/// Local UI state.
pub struct AppState {
    pub pane: ChatPane,
    pub input_text: String,
    transcript: Transcript,
}

impl AppState {
    pub fn new(mode: TranscriptMode) -> Self {
        Self {
            pane: ChatPane::new(),
            input_text: String::new(),
            transcript: Transcript::new(mode),
        }
    }

    /// Renders one poll result, returning how many bubbles were added.
    pub fn apply_transcript(&mut self, messages: Vec<ChatMessage>) -> usize {
        let fresh = self.transcript.reconcile(messages);

        for message in &fresh {
            self.pane
                .add_chat_message(&message.sender, &message.message, message.purpose);
        }
        fresh.len()
    }

    /// The backend accepted the message, so the textarea is emptied.
    pub fn message_sent(&mut self) {
        self.input_text.clear();
    }

    /// Delivery failed; the typed text stays for a manual retry.
    pub fn send_failed(&mut self, reason: &str) {
        log::warn!("Message not delivered, keeping input: {reason}");
    }
}
