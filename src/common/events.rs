use super::types::ChatMessage;

/// Events the network worker pushes up to the UI.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    /// One successful poll, in server order.
    TranscriptReceived(Vec<ChatMessage>),
    MessageSent,
    SendFailed(String),
}
