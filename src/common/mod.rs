pub mod commands;
pub mod events;
pub mod transcript;
pub mod types;

pub use commands::WidgetCommand;
pub use events::WidgetEvent;
pub use transcript::{Transcript, TranscriptMode};
pub use types::{
    ChatMessage, OutgoingPayload, Purpose, SessionId, Visitor, VisitorIdentity, submission,
};
