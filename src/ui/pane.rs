use chrono::{DateTime, Local};

use crate::common::Purpose;

/// Avatar drawn next to a bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Avatar {
    Agent,
    Visitor,
}

impl Avatar {
    pub fn for_purpose(purpose: Purpose) -> Self {
        match purpose {
            Purpose::Agent => Avatar::Agent,
            Purpose::Customer | Purpose::Unknown => Avatar::Visitor,
        }
    }
}

/// Horizontal building blocks of a bubble, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubblePart {
    Avatar,
    Body,
}

#[derive(Debug, Clone)]
pub struct Bubble {
    pub sender: String,
    pub message: String,
    pub purpose: Purpose,
    pub avatar: Avatar,
    /// Local clock when the bubble was created, not when the message was sent.
    pub displayed_at: DateTime<Local>,
}

impl Bubble {
    pub fn new(sender: &str, message: &str, purpose: Purpose) -> Self {
        Self {
            sender: sender.to_string(),
            message: message.to_string(),
            purpose,
            avatar: Avatar::for_purpose(purpose),
            displayed_at: Local::now(),
        }
    }

    pub fn parts(&self) -> [BubblePart; 2] {
        match self.purpose {
            Purpose::Customer => [BubblePart::Avatar, BubblePart::Body],
            Purpose::Agent | Purpose::Unknown => [BubblePart::Body, BubblePart::Avatar],
        }
    }

    pub fn text(&self) -> String {
        format!("{}: {}", self.sender, self.message)
    }
}

/// Scrollable message pane. Only ever appended to.
#[derive(Debug, Default)]
pub struct ChatPane {
    bubbles: Vec<Bubble>,
    scroll_pending: bool,
}

impl ChatPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends exactly one bubble and asks the view to scroll to it.
    pub fn add_chat_message(&mut self, sender: &str, message: &str, purpose: Purpose) {
        self.bubbles.push(Bubble::new(sender, message, purpose));
        self.scroll_pending = true;
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    /// Returns whether a scroll to the bottom is owed, clearing the request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }
}
