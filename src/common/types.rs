use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Which party a transcript message belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Agent,
    Customer,
    /// Any tag the backend sends that is neither `agent` nor `customer`.
    #[default]
    #[serde(other)]
    Unknown,
}

impl Purpose {
    /// Lenient reading of the wire tag: null, missing or non-string is `Unknown`.
    fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = Option::<Value>::deserialize(deserializer)?;
        Ok(match tag.as_ref().and_then(Value::as_str) {
            Some("agent") => Purpose::Agent,
            Some("customer") => Purpose::Customer,
            _ => Purpose::Unknown,
        })
    }
}

/// Domain model for one transcript message as the backend returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub message: String,
    #[serde(default, deserialize_with = "Purpose::deserialize_lenient")]
    pub purpose: Purpose,
}

impl ChatMessage {
    pub fn new(sender: impl Into<String>, message: impl Into<String>, purpose: Purpose) -> Self {
        Self {
            sender: sender.into(),
            message: message.into(),
            purpose,
        }
    }
}

/// Random token generated once per launch and sent with every outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Placeholder identity attached to every outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisitorIdentity {
    pub nickname: String,
    pub id_type: String,
    pub first_name: String,
    pub last_name: String,
}

impl Default for VisitorIdentity {
    fn default() -> Self {
        Self {
            nickname: "Takuya".to_string(),
            id_type: "email".to_string(),
            first_name: "Takuya".to_string(),
            last_name: "Sangil".to_string(),
        }
    }
}

/// Body of `POST /messageToGenesys`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingPayload {
    pub id: SessionId,
    pub nickname: String,
    pub id_type: String,
    pub first_name: String,
    pub last_name: String,
    pub message: String,
}

/// The local party: session token plus the identity sent with each message.
#[derive(Debug, Clone)]
pub struct Visitor {
    pub session: SessionId,
    pub identity: VisitorIdentity,
}

impl Visitor {
    pub fn new(session: SessionId, identity: VisitorIdentity) -> Self {
        Self { session, identity }
    }

    /// Builds the outgoing payload for `text`, or `None` when it trims to nothing.
    pub fn compose(&self, text: &str) -> Option<OutgoingPayload> {
        let message = submission(text)?;
        Some(OutgoingPayload {
            id: self.session,
            nickname: self.identity.nickname.clone(),
            id_type: self.identity.id_type.clone(),
            first_name: self.identity.first_name.clone(),
            last_name: self.identity.last_name.clone(),
            message,
        })
    }
}

/// Trim rule shared by every entry point that submits text.
pub fn submission(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
