use reqwest::StatusCode;
use thiserror::Error;

/// Errors crossing task boundaries, so this type stays `Send + Sync`.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Network failure, or a body that could not be decoded.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{endpoint} answered with status {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    #[error("invalid backend url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// eframe's own error holds raw window handles, only its message is kept.
    #[error("UI failed to start: {0}")]
    Ui(String),
}
