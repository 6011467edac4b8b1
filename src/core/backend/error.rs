//! Backend call errors.

use std::time::Duration;

/// Why a chat call produced no reply text.
///
/// None of these reach the message list: the conversation logs them and
/// appends its fallback message instead.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    BadStatus { status: u16, body: String },
    #[error("could not decode reply: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("no reply within {}s", .0.as_secs_f32())]
    Timeout(Duration),
    #[error("request cancelled")]
    Cancelled,
}

impl ChatError {
    /// Short label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::Network(_) => "network",
            ChatError::BadStatus { .. } => "status",
            ChatError::Decode(_) => "decode",
            ChatError::Timeout(_) => "timeout",
            ChatError::Cancelled => "cancelled",
        }
    }
}
