//! Conversation entries: one user or assistant turn.

use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;

/// Opaque message identifier, increasing in creation order within a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    pub(crate) fn new(seq: u64) -> Self {
        Self(seq)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// Only `Text` is produced today; `Image` and `Voice` are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
#[allow(dead_code)]
pub enum MessageKind {
    #[default]
    Text,
    Image,
    Voice,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    id: MessageId,
    content: String,
    sender: Sender,
    timestamp: DateTime<Local>,
    kind: MessageKind,
}

impl Message {
    pub(crate) fn text(id: MessageId, sender: Sender, content: String) -> Self {
        Self {
            id,
            content,
            sender,
            timestamp: Local::now(),
            kind: MessageKind::Text,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display_and_order() {
        let a = MessageId::new(1);
        let b = MessageId::new(2);
        assert!(a < b);
        assert_eq!(a.to_string(), "msg-1");
    }

    #[test]
    fn text_message_fields() {
        let msg = Message::text(MessageId::new(7), Sender::User, "hello".to_string());
        assert_eq!(msg.content(), "hello");
        assert_eq!(msg.kind(), MessageKind::Text);
        assert!(msg.is_user());
    }

    #[test]
    fn serializes_lowercase_enums() {
        let msg = Message::text(MessageId::new(3), Sender::Assistant, "hi".to_string());
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["sender"], "assistant");
        assert_eq!(json["kind"], "text");
        assert_eq!(json["content"], "hi");
        assert!(json["timestamp"].is_string());
    }
}
