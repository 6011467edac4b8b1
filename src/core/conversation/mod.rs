//! Conversation state: the ordered message list and the composing flag.
//!
//! A [`Conversation`] is owned by one caller (the TUI loop or the one-shot CLI)
//! and is the only place messages are appended. Backend calls happen outside of
//! it: [`Conversation::submit`] hands back a [`Dispatch`] ticket, the caller runs
//! it wherever it likes, and feeds the resulting [`Completion`] to
//! [`Conversation::resolve`].

mod order;

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::core::backend::{ChatBackend, ChatError};
use crate::core::config::Config;
use crate::core::message::{Message, MessageId, Sender};
use crate::core::normalize::normalize;

pub use order::ReplyOrder;

/// Shown instead of a reply when the call fails for any reason.
pub const FALLBACK_MESSAGE: &str =
    "Sorry, I can't reach the assistant right now. Please try again in a moment.";

/// Substituted (then normalized) when the backend answers without text.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "Sorry, I don't have an answer for that yet.";

/// One backend call to perform, created by [`Conversation::submit`].
#[derive(Debug, Clone)]
pub struct Dispatch {
    seq: u64,
    text: String,
    timeout: Option<Duration>,
}

impl Dispatch {
    /// Request sequence number, increasing per conversation.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Perform the call, bounded by the conversation's timeout.
    pub async fn run(self, backend: &dyn ChatBackend) -> Completion {
        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, backend.send(&self.text)).await {
                Ok(result) => result,
                Err(_) => Err(ChatError::Timeout(limit)),
            },
            None => backend.send(&self.text).await,
        };
        Completion::new(self.seq, outcome)
    }

    /// Like [`Dispatch::run`], but gives up with [`ChatError::Cancelled`] once `token` fires.
    pub async fn run_until_cancelled(
        self,
        backend: &dyn ChatBackend,
        token: &CancellationToken,
    ) -> Completion {
        let seq = self.seq;
        tokio::select! {
            _ = token.cancelled() => Completion::new(seq, Err(ChatError::Cancelled)),
            completion = self.run(backend) => completion,
        }
    }
}

/// Result of one [`Dispatch`].
#[derive(Debug)]
pub struct Completion {
    seq: u64,
    outcome: Result<Option<String>, ChatError>,
}

impl Completion {
    pub(crate) fn new(seq: u64, outcome: Result<Option<String>, ChatError>) -> Self {
        Self { seq, outcome }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn outcome(&self) -> &Result<Option<String>, ChatError> {
        &self.outcome
    }
}

pub struct Conversation {
    messages: Vec<Message>,
    next_message_id: u64,
    next_seq: u64,
    /// Dispatched calls not yet resolved. Composing while non-empty.
    in_flight: BTreeSet<u64>,
    /// Submission order only: resolved replies waiting on an earlier request.
    held: BTreeMap<u64, String>,
    order: ReplyOrder,
    timeout: Option<Duration>,
}

impl Conversation {
    pub fn new(order: ReplyOrder, timeout: Option<Duration>) -> Self {
        Self {
            messages: Vec::new(),
            next_message_id: 1,
            next_seq: 1,
            in_flight: BTreeSet::new(),
            held: BTreeMap::new(),
            order,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.reply_order, config.request_timeout)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True while at least one reply is pending.
    pub fn is_composing(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Number of dispatched calls not yet resolved.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Latest assistant message, if any.
    pub fn last_reply(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| !m.is_user())
    }

    /// Append the user's message and start composing.
    ///
    /// Whitespace-only input is ignored: nothing is appended and `None` is returned.
    pub fn submit(&mut self, text: &str) -> Option<Dispatch> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.push(Sender::User, text.to_string());

        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight.insert(seq);
        log::debug!("dispatching chat request #{} ({} pending)", seq, self.pending());

        Some(Dispatch {
            seq,
            text: text.to_string(),
            timeout: self.timeout,
        })
    }

    /// Apply the result of a dispatched call. Returns how many assistant
    /// messages were appended (0 when the reply is held for ordering, or
    /// when `completion` was already resolved).
    pub fn resolve(&mut self, completion: Completion) -> usize {
        let Completion { seq, outcome } = completion;
        if !self.in_flight.remove(&seq) {
            log::debug!("ignoring completion for unknown request #{}", seq);
            return 0;
        }

        let content = reply_content(seq, outcome);
        match self.order {
            ReplyOrder::Arrival => {
                self.push(Sender::Assistant, content);
                1
            }
            ReplyOrder::Submission => {
                self.held.insert(seq, content);
                self.release_held()
            }
        }
    }

    /// Submit, wait for the backend and resolve in one step.
    ///
    /// Returns the assistant reply, or `None` for whitespace-only input.
    pub async fn send(&mut self, backend: &dyn ChatBackend, text: &str) -> Option<&Message> {
        let dispatch = self.submit(text)?;
        let completion = dispatch.run(backend).await;
        self.resolve(completion);
        self.last_reply()
    }

    /// Append held replies older than every request still in flight.
    fn release_held(&mut self) -> usize {
        let oldest_pending = self.in_flight.first().copied();
        let mut released = 0;
        while let Some(entry) = self.held.first_entry() {
            if oldest_pending.is_some_and(|oldest| *entry.key() > oldest) {
                break;
            }
            let content = entry.remove();
            self.push(Sender::Assistant, content);
            released += 1;
        }
        released
    }

    fn push(&mut self, sender: Sender, content: String) {
        let id = MessageId::new(self.next_message_id);
        self.next_message_id += 1;
        let message = Message::text(id, sender, content);
        log::debug!("appended {} ({:?}, {:?})", message.id(), message.sender(), message.kind());
        self.messages.push(message);
    }
}

/// Text to show for a call outcome. Errors are logged here and never shown.
fn reply_content(seq: u64, outcome: Result<Option<String>, ChatError>) -> String {
    match outcome {
        Ok(Some(reply)) if !reply.trim().is_empty() => normalize(&reply),
        Ok(_) => {
            log::info!("chat request #{} returned no reply text", seq);
            normalize(EMPTY_REPLY_PLACEHOLDER)
        }
        Err(e) => {
            log::warn!("chat request #{} failed ({}): {}", seq, e.kind(), e);
            FALLBACK_MESSAGE.to_string()
        }
    }
}
