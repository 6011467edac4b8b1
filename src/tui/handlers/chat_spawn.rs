//! Runs dispatched chat requests on the TUI's runtime and hands completions
//! back to the UI loop over a channel.

use std::sync::Arc;
use std::sync::mpsc;

use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::core::backend::ChatBackend;
use crate::core::conversation::{Completion, Dispatch};

/// In-flight requests of the session. Requests run independently: a new
/// one never cancels an earlier one. `cancel_all` is for quitting.
pub struct PendingReplies {
    rt: Arc<Runtime>,
    backend: Arc<dyn ChatBackend>,
    tx: mpsc::Sender<Completion>,
    rx: mpsc::Receiver<Completion>,
    cancel_token: CancellationToken,
}

impl PendingReplies {
    pub fn new(rt: Arc<Runtime>, backend: Arc<dyn ChatBackend>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            rt,
            backend,
            tx,
            rx,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Start the call on the runtime. Its completion shows up in `try_recv`.
    pub fn spawn(&self, dispatch: Dispatch) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let token = self.cancel_token.clone();
        log::debug!(
            "request #{} started ({} chars)",
            dispatch.seq(),
            dispatch.text().chars().count()
        );
        self.rt.spawn(async move {
            let completion = dispatch.run_until_cancelled(backend.as_ref(), &token).await;
            log::debug!(
                "request #{} finished (ok: {})",
                completion.seq(),
                completion.outcome().is_ok()
            );
            if tx.send(completion).is_err() {
                log::debug!("UI loop gone; dropping completion");
            }
        });
    }

    /// Next finished call, if any. Never blocks.
    pub fn try_recv(&self) -> Option<Completion> {
        self.rx.try_recv().ok()
    }

    #[cfg(test)]
    pub(crate) fn recv_timeout(&self, timeout: std::time::Duration) -> Option<Completion> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Abort every call still in flight.
    pub fn cancel_all(&self) {
        self.cancel_token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::backend::ChatError;
    use crate::core::conversation::{Conversation, ReplyOrder};

    struct Echo;

    #[async_trait::async_trait]
    impl ChatBackend for Echo {
        async fn send(&self, message: &str) -> Result<Option<String>, ChatError> {
            Ok(Some(format!("echo {}", message)))
        }
    }

    struct Never;

    #[async_trait::async_trait]
    impl ChatBackend for Never {
        async fn send(&self, _message: &str) -> Result<Option<String>, ChatError> {
            std::future::pending().await
        }
    }

    fn runtime() -> Arc<Runtime> {
        Arc::new(Runtime::new().unwrap())
    }

    #[test]
    fn completion_comes_back_over_channel() {
        let replies = PendingReplies::new(runtime(), Arc::new(Echo));
        let mut conv = Conversation::new(ReplyOrder::Arrival, None);
        replies.spawn(conv.submit("ping").unwrap());

        let completion = replies.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(conv.resolve(completion), 1);
        assert_eq!(conv.last_reply().unwrap().content(), "echo ping");
        assert!(!conv.is_composing());
    }

    #[test]
    fn cancel_all_stops_hung_calls() {
        let replies = PendingReplies::new(runtime(), Arc::new(Never));
        let mut conv = Conversation::new(ReplyOrder::Arrival, None);
        replies.spawn(conv.submit("a").unwrap());
        replies.spawn(conv.submit("b").unwrap());
        assert!(replies.try_recv().is_none());

        replies.cancel_all();
        for _ in 0..2 {
            let completion = replies.recv_timeout(Duration::from_secs(5)).unwrap();
            assert!(matches!(completion.outcome(), Err(ChatError::Cancelled)));
        }
    }
}
