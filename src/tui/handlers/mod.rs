//! Event handlers for the TUI: keyboard and mouse.

mod chat_spawn;
mod input;

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

use super::app::App;
use super::constants;
use super::shortcuts::Shortcut;

pub use chat_spawn::PendingReplies;

/// Result of handling an event: continue the loop or exit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HandleResult {
    Continue,
    Break,
}

/// Handle a key event. Returns HandleResult::Break to exit the main loop.
pub fn handle_key(key: KeyEvent, app: &mut App, replies: &PendingReplies) -> HandleResult {
    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }
    match Shortcut::match_key(&key) {
        Some(Shortcut::Quit) => HandleResult::Break,
        Some(Shortcut::CopyReply) => {
            copy_last_reply(app);
            HandleResult::Continue
        }
        None => input::handle_main_input(key.code, key.modifiers, app, replies),
    }
}

/// Mouse wheel scrolls the history; everything else is ignored.
pub fn handle_mouse(mouse: MouseEvent, app: &mut App) -> HandleResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(constants::SCROLL_LINES_SMALL),
        MouseEventKind::ScrollDown => app.scroll_down(constants::SCROLL_LINES_SMALL),
        _ => {}
    }
    HandleResult::Continue
}

fn copy_last_reply(app: &mut App) {
    let until = Instant::now() + Duration::from_millis(constants::TOAST_DURATION_MS);
    let Some(reply) = app.conversation.last_reply() else {
        app.show_toast("Nothing to copy yet", until);
        return;
    };
    let content = reply.content().to_string();
    match arboard::Clipboard::new().and_then(|mut c| c.set_text(content)) {
        Ok(()) => app.show_toast("Copied", until),
        Err(e) => {
            log::warn!("clipboard unavailable: {}", e);
            app.show_toast("Clipboard unavailable", until);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::runtime::Runtime;

    use super::*;
    use crate::core::backend::{ChatBackend, ChatError};
    use crate::core::conversation::{Conversation, FALLBACK_MESSAGE, ReplyOrder};

    struct Down;

    #[async_trait::async_trait]
    impl ChatBackend for Down {
        async fn send(&self, _message: &str) -> Result<Option<String>, ChatError> {
            Err(ChatError::BadStatus {
                status: 500,
                body: "internal".to_string(),
            })
        }
    }

    fn setup() -> (App, PendingReplies) {
        let app = App::new(
            Conversation::new(ReplyOrder::Arrival, None),
            "http://localhost:3000/api/chat".to_string(),
        );
        let rt = Arc::new(Runtime::new().unwrap());
        (app, PendingReplies::new(rt, Arc::new(Down)))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, replies: &PendingReplies, text: &str) {
        for c in text.chars() {
            handle_key(press(KeyCode::Char(c)), app, replies);
        }
    }

    #[test]
    fn enter_on_blank_input_does_nothing() {
        let (mut app, replies) = setup();
        type_text(&mut app, &replies, "   ");
        handle_key(press(KeyCode::Enter), &mut app, &replies);

        assert!(app.conversation.messages().is_empty());
        assert!(!app.is_composing());
        assert_eq!(app.input, "   ");
    }

    #[test]
    fn enter_submits_and_failure_resolves_to_fallback() {
        let (mut app, replies) = setup();
        type_text(&mut app, &replies, "hello");
        handle_key(press(KeyCode::Enter), &mut app, &replies);

        assert!(app.input.is_empty());
        assert_eq!(app.conversation.messages().len(), 1);
        assert!(app.is_composing());

        let completion = replies.recv_timeout(Duration::from_secs(5)).unwrap();
        app.conversation.resolve(completion);
        assert_eq!(
            app.conversation.last_reply().unwrap().content(),
            FALLBACK_MESSAGE
        );
        assert!(!app.is_composing());
    }

    #[test]
    fn ctrl_c_breaks_the_loop() {
        let (mut app, replies) = setup();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(key, &mut app, &replies), HandleResult::Break);
    }

    #[test]
    fn copy_without_reply_shows_toast() {
        let (mut app, replies) = setup();
        let key = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::CONTROL);
        handle_key(key, &mut app, &replies);
        assert_eq!(app.active_toast(Instant::now()), Some("Nothing to copy yet"));
    }

    #[test]
    fn backspace_and_esc_edit_input() {
        let (mut app, replies) = setup();
        type_text(&mut app, &replies, "abc");
        handle_key(press(KeyCode::Backspace), &mut app, &replies);
        assert_eq!(app.input, "ab");
        handle_key(press(KeyCode::Esc), &mut app, &replies);
        assert!(app.input.is_empty());
    }
}
