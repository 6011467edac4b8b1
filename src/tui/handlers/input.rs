//! Handler for main input (typing, submit, scroll).

use crossterm::event::{KeyCode, KeyModifiers};

use super::super::app::{App, ScrollPosition};
use super::super::constants;
use super::{HandleResult, PendingReplies};

/// Handle keys that are not shortcuts.
pub(crate) fn handle_main_input(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    app: &mut App,
    replies: &PendingReplies,
) -> HandleResult {
    match key_code {
        KeyCode::Enter => {
            // earlier replies may still be pending; this request runs alongside them
            if let Some(dispatch) = app.conversation.submit(&app.input) {
                log::info!("submitted request #{}", dispatch.seq());
                app.input.clear();
                app.scroll = ScrollPosition::Bottom;
                replies.spawn(dispatch);
            }
        }
        KeyCode::Esc => app.input.clear(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Up => app.scroll_up(constants::SCROLL_LINES_SMALL),
        KeyCode::Down => app.scroll_down(constants::SCROLL_LINES_SMALL),
        KeyCode::PageUp => app.scroll_up(constants::SCROLL_LINES_PAGE),
        KeyCode::PageDown => app.scroll_down(constants::SCROLL_LINES_PAGE),
        KeyCode::Char(c) => {
            // Ctrl/Alt combos that are not shortcuts are ignored
            if !key_modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                app.input.push(c);
            }
        }
        _ => {}
    }
    HandleResult::Continue
}
