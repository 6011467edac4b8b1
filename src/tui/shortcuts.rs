//! Keyboard shortcuts.
//!
//! | Action          | Keys                    |
//! |-----------------|-------------------------|
//! | Send            | Enter                   |
//! | Scroll          | ↑ ↓ PageUp PageDown     |
//! | Copy last reply | Ctrl+Y                  |
//! | Clear input     | Esc                     |
//! | Quit            | Ctrl+C, Ctrl+D          |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Detected shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Copy the latest assistant reply to the clipboard (Ctrl+Y)
    CopyReply,
    /// Quit (Ctrl+C, Ctrl+D)
    Quit,
}

impl Shortcut {
    /// Returns the shortcut if the key matches one. Key releases never match.
    pub fn match_key(key: &KeyEvent) -> Option<Shortcut> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if !key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(Shortcut::Quit),
            KeyCode::Char('y') => Some(Shortcut::CopyReply),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_c_and_ctrl_d_quit() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Shortcut::Quit)
        );
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(Shortcut::Quit)
        );
    }

    #[test]
    fn ctrl_y_copies() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('y'), KeyModifiers::CONTROL)),
            Some(Shortcut::CopyReply)
        );
    }

    #[test]
    fn plain_letters_are_not_shortcuts() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn release_events_are_ignored() {
        let mut release = key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        release.kind = KeyEventKind::Release;
        assert_eq!(Shortcut::match_key(&release), None);
    }
}
