//! TUI application state: conversation, input, scroll, toasts.

use std::time::Instant;

use crate::core::conversation::Conversation;

/// Scroll position: either a specific line index, or "at bottom" (follow new content).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScrollPosition {
    Line(usize),
    Bottom,
}

impl Default for ScrollPosition {
    fn default() -> Self {
        Self::Bottom
    }
}

pub struct App {
    pub(crate) conversation: Conversation,
    /// User input in the text field.
    pub(crate) input: String,
    pub(crate) scroll: ScrollPosition,
    pub(crate) last_max_scroll: usize,
    /// Chat endpoint shown in the header.
    pub(crate) endpoint: String,
    /// Short notice in the bottom bar ("Copied", clipboard errors) and when it expires.
    pub(crate) toast: Option<(String, Instant)>,
}

impl App {
    pub fn new(conversation: Conversation, endpoint: String) -> Self {
        Self {
            conversation,
            input: String::new(),
            scroll: ScrollPosition::default(),
            last_max_scroll: 0,
            endpoint,
            toast: None,
        }
    }

    pub(crate) fn is_composing(&self) -> bool {
        self.conversation.is_composing()
    }

    pub(crate) fn show_toast(&mut self, text: impl Into<String>, until: Instant) {
        self.toast = Some((text.into(), until));
    }

    /// Toast text if it has not expired yet.
    pub(crate) fn active_toast(&self, now: Instant) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|(_, until)| now < *until)
            .map(|(text, _)| text.as_str())
    }

    /// Must be called before scroll_up/scroll_down when at bottom.
    pub(crate) fn materialize_scroll(&mut self) {
        if self.scroll == ScrollPosition::Bottom {
            self.scroll = ScrollPosition::Line(self.last_max_scroll);
        }
    }

    pub(crate) fn scroll_down(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            let next = pos + n;
            self.scroll = if next >= self.last_max_scroll {
                ScrollPosition::Bottom
            } else {
                ScrollPosition::Line(next)
            };
        }
    }

    pub(crate) fn scroll_up(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            self.scroll = ScrollPosition::Line(pos.saturating_sub(n));
        }
    }

    /// Resolve scroll position to a concrete line index.
    pub(crate) fn scroll_line(&self) -> usize {
        match self.scroll {
            ScrollPosition::Line(n) => n.min(self.last_max_scroll),
            ScrollPosition::Bottom => self.last_max_scroll,
        }
    }
}
