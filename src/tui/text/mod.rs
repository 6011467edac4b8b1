//! Markdown rendering for the chat history: segments, inline spans, wrapping.

mod markdown;
mod segments;
mod wrap;

pub(crate) use markdown::render_line;
pub(crate) use segments::{Segment, split_segments};
pub(crate) use wrap::wrap_message;

#[cfg(test)]
mod tests;
