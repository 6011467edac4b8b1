//! Text wrapping for display.

/// Split a message into display lines respecting its newlines, then wrap to `width`.
/// Uses textwrap for correct UTF-8 handling; a width of 0 disables wrapping.
pub(crate) fn wrap_message(msg: &str, width: usize) -> Vec<String> {
    msg.split('\n')
        .flat_map(|line| {
            if line.is_empty() || width == 0 {
                vec![line.to_string()]
            } else {
                textwrap::wrap(line, width)
                    .into_iter()
                    .map(|cow| cow.into_owned())
                    .collect()
            }
        })
        .collect()
}
