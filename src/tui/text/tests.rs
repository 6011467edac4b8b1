use ratatui::style::Modifier;
use ratatui::text::Span;

use super::{Segment, render_line, split_segments, wrap_message};

fn texts(spans: &[Span<'_>]) -> Vec<String> {
    spans.iter().map(|s| s.content.to_string()).collect()
}

#[test]
fn split_segments_empty() {
    assert!(split_segments("").is_empty());
}

#[test]
fn split_segments_text_only() {
    assert_eq!(split_segments("Hello world"), vec![Segment::Text("Hello world")]);
}

#[test]
fn split_segments_text_and_code() {
    let segs = split_segments("Here:\n\n```rust\nlet x = 1;\n```\n\nDone.");
    assert_eq!(
        segs,
        vec![
            Segment::Text("Here:"),
            Segment::Code {
                lang: "rust",
                code: "let x = 1;"
            },
            Segment::Text("Done."),
        ]
    );
}

#[test]
fn split_segments_unclosed_code_block() {
    assert_eq!(
        split_segments("```rust\nfn main() {"),
        vec![Segment::Code {
            lang: "rust",
            code: "fn main() {"
        }]
    );
}

#[test]
fn split_segments_code_without_lang() {
    assert_eq!(
        split_segments("```\na\n\nb\n```"),
        vec![Segment::Code {
            lang: "",
            code: "a\n\nb"
        }]
    );
}

#[test]
fn render_plain() {
    assert_eq!(texts(&render_line("hello")), ["hello"]);
}

#[test]
fn render_bold_label() {
    let spans = render_line("**Hello:**");
    assert_eq!(texts(&spans), ["Hello:"]);
    assert!(spans[0].style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn render_inline_code_and_text() {
    assert_eq!(
        texts(&render_line("Use `mist` daily")),
        ["Use ", "mist", " daily"]
    );
}

#[test]
fn render_unclosed_markers_stay_literal() {
    assert_eq!(texts(&render_line("a ** b ` c [d")), ["a ** b ` c [d"]);
}

#[test]
fn render_heading() {
    let spans = render_line("## Repotting");
    assert_eq!(texts(&spans), ["Repotting"]);
    assert!(spans[0].style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn render_bullet() {
    assert_eq!(texts(&render_line("- soil")), ["• ", "soil"]);
}

#[test]
fn render_nested_bullet_keeps_indent() {
    assert_eq!(texts(&render_line("  - perlite")), ["  ", "• ", "perlite"]);
}

#[test]
fn render_numbered() {
    assert_eq!(
        texts(&render_line("2. add **sunlight**")),
        ["2. ", "add ", "sunlight"]
    );
}

#[test]
fn render_link_drops_url() {
    assert_eq!(
        texts(&render_line("See [guide](https://example.com) now")),
        ["See ", "guide", " now"]
    );
}

#[test]
fn render_table_row_and_separator() {
    assert_eq!(
        texts(&render_line("| plant | water |")),
        ["plant", " │ ", "water"]
    );
    assert_eq!(texts(&render_line("|---|---|")), ["─────────"]);
}

#[test]
fn wrap_message_preserves_newlines() {
    assert_eq!(wrap_message("line1\nline2", 100), ["line1", "line2"]);
}

#[test]
fn wrap_message_wraps_long_line() {
    assert_eq!(wrap_message("hello world test", 8), ["hello", "world", "test"]);
}

#[test]
fn wrap_message_empty_lines() {
    assert_eq!(wrap_message("a\n\nb", 100), ["a", "", "b"]);
}

#[test]
fn wrap_message_zero_width() {
    assert_eq!(wrap_message("no wrap here", 0), ["no wrap here"]);
}
