//! Reply normalization: turn loosely formatted assistant text into Markdown.
//!
//! The backend is not guaranteed to produce well-formed Markdown. `normalize`
//! promotes `Label:` lines to bold headings, rewrites numbered and bulleted
//! lists to canonical markers, and collapses runs of blank lines. Fenced code
//! blocks pass through untouched.

use std::sync::OnceLock;

use regex::Regex;

struct Patterns {
    /// A letter-led line ending in a colon, followed by one or more newlines.
    label: Regex,
    /// `1)` at line start.
    numbered_paren: Regex,
    /// `1.` at line start, not followed by a digit (so `1.5 liters` is left alone).
    numbered_dot: Regex,
    /// `-`, `*` (followed by a space) or a bullet glyph at line start.
    bullet: Regex,
    /// Three or more newlines, blank lines may carry spaces or tabs.
    blank_run: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        label: Regex::new(r"(?m)^(\p{L}[^\n]*:)[ \t]*\n+").expect("label pattern"),
        numbered_paren: Regex::new(r"(?m)^([ \t]*)(\d+)\)[ \t]*(\S)").expect("paren pattern"),
        numbered_dot: Regex::new(r"(?m)^([ \t]*)(\d+)\.[ \t]*([^\d\s])").expect("dot pattern"),
        bullet: Regex::new(r"(?m)^([ \t]*)(?:[-*][ \t]+|[•●▪‣◦][ \t]*)(\S)")
            .expect("bullet pattern"),
        blank_run: Regex::new(r"\n(?:[ \t]*\n){2,}").expect("blank run pattern"),
    })
}

/// Normalize raw assistant text into Markdown-friendly text.
///
/// Total and idempotent: any input is accepted, and
/// `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    // CRLF and lone CR both end a line; no CR survives this step
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(text.len());
    for chunk in split_fences(text) {
        match chunk {
            Chunk::Code(code) => out.push_str(code),
            Chunk::Text(prose) => out.push_str(&normalize_prose(prose)),
        }
    }
    out.trim().to_string()
}

fn normalize_prose(s: &str) -> String {
    let p = patterns();
    let s = p.label.replace_all(s, "**${1}**\n\n");
    let s = p.numbered_paren.replace_all(&s, "${1}${2}. ${3}");
    let s = p.numbered_dot.replace_all(&s, "${1}${2}. ${3}");
    let s = p.bullet.replace_all(&s, "${1}- ${2}");
    p.blank_run.replace_all(&s, "\n\n").into_owned()
}

/// Slice of the input: prose, or a fenced code block including its fence lines.
///
/// Chunks concatenate back to the input. A code chunk stops before the newline
/// that ends its closing fence, so the prose after it starts with that newline
/// and blank-line collapsing sees the whole run.
#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Text(&'a str),
    Code(&'a str),
}

/// Split on lines starting with ```. An unclosed fence runs to the end.
fn split_fences(s: &str) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    let mut in_code = false;
    let mut start = 0;
    let mut offset = 0;

    for line in s.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        if !line.trim_start().starts_with("```") {
            continue;
        }
        if in_code {
            let end = offset - usize::from(line.ends_with('\n'));
            chunks.push(Chunk::Code(&s[start..end]));
            start = end;
            in_code = false;
        } else {
            if line_start > start {
                chunks.push(Chunk::Text(&s[start..line_start]));
            }
            start = line_start;
            in_code = true;
        }
    }
    if start < s.len() {
        let rest = &s[start..];
        chunks.push(if in_code {
            Chunk::Code(rest)
        } else {
            Chunk::Text(rest)
        });
    }
    chunks
}
