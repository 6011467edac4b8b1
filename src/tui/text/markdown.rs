//! Line-level Markdown rendering: headings, lists, quotes, table rows, and
//! inline **bold**, `code` and [links](url).

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::tui::constants::{ACCENT, ACCENT_SECONDARY};

/// Render one line of normalized Markdown into styled spans.
pub(crate) fn render_line(line: &str) -> Vec<Span<'static>> {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];
    let mut spans = Vec::new();
    if !indent.is_empty() {
        spans.push(Span::raw(indent.to_string()));
    }

    if let Some(content) = heading_text(trimmed) {
        spans.push(Span::styled(
            content.to_string(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    } else if let Some(rest) = trimmed.strip_prefix("- ") {
        spans.push(Span::styled("• ", Style::default().fg(ACCENT)));
        spans.extend(render_inline(rest));
    } else if let Some((num, rest)) = numbered_prefix(trimmed) {
        spans.push(Span::styled(format!("{}. ", num), Style::default().fg(ACCENT)));
        spans.extend(render_inline(rest));
    } else if let Some(rest) = trimmed.strip_prefix("> ") {
        spans.push(Span::styled("▎ ", Style::default().fg(ACCENT)));
        spans.extend(
            render_inline(rest)
                .into_iter()
                .map(|s| s.patch_style(Style::default().add_modifier(Modifier::ITALIC))),
        );
    } else if trimmed.starts_with('|') {
        spans.extend(render_table_row(trimmed));
    } else {
        spans.extend(render_inline(trimmed));
    }
    spans
}

/// `# Title` .. `###### Title`.
fn heading_text(s: &str) -> Option<&str> {
    let hashes = s.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let content = s[hashes..].strip_prefix(' ')?.trim();
    (!content.is_empty()).then_some(content)
}

/// Canonical `N. ` list prefix. Returns (number, rest).
fn numbered_prefix(s: &str) -> Option<(&str, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = s[digits..].strip_prefix(". ")?;
    Some((&s[..digits], rest))
}

fn render_table_row(s: &str) -> Vec<Span<'static>> {
    let cells: Vec<&str> = s
        .split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    // separator row: |---|:---:|
    if cells
        .iter()
        .all(|c| c.chars().all(|ch| matches!(ch, '-' | ':')))
    {
        return vec![Span::styled(
            "─".repeat(s.chars().count()),
            Style::default().fg(ACCENT),
        )];
    }
    let mut spans = Vec::new();
    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(ACCENT)));
        }
        spans.extend(render_inline(cell));
    }
    spans
}

#[derive(Clone, Copy)]
enum Marker {
    Bold,
    Code,
    Link,
}

impl Marker {
    fn token(self) -> &'static str {
        match self {
            Marker::Bold => "**",
            Marker::Code => "`",
            Marker::Link => "[",
        }
    }
}

/// Inline spans: **bold**, `code`, [text](url). Unmatched markers stay literal.
fn render_inline(s: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = s;

    while !rest.is_empty() {
        let next = [Marker::Bold, Marker::Code, Marker::Link]
            .into_iter()
            .filter_map(|m| rest.find(m.token()).map(|pos| (pos, m)))
            .min_by_key(|(pos, _)| *pos);
        let Some((pos, marker)) = next else {
            plain.push_str(rest);
            break;
        };
        plain.push_str(&rest[..pos]);
        let after = &rest[pos + marker.token().len()..];

        let styled = match marker {
            Marker::Bold => after.find("**").map(|end| {
                let span = Span::styled(
                    after[..end].to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                );
                (span, &after[end + 2..])
            }),
            Marker::Code => after.find('`').map(|end| {
                let span = Span::styled(
                    after[..end].to_string(),
                    Style::default().fg(ACCENT_SECONDARY),
                );
                (span, &after[end + 1..])
            }),
            Marker::Link => link(after).map(|(text, remaining)| {
                let span = Span::styled(
                    text.to_string(),
                    Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED),
                );
                (span, remaining)
            }),
        };

        match styled {
            Some((span, remaining)) => {
                if !plain.is_empty() {
                    spans.push(Span::raw(std::mem::take(&mut plain)));
                }
                spans.push(span);
                rest = remaining;
            }
            None => {
                plain.push_str(marker.token());
                rest = after;
            }
        }
    }
    if !plain.is_empty() {
        spans.push(Span::raw(plain));
    }
    spans
}

/// After `[`: `text](url)`. Returns (text, rest after `)`); the url is dropped.
fn link(after_bracket: &str) -> Option<(&str, &str)> {
    let close = after_bracket.find("](")?;
    let text = &after_bracket[..close];
    let tail = &after_bracket[close + 2..];
    let end = tail.find(')')?;
    Some((text, &tail[end + 1..]))
}
