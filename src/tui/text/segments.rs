//! Split message content into prose and fenced code blocks.

/// Segment of a message: prose, or the body of a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Text(&'a str),
    Code { lang: &'a str, code: &'a str },
}

/// Fences are lines starting with ```. An unclosed fence runs to the end.
pub(crate) fn split_segments(content: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    // (lang, body start) of the open fence
    let mut open: Option<(&str, usize)> = None;
    let mut text_start = 0;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let trimmed = line.trim();
        let Some(info) = trimmed.strip_prefix("```") else {
            continue;
        };
        match open.take() {
            Some((lang, body_start)) => {
                let code = content[body_start..line_start].trim_end_matches('\n');
                segments.push(Segment::Code { lang, code });
                text_start = offset;
            }
            None => {
                push_text(&mut segments, &content[text_start..line_start]);
                open = Some((info.trim(), offset));
            }
        }
    }

    match open {
        Some((lang, body_start)) => segments.push(Segment::Code {
            lang,
            code: content.get(body_start..).unwrap_or(""),
        }),
        None => push_text(&mut segments, content.get(text_start..).unwrap_or("")),
    }
    segments
}

fn push_text<'a>(segments: &mut Vec<Segment<'a>>, text: &'a str) {
    let text = text.trim_matches('\n');
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
}
