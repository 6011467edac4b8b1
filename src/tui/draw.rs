//! TUI rendering: header, message history, input box, bottom bar.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

use crate::core::app::NAME;
use crate::core::message::{Message, Sender};

use super::app::App;
use super::constants::{ACCENT, ACCENT_SECONDARY, LOGO_IDLE, LOGO_THINKING};
use super::text::{Segment, render_line, split_segments, wrap_message};

/// Start time for the composing spinner phase.
static HEADER_START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

pub(super) fn draw(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, app, chunks[0]);
    draw_history(f, app, chunks[1]);
    draw_input(f, app, chunks[2]);
    draw_bottom_bar(f, app, chunks[3]);
}

fn spinner_frame() -> &'static str {
    let start = HEADER_START.get_or_init(Instant::now);
    let phase = start.elapsed().as_millis() as usize;
    LOGO_THINKING[(phase / 80) % LOGO_THINKING.len()]
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let logo = if app.is_composing() {
        spinner_frame()
    } else {
        LOGO_IDLE
    };
    let title = Line::from(vec![
        Span::styled(format!("{} ", logo), Style::default().fg(ACCENT)),
        Span::styled(
            NAME,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
    ]);
    let endpoint = Line::from(Span::styled(
        app.endpoint.as_str(),
        Style::default().fg(Color::DarkGray),
    ));

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Min(0)])
        .split(area);
    f.render_widget(Paragraph::new(title), halves[0]);
    f.render_widget(
        Paragraph::new(endpoint).alignment(Alignment::Right),
        halves[1],
    );
}

/// Build display lines for one message: label, then rendered content.
fn message_lines(msg: &Message, content_width: usize) -> Vec<Line<'static>> {
    let label = match msg.sender() {
        Sender::User => "You",
        Sender::Assistant => "Assistant",
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", label), Style::default().fg(Color::DarkGray)),
        Span::styled("→ ", Style::default().fg(ACCENT)),
        Span::styled(
            msg.timestamp().format("%H:%M").to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    // user text is shown as typed
    if msg.sender() == Sender::User {
        for chunk in wrap_message(msg.content(), content_width) {
            lines.push(Line::from(vec![Span::raw("  "), Span::raw(chunk)]));
        }
        return lines;
    }

    for segment in split_segments(msg.content()) {
        match segment {
            Segment::Text(text) => {
                for chunk in wrap_message(text, content_width) {
                    let mut spans = vec![Span::raw("  ")];
                    spans.extend(render_line(&chunk));
                    lines.push(Line::from(spans));
                }
            }
            Segment::Code { lang, code } => {
                if !lang.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("  ┌ {}", lang),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                for code_line in code.lines() {
                    lines.push(Line::from(vec![
                        Span::styled("  │ ", Style::default().fg(Color::DarkGray)),
                        Span::styled(
                            code_line.to_string(),
                            Style::default().fg(ACCENT_SECONDARY),
                        ),
                    ]));
                }
            }
        }
    }
    lines
}

fn draw_history(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let text_area = chunks[0];
    let scrollbar_area = chunks[1];
    let content_width = (text_area.width as usize).saturating_sub(2);

    let mut lines: Vec<Line<'static>> = Vec::new();
    if app.conversation.messages().is_empty() {
        lines.push(Line::from(Span::styled(
            "  Ask anything to start the conversation.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for msg in app.conversation.messages() {
        lines.extend(message_lines(msg, content_width));
        lines.push(Line::from(""));
    }
    if app.is_composing() {
        let pending = app.conversation.pending();
        let text = if pending > 1 {
            format!("  {} Composing {} replies...", spinner_frame(), pending)
        } else {
            format!("  {} Composing...", spinner_frame())
        };
        lines.push(Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let total_lines = lines.len();
    let visible = text_area.height as usize;
    app.last_max_scroll = total_lines.saturating_sub(visible);
    let start = app.scroll_line();
    let visible_lines: Vec<Line> = lines.into_iter().skip(start).take(visible).collect();
    f.render_widget(Paragraph::new(visible_lines), text_area);

    let mut scrollbar_state = ScrollbarState::default()
        .position(start)
        .content_length(total_lines);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_symbol("█")
        .track_symbol(Some("│"));
    f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let content = if app.input.is_empty() {
        Span::styled("Ask anything... ", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.input.as_str())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    f.render_widget(Paragraph::new(Line::from(content)).block(block), area);

    let x = cursor_x(area, app.input.chars().count());
    f.set_cursor_position((x, area.y.saturating_add(1)));
}

/// Cursor column after the last typed character, clamped inside the box.
fn cursor_x(area: Rect, typed: usize) -> u16 {
    let typed = u16::try_from(typed).unwrap_or(u16::MAX);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    area.x.saturating_add(1).saturating_add(typed).min(max_x)
}

fn draw_bottom_bar(f: &mut Frame, app: &App, area: Rect) {
    let left = match app.active_toast(Instant::now()) {
        Some(toast) => Span::styled(toast.to_string(), Style::default().fg(ACCENT)),
        None => Span::styled(
            format!("{} messages", app.conversation.messages().len()),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let shortcuts = Span::styled(
        "Enter send · ↑↓ scroll · Ctrl+Y copy reply · Ctrl+C quit",
        Style::default().fg(Color::DarkGray),
    );

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Min(0)])
        .split(area);
    f.render_widget(Paragraph::new(Line::from(left)), halves[0]);
    f.render_widget(
        Paragraph::new(Line::from(shortcuts)).alignment(Alignment::Right),
        halves[1],
    );
}
