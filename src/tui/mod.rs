//! TUI (Text User Interface) for chatting with the backend.

mod app;
mod constants;
mod draw;
mod handlers;
mod shortcuts;
mod text;

use std::io;
use std::sync::Arc;

use crossterm::event::{self, Event};
use crossterm::execute;
use tokio::runtime::Runtime;

use crate::core::backend::HttpBackend;
use crate::core::config::Config;
use crate::core::conversation::Conversation;

use app::App;
use draw::draw;
use handlers::{HandleResult, PendingReplies};

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the TUI loop. Chat requests run on a dedicated Tokio runtime; this
/// thread owns the conversation and applies their completions.
pub fn run(config: Arc<Config>) -> io::Result<()> {
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let _guard = TerminalGuard;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    execute!(stdout, crossterm::event::EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let rt = Arc::new(
        Runtime::new().map_err(|e| io::Error::other(format!("Failed to create runtime: {}", e)))?,
    );
    let replies = PendingReplies::new(rt, Arc::new(HttpBackend::new(&config)));
    let mut app = App::new(Conversation::from_config(&config), config.chat_url());
    log::info!("session started against {}", config.chat_url());

    loop {
        while let Some(completion) = replies.try_recv() {
            app.conversation.resolve(completion);
        }

        terminal.draw(|f| draw(f, &mut app, f.area()))?;

        if event::poll(std::time::Duration::from_millis(
            constants::EVENT_POLL_TIMEOUT_MS,
        ))? {
            let result = match event::read()? {
                Event::Key(key) => handlers::handle_key(key, &mut app, &replies),
                Event::Mouse(mouse) => handlers::handle_mouse(mouse, &mut app),
                _ => HandleResult::Continue,
            };
            if result == HandleResult::Break {
                break;
            }
        }
    }

    if app.is_composing() {
        log::info!(
            "quitting with {} request(s) in flight",
            app.conversation.pending()
        );
    }
    replies.cancel_all();
    terminal.show_cursor()?;
    Ok(())
}
