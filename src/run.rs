//! Application run modes: logger init, config, single prompt, TUI launch.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::cli::Args;
use crate::core;
use crate::core::backend::HttpBackend;
use crate::core::config::{Config, ConfigError};
use crate::core::conversation::Conversation;

/// Initialize env_logger. In TUI mode, writes to file to avoid corrupting the display.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));

    if args.is_tui() {
        // stderr would draw over the TUI: without a log file, drop records
        let target = match core::paths::log_file() {
            Some(path) => match open_log_file(&path) {
                Ok(file) => env_logger::Target::Pipe(Box::new(file)),
                Err(e) => {
                    eprintln!(
                        "Warning: logging disabled, cannot open {}: {}",
                        path.display(),
                        e
                    );
                    env_logger::Target::Pipe(Box::new(io::sink()))
                }
            },
            None => env_logger::Target::Pipe(Box::new(io::sink())),
        };
        logger.target(target);
    }
    let _ = logger.try_init();
}

/// Open the log file for appending, creating its directory first.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

/// Load config from the environment, then apply command-line overrides.
pub fn load_config(args: &Args) -> Result<Config, ConfigError> {
    let mut config = core::config::load()?;
    if let Some(url) = &args.base_url {
        config.set_base_url(url)?;
    }
    if let Some(secs) = args.timeout {
        config.set_timeout_secs(secs);
    }
    if let Some(order) = args.reply_order {
        config.reply_order = order;
    }
    Ok(config)
}

/// `config` subcommand: print effective settings.
pub fn print_config(config: &Config) {
    println!("{} {}", core::app::NAME, core::app::VERSION);
    println!("chat endpoint: {}", config.chat_url());
    match config.request_timeout {
        Some(limit) => println!("timeout:       {}s", limit.as_secs()),
        None => println!("timeout:       none"),
    }
    println!("reply order:   {}", config.reply_order);
    match core::paths::log_file() {
        Some(path) => println!("log file:      {} (TUI mode)", path.display()),
        None => println!("log file:      unavailable"),
    }
}

/// Run single prompt mode: send one message, print the reply to stdout.
pub async fn run_single_prompt(
    prompt_arg: &str,
    json: bool,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let prompt = if prompt_arg == "-" {
        io::read_to_string(io::stdin())?
    } else {
        prompt_arg.to_string()
    };
    if prompt.trim().is_empty() {
        eprintln!("Error: empty prompt");
        std::process::exit(1);
    }

    let backend = HttpBackend::new(config);
    log::info!("single prompt against {}", backend.chat_url());
    let mut conversation = Conversation::from_config(config);
    conversation.send(&backend, &prompt).await;

    if json {
        println!("{}", serde_json::to_string_pretty(conversation.messages())?);
    } else if let Some(reply) = conversation.last_reply() {
        println!("{}", reply.content());
    }
    Ok(())
}

/// Launch the TUI in a blocking thread. Returns on panic or IO error.
pub async fn launch_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(config);
    let join_result: Result<io::Result<()>, tokio::task::JoinError> =
        tokio::task::spawn_blocking(move || crate::tui::run(config)).await;

    match join_result {
        Ok(io_result) => io_result?,
        Err(join_err) => {
            if let Ok(panic) = join_err.try_into_panic() {
                let msg = if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    format!("{:?}", panic)
                };
                eprintln!("TUI panic: {}", msg);
            }
            return Err(
                Box::new(io::Error::other("TUI thread panicked")) as Box<dyn std::error::Error>
            );
        }
    }
    Ok(())
}
