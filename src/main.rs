//! # sprout - terminal chat client
//!
//! Sends each message to a `/chat` backend and shows the reply, normalized
//! to Markdown.
//!
//! ## Modes
//! - Interactive terminal UI (default)
//! - Single prompt with `-p` / `--prompt`
//! - `config` and `completions` subcommands

mod cli;
mod core;
mod run;
mod tui;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    if let Some(Commands::Completions { shell }) = &args.command {
        cli::generate(
            *shell,
            &mut Args::command(),
            core::app::NAME,
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    // Print user-friendly message; exit uses Display not Debug
    let config = run::load_config(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if let Some(Commands::Config) = &args.command {
        run::print_config(&config);
        return Ok(());
    }

    match args.prompt.as_deref() {
        Some(prompt) => run::run_single_prompt(prompt, args.json, &config).await,
        None => run::launch_tui(config).await,
    }
}
