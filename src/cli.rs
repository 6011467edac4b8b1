//! CLI definitions: argument parsing, subcommands, and help text.

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use crate::core::conversation::ReplyOrder;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  sprout                                 Launch interactive TUI
  sprout -p \"how often to water?\"        Single prompt, print the reply
  echo \"repotting tips\" | sprout -p -    Read prompt from stdin
  sprout -p hi --json                    Print the exchange as JSON
  sprout --base-url http://host:8000/api Talk to another backend
  sprout config                          Show effective configuration
  sprout completions bash                Generate bash completions

ENVIRONMENT:
  SPROUT_API_BASE       Backend base path (requests go to <base>/chat)
  SPROUT_TIMEOUT_SECS   Per-request timeout, 0 disables it
  SPROUT_REPLY_ORDER    arrival | submission
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Terminal chat client for a simple /chat backend",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Send a single prompt then exit (without opening the TUI)
    #[arg(
        short = 'p',
        long,
        help = "Send one message and print the reply (use '-' to read from stdin)"
    )]
    pub prompt: Option<String>,

    /// With --prompt, print the conversation as JSON instead of plain text
    #[arg(long, requires = "prompt")]
    pub json: bool,

    /// Override SPROUT_API_BASE
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Override SPROUT_TIMEOUT_SECS (0 disables the timeout)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Override SPROUT_REPLY_ORDER (arrival or submission)
    #[arg(long, global = true, value_name = "ORDER")]
    pub reply_order: Option<ReplyOrder>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the effective configuration and log file path
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// True when the interactive TUI will take over the terminal.
    pub fn is_tui(&self) -> bool {
        self.command.is_none() && self.prompt.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_from_flags() {
        let args = Args::parse_from(["sprout"]);
        assert_eq!(args.log_level(), "warn");
        let args = Args::parse_from(["sprout", "-vv"]);
        assert_eq!(args.log_level(), "debug");
        let args = Args::parse_from(["sprout", "-v", "-q"]);
        assert_eq!(args.log_level(), "error");
    }

    #[test]
    fn prompt_mode_is_not_tui() {
        let args = Args::parse_from(["sprout", "-p", "hi"]);
        assert!(!args.is_tui());
        assert!(Args::parse_from(["sprout"]).is_tui());
    }

    #[test]
    fn overrides_parse() {
        let args = Args::parse_from([
            "sprout",
            "--base-url",
            "http://localhost:9/api",
            "--timeout",
            "0",
            "--reply-order",
            "submission",
        ]);
        assert_eq!(args.base_url.as_deref(), Some("http://localhost:9/api"));
        assert_eq!(args.timeout, Some(0));
        assert_eq!(args.reply_order, Some(ReplyOrder::Submission));
    }

    #[test]
    fn json_requires_prompt() {
        assert!(Args::try_parse_from(["sprout", "--json"]).is_err());
        assert!(Args::try_parse_from(["sprout", "-p", "hi", "--json"]).is_ok());
    }

    #[test]
    fn bad_reply_order_is_rejected() {
        assert!(Args::try_parse_from(["sprout", "--reply-order", "random"]).is_err());
    }
}
