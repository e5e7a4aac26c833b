//! CLI - Command Line Interface for ReviewTUI
//!
//! Every list the TUI shows is also printable from the shell.
//! All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Browse the catalog
//! reviewtui list --sort highest
//! reviewtui list -s dune --json
//!
//! # Reviews across every movie
//! reviewtui reviews --query "loved it" --limit 5
//!
//! # One movie with its reviews
//! reviewtui show 3
//! reviewtui show 3 --direct
//! ```

use clap::{ArgAction, Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;

use crate::models::SortOrder;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error or unexpected server response
    NetworkError = 3,
    /// Movie not found
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// ReviewTUI - terminal client for a movie-review catalog
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "reviewtui",
    version,
    about = "Terminal client for a movie-review catalog",
    long_about = "Browse movies and their reviews from a headless CMS, \
                  search and sort them, and read each movie's reviews.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  reviewtui                           Launch interactive TUI\n\
                  reviewtui list --sort highest       Best rated movies first\n\
                  reviewtui reviews -s \"loved it\"     Search every review\n\
                  reviewtui show 3 --json             One movie as JSON"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Content API base URL (overrides REVIEWTUI_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log file for the interactive UI
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List movies in the catalog
    #[command(visible_alias = "ls")]
    List(ListCmd),

    /// List reviews across every movie
    #[command(visible_alias = "r")]
    Reviews(ReviewsCmd),

    /// Show one movie and its reviews
    #[command(visible_alias = "s")]
    Show(ShowCmd),
}

/// Search text and rating order shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive search text
    #[arg(long, short = 's')]
    pub query: Option<String>,

    /// Rating order: default, highest or lowest
    #[arg(long, value_parser = SortOrder::from_str)]
    pub sort: Option<SortOrder>,
}

impl FilterArgs {
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }

    /// Requested order, or the configured default
    pub fn sort_or(&self, fallback: SortOrder) -> SortOrder {
        self.sort.unwrap_or(fallback)
    }
}

// =============================================================================
// List Command
// =============================================================================

/// Print the movie catalog
#[derive(Args, Debug)]
pub struct ListCmd {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Maximum number of results
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

// =============================================================================
// Reviews Command
// =============================================================================

/// Print reviews flattened across the catalog
#[derive(Args, Debug)]
pub struct ReviewsCmd {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Maximum number of results
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

// =============================================================================
// Show Command
// =============================================================================

/// Print one movie with its reviews
#[derive(Args, Debug)]
pub struct ShowCmd {
    /// Movie id
    #[arg(required = true)]
    pub id: u64,

    /// Use the single-record endpoint instead of the filtered list query
    #[arg(long)]
    pub direct: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data; `human` renders it when JSON is off
    pub fn print<T: Serialize>(&self, data: T, human: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", human(&data));
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
