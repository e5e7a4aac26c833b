//! Tracing setup
//!
//! CLI mode logs to stderr. The interactive UI owns the terminal, so there
//! logs go to a daily-rolling file instead.

use anyhow::Result;
use std::io;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter directive for the given flags and `RUST_LOG` value
///
/// `--quiet` always wins, then `RUST_LOG`, then the `-v` count.
pub fn filter_directive(verbose: u8, quiet: bool, rust_log: Option<&str>) -> String {
    if quiet {
        return "error".to_string();
    }
    if let Some(directive) = rust_log.filter(|d| !d.trim().is_empty()) {
        return directive.to_string();
    }
    match verbose {
        0 => "info",
        // hyper's connection chatter drowns out our own debug lines
        1 => "debug,hyper_util=warn,hyper::proto=warn",
        _ => "trace",
    }
    .to_string()
}

fn env_filter(verbose: u8, quiet: bool) -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(verbose, quiet, rust_log.as_deref());
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to stderr (CLI mode)
pub fn init_stderr(verbose: u8, quiet: bool) -> Result<()> {
    let layer = fmt::layer()
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(io::stderr);

    Registry::default()
        .with(env_filter(verbose, quiet))
        .with(layer)
        .try_init()?;
    Ok(())
}

/// Log to a daily-rolling file next to `log_path` (TUI mode)
///
/// Files are named after the file stem, e.g. `reviewtui.2026-10-19`.
pub fn init_file(verbose: u8, quiet: bool, log_path: &Path) -> Result<()> {
    let dir = log_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
    std::fs::create_dir_all(dir)?;

    let prefix = log_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

    let appender = RollingFileAppender::new(Rotation::DAILY, dir, prefix);
    let layer = fmt::layer()
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(false)
        .with_writer(appender);

    Registry::default()
        .with(env_filter(verbose, quiet))
        .with(layer)
        .try_init()?;
    Ok(())
}
