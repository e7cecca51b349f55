// src/logging.rs

//! Logging for `pile-config`.
//!
//! The filter comes from, in order:
//! 1. `--log-level` (applies to this crate only; dependencies stay at `warn`)
//! 2. `PILE_CONFIG_LOG`, any `EnvFilter` directive list
//!    (e.g. `pile_config::backend=debug` to trace the git calls)
//! 3. `info` for this crate
//!
//! Output goes to stderr so `show` and `get` keep stdout clean for scripts.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "PILE_CONFIG_LOG";

const DEFAULT_DIRECTIVES: &str = "warn,pile_config=info";

/// Initialise global logging subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    Ok(())
}

/// Directive string the filter is built from.
fn directives(cli_level: Option<LogLevel>, env: Option<&str>) -> String {
    if let Some(lvl) = cli_level {
        return format!("warn,pile_config={}", level_name(lvl));
    }
    match env.map(str::trim) {
        Some(s) if !s.is_empty() && EnvFilter::try_new(s).is_ok() => s.to_string(),
        _ => DEFAULT_DIRECTIVES.to_string(),
    }
}

fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    EnvFilter::try_new(directives(cli_level, env))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

fn level_name(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
