// src/config/loader.rs

//! Parsing of `git config --get-regexp '^pile\.'` output.
//!
//! Each line is `<key>[ <value>]`. The key loses its `pile.` prefix and has
//! `-` and `.` turned into `_` to give a field name; a line without a value
//! is a bare boolean key.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::backend::ConfigBackend;
use crate::config::model::PileConfig;
use crate::types::WriteScope;

/// Git config section owned by git-pile.
pub const NAMESPACE: &str = "pile";

/// Values read as `true` (compared case-insensitively).
pub const TRUTHY: [&str; 4] = ["yes", "on", "true", "1"];

static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("field name regex is valid"));

/// Why a single config line could not be applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    #[error("key is outside the `pile` section")]
    OutsideNamespace,

    #[error("`{0}` is not a valid setting name")]
    InvalidName(String),

    #[error("`{0}` needs a value")]
    MissingValue(String),
}

/// A line that was skipped while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub key: String,
    pub value: Option<String>,
    pub reason: AssignError,
}

/// Git boolean coercion: a bare key is true, otherwise one of [`TRUTHY`].
pub fn value_to_bool(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => TRUTHY.iter().any(|t| v.eq_ignore_ascii_case(t)),
    }
}

/// Split a line on its first whitespace into key and optional value.
pub fn split_line(line: &str) -> (&str, Option<&str>) {
    match line.split_once(char::is_whitespace) {
        Some((key, value)) => (key, Some(value)),
        None => (line, None),
    }
}

/// `pile.format.add-header` -> `format_add_header`.
pub fn field_name(key: &str) -> Result<String, AssignError> {
    let rest = key
        .strip_prefix(NAMESPACE)
        .and_then(|r| r.strip_prefix('.'))
        .ok_or(AssignError::OutsideNamespace)?;

    let name: String = rest
        .chars()
        .map(|c| if c == '-' || c == '.' { '_' } else { c })
        .collect();

    if !FIELD_NAME.is_match(&name) {
        return Err(AssignError::InvalidName(name));
    }
    Ok(name)
}

fn apply_line(config: &mut PileConfig, key: &str, value: Option<&str>) -> Result<(), AssignError> {
    let name = field_name(key)?;
    config.assign(&name, value)
}

/// Apply every line of a `--get-regexp` listing to `config`.
///
/// Lines are trimmed first, so `key ` with an empty value is a bare key.
///
/// Lines that cannot be applied are logged and returned; they never stop
/// the remaining lines from being processed.
pub fn apply_listing(config: &mut PileConfig, text: &str) -> Vec<LoadWarning> {
    let mut warnings = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let (key, value) = split_line(line);
        if let Err(reason) = apply_line(config, key, value) {
            warn!(
                key,
                value = value.unwrap_or(""),
                %reason,
                "could not set value from git config"
            );
            warnings.push(LoadWarning {
                key: key.to_string(),
                value: value.map(str::to_string),
                reason,
            });
        }
    }

    warnings
}

/// Pick the write scope: per-worktree when `extensions.worktreeConfig` is on.
pub fn detect_scope(backend: &dyn ConfigBackend) -> WriteScope {
    if backend.query_bool(&["config", "--get", "--bool", "extensions.worktreeConfig"]) {
        WriteScope::Worktree
    } else {
        WriteScope::Repository
    }
}

/// Read the `pile.*` listing. `None` when the query failed or matched nothing.
pub fn read_listing(backend: &dyn ConfigBackend) -> Option<String> {
    let pattern = format!(r"^{NAMESPACE}\.");
    match backend.query_text(&["config", "--get-regexp", &pattern], true) {
        Ok(out) => {
            let text = out.stdout.trim();
            if text.is_empty() {
                debug!(status = out.status, "no {NAMESPACE}.* keys in git config");
                None
            } else {
                Some(text.to_string())
            }
        }
        Err(err) => {
            debug!(error = %err, "could not query git config, using defaults");
            None
        }
    }
}
