// src/backend/mock.rs

use std::sync::{Arc, Mutex};

use regex::Regex;

use super::{CommandOutput, ConfigBackend};
use crate::config::loader::value_to_bool;
use crate::errors::{PileConfigError, Result};
use crate::types::WriteScope;

/// A single recorded backend invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    QueryBool(Vec<String>),
    QueryText(Vec<String>),
    Write { scope: WriteScope, args: Vec<String> },
}

impl BackendCall {
    pub fn is_write(&self) -> bool {
        matches!(self, BackendCall::Write { .. })
    }

    pub fn args(&self) -> &[String] {
        match self {
            BackendCall::QueryBool(args) | BackendCall::QueryText(args) => args,
            BackendCall::Write { args, .. } => args,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    // Insertion order mirrors the order `git config --get-regexp` lists keys in.
    entries: Vec<(String, Option<String>)>,
    raw_listing: Option<String>,
    fail_queries: bool,
    fail_writes: bool,
    calls: Vec<BackendCall>,
}

/// In-memory stand-in for `git config`.
///
/// Clones share state, so one handle can be given to a store while the test
/// keeps another to inspect entries and recorded calls.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

fn in_top_level_section(key: &str, section: &str) -> bool {
    key.strip_prefix(section)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|var| !var.contains('.'))
}

fn owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry. `None` models a bare boolean key.
    pub fn set_entry(&self, key: &str, value: Option<&str>) {
        let mut state = self.state.lock().unwrap();
        let value = value.map(str::to_string);
        match state.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => state.entries.push((key.to_string(), value)),
        }
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.set_entry(key, Some(value));
        self
    }

    pub fn with_bare_entry(self, key: &str) -> Self {
        self.set_entry(key, None);
        self
    }

    /// Enable `extensions.worktreeConfig`, making stores write per worktree.
    pub fn with_worktree_config(self) -> Self {
        self.with_entry("extensions.worktreeconfig", "true")
    }

    /// Serve `text` verbatim for `--get-regexp` queries instead of the
    /// entries. Lets tests feed lines `git` itself would never print.
    pub fn with_raw_listing(self, text: &str) -> Self {
        self.state.lock().unwrap().raw_listing = Some(text.to_string());
        self
    }

    pub fn fail_queries(&self, fail: bool) {
        self.state.lock().unwrap().fail_queries = fail;
    }

    /// Make every write exit with status 255, like a locked config file.
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_writes = fail;
    }

    pub fn entries(&self) -> Vec<(String, Option<String>)> {
        self.state.lock().unwrap().entries.clone()
    }

    pub fn value_of(&self, key: &str) -> Option<Option<String>> {
        let state = self.state.lock().unwrap();
        state
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn writes(&self) -> Vec<BackendCall> {
        self.calls().into_iter().filter(BackendCall::is_write).collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    fn listing(state: &MockState, pattern: &str) -> CommandOutput {
        if let Some(raw) = &state.raw_listing {
            let status = if raw.trim().is_empty() { 1 } else { 0 };
            return CommandOutput::new(raw.clone(), status);
        }

        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(_) => return CommandOutput::new("", 6),
        };

        let mut out = String::new();
        for (key, value) in state.entries.iter().filter(|(k, _)| re.is_match(k)) {
            match value {
                Some(v) => out.push_str(&format!("{key} {v}\n")),
                None => out.push_str(&format!("{key}\n")),
            }
        }
        let status = if out.is_empty() { 1 } else { 0 };
        CommandOutput::new(out, status)
    }
}

impl ConfigBackend for MockBackend {
    fn query_bool(&self, args: &[&str]) -> bool {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BackendCall::QueryBool(owned(args)));
        if state.fail_queries {
            return false;
        }

        match args {
            ["config", "--get", "--bool", key] | ["config", "--bool", "--get", key] => state
                .entries
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .is_some_and(|(_, v)| value_to_bool(v.as_deref())),
            _ => false,
        }
    }

    fn query_text(&self, args: &[&str], fail_ok: bool) -> Result<CommandOutput> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BackendCall::QueryText(owned(args)));
        if state.fail_queries {
            return Err(PileConfigError::Backend(format!(
                "mock backend refused query: {}",
                args.join(" ")
            )));
        }

        let output = match args {
            ["config", "--get-regexp", pattern] => Self::listing(&state, pattern),
            _ => CommandOutput::new("", 129),
        };

        if !fail_ok && !output.success() {
            return Err(PileConfigError::Backend(format!(
                "git {} failed with status {}",
                args.join(" "),
                output.status
            )));
        }
        Ok(output)
    }

    fn write(&self, scope: WriteScope, args: &[&str]) -> Result<CommandOutput> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BackendCall::Write {
            scope,
            args: owned(args),
        });
        if state.fail_writes {
            return Ok(CommandOutput::new("", 255));
        }

        let status = match args {
            // Only `[section]` itself goes; `[section "sub"]` keys stay.
            ["--remove-section", section] => {
                let before = state.entries.len();
                state
                    .entries
                    .retain(|(k, _)| !in_top_level_section(k, section));
                if state.entries.len() == before { 128 } else { 0 }
            }
            [key, value] if !key.starts_with('-') => {
                let value = Some(value.to_string());
                match state.entries.iter_mut().find(|(k, _)| k == key) {
                    Some(entry) => entry.1 = value,
                    None => state.entries.push((key.to_string(), value)),
                }
                0
            }
            _ => 129,
        };

        Ok(CommandOutput::new("", status))
    }
}
