// src/backend/mod.rs

//! Pluggable git-config backend abstraction.
//!
//! The config store never spawns `git` itself; it talks to a
//! [`ConfigBackend`]. This makes it easy to swap in an in-memory backend in
//! tests while keeping the production implementation in [`git`].
//!
//! - [`GitBackend`] shells out to the `git` binary.
//! - [`MockBackend`] emulates the handful of `git config` invocations the
//!   store issues and records every call.

use std::fmt::Debug;

use crate::errors::Result;
use crate::types::WriteScope;

pub mod git;
pub mod mock;

pub use git::GitBackend;
pub use mock::{BackendCall, MockBackend};

/// Captured result of a single backend command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub stdout: String,
    /// Process exit code; `-1` when the process was killed by a signal.
    pub status: i32,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, status: i32) -> Self {
        Self {
            stdout: stdout.into(),
            status,
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Trait abstracting access to the git config store.
///
/// `args` are git arguments, e.g. `["config", "--get-regexp", "^pile\\."]`
/// for queries. Writes receive only the arguments that follow
/// `git config [--worktree]`.
pub trait ConfigBackend: Send + Sync + Debug {
    /// Run a boolean query. Any failure reads as `false`.
    fn query_bool(&self, args: &[&str]) -> bool;

    /// Run a read query.
    ///
    /// With `fail_ok = false` a non-zero exit status is an error; with
    /// `fail_ok = true` it is handed back in [`CommandOutput::status`].
    fn query_text(&self, args: &[&str], fail_ok: bool) -> Result<CommandOutput>;

    /// Run a write or remove command at the given scope.
    ///
    /// A non-zero exit is not an error here; callers inspect the status.
    fn write(&self, scope: WriteScope, args: &[&str]) -> Result<CommandOutput>;
}
