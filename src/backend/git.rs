// src/backend/git.rs

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::debug;

use super::{CommandOutput, ConfigBackend};
use crate::errors::{PileConfigError, Result};
use crate::types::WriteScope;

/// Backend that runs the `git` binary.
#[derive(Debug, Clone, Default)]
pub struct GitBackend {
    dir: Option<PathBuf>,
}

impl GitBackend {
    /// Backend operating on the repository of the current directory.
    pub fn new() -> Self {
        Self { dir: None }
    }

    /// Backend operating on the repository at `dir` (`git -C <dir>`).
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: Some(dir.as_ref().to_path_buf()),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.dir {
            cmd.arg("-C").arg(dir);
        }
        cmd.stdin(Stdio::null());
        cmd
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        debug!(?args, dir = ?self.dir, "running git");
        let output = self
            .command()
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;
        Ok(output)
    }
}

fn to_command_output(output: &Output) -> CommandOutput {
    CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        status: output.status.code().unwrap_or(-1),
    }
}

impl ConfigBackend for GitBackend {
    fn query_bool(&self, args: &[&str]) -> bool {
        match self.run(args) {
            Ok(output) => {
                output.status.success() && String::from_utf8_lossy(&output.stdout).trim() == "true"
            }
            Err(err) => {
                debug!(?args, error = %err, "boolean git query failed");
                false
            }
        }
    }

    fn query_text(&self, args: &[&str], fail_ok: bool) -> Result<CommandOutput> {
        let output = self.run(args)?;
        if !fail_ok && !output.status.success() {
            return Err(PileConfigError::Backend(format!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(to_command_output(&output))
    }

    fn write(&self, scope: WriteScope, args: &[&str]) -> Result<CommandOutput> {
        let mut full = vec!["config"];
        full.extend_from_slice(scope.git_flags());
        full.extend_from_slice(args);

        let output = self.run(&full)?;
        if !output.status.success() {
            debug!(
                args = ?full,
                status = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git config write returned non-zero"
            );
        }
        Ok(to_command_output(&output))
    }
}
