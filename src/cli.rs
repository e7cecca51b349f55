// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `pile-config`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pile-config",
    version,
    about = "Inspect and maintain the git-pile settings stored in git config.",
    long_about = None
)]
pub struct CliArgs {
    /// Run as if started in this directory (like `git -C`).
    #[arg(short = 'C', value_name = "PATH", global = true)]
    pub repo: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PILE_CONFIG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print every setting with its effective value.
    Show {
        /// Print as TOML instead of `name = value` lines.
        #[arg(long)]
        toml: bool,
    },

    /// Print the value of a single setting (e.g. `result-branch`).
    Get { name: String },

    /// Exit non-zero unless dir, result-branch and pile-branch are set.
    Check,

    /// List documented settings, optionally only those starting with PREFIX.
    Fields { prefix: Option<String> },

    /// Remove the whole `pile` section from git config.
    Destroy,

    /// Copy dir, result-branch and pile-branch from the checkout at PATH.
    Adopt { path: PathBuf },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let args =
            CliArgs::try_parse_from(["pile-config", "show", "--toml", "-C", "/tmp/repo"]).unwrap();
        assert_eq!(args.repo, Some(PathBuf::from("/tmp/repo")));
        assert!(matches!(args.command, Command::Show { toml: true }));
    }

    #[test]
    fn fields_prefix_is_optional() {
        let args = CliArgs::try_parse_from(["pile-config", "fields"]).unwrap();
        assert!(matches!(args.command, Command::Fields { prefix: None }));

        let args = CliArgs::try_parse_from(["pile-config", "fields", "genbranch"]).unwrap();
        assert!(matches!(args.command, Command::Fields { prefix: Some(ref p) } if p == "genbranch"));
    }
}
