// src/lib.rs

pub mod backend;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod types;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::backend::{ConfigBackend, GitBackend};
use crate::cli::{CliArgs, Command};
use crate::config::loader::field_name;
use crate::config::{ConfigStore, NAMESPACE, FIELDS};
use crate::errors::PileConfigError;

/// High-level entry point used by `main.rs`.
///
/// Loads the config of the selected repository through [`GitBackend`] and
/// runs the requested subcommand against it.
pub fn run(args: CliArgs) -> Result<()> {
    let backend: Arc<dyn ConfigBackend> = match &args.repo {
        Some(dir) => Arc::new(GitBackend::in_dir(dir)),
        None => Arc::new(GitBackend::new()),
    };
    let mut store = ConfigStore::load(backend);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&args.command, &mut store, &mut out, |path| {
        Arc::new(GitBackend::in_dir(path)) as Arc<dyn ConfigBackend>
    })
}

/// Run one subcommand against an already loaded store.
///
/// `open_other` builds the backend for `adopt <path>`.
pub fn execute<W, F>(
    command: &Command,
    store: &mut ConfigStore,
    out: &mut W,
    open_other: F,
) -> Result<()>
where
    W: Write,
    F: FnOnce(&Path) -> Arc<dyn ConfigBackend>,
{
    debug!(?command, scope = ?store.scope(), "executing");

    match command {
        Command::Show { toml } => {
            if *toml {
                let text = toml::to_string(store.config()).map_err(PileConfigError::from)?;
                write!(out, "{text}")?;
            } else {
                print_settings(store, out)?;
            }
        }
        Command::Get { name } => {
            let name = normalize_name(name)?;
            match store.config().get(&name) {
                Some(value) => writeln!(out, "{value}")?,
                None => bail!("unknown setting: {name}"),
            }
        }
        Command::Check => {
            if !store.check_is_valid() {
                bail!("{NAMESPACE} configuration is incomplete");
            }
            writeln!(out, "ok")?;
        }
        Command::Fields { prefix } => {
            let prefix = prefix.as_deref().map(|p| p.replace('-', "_")).unwrap_or_default();
            let text = ConfigStore::help(&prefix);
            if !text.is_empty() {
                writeln!(out, "{text}")?;
            }
        }
        Command::Destroy => {
            if !store.destroy() {
                bail!("could not remove the [{NAMESPACE}] section (is it present?)");
            }
            info!("removed [{NAMESPACE}] section");
        }
        Command::Adopt { path } => {
            let other = ConfigStore::load(open_other(path));
            if !other.is_valid() {
                info!(path = %path.display(), "source config is incomplete, clearing ours first");
            }
            store.revert(other.config())?;
        }
    }

    Ok(())
}

/// Accept `result-branch`, `result_branch` or `pile.result-branch`.
fn normalize_name(name: &str) -> Result<String> {
    if name.starts_with(&format!("{NAMESPACE}.")) {
        return field_name(name).map_err(|e| anyhow::anyhow!("{name}: {e}"));
    }
    Ok(name.replace(['-', '.'], "_"))
}

fn print_settings<W: Write>(store: &ConfigStore, out: &mut W) -> Result<()> {
    let cfg = store.config();
    for field in FIELDS {
        if let Some(value) = cfg.get(field.name) {
            writeln!(out, "{} = {}", field.config_name(), value)?;
        }
    }
    for (name, value) in &cfg.extras {
        writeln!(out, "{} = {}", name, value.as_deref().unwrap_or(""))?;
    }
    Ok(())
}
