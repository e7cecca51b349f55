// src/config/store.rs

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::backend::ConfigBackend;
use crate::config::loader::{apply_listing, detect_scope, read_listing, LoadWarning, NAMESPACE};
use crate::config::model::PileConfig;
use crate::config::schema;
use crate::errors::{PileConfigError, Result};
use crate::types::WriteScope;

/// git-pile configuration bound to the git config it was loaded from.
///
/// The write scope is picked once at load time. Only [`revert`] and
/// [`destroy`] change anything, and both go straight to the backend.
///
/// [`revert`]: ConfigStore::revert
/// [`destroy`]: ConfigStore::destroy
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config: PileConfig,
    scope: WriteScope,
    backend: Arc<dyn ConfigBackend>,
    warnings: Vec<LoadWarning>,
}

impl ConfigStore {
    /// Load `pile.*` from the backend on top of the defaults.
    ///
    /// A failed or empty query leaves the defaults in place. Lines that
    /// cannot be applied are skipped and reported through [`warnings`].
    ///
    /// [`warnings`]: ConfigStore::warnings
    pub fn load(backend: Arc<dyn ConfigBackend>) -> Self {
        let scope = detect_scope(backend.as_ref());
        let mut config = PileConfig::default();

        let warnings = match read_listing(backend.as_ref()) {
            Some(text) => apply_listing(&mut config, &text),
            None => Vec::new(),
        };

        debug!(?scope, valid = config.is_valid(), "loaded git-pile config");

        Self {
            config,
            scope,
            backend,
            warnings,
        }
    }

    pub fn open(backend: impl ConfigBackend + 'static) -> Self {
        Self::load(Arc::new(backend))
    }

    pub fn config(&self) -> &PileConfig {
        &self.config
    }

    pub fn scope(&self) -> WriteScope {
        self.scope
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn is_valid(&self) -> bool {
        self.config.is_valid()
    }

    /// Like [`is_valid`](ConfigStore::is_valid), but tells the user how to
    /// fix an invalid config.
    pub fn check_is_valid(&self) -> bool {
        if !self.is_valid() {
            error!(
                "git-pile configuration is not valid. Configure it first with 'git pile init' or 'git pile setup'"
            );
            return false;
        }
        true
    }

    /// Make the canonical fields match `other`, writing each non-empty value.
    ///
    /// When `other` is not valid the whole `pile` section is removed first.
    /// Fields other than the canonical three are left alone.
    pub fn revert(&mut self, other: &PileConfig) -> Result<()> {
        if !other.is_valid() && !self.destroy() {
            debug!("nothing removed while reverting to an invalid config");
        }

        self.config.dir = other.dir.clone();
        self.persist("dir", &other.dir)?;

        self.config.result_branch = other.result_branch.clone();
        self.persist("result_branch", &other.result_branch)?;

        self.config.pile_branch = other.pile_branch.clone();
        self.persist("pile_branch", &other.pile_branch)?;

        info!(scope = ?self.scope, "reverted git-pile config");
        Ok(())
    }

    fn persist(&self, name: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Ok(());
        }

        let key = schema::config_key(name);
        let out = self.backend.write(self.scope, &[key.as_str(), value])?;
        if !out.success() {
            return Err(PileConfigError::Backend(format!(
                "could not write {key} (git exited with {})",
                out.status
            )));
        }
        Ok(())
    }

    /// Remove the whole `pile` section. In-memory values are kept.
    pub fn destroy(&self) -> bool {
        match self
            .backend
            .write(self.scope, &["--remove-section", NAMESPACE])
        {
            Ok(out) => out.success(),
            Err(err) => {
                debug!(error = %err, "removing {NAMESPACE} section failed");
                false
            }
        }
    }

    /// See [`schema::help`].
    pub fn help(prefix: &str) -> String {
        schema::help(prefix)
    }
}
