#![allow(dead_code)]

use std::sync::Arc;

use pile_config::backend::{ConfigBackend, MockBackend};
use pile_config::config::{ConfigStore, PileConfig};

/// Builder for a `MockBackend` pre-filled with `pile.*` entries.
pub struct GitConfigBuilder {
    backend: MockBackend,
}

impl GitConfigBuilder {
    pub fn new() -> Self {
        Self {
            backend: MockBackend::new(),
        }
    }

    /// `pile.dir`, `pile.result-branch` and `pile.pile-branch`.
    pub fn canonical(self, dir: &str, result_branch: &str, pile_branch: &str) -> Self {
        self.set("pile.dir", dir)
            .set("pile.result-branch", result_branch)
            .set("pile.pile-branch", pile_branch)
    }

    pub fn set(self, key: &str, value: &str) -> Self {
        self.backend.set_entry(key, Some(value));
        self
    }

    pub fn bare(self, key: &str) -> Self {
        self.backend.set_entry(key, None);
        self
    }

    pub fn worktree_config(self) -> Self {
        Self {
            backend: self.backend.with_worktree_config(),
        }
    }

    pub fn raw_listing(self, text: &str) -> Self {
        Self {
            backend: self.backend.with_raw_listing(text),
        }
    }

    pub fn build(self) -> MockBackend {
        self.backend
    }

    /// Build the backend, load a store from it and forget the load queries.
    pub fn load(self) -> (ConfigStore, MockBackend) {
        let backend = self.backend;
        let store = ConfigStore::load(Arc::new(backend.clone()) as Arc<dyn ConfigBackend>);
        backend.clear_calls();
        (store, backend)
    }
}

impl Default for GitConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A valid config with the usual branch names.
pub fn valid_config(dir: &str) -> PileConfig {
    PileConfig {
        dir: dir.to_string(),
        result_branch: "internal".to_string(),
        pile_branch: "pile".to_string(),
        ..PileConfig::default()
    }
}
