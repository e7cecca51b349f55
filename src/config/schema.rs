// src/config/schema.rs

//! Documented `pile.*` settings.
//!
//! The table drives the `fields` listing and the help text appended to
//! commands. Field names use underscores; the git keys use hyphens
//! (`result_branch` is stored as `pile.result-branch`).

use crate::config::loader::NAMESPACE;
use crate::types::FieldKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDoc {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

impl FieldDoc {
    const fn new(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
        }
    }

    /// Name as written in git config, without the namespace.
    pub fn config_name(&self) -> String {
        self.name.replace('_', "-")
    }
}

pub const FIELDS: &[FieldDoc] = &[
    FieldDoc::new(
        "dir",
        FieldKind::Path,
        "Directory holding the checkout of the pile branch",
    ),
    FieldDoc::new(
        "linear_branch",
        FieldKind::String,
        "Branch produced by genlinear-branch. See `genlinear-branch --branch`",
    ),
    FieldDoc::new(
        "result_branch",
        FieldKind::String,
        "Branch produced by genbranch. See `genbranch --branch`",
    ),
    FieldDoc::new(
        "pile_branch",
        FieldKind::String,
        "Local name of the pile branch, usually \"pile\"",
    ),
    FieldDoc::new(
        "format_add_header",
        FieldKind::String,
        "Extra email header added to every patch. See `--add-header`",
    ),
    FieldDoc::new(
        "format_output_directory",
        FieldKind::Path,
        "Default output directory for format-patch. See `--output`",
    ),
    FieldDoc::new(
        "format_compose",
        FieldKind::Bool,
        "Open an editor for the cover letter. See `--compose`",
    ),
    FieldDoc::new(
        "format_signoff",
        FieldKind::Bool,
        "Add a Signed-off-by trailer. See `--signoff`",
    ),
    FieldDoc::new(
        "genbranch_committer_date_is_author_date",
        FieldKind::Bool,
        "Use the author date as committer date for generated commits",
    ),
    FieldDoc::new(
        "genbranch_user_name",
        FieldKind::String,
        "Committer name used when generating commits",
    ),
    FieldDoc::new(
        "genbranch_user_email",
        FieldKind::String,
        "Committer e-mail used when generating commits",
    ),
    FieldDoc::new(
        "genbranch_use_cache",
        FieldKind::Bool,
        "Reuse cached results instead of recreating commits",
    ),
    FieldDoc::new(
        "genbranch_cache_path",
        FieldKind::Path,
        "Cache file for genbranch, relative to the .git directory",
    ),
];

pub fn fields_with_prefix(prefix: &str) -> impl Iterator<Item = &'static FieldDoc> + '_ {
    FIELDS.iter().filter(move |f| f.name.starts_with(prefix))
}

/// Full git key for a field, e.g. `pile.result-branch`.
pub fn config_key(name: &str) -> String {
    format!("{NAMESPACE}.{}", name.replace('_', "-"))
}

/// Help listing for fields whose name starts with `prefix`.
///
/// Empty string when nothing matches; otherwise a `configuration:` heading
/// followed by one line per field.
pub fn help(prefix: &str) -> String {
    let lines: Vec<String> = fields_with_prefix(prefix)
        .map(|f| format!("  {} ({}): {}", f.config_name(), f.kind, f.description))
        .collect();

    if lines.is_empty() {
        return String::new();
    }

    let mut out = String::from("configuration:\n");
    out.push_str(&lines.join("\n"));
    out
}
