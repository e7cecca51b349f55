use std::fmt;

/// Where writes to the git config land.
///
/// - `Repository`: the shared `.git/config` of the repository.
/// - `Worktree`: the per-worktree config file. Only used when the
///   repository has `extensions.worktreeConfig` enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteScope {
    Repository,
    Worktree,
}

impl WriteScope {
    /// Extra `git config` flags needed to target this scope.
    pub fn git_flags(self) -> &'static [&'static str] {
        match self {
            WriteScope::Repository => &[],
            WriteScope::Worktree => &["--worktree"],
        }
    }
}

/// Type tag shown next to a field in the help listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Path,
    Bool,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldKind::String => "string",
            FieldKind::Path => "path",
            FieldKind::Bool => "bool",
        })
    }
}
