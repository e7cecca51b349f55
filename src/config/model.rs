// src/config/model.rs

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::config::loader::{value_to_bool, AssignError};

/// Value of a single setting, as returned by [`PileConfig::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Str(String),
    Bool(bool),
    /// Key present without a value, or an optional field that is unset.
    Absent,
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Str(s) => f.write_str(s),
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Absent => Ok(()),
        }
    }
}

/// Settings under `pile.*`.
///
/// Defaults apply to anything not present in git config. Keys that do not
/// name a known field are kept verbatim in `extras`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PileConfig {
    pub dir: String,
    pub linear_branch: String,
    pub result_branch: String,
    pub pile_branch: String,
    pub format_add_header: String,
    pub format_output_directory: String,
    pub format_compose: bool,
    pub format_signoff: bool,
    pub genbranch_committer_date_is_author_date: bool,
    pub genbranch_user_name: Option<String>,
    pub genbranch_user_email: Option<String>,
    pub genbranch_use_cache: bool,
    pub genbranch_cache_path: String,

    /// Unknown keys, by transliterated name. `None` for bare keys.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, Option<String>>,
}

impl Default for PileConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            linear_branch: String::new(),
            result_branch: String::new(),
            pile_branch: String::new(),
            format_add_header: String::new(),
            format_output_directory: String::new(),
            format_compose: false,
            format_signoff: false,
            genbranch_committer_date_is_author_date: true,
            genbranch_user_name: None,
            genbranch_user_email: None,
            genbranch_use_cache: true,
            genbranch_cache_path: "pile-genbranch-cache.pickle".to_string(),
            extras: BTreeMap::new(),
        }
    }
}

fn require(name: &str, raw: Option<&str>) -> Result<String, AssignError> {
    raw.map(str::to_string)
        .ok_or_else(|| AssignError::MissingValue(name.to_string()))
}

fn optional(value: &Option<String>) -> ConfigValue {
    match value {
        Some(s) => ConfigValue::Str(s.clone()),
        None => ConfigValue::Absent,
    }
}

impl PileConfig {
    /// True when `dir`, `result_branch` and `pile_branch` are all set.
    pub fn is_valid(&self) -> bool {
        !self.dir.is_empty() && !self.result_branch.is_empty() && !self.pile_branch.is_empty()
    }

    /// Assign a raw git value to the field `name`.
    ///
    /// Boolean fields are coerced; string fields reject bare keys; unknown
    /// names land in `extras`. On error the field keeps its previous value.
    pub fn assign(&mut self, name: &str, raw: Option<&str>) -> Result<(), AssignError> {
        match name {
            "dir" => self.dir = require(name, raw)?,
            "linear_branch" => self.linear_branch = require(name, raw)?,
            "result_branch" => self.result_branch = require(name, raw)?,
            "pile_branch" => self.pile_branch = require(name, raw)?,
            "format_add_header" => self.format_add_header = require(name, raw)?,
            "format_output_directory" => self.format_output_directory = require(name, raw)?,
            "genbranch_cache_path" => self.genbranch_cache_path = require(name, raw)?,

            "format_compose" => self.format_compose = value_to_bool(raw),
            "format_signoff" => self.format_signoff = value_to_bool(raw),
            "genbranch_committer_date_is_author_date" => {
                self.genbranch_committer_date_is_author_date = value_to_bool(raw)
            }
            "genbranch_use_cache" => self.genbranch_use_cache = value_to_bool(raw),

            "genbranch_user_name" => self.genbranch_user_name = raw.map(str::to_string),
            "genbranch_user_email" => self.genbranch_user_email = raw.map(str::to_string),

            other => {
                self.extras
                    .insert(other.to_string(), raw.map(str::to_string));
            }
        }
        Ok(())
    }

    /// Look up a field or extra by name.
    pub fn get(&self, name: &str) -> Option<ConfigValue> {
        let value = match name {
            "dir" => ConfigValue::Str(self.dir.clone()),
            "linear_branch" => ConfigValue::Str(self.linear_branch.clone()),
            "result_branch" => ConfigValue::Str(self.result_branch.clone()),
            "pile_branch" => ConfigValue::Str(self.pile_branch.clone()),
            "format_add_header" => ConfigValue::Str(self.format_add_header.clone()),
            "format_output_directory" => ConfigValue::Str(self.format_output_directory.clone()),
            "format_compose" => ConfigValue::Bool(self.format_compose),
            "format_signoff" => ConfigValue::Bool(self.format_signoff),
            "genbranch_committer_date_is_author_date" => {
                ConfigValue::Bool(self.genbranch_committer_date_is_author_date)
            }
            "genbranch_user_name" => optional(&self.genbranch_user_name),
            "genbranch_user_email" => optional(&self.genbranch_user_email),
            "genbranch_use_cache" => ConfigValue::Bool(self.genbranch_use_cache),
            "genbranch_cache_path" => ConfigValue::Str(self.genbranch_cache_path.clone()),
            other => return self.extras.get(other).map(optional),
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::FIELDS;
    use crate::types::FieldKind;

    #[test]
    fn every_documented_field_is_readable() {
        let cfg = PileConfig::default();
        for field in FIELDS {
            let value = cfg.get(field.name);
            assert!(value.is_some(), "no value for {}", field.name);
            if field.kind == FieldKind::Bool {
                assert!(matches!(value, Some(ConfigValue::Bool(_))), "{}", field.name);
            }
        }
    }

    #[test]
    fn defaults() {
        let cfg = PileConfig::default();
        assert_eq!(cfg.genbranch_cache_path, "pile-genbranch-cache.pickle");
        assert!(cfg.genbranch_use_cache);
        assert!(cfg.genbranch_committer_date_is_author_date);
        assert!(!cfg.format_compose && !cfg.format_signoff);
        assert!(!cfg.is_valid());
    }

    #[test]
    fn bare_key_on_string_field_is_rejected() {
        let mut cfg = PileConfig::default();
        cfg.assign("dir", Some("pile")).unwrap();

        let err = cfg.assign("dir", None).unwrap_err();
        assert_eq!(err, AssignError::MissingValue("dir".to_string()));
        assert_eq!(cfg.dir, "pile");
    }

    #[test]
    fn optional_fields_accept_bare_keys() {
        let mut cfg = PileConfig::default();
        cfg.assign("genbranch_user_name", Some("Pile Bot")).unwrap();
        assert_eq!(cfg.genbranch_user_name.as_deref(), Some("Pile Bot"));

        cfg.assign("genbranch_user_name", None).unwrap();
        assert_eq!(cfg.genbranch_user_name, None);
        assert_eq!(cfg.get("genbranch_user_name"), Some(ConfigValue::Absent));
    }

    #[test]
    fn unknown_names_become_extras() {
        let mut cfg = PileConfig::default();
        cfg.assign("future_knob", Some("42")).unwrap();
        cfg.assign("future_flag", None).unwrap();

        assert_eq!(cfg.get("future_knob"), Some(ConfigValue::Str("42".to_string())));
        assert_eq!(cfg.get("future_flag"), Some(ConfigValue::Absent));
        assert_eq!(cfg.get("never_set"), None);
    }

    #[test]
    fn validity_needs_all_canonical_fields() {
        for mask in 0u8..8 {
            let cfg = PileConfig {
                dir: if mask & 1 != 0 { "pile".into() } else { String::new() },
                result_branch: if mask & 2 != 0 { "internal".into() } else { String::new() },
                pile_branch: if mask & 4 != 0 { "pile".into() } else { String::new() },
                ..PileConfig::default()
            };
            assert_eq!(cfg.is_valid(), mask == 7, "mask {mask:03b}");
        }
    }
}
