use crate::loader::error::ConfigLoadError;
use crate::util::{non_blank, parse_enum_var, parse_var};
use dynorder_core::{FieldMatching, OrderingConfig, SortOrder, TextCollation};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_CONFIG_PATH: &str = "DYNORDER_CONFIG";
pub const ENV_FIELD_MATCHING: &str = "DYNORDER_FIELD_MATCHING";
pub const ENV_TEXT_COLLATION: &str = "DYNORDER_TEXT_COLLATION";
pub const ENV_DEFAULT_ORDER: &str = "DYNORDER_DEFAULT_ORDER";
pub const ENV_MAX_CLAUSES: &str = "DYNORDER_MAX_CLAUSES";

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub ordering: FileOrderingConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileOrderingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_matching: Option<FieldMatching>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_collation: Option<TextCollation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_clauses: Option<usize>,
}

impl FileConfig {
    /// A file config spelling out every setting of `config`
    pub fn from_config(config: &OrderingConfig) -> Self {
        Self {
            ordering: FileOrderingConfig {
                field_matching: Some(config.field_matching),
                text_collation: Some(config.text_collation),
                default_order: Some(config.default_order),
                max_clauses: Some(config.max_clauses),
            },
        }
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Settings read from `DYNORDER_*` environment variables
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub field_matching: Option<FieldMatching>,
    pub text_collation: Option<TextCollation>,
    pub default_order: Option<SortOrder>,
    pub max_clauses: Option<usize>,
}

impl EnvConfig {
    /// Read the process environment
    pub fn gather() -> Result<Self, ConfigLoadError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read variables through `lookup`, e.g. a map in tests
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            config_path: non_blank(ENV_CONFIG_PATH, lookup(ENV_CONFIG_PATH))
                .map(PathBuf::from),
            field_matching: parse_enum_var(
                ENV_FIELD_MATCHING,
                lookup(ENV_FIELD_MATCHING),
            )?,
            text_collation: parse_enum_var(
                ENV_TEXT_COLLATION,
                lookup(ENV_TEXT_COLLATION),
            )?,
            default_order: parse_var(ENV_DEFAULT_ORDER, lookup(ENV_DEFAULT_ORDER))?,
            max_clauses: parse_var(ENV_MAX_CLAUSES, lookup(ENV_MAX_CLAUSES))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn gathers_every_variable() {
        let env = EnvConfig::from_lookup(lookup(&[
            (ENV_CONFIG_PATH, "/etc/dynorder.toml"),
            (ENV_FIELD_MATCHING, "exact"),
            (ENV_TEXT_COLLATION, "case-insensitive"),
            (ENV_DEFAULT_ORDER, "DESC"),
            (ENV_MAX_CLAUSES, "3"),
        ]))
        .unwrap();

        assert_eq!(
            env,
            EnvConfig {
                config_path: Some(PathBuf::from("/etc/dynorder.toml")),
                field_matching: Some(FieldMatching::Exact),
                text_collation: Some(TextCollation::CaseInsensitive),
                default_order: Some(SortOrder::Descending),
                max_clauses: Some(3),
            }
        );
    }

    #[test]
    fn unparsable_values_are_errors() {
        let err = EnvConfig::from_lookup(lookup(&[(ENV_MAX_CLAUSES, "lots")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::InvalidEnv { name: ENV_MAX_CLAUSES, .. }
        ));
    }

    #[test]
    fn file_config_renders_as_toml() {
        let rendered = FileConfig::from_config(&OrderingConfig::default())
            .to_toml_string()
            .unwrap();
        assert!(rendered.contains("[ordering]"));
        assert!(rendered.contains("field_matching = \"ignore_case\""));
        assert!(rendered.contains("max_clauses = 8"));

        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.ordering.default_order, Some(SortOrder::Ascending));
    }
}
