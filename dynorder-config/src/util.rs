use crate::loader::error::ConfigLoadError;
use serde::de::{DeserializeOwned, IntoDeserializer, value::Error as ValueError};
use std::str::FromStr;
use tracing::warn;

/// Trim a raw env value, treating blank values as unset
pub fn non_blank(name: &str, raw: Option<String>) -> Option<String> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        warn!(variable = name, "ignoring blank environment variable");
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a value through its `FromStr` impl
pub fn parse_var<T>(
    name: &'static str,
    raw: Option<String>,
) -> Result<Option<T>, ConfigLoadError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    non_blank(name, raw)
        .map(|value| {
            value.parse().map_err(|err: T::Err| ConfigLoadError::InvalidEnv {
                name,
                reason: err.to_string(),
                value,
            })
        })
        .transpose()
}

/// Parse a unit enum by its serde name, accepting `-` for `_`
///
/// `IGNORE-CASE`, `ignore_case` and `Ignore_Case` all name the same variant.
pub fn parse_enum_var<T: DeserializeOwned>(
    name: &'static str,
    raw: Option<String>,
) -> Result<Option<T>, ConfigLoadError> {
    non_blank(name, raw)
        .map(|value| {
            let normalized = value.to_ascii_lowercase().replace('-', "_");
            T::deserialize(normalized.as_str().into_deserializer()).map_err(
                |err: ValueError| ConfigLoadError::InvalidEnv {
                    name,
                    reason: err.to_string(),
                    value,
                },
            )
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynorder_core::{FieldMatching, SortOrder, TextCollation};

    #[test]
    fn blank_values_are_unset() {
        assert_eq!(non_blank("X", Some("   ".into())), None);
        assert_eq!(non_blank("X", None), None);
        assert_eq!(non_blank("X", Some(" 4 ".into())), Some("4".into()));
    }

    #[test]
    fn enums_parse_by_serde_name() {
        let matching: Option<FieldMatching> =
            parse_enum_var("M", Some("Ignore-Case".into())).unwrap();
        assert_eq!(matching, Some(FieldMatching::IgnoreCase));

        let collation: Option<TextCollation> =
            parse_enum_var("C", Some("case_insensitive".into())).unwrap();
        assert_eq!(collation, Some(TextCollation::CaseInsensitive));

        let err = parse_enum_var::<FieldMatching>("M", Some("fuzzy".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::InvalidEnv { name: "M", ref value, .. } if value == "fuzzy"
        ));
    }

    #[test]
    fn from_str_values_report_their_variable() {
        let order: Option<SortOrder> = parse_var("O", Some("desc".into())).unwrap();
        assert_eq!(order, Some(SortOrder::Descending));

        let err = parse_var::<usize>("N", Some("many".into())).unwrap_err();
        assert!(matches!(err, ConfigLoadError::InvalidEnv { name: "N", .. }));
    }
}
