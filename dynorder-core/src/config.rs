use crate::error::{OrderError, Result};
use crate::query::types::SortOrder;
use serde::{Deserialize, Serialize};

/// How runtime field names are matched against a record's schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMatching {
    /// Names must match byte for byte
    Exact,
    /// Fall back to an ASCII case-insensitive match when no exact match exists
    #[default]
    IgnoreCase,
}

/// Comparison used for text keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextCollation {
    /// Byte-wise comparison
    #[default]
    Ordinal,
    /// Compare lowercased text
    CaseInsensitive,
}

/// Settings for building ordered queries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    pub field_matching: FieldMatching,
    pub text_collation: TextCollation,
    /// Direction used when a caller does not state one
    pub default_order: SortOrder,
    /// Maximum number of clauses a single rule list may apply
    pub max_clauses: usize,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            field_matching: FieldMatching::IgnoreCase,
            text_collation: TextCollation::Ordinal,
            default_order: SortOrder::Ascending,
            max_clauses: 8,
        }
    }
}

impl OrderingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_clauses == 0 {
            return Err(OrderError::InvalidConfig(
                "max_clauses must allow at least one clause".to_string(),
            ));
        }
        Ok(())
    }

    /// Check a clause count against `max_clauses`
    pub fn check_clause_count(&self, count: usize) -> Result<()> {
        if count > self.max_clauses {
            return Err(OrderError::TooManyClauses {
                count,
                max: self.max_clauses,
            });
        }
        Ok(())
    }
}
