use crate::error::{OrderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn is_descending(self) -> bool {
        self == SortOrder::Descending
    }
}

impl FromStr for SortOrder {
    type Err = OrderError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(OrderError::InvalidRule(format!(
                "unknown sort direction '{other}'"
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => f.write_str("asc"),
            SortOrder::Descending => f.write_str("desc"),
        }
    }
}

/// Whether an ordering clause starts an ordering or breaks ties of one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClausePosition {
    First,
    Subsequent,
}

/// A field name plus an optional direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingRule {
    pub field: String,
    /// `None` defers to the configured default direction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl OrderingRule {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order: Some(order),
        }
    }

    /// A rule that leaves the direction to the query's configuration
    pub fn unspecified(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: None,
        }
    }

    pub fn order_or(&self, default: SortOrder) -> SortOrder {
        self.order.unwrap_or(default)
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Descending)
    }
}

/// Parses `field`, `field:asc`, `field desc` or `-field`
impl FromStr for OrderingRule {
    type Err = OrderError;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OrderError::InvalidRule(
                "empty ordering rule".to_string(),
            ));
        }

        if let Some(field) = trimmed.strip_prefix('-') {
            return Ok(OrderingRule::descending(non_empty_field(field)?));
        }

        match trimmed
            .split_once(':')
            .or_else(|| trimmed.split_once(char::is_whitespace))
        {
            Some((field, order)) => {
                Ok(OrderingRule::new(non_empty_field(field)?, order.parse()?))
            }
            None => Ok(OrderingRule::unspecified(non_empty_field(trimmed)?)),
        }
    }
}

fn non_empty_field(field: &str) -> Result<&str> {
    let field = field.trim();
    if field.is_empty() || field.contains(char::is_whitespace) {
        return Err(OrderError::InvalidRule(format!(
            "invalid field name '{field}'"
        )));
    }
    Ok(field)
}

impl fmt::Display for OrderingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order {
            Some(order) => write!(f, "{}:{order}", self.field),
            None => f.write_str(&self.field),
        }
    }
}

/// Ordered list of rules, applied as a fold: first rule orders, the rest
/// break ties
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderingRules {
    rules: Vec<OrderingRule>,
}

impl OrderingRules {
    pub fn new(rules: Vec<OrderingRule>) -> Self {
        Self { rules }
    }

    pub fn push(mut self, rule: OrderingRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[OrderingRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Pair each rule with the clause position it is applied at
    pub fn positioned(
        &self,
    ) -> impl Iterator<Item = (ClausePosition, &OrderingRule)> {
        self.rules.iter().enumerate().map(|(index, rule)| {
            let position = if index == 0 {
                ClausePosition::First
            } else {
                ClausePosition::Subsequent
            };
            (position, rule)
        })
    }
}

impl FromIterator<OrderingRule> for OrderingRules {
    fn from_iter<I: IntoIterator<Item = OrderingRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Parses a comma-separated list such as `height:desc, name`
impl FromStr for OrderingRules {
    type Err = OrderError;

    fn from_str(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(OrderError::InvalidRule(
                "empty ordering rule list".to_string(),
            ));
        }
        raw.split(',').map(str::parse::<OrderingRule>).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_rule_form() {
        let cases = [
            ("Height", OrderingRule::unspecified("Height")),
            ("Height:asc", OrderingRule::ascending("Height")),
            ("Height:DESC", OrderingRule::descending("Height")),
            ("Height desc", OrderingRule::descending("Height")),
            ("  Name   Ascending ", OrderingRule::ascending("Name")),
            ("-Height", OrderingRule::descending("Height")),
        ];

        for (raw, expected) in cases {
            assert_eq!(raw.parse::<OrderingRule>().unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn rejects_blank_and_malformed_rules() {
        for raw in ["", "   ", "-", "Height:sideways", ":desc", "a b c"] {
            assert!(
                matches!(
                    raw.parse::<OrderingRule>(),
                    Err(OrderError::InvalidRule(_))
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn parses_rule_lists_and_positions() {
        let rules: OrderingRules = "Height:desc, Name".parse().unwrap();
        let positioned: Vec<_> = rules
            .positioned()
            .map(|(position, rule)| (position, rule.field.as_str()))
            .collect();

        assert_eq!(
            positioned,
            vec![
                (ClausePosition::First, "Height"),
                (ClausePosition::Subsequent, "Name"),
            ]
        );
        assert!("".parse::<OrderingRules>().is_err());
    }

    #[test]
    fn rules_deserialize_with_optional_order() {
        let rules: OrderingRules = serde_json::from_str(
            r#"[{"field":"Name"},{"field":"Height","order":"descending"}]"#,
        )
        .unwrap();
        assert_eq!(
            rules.rules(),
            &[
                OrderingRule::unspecified("Name"),
                OrderingRule::descending("Height"),
            ]
        );
        assert_eq!(rules.rules()[0].order_or(SortOrder::Descending), SortOrder::Descending);
        assert_eq!(rules.rules()[0].to_string(), "Name");
    }
}
