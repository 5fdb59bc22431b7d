//! # RULE SET CONFIGURATION
//!
//! Rule sets can be declared as JSON instead of built in code:
//!
//! ```json
//! {
//!   "rules": [
//!     { "key": "q", "required": true, "type": "string",
//!       "checks": [{ "kind": "length", "min": 1, "max": 100 }] },
//!     { "key": "n", "type": "integer",
//!       "checks": [{ "kind": "range", "max": 50 }] }
//!   ]
//! }
//! ```
//!
//! Everything that can be wrong with a rule set is caught by `build`, before
//! any request is seen.

use crate::errors::GateError;
use crate::validation::{
    IntegerRange, LengthRange, OneOf, ParameterRule, Pattern, RequestValidator, Value, ValueCheck,
    ValueType,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetConfig {
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub key: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub checks: Vec<CheckConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum CheckConfig {
    Length {
        #[serde(default)]
        min: usize,
        #[serde(default)]
        max: Option<usize>,
    },
    Range {
        #[serde(default)]
        min: i64,
        #[serde(default)]
        max: Option<i64>,
    },
    OneOf {
        values: Vec<serde_json::Value>,
    },
    Pattern {
        regex: String,
    },
}

impl RuleSetConfig {
    pub fn from_json_str(json: &str) -> Result<Self, GateError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_slice(json: &[u8]) -> Result<Self, GateError> {
        Ok(serde_json::from_slice(json)?)
    }

    pub fn build(&self) -> Result<RequestValidator, GateError> {
        let rules = self
            .rules
            .iter()
            .map(RuleConfig::build)
            .collect::<Result<Vec<_>, _>>()?;
        RequestValidator::new(rules)
    }
}

impl RuleConfig {
    pub fn build(&self) -> Result<ParameterRule, GateError> {
        let mut rule = ParameterRule::new(self.key.as_str(), self.required, self.value_type);
        for check in &self.checks {
            rule = rule.with_check(check.build(&self.key, self.value_type)?);
        }
        Ok(rule)
    }
}

impl CheckConfig {
    fn kind(&self) -> &'static str {
        match self {
            CheckConfig::Length { .. } => "length",
            CheckConfig::Range { .. } => "range",
            CheckConfig::OneOf { .. } => "one_of",
            CheckConfig::Pattern { .. } => "pattern",
        }
    }

    /// Builds the check for a rule on `key` of type `value_type`.
    pub fn build(&self, key: &str, value_type: ValueType) -> Result<Arc<dyn ValueCheck>, GateError> {
        self.ensure_ordered_bounds(key)?;
        let check: Arc<dyn ValueCheck> = match self {
            CheckConfig::Length { min, max } => Arc::new(LengthRange::new(*min, *max)),
            CheckConfig::Range { min, max } => Arc::new(IntegerRange::new(*min, *max)),
            CheckConfig::OneOf { values } => Arc::new(build_one_of(key, value_type, values)?),
            CheckConfig::Pattern { regex } => Arc::new(Pattern::new(regex)?),
        };

        if check.expects() != value_type {
            return Err(GateError::Config {
                code: "PARAMGATE_CONFIG_CHECK_TYPE_MISMATCH".to_string(),
                message: format!(
                    "'{}' check on parameter '{}' needs type {}, rule declares {}",
                    self.kind(),
                    key,
                    check.expects(),
                    value_type
                ),
            });
        }
        Ok(check)
    }

    /// A `min` above `max` would reject every value.
    fn ensure_ordered_bounds(&self, key: &str) -> Result<(), GateError> {
        let inverted = match self {
            CheckConfig::Length { min, max: Some(max) } if min > max => {
                Some((min.to_string(), max.to_string()))
            }
            CheckConfig::Range { min, max: Some(max) } if min > max => {
                Some((min.to_string(), max.to_string()))
            }
            _ => None,
        };
        match inverted {
            Some((min, max)) => Err(GateError::Config {
                code: "PARAMGATE_CONFIG_INVERTED_BOUNDS".to_string(),
                message: format!(
                    "'{}' check on parameter '{}' has min {} above max {}",
                    self.kind(),
                    key,
                    min,
                    max
                ),
            }),
            None => Ok(()),
        }
    }
}

fn build_one_of(
    key: &str,
    value_type: ValueType,
    values: &[serde_json::Value],
) -> Result<OneOf, GateError> {
    if values.is_empty() {
        return Err(GateError::EmptyAllowedSet {
            key: key.to_string(),
        });
    }

    let mut allowed = Vec::with_capacity(values.len());
    for raw in values {
        let text = match raw {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            other => return Err(bad_allowed_value(key, value_type, &other.to_string())),
        };
        let value = value_type
            .coerce(&text)
            .map_err(|_| bad_allowed_value(key, value_type, &text))?;
        allowed.push(value);
    }

    Ok(match value_type {
        ValueType::String => OneOf::strings(allowed.iter().filter_map(Value::as_str)),
        ValueType::Integer => OneOf::integers(allowed.iter().filter_map(Value::as_integer)),
    })
}

fn bad_allowed_value(key: &str, value_type: ValueType, raw: &str) -> GateError {
    GateError::Config {
        code: "PARAMGATE_CONFIG_BAD_ALLOWED_VALUE".to_string(),
        message: format!(
            "allowed value {} for parameter '{}' is not type {}",
            raw, key, value_type
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::QueryParams;

    const SEARCH_RULES: &str = r#"{
        "rules": [
            { "key": "q", "required": true, "type": "string",
              "checks": [{ "kind": "length", "min": 1, "max": 100 }] },
            { "key": "n", "type": "integer",
              "checks": [{ "kind": "range", "max": 50 }] },
            { "key": "sort", "type": "string",
              "checks": [{ "kind": "one_of", "values": ["name", "date"] }] },
            { "key": "size", "type": "integer",
              "checks": [{ "kind": "one_of", "values": [10, "25", 50] }] }
        ]
    }"#;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        QueryParams::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_parse_and_build() {
        let config = RuleSetConfig::from_json_str(SEARCH_RULES).unwrap();
        assert_eq!(config.rules.len(), 4);
        assert!(config.rules[0].required);
        assert!(!config.rules[1].required);
        assert_eq!(
            config.rules[1].checks,
            vec![CheckConfig::Range { min: 0, max: Some(50) }]
        );

        let validator = config.build().unwrap();
        assert!(validator
            .validate(&params(&[("q", "cat"), ("n", "50"), ("sort", "date"), ("size", "25")]))
            .unwrap()
            .is_empty());
        assert_eq!(
            validator
                .validate(&params(&[("q", "cat"), ("size", "11")]))
                .unwrap()
                .into_inner(),
            vec!["Parameter 'size' with value '11' is not one of the allowed values: [10, 25, 50]"]
        );
    }

    #[test]
    fn test_built_rules_keep_declared_shape() {
        let validator = RuleSetConfig::from_json_str(SEARCH_RULES).unwrap().build().unwrap();
        let rules = validator.rules();
        assert_eq!(rules.len(), 4);
        assert_eq!(rules[0].key(), "q");
        assert!(rules[0].is_required());
        assert_eq!(rules[0].value_type(), ValueType::String);
        assert_eq!(rules[0].checks().len(), 1);
        assert!(!rules[3].is_required());
        assert_eq!(rules[3].value_type(), ValueType::Integer);
        assert_eq!(rules[3].checks()[0].expects(), ValueType::Integer);
    }

    #[test]
    fn test_misspelled_check_field_rejected() {
        let err = RuleSetConfig::from_json_str(
            r#"{"rules": [{"key": "q", "type": "string", "checks": [{"kind": "length", "maximum": 3}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GateError::Config { .. }));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        for json in [
            r#"{"rules": [{"key": "q", "type": "string", "checks": [{"kind": "length", "min": 5, "max": 2}]}]}"#,
            r#"{"rules": [{"key": "n", "type": "integer", "checks": [{"kind": "range", "min": 10, "max": -1}]}]}"#,
        ] {
            match RuleSetConfig::from_json_str(json).unwrap().build() {
                Err(GateError::Config { code, .. }) => {
                    assert_eq!(code, "PARAMGATE_CONFIG_INVERTED_BOUNDS")
                }
                other => panic!("Expected inverted bounds, got {:?}", other),
            }
        }

        let equal = RuleSetConfig::from_json_str(
            r#"{"rules": [{"key": "q", "type": "string", "checks": [{"kind": "length", "min": 3, "max": 3}]}]}"#,
        )
        .unwrap();
        assert!(equal.build().is_ok());
    }

    #[test]
    fn test_unknown_rule_field_rejected() {
        let err = RuleSetConfig::from_json_str(
            r#"{"rules": [{"key": "q", "type": "string", "requird": true}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GateError::Config { .. }));
    }

    #[test]
    fn test_check_type_mismatch_rejected() {
        let config = RuleSetConfig::from_json_str(
            r#"{"rules": [{"key": "n", "type": "integer", "checks": [{"kind": "length", "max": 3}]}]}"#,
        )
        .unwrap();
        match config.build() {
            Err(GateError::Config { code, .. }) => {
                assert_eq!(code, "PARAMGATE_CONFIG_CHECK_TYPE_MISMATCH")
            }
            other => panic!("Expected type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_allowed_values_rejected() {
        let empty = RuleSetConfig::from_json_str(
            r#"{"rules": [{"key": "s", "type": "string", "checks": [{"kind": "one_of", "values": []}]}]}"#,
        )
        .unwrap();
        assert!(matches!(empty.build(), Err(GateError::EmptyAllowedSet { .. })));

        let fractional = RuleSetConfig::from_json_str(
            r#"{"rules": [{"key": "n", "type": "integer", "checks": [{"kind": "one_of", "values": [1.5]}]}]}"#,
        )
        .unwrap();
        assert!(matches!(fractional.build(), Err(GateError::Config { .. })));
    }

    #[test]
    fn test_invalid_pattern_and_duplicate_keys_rejected() {
        let pattern = RuleSetConfig::from_json_str(
            r#"{"rules": [{"key": "t", "type": "string", "checks": [{"kind": "pattern", "regex": "("}]}]}"#,
        )
        .unwrap();
        assert!(matches!(pattern.build(), Err(GateError::InvalidPattern { .. })));

        let duplicate = RuleSetConfig::from_json_str(
            r#"{"rules": [{"key": "q", "type": "string"}, {"key": "q", "type": "integer"}]}"#,
        )
        .unwrap();
        assert!(matches!(duplicate.build(), Err(GateError::DuplicateRule { .. })));
    }
}
