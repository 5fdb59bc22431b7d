use super::ParameterRule;
use crate::errors::{ContractViolation, GateError};
use crate::request::QueryParams;
use serde::Serialize;
use std::collections::HashSet;

/// Ordered list of human-readable violation messages.
///
/// Request-shape findings come first in the order their keys were encountered,
/// followed by per-rule findings in rule declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    pub(crate) fn push(&mut self, message: String) {
        self.0.push(message);
    }
}

impl Extend<String> for Violations {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Violations {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// **REQUEST VALIDATOR**
///
/// Holds an endpoint's complete rule set. Immutable once built, so one instance
/// can validate any number of requests concurrently.
#[derive(Debug, Clone)]
pub struct RequestValidator {
    rules: Vec<ParameterRule>,
    expected_keys: HashSet<String>,
}

impl RequestValidator {
    /// **CONSTRUCTOR**
    ///
    /// **RETURNS**: `GateError::DuplicateRule` if two rules share a key
    pub fn new(rules: Vec<ParameterRule>) -> Result<Self, GateError> {
        let mut expected_keys = HashSet::with_capacity(rules.len());
        for rule in &rules {
            if !expected_keys.insert(rule.key().to_string()) {
                return Err(GateError::DuplicateRule {
                    key: rule.key().to_string(),
                });
            }
        }

        log::debug!("Built request validator with {} rules", rules.len());
        Ok(Self {
            rules,
            expected_keys,
        })
    }

    pub fn rules(&self) -> &[ParameterRule] {
        &self.rules
    }

    pub fn expects(&self, key: &str) -> bool {
        self.expected_keys.contains(key)
    }

    /// Validates a whole parameter multiset and returns every violation found.
    ///
    /// An unexpected key gets a single finding and nothing else. A repeated
    /// expected key is reported here and its rule still runs below.
    pub fn validate(&self, params: &QueryParams) -> Result<Violations, ContractViolation> {
        let mut violations = Violations::new();

        for (key, occurrences) in params.key_counts() {
            if !self.expects(key) {
                violations.push(format!(
                    "Unexpected parameter '{}' in request parameters.",
                    key
                ));
                continue;
            }
            if occurrences > 1 {
                violations.push(format!(
                    "Parameter '{}' in request parameters multiple times",
                    key
                ));
            }
        }

        for rule in &self.rules {
            violations.extend(rule.validate(params)?);
        }

        Ok(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{IntegerRange, LengthRange, ValueType};

    fn search_validator() -> RequestValidator {
        RequestValidator::new(vec![
            ParameterRule::required("q", ValueType::String).check(LengthRange::between(1, 100)),
            ParameterRule::optional("n", ValueType::Integer).check(IntegerRange::between(0, 50)),
        ])
        .unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        QueryParams::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_duplicate_rule_keys_rejected() {
        let result = RequestValidator::new(vec![
            ParameterRule::required("q", ValueType::String),
            ParameterRule::optional("q", ValueType::Integer),
        ]);
        assert!(matches!(result, Err(GateError::DuplicateRule { key }) if key == "q"));
    }

    #[test]
    fn test_valid_request_has_no_violations() {
        let violations = search_validator()
            .validate(&params(&[("q", "cat"), ("n", "10")]))
            .unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn test_unexpected_key_reported_once_even_if_repeated() {
        let violations = search_validator()
            .validate(&params(&[("q", "cat"), ("x", "1"), ("x", "2")]))
            .unwrap();
        assert_eq!(
            violations.into_inner(),
            vec!["Unexpected parameter 'x' in request parameters."]
        );
    }

    #[test]
    fn test_repeated_and_invalid_both_reported() {
        let violations = search_validator()
            .validate(&params(&[("q", "cat"), ("n", "99"), ("n", "1")]))
            .unwrap();
        assert_eq!(
            violations.into_inner(),
            vec![
                "Parameter 'n' in request parameters multiple times",
                "Parameter 'n' with value '99' is too large, maximum value is 50",
            ]
        );
    }

    #[test]
    fn test_shape_findings_precede_rule_findings() {
        let violations = search_validator()
            .validate(&params(&[("z", "1"), ("n", "-1"), ("a", "2")]))
            .unwrap();
        assert_eq!(
            violations.into_inner(),
            vec![
                "Unexpected parameter 'z' in request parameters.",
                "Unexpected parameter 'a' in request parameters.",
                "Required parameter 'q' not in request parameters",
                "Parameter 'n' with value '-1' is too small, minimum value is 0",
            ]
        );
    }

    #[test]
    fn test_violations_serialize_as_string_array() {
        let violations = search_validator().validate(&params(&[])).unwrap();
        assert_eq!(
            serde_json::to_value(&violations).unwrap(),
            serde_json::json!(["Required parameter 'q' not in request parameters"])
        );
    }
}
