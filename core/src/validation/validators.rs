//! # CONCRETE VALUE CHECKS
//!
//! **CRITICAL**: Each check inspects one already-coerced value and reports at most one violation.
//! **MANDATE**: A check handed the wrong scalar kind MUST return `ContractViolation`, never a violation.

use super::{ensure_kind, Value, ValueCheck, ValueType};
use crate::errors::{ContractViolation, GateError};
use regex::Regex;
use std::collections::BTreeSet;

// ================================================================================================
// LENGTH RANGE - String length bounds
// ================================================================================================

/// **LENGTH RANGE CHECK**
///
/// **PURPOSE**: Bounds the length of a string value, counted in characters.
/// **GUARANTEE**: A value equal to either bound passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthRange {
    /// **MINIMUM LENGTH** - Defaults to 0, which never fails
    min_len: usize,

    /// **MAXIMUM LENGTH** - `None` means unbounded
    max_len: Option<usize>,
}

impl LengthRange {
    /// **CONSTRUCTOR**
    ///
    /// **PARAMETERS**:
    /// - `min_len: usize` - Shortest accepted length
    /// - `max_len: Option<usize>` - Longest accepted length, if any
    pub fn new(min_len: usize, max_len: Option<usize>) -> Self {
        Self { min_len, max_len }
    }

    /// **BOUNDED CONSTRUCTOR**
    pub fn between(min_len: usize, max_len: usize) -> Self {
        Self::new(min_len, Some(max_len))
    }

    pub fn at_least(min_len: usize) -> Self {
        Self::new(min_len, None)
    }

    pub fn at_most(max_len: usize) -> Self {
        Self::new(0, Some(max_len))
    }
}

impl Default for LengthRange {
    fn default() -> Self {
        Self::new(0, None)
    }
}

impl ValueCheck for LengthRange {
    fn expects(&self) -> ValueType {
        ValueType::String
    }

    fn validate(&self, key: &str, value: &Value) -> Result<Vec<String>, ContractViolation> {
        ensure_kind(key, self.expects(), value)?;
        let Value::String(text) = value else {
            return Ok(Vec::new());
        };

        let len = text.chars().count();
        if len < self.min_len {
            return Ok(vec![format!(
                "Parameter '{}' with value '{}' is too short, minimum length is {}",
                key, text, self.min_len
            )]);
        }
        match self.max_len {
            Some(max_len) if len > max_len => Ok(vec![format!(
                "Parameter '{}' with value '{}' is too long, maximum length is {}",
                key, text, max_len
            )]),
            _ => Ok(Vec::new()),
        }
    }
}

// ================================================================================================
// INTEGER RANGE - Numeric bounds
// ================================================================================================

/// **INTEGER RANGE CHECK**
///
/// **PURPOSE**: Bounds an integer value directly.
/// **GUARANTEE**: A value equal to either bound passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerRange {
    /// **MINIMUM VALUE** - Defaults to 0
    min_val: i64,

    /// **MAXIMUM VALUE** - `None` means unbounded
    max_val: Option<i64>,
}

impl IntegerRange {
    /// **CONSTRUCTOR**
    ///
    /// **PARAMETERS**:
    /// - `min_val: i64` - Smallest accepted value
    /// - `max_val: Option<i64>` - Largest accepted value, if any
    pub fn new(min_val: i64, max_val: Option<i64>) -> Self {
        Self { min_val, max_val }
    }

    pub fn between(min_val: i64, max_val: i64) -> Self {
        Self::new(min_val, Some(max_val))
    }

    pub fn at_least(min_val: i64) -> Self {
        Self::new(min_val, None)
    }
}

impl Default for IntegerRange {
    fn default() -> Self {
        Self::new(0, None)
    }
}

impl ValueCheck for IntegerRange {
    fn expects(&self) -> ValueType {
        ValueType::Integer
    }

    fn validate(&self, key: &str, value: &Value) -> Result<Vec<String>, ContractViolation> {
        ensure_kind(key, self.expects(), value)?;
        let Value::Integer(number) = *value else {
            return Ok(Vec::new());
        };

        if number < self.min_val {
            return Ok(vec![format!(
                "Parameter '{}' with value '{}' is too small, minimum value is {}",
                key, number, self.min_val
            )]);
        }
        match self.max_val {
            Some(max_val) if number > max_val => Ok(vec![format!(
                "Parameter '{}' with value '{}' is too large, maximum value is {}",
                key, number, max_val
            )]),
            _ => Ok(Vec::new()),
        }
    }
}

// ================================================================================================
// ONE OF - Membership in a fixed set
// ================================================================================================

/// **MEMBERSHIP CHECK**
///
/// **PURPOSE**: Accepts only values from a set fixed at construction.
/// **GUARANTEE**: Duplicate inputs collapse; the message lists the set in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOf {
    allowed: BTreeSet<Value>,
    value_type: ValueType,
}

impl OneOf {
    /// **STRING SET CONSTRUCTOR**
    pub fn strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: values.into_iter().map(|s| Value::String(s.into())).collect(),
            value_type: ValueType::String,
        }
    }

    /// **INTEGER SET CONSTRUCTOR**
    pub fn integers<I>(values: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self {
            allowed: values.into_iter().map(Value::Integer).collect(),
            value_type: ValueType::Integer,
        }
    }

    pub fn allowed(&self) -> &BTreeSet<Value> {
        &self.allowed
    }

    fn describe_allowed(&self) -> String {
        let items: Vec<String> = self.allowed.iter().map(Value::to_string).collect();
        format!("[{}]", items.join(", "))
    }
}

impl ValueCheck for OneOf {
    fn expects(&self) -> ValueType {
        self.value_type
    }

    fn validate(&self, key: &str, value: &Value) -> Result<Vec<String>, ContractViolation> {
        ensure_kind(key, self.expects(), value)?;
        if self.allowed.contains(value) {
            return Ok(Vec::new());
        }
        Ok(vec![format!(
            "Parameter '{}' with value '{}' is not one of the allowed values: {}",
            key,
            value,
            self.describe_allowed()
        )])
    }
}

// ================================================================================================
// PATTERN - Whole-value regular expression match
// ================================================================================================

/// **PATTERN CHECK**
///
/// **PURPOSE**: Requires the entire string value to match a regular expression.
/// **PERFORMANCE**: Pattern is compiled once at construction.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// **CONSTRUCTOR**
    ///
    /// **RETURNS**: `GateError::InvalidPattern` if the expression does not compile
    pub fn new(pattern: &str) -> Result<Self, GateError> {
        let anchored = format!("^(?:{})$", pattern);
        let regex = Regex::new(&anchored).map_err(|e| GateError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }
}

impl ValueCheck for Pattern {
    fn expects(&self) -> ValueType {
        ValueType::String
    }

    fn validate(&self, key: &str, value: &Value) -> Result<Vec<String>, ContractViolation> {
        ensure_kind(key, self.expects(), value)?;
        let Value::String(text) = value else {
            return Ok(Vec::new());
        };

        if self.regex.is_match(text) {
            Ok(Vec::new())
        } else {
            Ok(vec![format!(
                "Parameter '{}' with value '{}' does not match pattern '{}'",
                key, text, self.source
            )])
        }
    }
}

// ================================================================================================
// UNIT TESTS
// ================================================================================================
