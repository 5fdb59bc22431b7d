//! # PARAMGATE VALIDATION MODULE
//!
//! **QUERY PARAMETER VALIDATION WITH TRAIT-BASED CHECKS**
//!
//! This module provides the `ValueCheck` trait, the concrete checks, and the two
//! aggregation layers that turn a parameter multiset into a list of violations.
//!
//! ## VALIDATION PIPELINE
//!
//! 1. **REQUEST SHAPE** - Unexpected and repeated parameters
//! 2. **PRESENCE** - Required parameters must appear
//! 3. **COERCION** - Raw text converted to the declared `ValueType`
//! 4. **VALUE CHECKS** - Length, range, membership and pattern constraints
//!
//! ## USAGE
//!
//! ```rust
//! use paramgate::request::QueryParams;
//! use paramgate::validation::{LengthRange, ParameterRule, RequestValidator, ValueType};
//!
//! let validator = RequestValidator::new(vec![
//!     ParameterRule::required("q", ValueType::String).check(LengthRange::between(1, 100)),
//! ])
//! .unwrap();
//! let violations = validator.validate(&QueryParams::new()).unwrap();
//! assert_eq!(violations.len(), 1);
//! ```

use crate::errors::ContractViolation;
use std::fmt::Debug;

pub mod request_validator;
pub mod rule;
pub mod validators;
pub mod value;

pub use request_validator::{RequestValidator, Violations};
pub use rule::ParameterRule;
pub use validators::{IntegerRange, LengthRange, OneOf, Pattern};
pub use value::{CoercionError, Value, ValueType};

/// **CORE VALUE CHECK TRAIT**
///
/// **MANDATE**: ALL value checks MUST implement this trait.
/// **GUARANTEE**: Checks hold no per-call state and are safe to share across threads.
pub trait ValueCheck: Debug + Send + Sync {
    /// **EXPECTED KIND** - The scalar type this check was built for
    fn expects(&self) -> ValueType;

    /// **CHECK EXECUTION**
    ///
    /// **PARAMETERS**:
    /// - `key: &str` - Parameter key, quoted in messages
    /// - `value: &Value` - Coerced parameter value
    ///
    /// **RETURNS**:
    /// - `Ok(vec![])` - Value passed
    /// - `Ok(messages)` - One human-readable message per failure
    /// - `Err(ContractViolation)` - `value` is not of the expected kind
    fn validate(&self, key: &str, value: &Value) -> Result<Vec<String>, ContractViolation>;
}

/// Guard shared by every check: the value must be of the kind the check was built for.
pub(crate) fn ensure_kind(
    key: &str,
    expected: ValueType,
    value: &Value,
) -> Result<(), ContractViolation> {
    let found = value.value_type();
    if found == expected {
        Ok(())
    } else {
        Err(ContractViolation {
            key: key.to_string(),
            expected,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_kind_matches() {
        assert!(ensure_kind("q", ValueType::String, &Value::from("x")).is_ok());
    }

    #[test]
    fn test_ensure_kind_reports_both_kinds() {
        let err = ensure_kind("n", ValueType::Integer, &Value::from("x")).unwrap_err();
        assert_eq!(
            err,
            ContractViolation {
                key: "n".to_string(),
                expected: ValueType::Integer,
                found: ValueType::String,
            }
        );
        assert!(err.to_string().contains("expects integer, got string"));
    }
}
