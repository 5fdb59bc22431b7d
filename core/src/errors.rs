use crate::validation::ValueType;
use thiserror::Error;

/// A value check was handed a scalar of the wrong kind.
///
/// This is a misconfigured rule set, not a bad request, so it never lands in a
/// violation list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("CONTRACT VIOLATION: check on parameter '{key}' expects {expected}, got {found}")]
pub struct ContractViolation {
    pub key: String,
    pub expected: ValueType,
    pub found: ValueType,
}

#[derive(Debug, Error)]
pub enum GateError {
    #[error("CONFIG ERROR: rule for parameter '{key}' declared more than once")]
    DuplicateRule { key: String },

    #[error("CONFIG ERROR: invalid pattern '{pattern}' - {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("CONFIG ERROR: allowed set for parameter '{key}' is empty")]
    EmptyAllowedSet { key: String },

    #[error("CONFIG ERROR: {code} - {message}")]
    Config { code: String, message: String },

    #[error("REQUEST ERROR: {code} - {message}")]
    Request { code: String, message: String },
}

impl From<serde_json::Error> for GateError {
    fn from(err: serde_json::Error) -> Self {
        GateError::Config {
            code: "PARAMGATE_CONFIG_INVALID_JSON".to_string(),
            message: err.to_string(),
        }
    }
}
