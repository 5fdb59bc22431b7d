//! # SCALAR VALUES AND COERCION
//!
//! Raw parameters always arrive as text. A rule declares the [`ValueType`] it
//! wants and coercion turns the text into a typed [`Value`] before any check
//! runs.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// **SCALAR KIND** a parameter coerces to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Integer,
}

impl ValueType {
    /// **DISPLAY NAME** used in violation messages.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
        }
    }

    /// **COERCION**
    ///
    /// Integers use strict decimal parsing: an optional sign followed by
    /// digits, no surrounding whitespace.
    pub fn coerce(self, raw: &str) -> Result<Value, CoercionError> {
        match self {
            ValueType::String => Ok(Value::String(raw.to_string())),
            ValueType::Integer => raw
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| CoercionError {
                    raw: raw.to_string(),
                    target: self,
                }),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A coerced parameter value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    String(String),
    Integer(i64),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Integer(_) => ValueType::Integer,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::String(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{raw}' is not a valid {target}")]
pub struct CoercionError {
    pub raw: String,
    pub target: ValueType,
}
