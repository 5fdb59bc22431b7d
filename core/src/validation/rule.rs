use super::{ValueCheck, ValueType};
use crate::errors::ContractViolation;
use crate::request::QueryParams;
use std::sync::Arc;

/// **PARAMETER RULE**
///
/// Binds one parameter key to its presence requirement, its target type and an
/// ordered chain of value checks.
#[derive(Debug, Clone)]
pub struct ParameterRule {
    key: String,
    required: bool,
    value_type: ValueType,
    checks: Vec<Arc<dyn ValueCheck>>,
}

impl ParameterRule {
    pub fn new(key: impl Into<String>, required: bool, value_type: ValueType) -> Self {
        Self {
            key: key.into(),
            required,
            value_type,
            checks: Vec::new(),
        }
    }

    pub fn required(key: impl Into<String>, value_type: ValueType) -> Self {
        Self::new(key, true, value_type)
    }

    pub fn optional(key: impl Into<String>, value_type: ValueType) -> Self {
        Self::new(key, false, value_type)
    }

    /// Appends a check; checks run in the order they are added.
    pub fn check<C: ValueCheck + 'static>(self, check: C) -> Self {
        self.with_check(Arc::new(check))
    }

    pub fn with_check(mut self, check: Arc<dyn ValueCheck>) -> Self {
        self.checks.push(check);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn checks(&self) -> &[Arc<dyn ValueCheck>] {
        &self.checks
    }

    /// Validates this rule's parameter.
    ///
    /// Absence short-circuits, and so does a failed coercion: checks only ever
    /// see a converted value. A repeated key is judged on its first occurrence.
    pub fn validate(&self, params: &QueryParams) -> Result<Vec<String>, ContractViolation> {
        let Some(raw) = params.first(&self.key) else {
            if self.required {
                return Ok(vec![format!(
                    "Required parameter '{}' not in request parameters",
                    self.key
                )]);
            }
            return Ok(Vec::new());
        };

        let value = match self.value_type.coerce(raw) {
            Ok(value) => value,
            Err(_) => {
                return Ok(vec![format!(
                    "Parameter '{}' is not type {}",
                    self.key, self.value_type
                )]);
            }
        };

        let mut violations = Vec::new();
        for check in &self.checks {
            violations.extend(check.validate(&self.key, &value)?);
        }
        Ok(violations)
    }
}
