//! # REQUEST GATE
//!
//! **PURPOSE**: Runs a `RequestValidator` in front of a handler and short-circuits
//! malformed requests before any handler logic executes.
//!
//! A gate is itself a `Handler`, so gates stack:
//!
//! ```rust
//! use paramgate::gate::{gate, Handler};
//! use paramgate::request::HttpRequest;
//! use paramgate::response::{create_response, HttpResponse, ResponseBody};
//! use paramgate::validation::{ParameterRule, RequestValidator, ValueType};
//!
//! let validator = RequestValidator::new(vec![ParameterRule::required("q", ValueType::String)]).unwrap();
//! let search = gate(validator, |_: &HttpRequest| -> HttpResponse {
//!     create_response(200, ResponseBody::Text("found".to_string()))
//! });
//!
//! assert_eq!(search.handle(&HttpRequest::get("/search?q=cat")).status_code, 200);
//! assert_eq!(search.handle(&HttpRequest::get("/search")).status_code, 400);
//! ```

use crate::errors::ContractViolation;
use crate::request::HttpRequest;
use crate::response::{json_response, HttpResponse};
use crate::validation::{RequestValidator, Violations};
use serde::Serialize;
use std::sync::Arc;

/// **STATUS** of a request rejected for bad parameters.
pub const REJECTED_STATUS: u16 = 400;

/// **STATUS** when the rule set itself is broken.
pub const MISCONFIGURED_STATUS: u16 = 500;

/// Anything that turns a request into a response.
pub trait Handler: Send + Sync {
    fn handle(&self, request: &HttpRequest) -> HttpResponse;
}

impl<F> Handler for F
where
    F: Fn(&HttpRequest) -> HttpResponse + Send + Sync,
{
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        self(request)
    }
}

/// **VALIDATION GATE**
///
/// **GUARANTEE**: The wrapped handler runs only when validation finds zero violations,
/// and its response is then returned untouched.
#[derive(Debug, Clone)]
pub struct ValidationGate<H> {
    validator: Arc<RequestValidator>,
    inner: H,
}

impl<H: Handler> ValidationGate<H> {
    pub fn new(validator: impl Into<Arc<RequestValidator>>, inner: H) -> Self {
        Self {
            validator: validator.into(),
            inner,
        }
    }
}

impl<H: Handler> Handler for ValidationGate<H> {
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        match self.validator.validate(&request.query) {
            Ok(violations) if violations.is_empty() => {
                log::trace!("Accepted {} {}", request.method, request.path);
                self.inner.handle(request)
            }
            Ok(violations) => {
                log::debug!(
                    "Rejected {} {}: {} violation(s)",
                    request.method,
                    request.path,
                    violations.len()
                );
                rejection_response(&violations)
            }
            Err(err) => {
                log::error!("{} {}: {}", request.method, request.path, err);
                misconfiguration_response(&err)
            }
        }
    }
}

/// Wraps `handler` so it only runs for requests `validator` accepts.
pub fn gate<H: Handler>(validator: impl Into<Arc<RequestValidator>>, handler: H) -> ValidationGate<H> {
    ValidationGate::new(validator, handler)
}

/// Body of a rejected request: `{"errors": [...]}`.
#[derive(Debug, Serialize)]
struct Rejection<'a> {
    errors: &'a Violations,
}

#[derive(Debug, Serialize)]
struct Misconfiguration {
    error: String,
}

pub fn rejection_response(violations: &Violations) -> HttpResponse {
    json_response(REJECTED_STATUS, Rejection { errors: violations })
}

fn misconfiguration_response(err: &ContractViolation) -> HttpResponse {
    json_response(
        MISCONFIGURED_STATUS,
        Misconfiguration {
            error: err.to_string(),
        },
    )
}
