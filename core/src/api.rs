pub use crate::config::{CheckConfig, RuleConfig, RuleSetConfig};
pub use crate::errors::{ContractViolation, GateError};
pub use crate::gate::{gate, Handler, ValidationGate};
pub use crate::request::{parse_query_string, HttpMethod, HttpRequest, QueryParams};
pub use crate::response::{create_response, json_response, HttpResponse, ResponseBody};
pub use crate::validation::{
    IntegerRange, LengthRange, OneOf, ParameterRule, Pattern, RequestValidator, Value,
    ValueCheck, ValueType, Violations,
};
