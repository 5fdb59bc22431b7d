use paramgate::config::RuleSetConfig;
use paramgate::errors::GateError;
use paramgate::gate::{gate, Handler};
use paramgate::request::{HttpMethod, HttpRequest};
use paramgate::response::{json_response, HttpResponse};
use paramgate::validation::{
    IntegerRange, LengthRange, OneOf, ParameterRule, RequestValidator, ValueType,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

const ITEMS_RULES: &str = include_str!("../rules/items.json");

/// Exact-path dispatch table.
#[derive(Default)]
pub struct Router {
    routes: HashMap<(HttpMethod, String), Arc<dyn Handler>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route<H: Handler + 'static>(mut self, method: HttpMethod, path: &str, handler: H) -> Self {
        self.routes.insert((method, path.to_string()), Arc::new(handler));
        self
    }
}

impl Handler for Router {
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        match self.routes.get(&(request.method, request.path.clone())) {
            Some(handler) => handler.handle(request),
            None => json_response(404, json!({ "detail": "not found" })),
        }
    }
}

pub fn search_rules() -> Result<RequestValidator, GateError> {
    RequestValidator::new(vec![
        ParameterRule::required("q", ValueType::String).check(LengthRange::between(1, 100)),
        ParameterRule::optional("n", ValueType::Integer).check(IntegerRange::between(0, 50)),
        ParameterRule::optional("sort", ValueType::String)
            .check(OneOf::strings(["relevance", "date"])),
    ])
}

pub fn items_rules() -> Result<RequestValidator, GateError> {
    RuleSetConfig::from_json_str(ITEMS_RULES)?.build()
}

fn search(request: &HttpRequest) -> HttpResponse {
    let limit = request
        .query
        .first("n")
        .and_then(|n| n.parse::<i64>().ok())
        .unwrap_or(10);
    json_response(
        200,
        json!({
            "query": request.query.first("q"),
            "limit": limit,
            "sort": request.query.first("sort").unwrap_or("relevance"),
        }),
    )
}

fn items(request: &HttpRequest) -> HttpResponse {
    json_response(
        200,
        json!({
            "category": request.query.first("category"),
            "page": request.query.first("page").and_then(|p| p.parse::<i64>().ok()).unwrap_or(1),
            "tag": request.query.first("tag"),
        }),
    )
}

fn health(_: &HttpRequest) -> HttpResponse {
    json_response(200, json!({ "status": "ok" }))
}

pub fn build_router() -> Result<Router, GateError> {
    Ok(Router::new()
        .route(HttpMethod::GET, "/search", gate(search_rules()?, search))
        .route(HttpMethod::GET, "/items", gate(items_rules()?, items))
        .route(HttpMethod::GET, "/health", health))
}
