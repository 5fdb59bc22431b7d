use crate::errors::GateError;
use crate::request::parser::parse_query_string;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
    TRACE,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::TRACE => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = GateError;

    fn from_str(method: &str) -> Result<Self, Self::Err> {
        match method.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::GET),
            "POST" => Ok(HttpMethod::POST),
            "PUT" => Ok(HttpMethod::PUT),
            "DELETE" => Ok(HttpMethod::DELETE),
            "PATCH" => Ok(HttpMethod::PATCH),
            "HEAD" => Ok(HttpMethod::HEAD),
            "OPTIONS" => Ok(HttpMethod::OPTIONS),
            "TRACE" => Ok(HttpMethod::TRACE),
            _ => Err(GateError::Request {
                code: "PARAMGATE_REQUEST_INVALID_HTTP_METHOD".to_string(),
                message: format!("Invalid HTTP method: {}", method),
            }),
        }
    }
}

/// Query parameters as a multiset: every `(key, value)` pair in arrival
/// order, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// First value given for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn count(&self, key: &str) -> usize {
        self.pairs.iter().filter(|(k, _)| k == key).count()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Distinct keys in order of first occurrence.
    pub fn keys(&self) -> Vec<&str> {
        self.key_counts().into_iter().map(|(k, _)| k).collect()
    }

    /// Distinct keys in order of first occurrence, each with its number of
    /// occurrences. One pass over the pairs.
    pub fn key_counts(&self) -> Vec<(&str, usize)> {
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for (key, _) in &self.pairs {
            let key = key.as_str();
            match slots.get(key) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    slots.insert(key, counts.len());
                    counts.push((key, 1));
                }
            }
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub query: QueryParams,
}

impl HttpRequest {
    /// Builds a request from a method and a `path?query` target.
    pub fn new(method: HttpMethod, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, parse_query_string(query)),
            None => (target, QueryParams::new()),
        };
        Self {
            method,
            path: path.to_string(),
            headers: HashMap::new(),
            query,
        }
    }

    pub fn get(target: &str) -> Self {
        Self::new(HttpMethod::GET, target)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_distinct_in_first_occurrence_order() {
        let params = QueryParams::from_pairs([("b", "1"), ("a", "2"), ("b", "3")]);
        assert_eq!(params.keys(), vec!["b", "a"]);
        assert_eq!(params.key_counts(), vec![("b", 2), ("a", 1)]);
        assert_eq!(params.count("b"), 2);
        assert_eq!(params.first("b"), Some("1"));
        assert_eq!(params.get_all("b").collect::<Vec<_>>(), vec!["1", "3"]);
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_missing_key() {
        let params = QueryParams::new();
        assert!(params.is_empty());
        assert!(!params.contains_key("q"));
        assert_eq!(params.first("q"), None);
        assert_eq!(params.count("q"), 0);
    }

    #[test]
    fn test_request_splits_target() {
        let request = HttpRequest::get("/search?q=cat&n=5");
        assert_eq!(request.method, HttpMethod::GET);
        assert_eq!(request.path, "/search");
        assert_eq!(request.query.first("q"), Some("cat"));
        assert_eq!(request.query.first("n"), Some("5"));

        let bare = HttpRequest::get("/health");
        assert_eq!(bare.path, "/health");
        assert!(bare.query.is_empty());
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::GET);
        assert_eq!("PATCH".parse::<HttpMethod>().unwrap(), HttpMethod::PATCH);
        assert!(matches!(
            "BREW".parse::<HttpMethod>(),
            Err(GateError::Request { .. })
        ));
    }
}
