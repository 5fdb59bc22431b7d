pub mod parser;
pub mod types;

pub use parser::parse_query_string;
pub use types::{HttpMethod, HttpRequest, QueryParams};
