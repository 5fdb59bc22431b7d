pub mod serializer;
pub mod types;

pub use serializer::{create_response, json_response, serialize_json_response, serialize_response_body};
pub use types::{HttpResponse, ResponseBody};
