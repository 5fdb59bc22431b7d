use paramgate::errors::GateError;
use std::net::AddrParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("CONFIG ERROR: invalid address '{value}' - {source}")]
    InvalidAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("CONFIG ERROR: {name} must be 'true' or 'false', got '{value}'")]
    InvalidFlag { name: String, value: String },

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error("IO ERROR: {0}")]
    Io(#[from] std::io::Error),
}
