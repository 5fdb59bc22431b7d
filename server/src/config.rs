use crate::error::ServerError;
use std::net::SocketAddr;

pub const ADDR_VAR: &str = "PARAMGATE_ADDR";
pub const KEEP_ALIVE_VAR: &str = "PARAMGATE_KEEP_ALIVE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub keep_alive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            keep_alive: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ADDR_VAR) {
            config.addr = value
                .parse()
                .map_err(|source| ServerError::InvalidAddr { value, source })?;
        }

        if let Some(value) = lookup(KEEP_ALIVE_VAR) {
            config.keep_alive = match value.to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(ServerError::InvalidFlag {
                        name: KEEP_ALIVE_VAR.to_string(),
                        value,
                    })
                }
            };
        }

        Ok(config)
    }
}
