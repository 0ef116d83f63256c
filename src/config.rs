use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Sensor data store address, `host:port`.
    pub store_addr: String,
    /// Store password; `None` when the store runs without auth.
    pub store_password: Option<String>,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            store_addr: optional("REDIS_ADDR", "localhost:6379"),
            store_password: non_empty(optional("REDIS_PASSWORD", "")),
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: optional("SERVER_PORT", "8080")
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
        })
    }
}

fn optional(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// An unset or empty `REDIS_PASSWORD` means the store expects no auth.
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
