//! Configuration parsed from environment variables.
//!
//! Parsing goes through a lookup function so tests can feed a map instead of
//! mutating the process environment.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_DRAWINGS_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_DRAWINGS_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DRAWINGS_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Drawings live in process memory only.
    Memory,
    Postgres { database_url: String, max_connections: u32 },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub store: StoreBackend,
}

impl AppConfig {
    /// Build from the process environment.
    ///
    /// - `PORT`: listen port, default 3000
    /// - `DATABASE_URL`: Postgres URL; in-memory store when unset
    /// - `DB_MAX_CONNECTIONS`: pool size, default 5
    ///
    /// # Errors
    ///
    /// Returns `Invalid` if `PORT` is set but not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` if `PORT` is set but not a port number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let store = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(database_url) => StoreBackend::Postgres {
                database_url,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            },
            None => StoreBackend::Memory,
        };

        Ok(Self { port, store })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Settings for talking to a remote drawings service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeouts: HttpTimeouts,
}

impl ClientConfig {
    /// - `DRAWINGS_API_URL`: service base URL, default `http://localhost:3000`
    /// - `DRAWINGS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `DRAWINGS_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("DRAWINGS_API_URL")
            .unwrap_or_else(|| DEFAULT_DRAWINGS_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = HttpTimeouts {
            request_secs: parse_or(&lookup, "DRAWINGS_REQUEST_TIMEOUT_SECS", DEFAULT_DRAWINGS_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(&lookup, "DRAWINGS_CONNECT_TIMEOUT_SECS", DEFAULT_DRAWINGS_CONNECT_TIMEOUT_SECS),
        };
        Self { base_url, timeouts }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
