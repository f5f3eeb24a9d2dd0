// src/config.rs
use std::net::IpAddr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Runtime settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres URL; `None` runs the service on the in-memory store.
    pub database_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub max_connections: u32,
    /// Allowed browser origin; `None` allows any.
    pub cors_allow_origin: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            host: IpAddr::from([127, 0, 0, 1]),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            cors_allow_origin: None,
        }
    }
}

impl AppConfig {
    /// Reads the process environment; `.env` must already be loaded.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unparseable values fall back to
    /// the defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host.parse().unwrap_or_else(|_| {
            tracing::warn!(%host, "Invalid HOST, using {}", DEFAULT_HOST);
            IpAddr::from([127, 0, 0, 1])
        });

        Self {
            database_url: non_empty("DATABASE_URL"),
            host,
            port: parse_or(non_empty("PORT"), "PORT", DEFAULT_PORT),
            max_connections: parse_or(
                non_empty("DB_MAX_CONNECTIONS"),
                "DB_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            ),
            cors_allow_origin: non_empty("CORS_ALLOW_ORIGIN"),
        }
    }
}

fn parse_or<T: std::str::FromStr + std::fmt::Display>(value: Option<String>, key: &str, default: T) -> T {
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid value, using {}", default);
            default
        }),
        None => default,
    }
}
