//! Server configuration loaded from environment variables.

use crate::error::ConfigError;
use std::str::FromStr;

/// All fields have defaults suitable for local development.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite connection string; the file is created when missing.
    pub database_url: String,
    pub max_connections: u32,
    /// Request bodies above this size are refused with 413.
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".into(),
            port: 5000,
            database_url: "sqlite://movies.db".into(),
            max_connections: 5,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Default              |
    /// |----------------------------|----------------------|
    /// | `HOST`                     | `0.0.0.0`            |
    /// | `PORT`                     | `5000`               |
    /// | `DATABASE_URL`             | `sqlite://movies.db` |
    /// | `DATABASE_MAX_CONNECTIONS` | `5`                  |
    /// | `BODY_LIMIT_BYTES`         | `1048576`            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        Ok(ServerConfig {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.max_connections,
            )?,
            body_limit_bytes: parse_or(&lookup, "BODY_LIMIT_BYTES", defaults.body_limit_bytes)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(from_pairs(&[]).unwrap(), ServerConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = from_pairs(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", " 1 "),
        ])
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.max_connections, 1);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn bad_number_is_an_error() {
        let err = from_pairs(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for PORT: 'eighty'");
    }
}
