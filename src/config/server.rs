//! Server settings read from environment variables.
//!
//! Every setting has a default so the service starts with an empty environment.
//! Values are read through a lookup function so tests do not touch the process environment.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use std::str::FromStr;

/// How "nothing to return" is reported on read endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseStyle {
    /// Compatible with the existing frontend: an empty catalog and an unknown id both
    /// answer 200 with a `{message}` body.
    #[default]
    Legacy,
    /// An empty catalog answers `[]` and an unknown id answers 404.
    Standard,
}

impl FromStr for ResponseStyle {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "standard" => Ok(Self::Standard),
            other => Err(Error::config(format!(
                "Invalid RESPONSE_STYLE '{other}': expected 'legacy' or 'standard'"
            ))),
        }
    }
}

/// Listener and persistence settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Database connection string
    pub database_url: String,
    /// Read-endpoint response convention
    pub response_style: ResponseStyle,
    /// Location of the TOML config file
    pub config_path: String,
}

impl ServerConfig {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through `lookup`, falling back to defaults for absent keys.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `PORT` is not a valid port number or
    /// `RESPONSE_STYLE` is not a known style.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT")
            .map(|raw| {
                raw.parse::<u16>()
                    .map_err(|e| Error::config(format!("Invalid PORT '{raw}': {e}")))
            })
            .transpose()?
            .unwrap_or(4040);
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let response_style = lookup("RESPONSE_STYLE")
            .map(|raw| raw.parse::<ResponseStyle>())
            .transpose()?
            .unwrap_or_default();
        let config_path = lookup("CONFIG_PATH").unwrap_or_else(|| "config.toml".to_string());

        Ok(Self {
            host,
            port,
            database_url,
            response_style,
            config_path,
        })
    }

    /// `host:port` string for binding the listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 4040);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.response_style, ResponseStyle::Legacy);
        assert_eq!(config.config_path, "config.toml");
        assert_eq!(config.bind_address(), "127.0.0.1:4040");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("SERVER_HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("RESPONSE_STYLE", "Standard"),
        ]))
        .unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.response_style, ResponseStyle::Standard);
    }

    #[test]
    fn test_invalid_values() {
        let result = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")]));
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));

        let result = ServerConfig::from_lookup(lookup_from(&[("RESPONSE_STYLE", "fancy")]));
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));
    }
}
