//! CORS allow-list loading from config.toml
//!
//! The catalog API only answers cross-origin browser calls from origins listed here.
//! A missing config file is not an error; the built-in development origins are used.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Cross-origin settings
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Cross-origin request settings
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to make credentialed requests (e.g. `http://localhost:5173`)
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

/// Loads the CORS configuration from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("No config file at {:?}; using default CORS origins", path);
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {path:?}: {e}")))?;

    toml::from_str(&contents)
        .map_err(|e| Error::config(format!("Failed to parse config file {path:?}: {e}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_cors_config() {
        let toml_str = r#"
            [cors]
            allowed_origins = ["https://catalog.example.com", "http://localhost:5173"]
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://catalog.example.com", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.cors.allowed_origins, default_allowed_origins());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config("definitely/not/here/config.toml").unwrap();
        assert_eq!(config.cors.allowed_origins, default_allowed_origins());
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let path = std::env::temp_dir().join(format!("catalog-cors-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[cors\nallowed_origins = 3").unwrap();

        let result = load_config(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));
    }
}
