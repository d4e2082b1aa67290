/// CORS allow-list loading from config.toml
pub mod cors;

/// Database connection and table creation
pub mod database;

/// Listener, database URL and response style from environment variables
pub mod server;

pub use server::{ResponseStyle, ServerConfig};

use crate::errors::Result;
use tracing::info;

/// Everything the service needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Environment-derived settings
    pub server: ServerConfig,
    /// Settings from config.toml
    pub cors: cors::CorsConfig,
}

/// Loads the environment settings, then the config file they point to.
///
/// Call after `.env` has been loaded so its values are visible.
pub fn load_app_configuration() -> Result<AppConfig> {
    let server = ServerConfig::from_env()?;
    let file = cors::load_config(&server.config_path)?;

    info!(
        bind = %server.bind_address(),
        response_style = ?server.response_style,
        allowed_origins = file.cors.allowed_origins.len(),
        "Application configuration loaded."
    );

    Ok(AppConfig {
        server,
        cors: file.cors,
    })
}
