//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default, so an empty source still
//! produces a usable configuration.

pub mod api;
pub mod app;
pub mod cache;
pub mod database;
pub mod logging;
pub mod media;
pub mod session;
pub mod stats;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::api::{ApiConfig, UsersConfig};
pub use self::app::{CorsConfig, ServerConfig};
pub use self::cache::CacheConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::media::MediaConfig;
pub use self::session::SessionConfig;
pub use self::stats::{PruneMode, StatsConfig};
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Object/block cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Session cookie and freshness settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Hit logging and pruning settings.
    #[serde(default)]
    pub stats: StatsConfig,
    /// REST API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// User directory settings.
    #[serde(default)]
    pub users: UsersConfig,
    /// Media library settings.
    #[serde(default)]
    pub media: MediaConfig,
    /// Scheduled task settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `EVOCMS__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("EVOCMS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
