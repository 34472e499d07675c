//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, BlizzardConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RaiderIoConfig, RateLimitConfig, ServerConfig, SyncConfig,
};
