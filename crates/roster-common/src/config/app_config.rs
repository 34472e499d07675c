//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub blizzard: BlizzardConfig,
    pub raiderio: RaiderIoConfig,
    pub sync: SyncConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" | "dev" => Ok(Self::Development),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Directory holding the SQL migrations applied at startup
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime in seconds of tokens issued by [`crate::JwtService::issue_token`]
    #[serde(default = "default_token_expiry")]
    pub token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Battle.net API credentials and endpoints
#[derive(Clone, Deserialize)]
pub struct BlizzardConfig {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_blizzard_oauth_url")]
    pub oauth_url: String,
    /// Replaces the per-region API host when set
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl std::fmt::Debug for BlizzardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlizzardConfig")
            .field("client_id", &self.client_id)
            .field("oauth_url", &self.oauth_url)
            .field("api_base_url", &self.api_base_url)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

/// Raider.IO public API
#[derive(Debug, Clone, Deserialize)]
pub struct RaiderIoConfig {
    #[serde(default = "default_raiderio_base_url")]
    pub base_url: String,
}

/// Roster reconciliation tuning
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Roster members below this level are ignored
    #[serde(default = "default_min_level")]
    pub min_level: i32,
    /// Members enriched concurrently per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Retries of a transient outbound failure
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    #[serde(default = "default_retry_base_ms")]
    pub retry_base_ms: u64,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            min_level: default_min_level(),
            batch_size: default_batch_size(),
            max_retries: default_max_retries(),
            retry_base_ms: default_retry_base_ms(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "guild-roster".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_migrations_dir() -> String {
    "./migrations".to_string()
}

fn default_token_expiry() -> i64 {
    3600 // 1 hour
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_blizzard_oauth_url() -> String {
    "https://oauth.battle.net/token".to_string()
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_raiderio_base_url() -> String {
    "https://raider.io".to_string()
}

fn default_min_level() -> i32 {
    10
}

fn default_batch_size() -> usize {
    10
}

fn default_max_retries() -> usize {
    2
}

fn default_retry_base_ms() -> u64 {
    200
}

fn default_http_timeout_secs() -> u64 {
    10
}

/// Reads one variable through the lookup function
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        (self.lookup)(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVar(key))
    }

    fn string_or(&self, key: &'static str, default: impl FnOnce() -> String) -> String {
        (self.lookup)(key).unwrap_or_else(default)
    }

    fn parsed<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        match (self.lookup)(key) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue(key, raw)),
        }
    }

    fn parsed_or<T: FromStr>(
        &self,
        key: &'static str,
        default: impl FnOnce() -> T,
    ) -> Result<T, ConfigError> {
        Ok(self.parsed(key)?.unwrap_or_else(default))
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or unparsable
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let sync = SyncConfig {
            min_level: vars.parsed_or("SYNC_MIN_LEVEL", default_min_level)?,
            batch_size: vars.parsed_or("SYNC_BATCH_SIZE", default_batch_size)?,
            max_retries: vars.parsed_or("SYNC_MAX_RETRIES", default_max_retries)?,
            retry_base_ms: vars.parsed_or("SYNC_RETRY_BASE_MS", default_retry_base_ms)?,
            http_timeout_secs: vars.parsed_or("HTTP_TIMEOUT_SECS", default_http_timeout_secs)?,
        };
        if sync.batch_size == 0 {
            return Err(ConfigError::InvalidValue("SYNC_BATCH_SIZE", "0".to_string()));
        }

        Ok(Self {
            app: AppSettings {
                name: vars.string_or("APP_NAME", default_app_name),
                env: vars.parsed_or("APP_ENV", Environment::default)?,
            },
            api: ServerConfig {
                host: vars.string_or("API_HOST", default_host),
                port: vars.parsed("API_PORT")?.ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars
                    .parsed_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: vars
                    .parsed_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                migrations_dir: vars.string_or("DATABASE_MIGRATIONS_DIR", default_migrations_dir),
            },
            jwt: JwtConfig {
                secret: vars.required("JWT_SECRET")?,
                token_expiry: vars.parsed_or("JWT_TOKEN_EXPIRY", default_token_expiry)?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parsed_or("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second)?,
                burst: vars.parsed_or("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: (vars.lookup)("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            blizzard: BlizzardConfig {
                client_id: vars.required("BLIZZARD_CLIENT_ID")?,
                client_secret: vars.required("BLIZZARD_CLIENT_SECRET")?,
                oauth_url: vars.string_or("BLIZZARD_OAUTH_URL", default_blizzard_oauth_url),
                api_base_url: (vars.lookup)("BLIZZARD_API_BASE_URL"),
                locale: vars.string_or("BLIZZARD_LOCALE", default_locale),
            },
            raiderio: RaiderIoConfig {
                base_url: vars.string_or("RAIDERIO_BASE_URL", default_raiderio_base_url),
            },
            sync,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
