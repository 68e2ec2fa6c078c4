//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub upstream: UpstreamConfig,
    pub aggregation: AggregationConfig,
    pub cors: CorsConfig,
    /// Directory holding the front-end page, served for unmatched GET paths
    #[serde(default)]
    pub static_dir: Option<String>,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
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

    fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Upstream statistics API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl UpstreamConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            timeout_secs: default_upstream_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Aggregation run settings
#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    /// Pause after each member's call group; 0 disables pacing
    #[serde(default = "default_pacing_interval")]
    pub pacing_interval_ms: u64,
    /// Request profile data (age, faction) with the current snapshot
    #[serde(default = "default_include_profile")]
    pub include_profile: bool,
    /// Upper bound for a whole analyze request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl AggregationConfig {
    #[must_use]
    pub fn pacing_interval(&self) -> Duration {
        Duration::from_millis(self.pacing_interval_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            pacing_interval_ms: default_pacing_interval(),
            include_profile: default_include_profile(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// CORS configuration. No origins means any origin is allowed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "faction-stats".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_upstream_base_url() -> String {
    "https://api.torn.com".to_string()
}

fn default_upstream_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "TornStats/1.0".to_string()
}

fn default_pacing_interval() -> u64 {
    700
}

fn default_include_profile() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    600 // 10 minutes
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to an unparseable value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: parse_or(&lookup, "API_PORT", default_port)?,
            },
            upstream: UpstreamConfig {
                base_url: lookup("UPSTREAM_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_upstream_base_url),
                timeout_secs: parse_or(&lookup, "UPSTREAM_TIMEOUT_SECS", default_upstream_timeout)?,
                user_agent: lookup("UPSTREAM_USER_AGENT").unwrap_or_else(default_user_agent),
            },
            aggregation: AggregationConfig {
                pacing_interval_ms: parse_or(&lookup, "PACING_INTERVAL_MS", default_pacing_interval)?,
                include_profile: match lookup("INCLUDE_PROFILE") {
                    Some(raw) => parse_bool(&raw)
                        .ok_or(ConfigError::InvalidValue("INCLUDE_PROFILE", raw))?,
                    None => default_include_profile(),
                },
                request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", default_request_timeout)?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            static_dir: lookup("STATIC_DIR").filter(|dir| !dir.trim().is_empty()),
        })
    }
}

/// Parse a variable if set, falling back to its default when unset
fn parse_or<F, T>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
