use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum idle connections in pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    /// Client certificate profile; None uses the URL's own TLS settings
    pub tls: Option<TlsConfig>,
}

/// Certificate material for the database connection
#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    /// Profile name, shown in logs
    #[serde(default = "default_tls_profile")]
    pub profile: String,
    /// sslmode: require, verify-ca or verify-full
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
    pub ca_cert: String,
    pub client_cert: String,
    pub client_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Allowed CORS origins (comma-separated, or "*" for any)
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// OpenAI-compatible chat completions endpoint
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_classifier_model")]
    pub model: String,
    #[serde(default = "default_classifier_timeout")]
    pub timeout_secs: u64,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8081 }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_tls_profile() -> String { "custom".to_string() }
fn default_ssl_mode() -> String { "require".to_string() }
fn default_cors_origins() -> String { "*".to_string() }
fn default_classifier_model() -> String { "gpt-4o-mini".to_string() }
fn default_classifier_timeout() -> u64 { 20 }

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            server: ServerConfig {
                host: std::env::var("HOST").unwrap_or_else(|_| default_host()),
                port: std::env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or_else(default_port),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .context("DATABASE_URL must be set")?,
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: std::env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or_else(default_min_connections),
                connect_timeout_secs: std::env::var("DATABASE_CONNECT_TIMEOUT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or_else(default_connect_timeout),
                idle_timeout_secs: std::env::var("DATABASE_IDLE_TIMEOUT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or_else(default_idle_timeout),
                tls: TlsConfig::from_parts(
                    std::env::var("DATABASE_TLS_PROFILE").ok(),
                    std::env::var("DATABASE_SSL_MODE").ok(),
                    std::env::var("DATABASE_CA_CERT").ok(),
                    std::env::var("DATABASE_CLIENT_CERT").ok(),
                    std::env::var("DATABASE_CLIENT_KEY").ok(),
                )?,
            },
            security: SecurityConfig {
                cors_origins: std::env::var("CORS_ORIGINS")
                    .unwrap_or_else(|_| default_cors_origins()),
            },
            classifier: ClassifierConfig {
                api_url: std::env::var("CLASSIFIER_API_URL").ok(),
                api_key: std::env::var("CLASSIFIER_API_KEY").ok(),
                model: std::env::var("CLASSIFIER_MODEL")
                    .unwrap_or_else(|_| default_classifier_model()),
                timeout_secs: std::env::var("CLASSIFIER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or_else(default_classifier_timeout),
            },
        })
    }
}

impl TlsConfig {
    /// Build from optional settings; the three file paths go together
    pub fn from_parts(
        profile: Option<String>,
        ssl_mode: Option<String>,
        ca_cert: Option<String>,
        client_cert: Option<String>,
        client_key: Option<String>,
    ) -> Result<Option<Self>> {
        match (ca_cert, client_cert, client_key) {
            (None, None, None) => Ok(None),
            (Some(ca_cert), Some(client_cert), Some(client_key)) => Ok(Some(TlsConfig {
                profile: profile.unwrap_or_else(default_tls_profile),
                ssl_mode: ssl_mode.unwrap_or_else(default_ssl_mode),
                ca_cert,
                client_cert,
                client_key,
            })),
            _ => bail!(
                "DATABASE_CA_CERT, DATABASE_CLIENT_CERT and DATABASE_CLIENT_KEY must be set together"
            ),
        }
    }
}
