//! Configuration loading from TOML files.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::{fmt as subscriber_fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub broker: BrokerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Broker endpoint and credentials.
///
/// The secret is part of Basic-auth credentials; `Debug` redacts it.
#[derive(Clone, Deserialize)]
pub struct BrokerConfig {
    /// Base URI session-creation requests are POSTed to.
    pub uri: String,
    pub key: String,
    pub secret: String,
    #[serde(default)]
    pub http: HttpConfig,
}

impl fmt::Debug for BrokerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerConfig")
            .field("uri", &self.uri)
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("http", &self.http)
            .finish()
    }
}

/// Transport-level timeouts for the broker HTTP client. The core itself adds
/// no retry or backoff on top.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        // pick up a .env file before applying environment overrides
        let _ = dotenvy::dotenv();

        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;

        // credentials from the environment win over the file, so the secret
        // never has to live on disk
        if let Ok(key) = std::env::var("MUSTER_BROKER_KEY") {
            config.broker.key = key;
        }
        if let Ok(secret) = std::env::var("MUSTER_BROKER_SECRET") {
            config.broker.secret = secret;
        }

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.broker.uri.is_empty() {
            return Err(ConfigError::MissingField { field: "broker.uri" }.into());
        }
        url::Url::parse(&self.broker.uri).map_err(|e| ConfigError::InvalidValue {
            field: "broker.uri",
            reason: e.to_string(),
        })?;
        if self.broker.key.is_empty() {
            return Err(ConfigError::MissingField { field: "broker.key" }.into());
        }
        if self.broker.http.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "broker.http.timeout_ms",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                subscriber_fmt().json().with_env_filter(filter).init();
            }
            _ => {
                subscriber_fmt().with_env_filter(filter).init();
            }
        }
    }
}
