// src/config.rs
use std::time::Duration;

pub const DEFAULT_WEBHOOK_URL: &str =
    "https://n8n-a48r.onrender.com/webhook/api/agent/web-search/v1";
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_USER_ID: &str = "default_user";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub webhook_url: String,
    /// Sent verbatim as the `Authorization` header; empty when unset.
    pub auth_header: String,
    pub user_id: String,
    pub bind_addr: String,
    pub session_ttl: Duration,
    pub translate_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            auth_header: String::new(),
            user_id: DEFAULT_USER_ID.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup, falling back to defaults.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let session_ttl = match lookup("SESSION_TTL_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "SESSION_TTL_SECS",
                    value: raw.clone(),
                })?;
                Duration::from_secs(secs)
            }
            None => defaults.session_ttl,
        };

        Ok(Self {
            webhook_url: lookup("WEBHOOK_URL").unwrap_or(defaults.webhook_url),
            auth_header: lookup("AUTH_HEADER").unwrap_or(defaults.auth_header),
            user_id: lookup("USER_ID").unwrap_or(defaults.user_id),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            session_ttl,
            translate_url: lookup("TRANSLATE_URL").unwrap_or(defaults.translate_url),
        })
    }
}
