//! Runtime configuration.
//!
//! Two values come from outside the app: the backend base URL and the admin identity.
//! Both can be set through the environment (a `.env` file is honoured by the binary):
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BAKERY_API_URL` | `https://telegram-server-dqpj.onrender.com/api` |
//! | `BAKERY_ADMIN_TELEGRAM_ID` | `123456789` |
//! | `BAKERY_HTTP_TIMEOUT_SECS` | `30` |

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://telegram-server-dqpj.onrender.com/api";
pub const DEFAULT_ADMIN_ID: &str = "123456789";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Admin id must not be empty")]
    EmptyAdminId,

    #[error("Invalid value for {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("HTTP timeout must be greater than 0")]
    ZeroTimeout,
}

/// Configuration for the storefront client.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Exact id that unlocks the admin screens in the UI.
    pub admin_id: String,
    /// Base URL every API path is appended to (no trailing slash).
    pub api_base_url: String,
    /// Timeout for a single HTTP request.
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admin_id: DEFAULT_ADMIN_ID.to_string(),
            api_base_url: DEFAULT_API_URL.to_string(),
            http_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by whatever is set in the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(admin_id) = std::env::var("BAKERY_ADMIN_TELEGRAM_ID") {
            config.admin_id = admin_id;
        }
        if let Ok(url) = std::env::var("BAKERY_API_URL") {
            config = config.with_api_base_url(url);
        }
        if let Ok(raw) = std::env::var("BAKERY_HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber {
                        var: "BAKERY_HTTP_TIMEOUT_SECS",
                        value: raw.clone(),
                    })?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_admin_id(mut self, admin_id: impl Into<String>) -> Self {
        self.admin_id = admin_id.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_http_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout_secs = timeout_secs;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin_id.trim().is_empty() {
            return Err(ConfigError::EmptyAdminId);
        }
        let url = Url::parse(&self.api_base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.api_base_url.clone(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }
        if self.http_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = AppConfig::new().with_api_base_url("http://localhost:3000/api/");
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            AppConfig::new().with_admin_id("  ").validate(),
            Err(ConfigError::EmptyAdminId)
        );
        assert!(matches!(
            AppConfig::new().with_api_base_url("ftp://x").validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            AppConfig::new().with_api_base_url("not a url").validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert_eq!(
            AppConfig::new().with_http_timeout(0).validate(),
            Err(ConfigError::ZeroTimeout)
        );
    }
}
