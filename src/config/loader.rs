use std::env;

use url::Url;

use super::env::{AppConfig, ConfigError, DirectoryConfig, GeminiConfig, LoggingConfig};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = read("GEMINI_API_KEY").ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        let raw_base = read("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let gemini = GeminiConfig {
            api_key,
            model: read("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: parse_base_url(&raw_base)?,
        };

        let directories = DirectoryConfig {
            logs_dir: read("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: read("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        let display_timezone = read("DISPLAY_TIMEZONE").unwrap_or_else(|| "UTC".to_string());

        Ok(Self {
            gemini,
            directories,
            logging,
            display_timezone,
        })
    }
}

// Trailing slash keeps the version segment on relative joins.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized).map_err(|err| ConfigError::Invalid {
        key: "GEMINI_API_BASE",
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            key: "GEMINI_API_BASE",
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url)
}
