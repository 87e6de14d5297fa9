//! Server configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` (when present) and then builds [`AppConfig`] once at
//! startup. LLM and vector-store settings live in their own modules because
//! both integrations are optional; everything here is needed to boot.

use std::str::FromStr;

use jsonwebtoken::Algorithm;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEV_SECRET_KEY: &str = "fallback_secret_key_for_development";
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;
pub const DEFAULT_CHATBOT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_CHATBOT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_RETRIEVAL_TOP_K: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("invalid {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

// =============================================================================
// AUTH
// =============================================================================

/// Bearer token signing settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    pub algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
}

impl AuthConfig {
    /// - `SECRET_KEY`: signing secret (development fallback when absent)
    /// - `ALGORITHM`: JWT algorithm name, default `HS256`
    /// - `ACCESS_TOKEN_EXPIRE_MINUTES`: default 30
    ///
    /// # Errors
    ///
    /// Returns an error if `ALGORITHM` is not a known JWT algorithm.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret_key = match std::env::var("SECRET_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                tracing::warn!("SECRET_KEY not set; using development fallback");
                DEV_SECRET_KEY.to_string()
            }
        };
        let raw_alg = std::env::var("ALGORITHM").unwrap_or_else(|_| "HS256".into());
        let algorithm =
            Algorithm::from_str(&raw_alg).map_err(|_| ConfigError::Invalid { key: "ALGORITHM", value: raw_alg })?;
        let access_token_expire_minutes =
            env_parse("ACCESS_TOKEN_EXPIRE_MINUTES", DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES);

        Ok(Self { secret_key, algorithm, access_token_expire_minutes })
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: DEV_SECRET_KEY.to_string(),
            algorithm: Algorithm::HS256,
            access_token_expire_minutes: DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
        }
    }
}

// =============================================================================
// CHATBOT
// =============================================================================

/// Sampling and retrieval knobs for the textbook assistant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatbotConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub retrieval_top_k: usize,
}

impl ChatbotConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            temperature: env_parse("CHATBOT_TEMPERATURE", DEFAULT_CHATBOT_TEMPERATURE),
            max_tokens: env_parse("CHATBOT_MAX_TOKENS", DEFAULT_CHATBOT_MAX_TOKENS),
            retrieval_top_k: env_parse("CHATBOT_TOP_K", DEFAULT_RETRIEVAL_TOP_K),
        }
    }
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_CHATBOT_TEMPERATURE,
            max_tokens: DEFAULT_CHATBOT_MAX_TOKENS,
            retrieval_top_k: DEFAULT_RETRIEVAL_TOP_K,
        }
    }
}

// =============================================================================
// APP
// =============================================================================

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    pub chatbot: ChatbotConfig,
}

impl AppConfig {
    /// | Variable | Default |
    /// |----------|---------|
    /// | `DATABASE_URL` | (required) |
    /// | `PORT` | `3000` |
    ///
    /// plus the [`AuthConfig`] and [`ChatbotConfig`] variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or `PORT`/`ALGORITHM` are malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { port, database_url, auth: AuthConfig::from_env()?, chatbot: ChatbotConfig::from_env() })
    }
}

pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
