use std::env;

use crate::client::DEFAULT_BASE_URL;
use crate::error::ConfigError;
use crate::types::Credentials;

/// Rejected login used when `PETFRIENDS_INVALID_EMAIL` is unset.
pub const DEFAULT_INVALID_EMAIL: &str = "invalid@example.com";
pub const DEFAULT_INVALID_PASSWORD: &str = "not-a-password";

/// Where the suite points and which accounts it uses.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub valid: Credentials,
    pub invalid: Credentials,
}

impl Settings {
    /// Load settings from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build settings from any variable source; `from_env` passes the process environment.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        Ok(Self {
            base_url: var("PETFRIENDS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            valid: Credentials::new(required("PETFRIENDS_EMAIL")?, required("PETFRIENDS_PASSWORD")?),
            invalid: Credentials::new(
                var("PETFRIENDS_INVALID_EMAIL").unwrap_or_else(|| DEFAULT_INVALID_EMAIL.to_string()),
                var("PETFRIENDS_INVALID_PASSWORD").unwrap_or_else(|| DEFAULT_INVALID_PASSWORD.to_string()),
            ),
        })
    }

    /// True when `PETFRIENDS_BASE_URL` is set (after loading `.env`).
    pub fn live_target_configured() -> bool {
        dotenvy::dotenv().ok();
        env::var_os("PETFRIENDS_BASE_URL").is_some()
    }
}
