use std::env;

pub const DEMO_EMAIL: &str = "demo@petfriends.test";
pub const DEMO_PASSWORD: &str = "demo-password";
const DEFAULT_PORT: u16 = 3000;

/// An account the emulator accepts at `GET /api/key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfig {
    pub email: String,
    pub password: String,
}

impl AccountConfig {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub accounts: Vec<AccountConfig>,
    pub port: u16,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            accounts: vec![AccountConfig::new(DEMO_EMAIL, DEMO_PASSWORD)],
            port: DEFAULT_PORT,
        }
    }
}

impl MockConfig {
    pub fn with_accounts(accounts: Vec<AccountConfig>) -> Self {
        Self {
            accounts,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables, reading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable source; unset values fall back to the demo account.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let email = var("MOCK_EMAIL").unwrap_or_else(|| DEMO_EMAIL.to_string());
        let password = var("MOCK_PASSWORD").unwrap_or_else(|| DEMO_PASSWORD.to_string());
        let port = match var("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            accounts: vec![AccountConfig::new(&email, &password)],
            port,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn default_has_demo_account() {
        let config = MockConfig::default();
        assert_eq!(config.accounts, vec![AccountConfig::new(DEMO_EMAIL, DEMO_PASSWORD)]);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn with_accounts_keeps_default_port() {
        let config = MockConfig::with_accounts(vec![AccountConfig::new("a@b.c", "x")]);
        assert_eq!(config.accounts.len(), 1);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        let config = MockConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.accounts, MockConfig::default().accounts);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn account_and_port_are_read() {
        let config = MockConfig::from_lookup(lookup(&[
            ("MOCK_EMAIL", "qa@example.com"),
            ("MOCK_PASSWORD", "hunter2"),
            ("PORT", "8081"),
        ]))
        .unwrap();
        assert_eq!(config.accounts, vec![AccountConfig::new("qa@example.com", "hunter2")]);
        assert_eq!(config.port, 8081);
    }

    #[test]
    fn bad_port_is_rejected() {
        for raw in ["eighty", "70000", ""] {
            let err = MockConfig::from_lookup(lookup(&[("PORT", raw)])).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid("PORT")), "{raw:?}");
        }
        let err = MockConfig::from_lookup(lookup(&[("PORT", "x")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for environment variable PORT");
    }

    // The only test in this crate that touches the process environment.
    #[test]
    fn from_env_reads_process_environment() {
        env::set_var("MOCK_EMAIL", "env@example.com");
        env::set_var("MOCK_PASSWORD", "env-pass");
        env::set_var("PORT", "4010");

        let config = MockConfig::from_env().unwrap();
        assert_eq!(config.accounts, vec![AccountConfig::new("env@example.com", "env-pass")]);
        assert_eq!(config.port, 4010);

        env::set_var("PORT", "not-a-port");
        assert!(matches!(MockConfig::from_env(), Err(ConfigError::Invalid("PORT"))));

        env::remove_var("MOCK_EMAIL");
        env::remove_var("MOCK_PASSWORD");
        env::remove_var("PORT");
    }
}
