use std::fmt;
use thiserror::Error;
use tracing::debug;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),
}

/// Credentials read from the process environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Secrets {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Secrets {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the secrets from an arbitrary lookup. Unset and empty values
    /// both count as missing, and every missing name is collected before
    /// failing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut fetch = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                debug!(variable = name, "Required variable not set");
                missing.push(name);
                String::new()
            }
        };

        let practicum_token = fetch(PRACTICUM_TOKEN);
        let telegram_token = fetch(TELEGRAM_TOKEN);
        let telegram_chat_id = fetch(TELEGRAM_CHAT_ID);

        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
        })
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}
