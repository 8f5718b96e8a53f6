use crate::default_struct;
use std::{path::PathBuf, time::Duration};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

default_struct! {
/// Per-invocation message handling knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSettings {
    pub command_prefix: String = "!".to_string(),
    /// How long tracked replies stay in the channel after a command ends.
    pub cleanup_delay: Duration = Duration::from_secs(30),
    /// `None` waits for an answer indefinitely.
    pub prompt_timeout: Option<Duration> = Some(Duration::from_secs(120)),
}
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub bungie_api_key: String,
    pub data_dir: PathBuf,
    pub messages: MessageSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let seconds = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            match lookup(key) {
                None => Ok(None),
                Some(value) => value
                    .trim()
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|_| ConfigError::Invalid { key, value }),
            }
        };

        let mut messages = MessageSettings::default();
        if let Some(prefix) = lookup("COMMAND_PREFIX") {
            if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
                return Err(ConfigError::Invalid {
                    key: "COMMAND_PREFIX",
                    value: prefix,
                });
            }
            messages.command_prefix = prefix;
        }
        if let Some(secs) = seconds("CLEANUP_DELAY_SECS")? {
            messages.cleanup_delay = Duration::from_secs(secs);
        }
        if let Some(secs) = seconds("PROMPT_TIMEOUT_SECS")? {
            messages.prompt_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(Self {
            discord_token: required("DISCORD_TOKEN")?,
            bungie_api_key: required("BUNGIE_API_KEY")?,
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            messages,
        })
    }
}
