use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";
pub const DEFAULT_SUBMIT_URL: &str = "http://httpbin.org/post";
pub const DEFAULT_NOTIFICATION_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Read endpoint for the user table.
    pub users_url: String,
    /// Write endpoint receiving the identification payload.
    pub submit_url: String,
    /// How long a submission outcome stays on screen.
    pub notification_ms: u64,
    /// Restore default values after a successful submission.
    pub reset_on_success: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            users_url: DEFAULT_USERS_URL.to_string(),
            submit_url: DEFAULT_SUBMIT_URL.to_string(),
            notification_ms: DEFAULT_NOTIFICATION_MS,
            reset_on_success: false,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.users_url.trim().is_empty() {
            return Err(ConfigError::Invalid("users_url is empty".to_string()));
        }
        if self.submit_url.trim().is_empty() {
            return Err(ConfigError::Invalid("submit_url is empty".to_string()));
        }
        if self.notification_ms == 0 {
            return Err(ConfigError::Invalid(
                "notification_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}
