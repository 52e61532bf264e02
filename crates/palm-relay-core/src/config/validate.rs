//! Configuration validation with range checks.

use crate::error::ConfigError;
use crate::server::HEALTH_ROUTE;
use crate::upstream::SUPPORTED_PROVIDERS;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_PROVIDERS.contains(&self.upstream.provider.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "upstream.provider must be one of {}, got '{}'",
                SUPPORTED_PROVIDERS.join(", "),
                self.upstream.provider
            )));
        }
        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "upstream.timeout_ms must be > 0".into(),
            ));
        }
        if let Some(openai) = &self.upstream.openai {
            if openai.endpoint.is_empty() || openai.model.is_empty() {
                return Err(ConfigError::ValidationError(
                    "upstream.openai.endpoint and upstream.openai.model must be set".into(),
                ));
            }
        }
        if let Some(openrouter) = &self.upstream.openrouter {
            if openrouter.endpoint.is_empty() || openrouter.model.is_empty() {
                return Err(ConfigError::ValidationError(
                    "upstream.openrouter.endpoint and upstream.openrouter.model must be set"
                        .into(),
                ));
            }
        }
        if !self.server.route.starts_with('/') {
            return Err(ConfigError::ValidationError(
                "server.route must start with '/'".into(),
            ));
        }
        if self.server.route == HEALTH_ROUTE {
            return Err(ConfigError::ValidationError(format!(
                "server.route must not be {HEALTH_ROUTE}"
            )));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "server.max_body_bytes must be > 0".into(),
            ));
        }
        if self.prompts.system_file.is_none() && self.prompts.system.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "prompts.system must not be empty".into(),
            ));
        }
        if self.prompts.user_file.is_none() && self.prompts.user.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "prompts.user must not be empty".into(),
            ));
        }
        Ok(())
    }
}
