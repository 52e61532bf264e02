//! Sub-configuration structs with deployment defaults.

use crate::prompt::{DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_PROMPT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// TCP port to bind
    pub port: u16,

    /// Path the analysis handler is mounted at
    pub route: String,

    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            route: "/api/analyze".to_string(),
            max_body_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Upstream provider selection and per-provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Which adapter to use: "openai" (Responses API) or "openrouter" (chat completions)
    pub provider: String,

    /// Upstream call timeout in milliseconds
    pub timeout_ms: u64,

    /// OpenAI Responses API configuration
    pub openai: Option<OpenAiConfig>,

    /// OpenRouter chat completions configuration
    pub openrouter: Option<OpenRouterConfig>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            timeout_ms: 60000,
            openai: None,
            openrouter: None,
        }
    }
}

/// OpenAI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Responses API endpoint
    pub endpoint: String,

    /// API key reference (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/responses".to_string(),
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}

/// OpenRouter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenRouterConfig {
    /// Chat completions endpoint
    pub endpoint: String,

    /// API key reference (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,

    /// Sent as `HTTP-Referer` for OpenRouter attribution
    pub referer: Option<String>,

    /// Sent as `X-Title` for OpenRouter attribution
    pub title: Option<String>,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            api_key: "${OPENROUTER_API_KEY}".to_string(),
            model: "openai/gpt-4o-mini".to_string(),
            referer: None,
            title: None,
        }
    }
}

/// Prompt text attached to every upstream request.
///
/// A `*_file` path, when set, takes precedence over the inline string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// System role persona
    pub system: String,

    /// User role instruction
    pub user: String,

    /// Optional file holding the system prompt (supports ~)
    pub system_file: Option<PathBuf>,

    /// Optional file holding the user prompt (supports ~)
    pub user_file: Option<PathBuf>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            user: DEFAULT_USER_PROMPT.to_string(),
            system_file: None,
            user_file: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
