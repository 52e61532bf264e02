//! Provider adapter trait, request types, and the adapter factory.
//!
//! An adapter bundles everything specific to one upstream API variant:
//! endpoint, credential reference, payload shape, extra headers, and text
//! extraction. The HTTP call itself is shared (see [`super::client`]).

use super::extract;
use crate::config::UpstreamConfig;
use crate::error::RelayError;
use base64::Engine;
use serde_json::Value;

/// Provider names accepted in `upstream.provider`.
pub const SUPPORTED_PROVIDERS: &[&str] = &["openai", "openrouter"];

/// Base64-encoded image ready to send as a data URL.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Create an `ImageInput` from raw bytes and a format/extension string.
    pub fn from_bytes(bytes: &[u8], format: &str) -> Self {
        let media_type = match format.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "heic" => "image/heic",
            other => {
                tracing::warn!("Unknown image format '{other}', defaulting to image/jpeg");
                "image/jpeg"
            }
        };

        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }

    /// Return a `data:` URL for the image.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// One analysis request as seen by an adapter.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    /// System role persona
    pub system_prompt: &'a str,
    /// User role instruction
    pub user_prompt: &'a str,
    /// Image reference, passed through untouched (normally a data URL)
    pub image_url: &'a str,
}

/// Everything that differs between upstream API variants.
pub trait ProviderAdapter: Send + Sync {
    /// Provider name for logging (e.g., "openai", "openrouter").
    fn name(&self) -> &str;

    /// Full URL the payload is POSTed to.
    fn endpoint(&self) -> &str;

    /// Model identifier placed in the payload.
    fn model(&self) -> &str;

    /// Credential reference, usually `${ENV_VAR}`.
    fn api_key_ref(&self) -> &str;

    /// Build the JSON request body for this API variant.
    fn build_payload(&self, request: &AnalysisRequest<'_>) -> Result<Value, RelayError>;

    /// Headers sent in addition to bearer auth.
    fn extra_headers(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Pull the generated text out of a successful response body.
    fn extract_text(&self, body: &Value) -> String {
        extract::extract_text(body)
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
///
/// An unset or empty variable resolves to `None`.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Resolve the bearer credential for an adapter, failing closed.
///
/// The error names the missing variable, never a value.
pub fn resolve_credential(adapter: &dyn ProviderAdapter) -> Result<String, RelayError> {
    let reference = adapter.api_key_ref();
    resolve_env_var(reference).ok_or_else(|| {
        let message = match reference
            .strip_prefix("${")
            .and_then(|r| r.strip_suffix('}'))
        {
            Some(var_name) => format!("{var_name} is not set"),
            None => format!("{} API key is not configured", adapter.name()),
        };
        RelayError::Configuration(message)
    })
}

/// Factory that creates the configured adapter.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the adapter named by `upstream.provider`.
    ///
    /// Missing provider sections fall back to their defaults. Credentials are
    /// not resolved here; that happens per request.
    pub fn create(config: &UpstreamConfig) -> Result<Box<dyn ProviderAdapter>, RelayError> {
        match config.provider.as_str() {
            "openai" => {
                let cfg = config.openai.clone().unwrap_or_default();
                Ok(Box::new(super::responses::ResponsesAdapter::new(
                    &cfg.endpoint,
                    &cfg.api_key,
                    &cfg.model,
                )))
            }
            "openrouter" => {
                let cfg = config.openrouter.clone().unwrap_or_default();
                Ok(Box::new(
                    super::chat::ChatCompletionsAdapter::new(
                        "openrouter",
                        &cfg.endpoint,
                        &cfg.api_key,
                        &cfg.model,
                    )
                    .with_attribution(cfg.referer, cfg.title),
                ))
            }
            other => Err(RelayError::Configuration(format!(
                "Unknown upstream provider: {other}"
            ))),
        }
    }
}
