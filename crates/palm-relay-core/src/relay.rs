//! The relay pipeline: credential → payload → upstream call → text.

use crate::config::Config;
use crate::error::Result;
use crate::prompt::PromptSet;
use crate::upstream::{
    resolve_credential, AnalysisRequest, ProviderAdapter, ProviderFactory, UpstreamClient,
};
use std::time::{Duration, Instant};

/// Stateless relay shared by every request.
///
/// Holds the selected adapter, the prompt pair and one HTTP client. Nothing
/// here is mutated after construction.
pub struct Relay {
    adapter: Box<dyn ProviderAdapter>,
    prompts: PromptSet,
    client: UpstreamClient,
}

impl Relay {
    pub fn new(adapter: Box<dyn ProviderAdapter>, prompts: PromptSet, timeout: Duration) -> Self {
        Self {
            adapter,
            prompts,
            client: UpstreamClient::new(timeout),
        }
    }

    /// Build the relay from configuration.
    ///
    /// The credential is not resolved here. It is read on every request, and
    /// a missing key is a per-request configuration error.
    pub fn from_config(config: &Config) -> Result<Self> {
        let adapter = ProviderFactory::create(&config.upstream)?;
        let prompts = PromptSet::from_config(&config.prompts)?;
        tracing::debug!(
            provider = adapter.name(),
            model = adapter.model(),
            endpoint = adapter.endpoint(),
            "Relay configured"
        );
        Ok(Self::new(
            adapter,
            prompts,
            Duration::from_millis(config.upstream.timeout_ms),
        ))
    }

    pub fn provider_name(&self) -> &str {
        self.adapter.name()
    }

    pub fn model(&self) -> &str {
        self.adapter.model()
    }

    /// Send one image to the upstream API and return the trimmed text reply.
    pub async fn analyze(&self, image_data_url: &str) -> Result<String> {
        let start = Instant::now();
        let api_key = resolve_credential(self.adapter.as_ref())?;

        let request = AnalysisRequest {
            system_prompt: &self.prompts.system,
            user_prompt: &self.prompts.user,
            image_url: image_data_url,
        };
        let payload = self.adapter.build_payload(&request)?;

        let body = self
            .client
            .post_json(self.adapter.as_ref(), &api_key, &payload)
            .await?;

        let text = self.adapter.extract_text(&body).trim().to_string();
        tracing::info!(
            provider = self.adapter.name(),
            chars = text.chars().count(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Analysis completed"
        );
        Ok(text)
    }
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("provider", &self.adapter.name())
            .field("model", &self.adapter.model())
            .field("timeout", &self.client.timeout())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OpenAiConfig;
    use crate::error::RelayError;

    fn config_with_key_ref(api_key: &str) -> Config {
        let mut config = Config::default();
        config.upstream.openai = Some(OpenAiConfig {
            endpoint: "http://127.0.0.1:9/unreachable".to_string(),
            api_key: api_key.to_string(),
            model: "gpt-4o-mini".to_string(),
        });
        config
    }

    #[test]
    fn test_from_config_defaults() {
        let relay = Relay::from_config(&Config::default()).unwrap();
        assert_eq!(relay.provider_name(), "openai");
        assert_eq!(relay.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_from_config_rejects_unknown_provider() {
        let mut config = Config::default();
        config.upstream.provider = "nope".to_string();
        assert!(matches!(
            Relay::from_config(&config),
            Err(RelayError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_upstream() {
        let relay = Relay::from_config(&config_with_key_ref("${PALM_RELAY_TEST_NO_KEY}")).unwrap();
        let err = relay
            .analyze("data:image/png;base64,AAAA")
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_upstream_error() {
        let relay = Relay::from_config(&config_with_key_ref("literal-test-key")).unwrap();
        let err = relay
            .analyze("data:image/png;base64,AAAA")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RelayError::Upstream {
                status_code: None,
                ..
            }
        ));
    }
}
