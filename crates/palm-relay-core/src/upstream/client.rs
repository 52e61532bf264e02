//! The single outbound call to the upstream API.

use super::adapter::ProviderAdapter;
use crate::error::RelayError;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Shared HTTP client with a bounded per-request timeout.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST `payload` to the adapter's endpoint and return the parsed JSON body.
    ///
    /// Transport failures, timeouts, non-2xx statuses and non-JSON bodies all
    /// become [`RelayError::Upstream`].
    pub async fn post_json(
        &self,
        adapter: &dyn ProviderAdapter,
        api_key: &str,
        payload: &Value,
    ) -> Result<Value, RelayError> {
        let start = Instant::now();

        let mut request = self
            .client
            .post(adapter.endpoint())
            .bearer_auth(api_key)
            .json(payload)
            .timeout(self.timeout);
        for (name, value) in adapter.extra_headers() {
            request = request.header(name, value);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| self.transport_error(adapter, e))?;

        let status = resp.status();
        tracing::debug!(
            provider = adapter.name(),
            status = status.as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(RelayError::Upstream {
                message: "Upstream API error".to_string(),
                detail: summarize_error_detail(&text),
                status_code: Some(status.as_u16()),
            });
        }

        let text = resp
            .text()
            .await
            .map_err(|e| self.transport_error(adapter, e))?;

        // `status_code` only carries upstream failure statuses, never a 2xx
        serde_json::from_str(&text).map_err(|e| RelayError::Upstream {
            message: "Upstream returned invalid JSON".to_string(),
            detail: e.to_string(),
            status_code: None,
        })
    }

    fn transport_error(&self, adapter: &dyn ProviderAdapter, err: reqwest::Error) -> RelayError {
        if err.is_timeout() {
            RelayError::Upstream {
                message: "Upstream request timed out".to_string(),
                detail: format!(
                    "{} did not respond within {}ms",
                    adapter.name(),
                    self.timeout.as_millis()
                ),
                status_code: None,
            }
        } else {
            RelayError::Upstream {
                message: "Upstream request failed".to_string(),
                detail: err.to_string(),
                status_code: None,
            }
        }
    }
}

/// Best-effort summary of an upstream error body.
///
/// Surfaces a nested `error` field when the body is JSON (its `message` when
/// the error is an object). Otherwise the raw text passes through.
pub fn summarize_error_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    match value.get("error") {
        Some(Value::String(message)) => message.clone(),
        Some(error) => error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_surfaces_string_error() {
        assert_eq!(
            summarize_error_detail(r#"{"error":"rate limited"}"#),
            "rate limited"
        );
    }

    #[test]
    fn test_detail_surfaces_nested_message() {
        let body = r#"{"error":{"message":"Invalid API key","type":"invalid_request_error"}}"#;
        assert_eq!(summarize_error_detail(body), "Invalid API key");
    }

    #[test]
    fn test_detail_serializes_error_object_without_message() {
        let body = r#"{"error":{"code":42}}"#;
        assert_eq!(summarize_error_detail(body), r#"{"code":42}"#);
    }

    #[test]
    fn test_detail_passes_raw_text_through() {
        assert_eq!(summarize_error_detail("Bad Gateway"), "Bad Gateway");
        assert_eq!(summarize_error_detail(r#"{"msg":"x"}"#), r#"{"msg":"x"}"#);
        assert_eq!(summarize_error_detail(""), "");
    }
}
