//! OpenAI adapter using the Responses API.
//!
//! Prompts and image travel as typed `input` content items rather than chat
//! messages.

use super::adapter::{AnalysisRequest, ProviderAdapter};
use crate::error::RelayError;
use serde::Serialize;
use serde_json::Value;

/// Adapter for the structured multimodal `input` shape.
pub struct ResponsesAdapter {
    endpoint: String,
    api_key_ref: String,
    model: String,
}

impl ResponsesAdapter {
    pub fn new(endpoint: &str, api_key_ref: &str, model: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key_ref: api_key_ref.to_string(),
            model: model.to_string(),
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
}

#[derive(Serialize)]
struct InputMessage<'a> {
    role: &'static str,
    content: Vec<InputContent<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum InputContent<'a> {
    #[serde(rename = "input_text")]
    Text { text: &'a str },
    #[serde(rename = "input_image")]
    Image { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

impl ProviderAdapter for ResponsesAdapter {
    fn name(&self) -> &str {
        "openai"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn api_key_ref(&self) -> &str {
        &self.api_key_ref
    }

    fn build_payload(&self, request: &AnalysisRequest<'_>) -> Result<Value, RelayError> {
        let body = ResponsesRequest {
            model: &self.model,
            input: vec![
                InputMessage {
                    role: "system",
                    content: vec![InputContent::Text {
                        text: request.system_prompt,
                    }],
                },
                InputMessage {
                    role: "user",
                    content: vec![
                        InputContent::Text {
                            text: request.user_prompt,
                        },
                        InputContent::Image {
                            image_url: ImageUrl {
                                url: request.image_url,
                            },
                        },
                    ],
                },
            ],
        };

        serde_json::to_value(&body)
            .map_err(|e| RelayError::Internal(format!("Failed to build OpenAI payload: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let adapter = ResponsesAdapter::new(
            "https://api.openai.com/v1/responses",
            "${OPENAI_API_KEY}",
            "gpt-4o-mini",
        );
        let request = AnalysisRequest {
            system_prompt: "sys",
            user_prompt: "usr",
            image_url: "data:image/png;base64,AAAA",
        };

        let payload = adapter.build_payload(&request).unwrap();
        assert_eq!(
            payload,
            json!({
                "model": "gpt-4o-mini",
                "input": [
                    {"role": "system", "content": [{"type": "input_text", "text": "sys"}]},
                    {"role": "user", "content": [
                        {"type": "input_text", "text": "usr"},
                        {"type": "input_image", "image_url": {"url": "data:image/png;base64,AAAA"}}
                    ]}
                ]
            })
        );
    }

    #[test]
    fn test_no_extra_headers() {
        let adapter = ResponsesAdapter::new("http://localhost", "k", "m");
        assert!(adapter.extra_headers().is_empty());
    }
}
