//! Chat Completions adapter (OpenRouter and other OpenAI-compatible APIs).
//!
//! The system prompt is a plain string message; the user message carries a
//! content array with the instruction text and the image as a data URL.

use super::adapter::{AnalysisRequest, ProviderAdapter};
use crate::error::RelayError;
use serde::Serialize;
use serde_json::Value;

/// Adapter for the chat-completions `messages` shape.
pub struct ChatCompletionsAdapter {
    name: String,
    endpoint: String,
    api_key_ref: String,
    model: String,
    referer: Option<String>,
    title: Option<String>,
}

impl ChatCompletionsAdapter {
    pub fn new(name: &str, endpoint: &str, api_key_ref: &str, model: &str) -> Self {
        Self {
            name: name.to_string(),
            endpoint: endpoint.to_string(),
            api_key_ref: api_key_ref.to_string(),
            model: model.to_string(),
            referer: None,
            title: None,
        }
    }

    /// Set the OpenRouter attribution headers (`HTTP-Referer`, `X-Title`).
    pub fn with_attribution(mut self, referer: Option<String>, title: Option<String>) -> Self {
        self.referer = referer.filter(|r| !r.is_empty());
        self.title = title.filter(|t| !t.is_empty());
        self
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ChatContent<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ChatContent<'a> {
    #[serde(rename = "text")]
    Text { text: &'a str },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

impl ProviderAdapter for ChatCompletionsAdapter {
    fn name(&self) -> &str {
        &self.name
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
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(request.system_prompt),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ChatContent::Text {
                            text: request.user_prompt,
                        },
                        ChatContent::ImageUrl {
                            image_url: ImageUrl {
                                url: request.image_url,
                            },
                        },
                    ]),
                },
            ],
        };

        serde_json::to_value(&body).map_err(|e| {
            RelayError::Internal(format!("Failed to build {} payload: {e}", self.name))
        })
    }

    fn extra_headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::new();
        if let Some(referer) = &self.referer {
            headers.push(("HTTP-Referer", referer.clone()));
        }
        if let Some(title) = &self.title {
            headers.push(("X-Title", title.clone()));
        }
        headers
    }
}
