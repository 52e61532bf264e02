//! Upstream multimodal API integration.
//!
//! A [`ProviderAdapter`] describes one API variant (OpenAI Responses or
//! chat completions), [`UpstreamClient`] performs the call, and
//! [`extract_text`] normalizes whatever comes back.

pub(crate) mod adapter;
pub(crate) mod chat;
pub(crate) mod client;
pub(crate) mod extract;
pub(crate) mod responses;

pub use adapter::{
    resolve_credential, resolve_env_var, AnalysisRequest, ImageInput, ProviderAdapter,
    ProviderFactory, SUPPORTED_PROVIDERS,
};
pub use chat::ChatCompletionsAdapter;
pub use client::{summarize_error_detail, UpstreamClient};
pub use extract::extract_text;
pub use responses::ResponsesAdapter;
