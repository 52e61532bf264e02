//! Route handlers.

use super::response::AnalyzeResponse;
use crate::error::RelayError;
use crate::relay::Relay;
use crate::VERSION;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

/// Handler for `ANY {server.route}`.
///
/// Every outcome, including an unreadable or oversized body and a panic in
/// the relay pipeline, becomes a JSON response here.
pub async fn analyze(
    method: Method,
    State(relay): State<Arc<Relay>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let start = Instant::now();
    let result = handle(&method, &relay, body).await;

    match result {
        Ok(text) => AnalyzeResponse { text }.into_response(),
        Err(err) => {
            match &err {
                RelayError::MethodNotAllowed | RelayError::BadRequest(_) => {
                    tracing::debug!(method = %method, "Rejected request: {err}")
                }
                _ => tracing::warn!(
                    provider = relay.provider_name(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Analysis failed: {err}"
                ),
            }
            err.into_response()
        }
    }
}

async fn handle(
    method: &Method,
    relay: &Relay,
    body: Result<Bytes, BytesRejection>,
) -> Result<String, RelayError> {
    if *method != Method::POST {
        return Err(RelayError::MethodNotAllowed);
    }
    let body = body.map_err(|rejection| RelayError::BadRequest(rejection.body_text()))?;
    let image_data_url = parse_image_data_url(&body)?;

    AssertUnwindSafe(relay.analyze(&image_data_url))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(RelayError::Internal(panic_message(panic.as_ref()))))
}

/// Pull `imageDataURL` out of the request body.
///
/// The field must be a non-empty string; its contents are not inspected.
pub fn parse_image_data_url(body: &[u8]) -> Result<String, RelayError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RelayError::BadRequest(format!("Request body must be JSON: {e}")))?;

    value
        .get("imageDataURL")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| RelayError::BadRequest("imageDataURL missing".to_string()))
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unexpected failure".to_string())
}

/// Handler for `GET /api/health`.
pub async fn health(State(relay): State<Arc<Relay>>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "provider": relay.provider_name(),
        "model": relay.model(),
        "version": VERSION,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_body() {
        let url = parse_image_data_url(br#"{"imageDataURL":"data:image/png;base64,AAAA"}"#).unwrap();
        assert_eq!(url, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let err = parse_image_data_url(br#"{"image":"data:image/png;base64,AAAA"}"#).unwrap_err();
        assert!(matches!(err, RelayError::BadRequest(ref m) if m == "imageDataURL missing"));
    }

    #[test]
    fn test_parse_rejects_non_string_field() {
        for body in [
            &br#"{"imageDataURL":42}"#[..],
            &br#"{"imageDataURL":null}"#[..],
            &br#"{"imageDataURL":["data:"]}"#[..],
            &br#"{"imageDataURL":""}"#[..],
            &br#"["imageDataURL"]"#[..],
        ] {
            assert!(matches!(
                parse_image_data_url(body),
                Err(RelayError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_image_data_url(b"imageDataURL=abc").unwrap_err();
        assert!(err.public_message().contains("JSON"));
    }

    #[test]
    fn test_panic_message_extraction() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(boxed.as_ref()), "owned boom");
        let boxed: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(boxed.as_ref()), "unexpected failure");
    }
}
