//! Mapping of relay outcomes onto HTTP responses.

use crate::error::RelayError;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Successful analysis body.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub text: String,
}

impl IntoResponse for AnalyzeResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CACHE_CONTROL, "no-store")],
            Json(self),
        )
            .into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl RelayError {
    /// HTTP status returned to the caller for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Configuration(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::MethodNotAllowed => (status, [(header::ALLOW, "POST")]).into_response(),
            Self::Upstream {
                message,
                detail,
                status_code,
            } => (
                status,
                Json(ErrorBody {
                    error: message,
                    detail: Some(detail),
                    status: status_code,
                }),
            )
                .into_response(),
            other => (
                status,
                Json(ErrorBody {
                    error: other.public_message(),
                    detail: None,
                    status: None,
                }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            RelayError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            RelayError::Configuration("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RelayError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let upstream = RelayError::Upstream {
            message: "m".into(),
            detail: "d".into(),
            status_code: None,
        };
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_success_disables_caching() {
        let resp = AnalyzeResponse {
            text: "ok".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CACHE_CONTROL], "no-store");
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_method_not_allowed_advertises_post() {
        let resp = RelayError::MethodNotAllowed.into_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()[header::ALLOW], "POST");
    }
}
