//! Error handling for the HTTP layer

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use crate::services::llm::GenerationError;

/// Errors that map onto the `{error, ...}` JSON bodies returned to the browser.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("API key not configured")]
    MissingCredential,

    #[error("Gemini API error")]
    Upstream(Value),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::MissingCredential => ApiError::MissingCredential,
            GenerationError::Upstream { body, .. } => ApiError::Upstream(body),
            other => ApiError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            ApiError::MissingCredential => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "API key not configured" }),
            ),
            ApiError::Upstream(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Gemini API error", "details": details }),
            ),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "error": "Method not allowed" }),
            ),
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error", "message": e.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn bad_request_maps_to_400_with_error_field() {
        let response = ApiError::bad_request("Image is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Image is required" }));
    }

    #[tokio::test]
    async fn upstream_error_attaches_details() {
        let details = json!({ "error": { "code": 429, "message": "quota" } });
        let response = ApiError::Upstream(details.clone()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Gemini API error");
        assert_eq!(body["details"], details);
    }

    #[tokio::test]
    async fn missing_credential_has_fixed_message() {
        let err: ApiError = GenerationError::MissingCredential.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "API key not configured" })
        );
    }

    #[tokio::test]
    async fn internal_error_carries_message() {
        let response = ApiError::Internal(anyhow::anyhow!("connection reset")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["message"], "connection reset");
    }
}
