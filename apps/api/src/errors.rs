use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::llm_client::ProviderError;

/// Body text for every masked server-side failure.
pub const GENERATION_FAILED: &str = "Failed to generate cover letter";

/// Response header carrying the id logged with a masked failure.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only the missing-input variants reach the client verbatim. Everything else
/// is logged with a correlation id and answered with [`GENERATION_FAILED`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No resume provided")]
    MissingResume,

    #[error("No job description provided")]
    MissingJobDescription,

    #[error("Model credential is not configured (set GEMINI_API_KEY)")]
    MissingCredential,

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Model provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Request body is not a multipart form: {0}")]
    NotMultipart(#[from] axum::extract::multipart::MultipartRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::MissingResume | AppError::MissingJobDescription => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            AppError::MissingCredential
            | AppError::Multipart(_)
            | AppError::Provider(_)
            | AppError::NotMultipart(_) => {
                let correlation_id = Uuid::new_v4();
                tracing::error!(
                    correlation_id = %correlation_id,
                    error = ?self,
                    "Error generating cover letter: {}",
                    self
                );

                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": GENERATION_FAILED })),
                )
                    .into_response();
                if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
                    response.headers_mut().insert(CORRELATION_ID_HEADER, value);
                }
                response
            }
        }
    }
}
