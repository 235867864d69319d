use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt::Display;
use utoipa::ToSchema;

const INTERNAL_DETAIL_LIMIT: usize = 120;

/// Errors surfaced to API clients as `{"detail": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Missing required multipart field '{0}'")]
    MissingUpload(&'static str),
    #[error("Prediction failed: {0}")]
    Internal(String),
}

impl ApiError {
    /// Wraps an unexpected failure, keeping only the head of its message.
    pub fn internal(e: impl Display) -> Self {
        ApiError::Internal(truncated(e, INTERNAL_DETAIL_LIMIT))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingUpload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody { detail: self.to_string() })
    }
}

/// First `limit` characters of `msg`'s display form.
pub fn truncated(msg: impl Display, limit: usize) -> String {
    msg.to_string().chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_detail_is_capped() {
        let long = "x".repeat(500);
        let err = ApiError::internal(&long);
        assert_eq!(err.to_string(), format!("Prediction failed: {}", "x".repeat(120)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncated("⚠️ab", 2), "⚠️");
        assert_eq!(truncated("short", 50), "short");
    }

    #[test]
    fn client_errors_keep_their_message() {
        let err = ApiError::InvalidInput("Invalid file type. Please upload an image.".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid file type. Please upload an image.");
        assert_eq!(ApiError::MissingUpload("image").status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
