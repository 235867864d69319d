use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{http::header, post, web, HttpResponse};
use futures_util::StreamExt;
use log::{debug, info, warn};
use std::time::Instant;
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorBody};
use crate::inference::{self, Prediction};

const UPLOAD_FIELD: &str = "image";

/// Multipart form accepted by `/predict`, for the API docs only.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageUpload {
    /// PNG, JPEG or WEBP image
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/predict",
    tag = "Prediction",
    request_body(content = ImageUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Mock classification of the uploaded image", body = Prediction),
        (status = 400, description = "Unsupported content type", body = ErrorBody),
        (status = 422, description = "No `image` field in the form", body = ErrorBody),
        (status = 500, description = "Upload could not be processed", body = ErrorBody),
    )
)]
#[post("/predict")]
pub async fn predict(mut payload: Multipart) -> Result<HttpResponse, ApiError> {
    while let Some(item) = payload.next().await {
        let field = item.map_err(upload_error)?;

        if field.name() != Some(UPLOAD_FIELD) {
            debug!("Skipping multipart field {:?}", field.name());
            drain(field).await?;
            continue;
        }

        // Compared verbatim: `IMAGE/PNG` or `image/png; x=y` are not on the list
        let content_type = field
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if !content_type.as_deref().is_some_and(inference::accepts) {
            warn!("Rejected upload with content type {:?}", content_type);
            return Err(ApiError::InvalidInput(
                "Invalid file type. Please upload an image.".to_string(),
            ));
        }

        let started = Instant::now();
        let content = read_all(field).await?;
        let prediction = tokio::task::spawn_blocking(move || inference::classify(&content, started))
            .await
            .map_err(ApiError::internal)?;

        info!(
            "Prediction: label={:?} confidence={} size={} took={}ms",
            prediction.label, prediction.confidence, prediction.file_size, prediction.processing_ms
        );
        return Ok(HttpResponse::Ok().json(prediction));
    }

    Err(ApiError::MissingUpload(UPLOAD_FIELD))
}

/// A request that is not a multipart form never carried an `image` upload;
/// anything else went wrong while streaming it.
fn upload_error(e: MultipartError) -> ApiError {
    match &e {
        MultipartError::ContentTypeMissing
        | MultipartError::ContentTypeParse
        | MultipartError::ContentTypeIncompatible
        | MultipartError::BoundaryMissing
        | MultipartError::ContentDispositionMissing
        | MultipartError::ContentDispositionNameMissing => {
            debug!("Not a usable multipart upload: {}", e);
            ApiError::MissingUpload(UPLOAD_FIELD)
        }
        _ => ApiError::internal(e),
    }
}

async fn read_all(mut field: Field) -> Result<Vec<u8>, ApiError> {
    let mut content = Vec::new();
    while let Some(chunk) = field.next().await {
        content.extend_from_slice(&chunk.map_err(ApiError::internal)?);
    }
    Ok(content)
}

async fn drain(mut field: Field) -> Result<(), ApiError> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(ApiError::internal)?;
    }
    Ok(())
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(predict);
}
