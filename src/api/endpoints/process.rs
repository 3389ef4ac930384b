//! Classification and field extraction endpoints.
//!
//! Both run the blocking vision pipeline on the tokio blocking pool, so
//! long model calls never stall the HTTP worker threads.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::api::endpoints::documents::{save_pages, ImagesRequest};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::enums::DocumentStatus;
use crate::pipeline::classify::NormalizedLabel;

/// Fixed confidence reported by the classifier. The vision model gives no
/// calibrated score, so clients get a constant.
const CLASSIFY_CONFIDENCE: f64 = 0.85;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub letter_type: &'static str,
    pub confidence: f64,
}

/// `POST /classify`
pub async fn classify(
    State(ctx): State<ApiContext>,
    Json(payload): Json<ImagesRequest>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let paths = save_pages(&ctx, &payload.images)?;

    let pipeline = ctx.pipeline.clone();
    let label = tokio::task::spawn_blocking(move || pipeline.classify(&paths))
        .await
        .map_err(|e| ApiError::Internal(format!("Classification task failed: {e}")))??;

    let letter_type = match &label {
        NormalizedLabel::Known(doc_type) => doc_type.external_label(),
        NormalizedLabel::Unrecognized(_) => "unknown",
    };

    Ok(Json(ClassifyResponse {
        letter_type,
        confidence: CLASSIFY_CONFIDENCE,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectFieldsResponse {
    pub document_type: String,
    pub parsed_fields: Value,
    pub raw_text: String,
    pub status: DocumentStatus,
}

/// `POST /detect-fields` — full pipeline: classify, extract, merge.
pub async fn detect_fields(
    State(ctx): State<ApiContext>,
    Json(payload): Json<ImagesRequest>,
) -> Result<Json<DetectFieldsResponse>, ApiError> {
    let paths = save_pages(&ctx, &payload.images)?;

    let pipeline = ctx.pipeline.clone();
    let processed = tokio::task::spawn_blocking(move || pipeline.process(&paths))
        .await
        .map_err(|e| ApiError::Internal(format!("Extraction task failed: {e}")))??;

    Ok(Json(DetectFieldsResponse {
        document_type: processed.document_type.as_str().to_string(),
        parsed_fields: processed.parsed_fields.to_value(),
        raw_text: processed.raw_text,
        status: processed.status,
    }))
}
