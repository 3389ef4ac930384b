//! Stamp and signature detection endpoints.
//!
//! Pages are checked in order; the first crop above the detector's
//! confidence threshold is returned. No hit is reported as an empty path,
//! matching what UI clients expect.

use std::path::PathBuf;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::endpoints::documents::{save_pages, ImagesRequest};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::pipeline::detect::RegionKind;
use crate::pipeline::PipelineError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StampResponse {
    pub stamp_image_path: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureResponse {
    pub signature_image_path: String,
}

/// `POST /detect-stamp`
pub async fn detect_stamp(
    State(ctx): State<ApiContext>,
    Json(payload): Json<ImagesRequest>,
) -> Result<Json<StampResponse>, ApiError> {
    let path = detect_first(&ctx, &payload.images, RegionKind::Stamp).await?;
    Ok(Json(StampResponse {
        stamp_image_path: path_string(path),
    }))
}

/// `POST /detect-signature`
pub async fn detect_signature(
    State(ctx): State<ApiContext>,
    Json(payload): Json<ImagesRequest>,
) -> Result<Json<SignatureResponse>, ApiError> {
    let path = detect_first(&ctx, &payload.images, RegionKind::Signature).await?;
    Ok(Json(SignatureResponse {
        signature_image_path: path_string(path),
    }))
}

/// Run detection page by page, stopping at the first hit.
async fn detect_first(
    ctx: &ApiContext,
    images: &[String],
    kind: RegionKind,
) -> Result<Option<PathBuf>, ApiError> {
    let paths = save_pages(ctx, images)?;

    let detector = ctx.detector.clone();
    let result = tokio::task::spawn_blocking(move || -> Result<Option<PathBuf>, PipelineError> {
        for page in &paths {
            if let Some(crop) = detector.detect_region(page, kind)? {
                return Ok(Some(crop));
            }
        }
        Ok(None)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Detection task failed: {e}")))?;

    result.map_err(ApiError::from)
}

fn path_string(path: Option<PathBuf>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}
