//! Archive export endpoints. Each request writes a fresh timestamped
//! file into the exports directory and reports its path.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::export;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub export_path: String,
    pub document_count: usize,
}

/// `GET /export/csv`
pub async fn csv(State(ctx): State<ApiContext>) -> Result<Json<ExportResponse>, ApiError> {
    run_export(ctx, export::export_csv).await
}

/// `GET /export/json`
pub async fn json(State(ctx): State<ApiContext>) -> Result<Json<ExportResponse>, ApiError> {
    run_export(ctx, export::export_json).await
}

async fn run_export(
    ctx: ApiContext,
    write: fn(&[crate::models::Document], &std::path::Path) -> Result<std::path::PathBuf, export::ExportError>,
) -> Result<Json<ExportResponse>, ApiError> {
    let result = tokio::task::spawn_blocking(move || {
        std::fs::create_dir_all(&ctx.exports_dir)
            .map_err(export::ExportError::Io)?;
        let documents = ctx.store.get_all();
        let path = write(&documents, &ctx.exports_dir)?;
        Ok::<_, export::ExportError>((path, documents.len()))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Export task failed: {e}")))?;

    let (path, document_count) = result?;
    Ok(Json(ExportResponse {
        export_path: path.display().to_string(),
        document_count,
    }))
}
