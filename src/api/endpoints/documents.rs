//! Document archive endpoints plus the page upload helpers shared with
//! the processing and detection routes.

use std::path::PathBuf;
use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::Json;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::Statistics;
use crate::models::document::ProcessingLogEntry;
use crate::models::enums::{DocumentStatus, DocumentType};
use crate::models::fields::FieldSet;
use crate::models::Document;
use crate::registry;

/// Maximum pages per request.
pub const MAX_PAGES: usize = 10;
/// Maximum page size in bytes (4 MB).
pub const MAX_PAGE_BYTES: usize = 4 * 1024 * 1024;

/// Scanned pages of one letter, as base64 data URLs.
#[derive(Deserialize)]
pub struct ImagesRequest {
    pub images: Vec<String>,
}

// ── Upload helpers ──────────────────────────────────────────────

/// Decode a base64 data URL to raw bytes.
///
/// Handles both `data:image/jpeg;base64,...` and raw base64 strings.
pub(crate) fn decode_data_url(data_url: &str) -> Result<Vec<u8>, String> {
    let base64_data = match data_url.find(',') {
        Some(idx) => &data_url[idx + 1..],
        None => data_url,
    };

    base64::engine::general_purpose::STANDARD
        .decode(base64_data)
        .map_err(|e| format!("Base64 decode failed: {e}"))
}

/// Detect file extension from magic bytes.
pub(crate) fn detect_extension(bytes: &[u8]) -> &'static str {
    if bytes.len() >= 3 && bytes[0..3] == [0xFF, 0xD8, 0xFF] {
        "jpg"
    } else if bytes.len() >= 8 && bytes[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        "png"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "webp"
    } else {
        "bin"
    }
}

/// Validate, decode, and persist uploaded pages. Returns the saved paths.
pub(crate) fn save_pages(ctx: &ApiContext, images: &[String]) -> Result<Vec<PathBuf>, ApiError> {
    if images.is_empty() {
        return Err(ApiError::BadRequest("No images provided".into()));
    }
    if images.len() > MAX_PAGES {
        return Err(ApiError::BadRequest(format!(
            "Maximum {MAX_PAGES} pages per request"
        )));
    }

    std::fs::create_dir_all(&ctx.uploads_dir)
        .map_err(|e| ApiError::Internal(format!("Uploads directory: {e}")))?;

    let mut paths = Vec::with_capacity(images.len());
    for (index, image) in images.iter().enumerate() {
        let bytes = decode_data_url(image)
            .map_err(|e| ApiError::BadRequest(format!("Invalid image data: {e}")))?;
        if bytes.len() > MAX_PAGE_BYTES {
            return Err(ApiError::BadRequest(format!(
                "Page {} exceeds 4 MB size limit ({} bytes)",
                index + 1,
                bytes.len()
            )));
        }

        let ext = detect_extension(&bytes);
        let name = format!(
            "{}_{}_{}.{}",
            chrono::Utc::now().timestamp_millis(),
            Uuid::new_v4(),
            index,
            ext
        );
        let path = ctx.uploads_dir.join(name);
        std::fs::write(&path, bytes)
            .map_err(|e| ApiError::Internal(format!("Failed to save page: {e}")))?;
        paths.push(path);
    }
    Ok(paths)
}

// ── Handlers ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SaveImageRequest {
    pub image: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveImageResponse {
    pub image_path: String,
}

/// `POST /save-image` — persist a single page without processing it.
pub async fn save_image(
    State(ctx): State<ApiContext>,
    Json(payload): Json<SaveImageRequest>,
) -> Result<Json<SaveImageResponse>, ApiError> {
    let paths = save_pages(&ctx, std::slice::from_ref(&payload.image))?;
    Ok(Json(SaveImageResponse {
        image_path: paths[0].display().to_string(),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub case_id: String,
    pub document_type: String,
    pub parsed_fields: Value,
    #[serde(default)]
    pub original_image: Option<String>,
    #[serde(default)]
    pub stamp_image: Option<String>,
    #[serde(default)]
    pub signature_image: Option<String>,
    #[serde(default)]
    pub extracted_text: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// `POST /documents` — store a processed letter.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<Json<Document>, ApiError> {
    if payload.case_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Case ID must not be empty".into()));
    }

    let doc_type = DocumentType::from_str(&payload.document_type)
        .map_err(|_| ApiError::BadRequest(format!("Unknown document type: {}", payload.document_type)))?;
    let fields = FieldSet::from_value(doc_type, payload.parsed_fields)
        .map_err(|e| ApiError::BadRequest(format!("Invalid field record: {e}")))?;

    let mut doc = Document::new(payload.case_id.trim(), doc_type, fields);
    doc.original_image = payload.original_image;
    doc.stamp_image = payload.stamp_image;
    doc.signature_image = payload.signature_image;
    doc.extracted_text = payload.extracted_text;
    if let Some(status) = &payload.status {
        doc.status = DocumentStatus::from_str(status)
            .map_err(|_| ApiError::BadRequest(format!("Unknown status: {status}")))?;
    }

    if !ctx.store.insert(&doc) {
        return Err(ApiError::Internal("Failed to store document".into()));
    }
    Ok(Json(doc))
}

#[derive(Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<Document>,
    pub total: usize,
}

/// `GET /documents`
pub async fn list(State(ctx): State<ApiContext>) -> Json<DocumentListResponse> {
    let documents = ctx.store.get_all();
    let total = documents.len();
    Json(DocumentListResponse { documents, total })
}

/// `GET /documents/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    let id = parse_document_id(&id)?;
    ctx.store
        .get_by_id(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Document {id} not found")))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// `DELETE /documents/:id`
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_document_id(&id)?;
    if !ctx.store.delete(&id) {
        return Err(ApiError::NotFound(format!("Document {id} not found")));
    }
    Ok(Json(DeleteResponse { deleted: true }))
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub history: Vec<ProcessingLogEntry>,
}

/// `GET /documents/:id/history`
pub async fn history(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let id = parse_document_id(&id)?;
    Ok(Json(HistoryResponse {
        history: ctx.store.history(&id),
    }))
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
}

/// `GET /search?q=...&type=...`
pub async fn search(
    State(ctx): State<ApiContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<DocumentListResponse>, ApiError> {
    let type_filter = match &params.doc_type {
        Some(raw) => Some(
            DocumentType::from_str(raw)
                .map_err(|_| ApiError::BadRequest(format!("Unknown document type: {raw}")))?,
        ),
        None => None,
    };

    let documents = ctx.store.search(&params.q, type_filter);
    let total = documents.len();
    Ok(Json(DocumentListResponse { documents, total }))
}

/// `GET /statistics`
pub async fn statistics(State(ctx): State<ApiContext>) -> Json<Statistics> {
    Json(ctx.store.statistics())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTypeInfo {
    pub document_type: DocumentType,
    pub external_label: &'static str,
    pub fields: Vec<FieldInfo>,
}

#[derive(Serialize)]
pub struct FieldInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// `GET /document-types` — the closed type set with field metadata,
/// for UI form rendering.
pub async fn document_types() -> Result<Json<Vec<DocumentTypeInfo>>, ApiError> {
    let mut types = Vec::with_capacity(DocumentType::KNOWN.len());
    for doc_type in DocumentType::KNOWN {
        let names = registry::field_names(doc_type)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        let descriptions = registry::descriptions(doc_type)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        types.push(DocumentTypeInfo {
            document_type: doc_type,
            external_label: doc_type.external_label(),
            fields: names
                .iter()
                .zip(descriptions)
                .map(|(&name, &(_, description))| FieldInfo { name, description })
                .collect(),
        });
    }
    Ok(Json(types))
}

fn parse_document_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid document id: {raw}")))
}
