use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{DocumentStatus, DocumentType, LogAction};
use super::fields::FieldSet;

/// An archived letter with its extracted field record.
///
/// Serializes with camelCase keys, matching the request DTOs and the
/// wire format UI clients consume.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub case_id: String,
    #[serde(rename = "documentType")]
    pub doc_type: DocumentType,
    pub fields: FieldSet,
    pub original_image: Option<String>,
    pub stamp_image: Option<String>,
    pub signature_image: Option<String>,
    pub extracted_text: Option<String>,
    pub status: DocumentStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Document {
    /// Build a new record with generated id and current timestamps.
    pub fn new(case_id: &str, doc_type: DocumentType, fields: FieldSet) -> Self {
        let now = now_naive();
        Self {
            id: Uuid::new_v4(),
            case_id: case_id.to_string(),
            doc_type,
            fields,
            original_image: None,
            stamp_image: None,
            signature_image: None,
            extracted_text: None,
            status: DocumentStatus::Validated,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One row of the append-only processing log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingLogEntry {
    pub id: i64,
    pub document_id: Uuid,
    pub action: LogAction,
    pub details: Option<String>,
    pub timestamp: NaiveDateTime,
}

/// Current UTC time truncated to whole seconds, matching the stored
/// `%Y-%m-%d %H:%M:%S` text format.
pub fn now_naive() -> NaiveDateTime {
    use chrono::Timelike;
    let now = chrono::Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}
