use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::{DocumentStatus, DocumentType};
use crate::models::fields::FieldSet;
use crate::models::Document;

const DOCUMENT_COLUMNS: &str = "id, case_id, document_type, fields, original_image, stamp_image,
         signature_image, extracted_text, status, created_at, updated_at";

pub fn insert_document(conn: &Connection, doc: &Document) -> Result<(), DatabaseError> {
    let fields_json = serde_json::to_string(&doc.fields)
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
    conn.execute(
        "INSERT INTO documents (id, case_id, document_type, fields, original_image, stamp_image,
         signature_image, extracted_text, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            doc.id.to_string(),
            doc.case_id,
            doc.doc_type.as_str(),
            fields_json,
            doc.original_image,
            doc.stamp_image,
            doc.signature_image,
            doc.extracted_text,
            doc.status.as_str(),
            format_datetime(&doc.created_at),
            format_datetime(&doc.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_document(conn: &Connection, id: &Uuid) -> Result<Option<Document>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = ?1"
    ))?;

    let result = stmt.query_row(params![id.to_string()], row_to_document_row);

    match result {
        Ok(row) => Ok(Some(document_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All documents, most recent first.
pub fn get_all_documents(conn: &Connection) -> Result<Vec<Document>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY created_at DESC"
    ))?;

    let rows = stmt.query_map([], row_to_document_row)?;

    let mut docs = Vec::new();
    for row in rows {
        docs.push(document_from_row(row?)?);
    }
    Ok(docs)
}

/// Delete a document row. Returns false if no such document existed.
pub fn delete_document(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let deleted = conn.execute("DELETE FROM documents WHERE id = ?1", params![id.to_string()])?;
    Ok(deleted > 0)
}

/// Case-insensitive substring search across case id and the serialized
/// field record, optionally restricted to one letter type.
pub fn search_documents(
    conn: &Connection,
    query: &str,
    type_filter: Option<DocumentType>,
) -> Result<Vec<Document>, DatabaseError> {
    let pattern = format!("%{query}%");

    let rows: Vec<DocumentRow> = match type_filter {
        Some(doc_type) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {DOCUMENT_COLUMNS} FROM documents
                 WHERE (case_id LIKE ?1 OR fields LIKE ?1) AND document_type = ?2
                 ORDER BY created_at DESC"
            ))?;
            let mapped = stmt.query_map(params![pattern, doc_type.as_str()], row_to_document_row)?;
            mapped.collect::<Result<_, _>>()?
        }
        None => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {DOCUMENT_COLUMNS} FROM documents
                 WHERE case_id LIKE ?1 OR fields LIKE ?1
                 ORDER BY created_at DESC"
            ))?;
            let mapped = stmt.query_map(params![pattern], row_to_document_row)?;
            mapped.collect::<Result<_, _>>()?
        }
    };

    let mut docs = Vec::new();
    for row in rows {
        docs.push(document_from_row(row)?);
    }
    Ok(docs)
}

/// Archive-level counters for the statistics endpoint.
#[derive(Debug, Default, Serialize)]
pub struct Statistics {
    pub total_documents: i64,
    pub documents_by_type: BTreeMap<String, i64>,
    pub documents_by_status: BTreeMap<String, i64>,
    /// Documents created within the last 7 days.
    pub recent_documents: i64,
}

pub fn statistics(conn: &Connection) -> Result<Statistics, DatabaseError> {
    let total_documents =
        conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;

    let mut documents_by_type = BTreeMap::new();
    let mut stmt =
        conn.prepare("SELECT document_type, COUNT(*) FROM documents GROUP BY document_type")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;
    for row in rows {
        let (doc_type, count) = row?;
        documents_by_type.insert(doc_type, count);
    }

    let mut documents_by_status = BTreeMap::new();
    let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM documents GROUP BY status")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;
    for row in rows {
        let (status, count) = row?;
        documents_by_status.insert(status, count);
    }

    let recent_documents = conn.query_row(
        "SELECT COUNT(*) FROM documents WHERE created_at >= datetime('now', '-7 days')",
        [],
        |row| row.get(0),
    )?;

    Ok(Statistics {
        total_documents,
        documents_by_type,
        documents_by_status,
        recent_documents,
    })
}

pub(crate) fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub(crate) fn parse_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .unwrap_or_default()
}

// Internal row type for Document mapping
struct DocumentRow {
    id: String,
    case_id: String,
    doc_type: String,
    fields: String,
    original_image: Option<String>,
    stamp_image: Option<String>,
    signature_image: Option<String>,
    extracted_text: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

fn row_to_document_row(row: &rusqlite::Row<'_>) -> Result<DocumentRow, rusqlite::Error> {
    Ok(DocumentRow {
        id: row.get(0)?,
        case_id: row.get(1)?,
        doc_type: row.get(2)?,
        fields: row.get(3)?,
        original_image: row.get(4)?,
        stamp_image: row.get(5)?,
        signature_image: row.get(6)?,
        extracted_text: row.get(7)?,
        status: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn document_from_row(row: DocumentRow) -> Result<Document, DatabaseError> {
    let doc_type = DocumentType::from_str(&row.doc_type)?;

    let fields_value: Value = serde_json::from_str(&row.fields)
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
    let fields = FieldSet::from_value(doc_type, fields_value)
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;

    Ok(Document {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        case_id: row.case_id,
        doc_type,
        fields,
        original_image: row.original_image,
        stamp_image: row.stamp_image,
        signature_image: row.signature_image,
        extracted_text: row.extracted_text,
        status: DocumentStatus::from_str(&row.status)?,
        created_at: parse_datetime(&row.created_at),
        updated_at: parse_datetime(&row.updated_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use serde_json::json;

    fn sample_document(case_id: &str, doc_type: DocumentType) -> Document {
        let fields = match doc_type {
            DocumentType::RewardLetter => FieldSet::from_value(
                doc_type,
                json!({
                    "rcNo": "B4/149/2020",
                    "rewardDetails": [
                        {"Rank": "HC", "Name": "B. Appala Naidu", "Reward": "Rs. 500/-"}
                    ]
                }),
            )
            .unwrap(),
            _ => FieldSet::from_value(doc_type, json!({"name": "K. Ramesh"}))
                .unwrap_or(FieldSet::Open(Default::default())),
        };
        Document::new(case_id, doc_type, fields)
    }

    #[test]
    fn insert_and_get_round_trip() {
        let conn = open_memory_database().unwrap();
        let doc = sample_document("CASE-001", DocumentType::MedicalLeave);
        insert_document(&conn, &doc).unwrap();

        let loaded = get_document(&conn, &doc.id).unwrap().unwrap();
        assert_eq!(loaded.id, doc.id);
        assert_eq!(loaded.case_id, "CASE-001");
        assert_eq!(loaded.doc_type, DocumentType::MedicalLeave);
        assert_eq!(loaded.status, DocumentStatus::Validated);
        assert_eq!(loaded.fields, doc.fields);
        assert_eq!(loaded.created_at, doc.created_at);
    }

    #[test]
    fn nested_reward_fields_survive_storage() {
        let conn = open_memory_database().unwrap();
        let doc = sample_document("CASE-R1", DocumentType::RewardLetter);
        insert_document(&conn, &doc).unwrap();

        let loaded = get_document(&conn, &doc.id).unwrap().unwrap();
        let map = loaded.fields.as_map();
        assert_eq!(map["rewardDetails"][0]["Name"], json!("B. Appala Naidu"));
        assert_eq!(loaded.fields, doc.fields);
    }

    #[test]
    fn get_missing_returns_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_document(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn get_all_orders_most_recent_first() {
        let conn = open_memory_database().unwrap();
        let mut older = sample_document("CASE-OLD", DocumentType::MedicalLeave);
        older.created_at = parse_datetime("2024-01-01 08:00:00");
        let mut newer = sample_document("CASE-NEW", DocumentType::MedicalLeave);
        newer.created_at = parse_datetime("2025-06-01 08:00:00");
        insert_document(&conn, &older).unwrap();
        insert_document(&conn, &newer).unwrap();

        let all = get_all_documents(&conn).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].case_id, "CASE-NEW");
        assert_eq!(all[1].case_id, "CASE-OLD");
    }

    #[test]
    fn delete_reports_existence() {
        let conn = open_memory_database().unwrap();
        let doc = sample_document("CASE-DEL", DocumentType::PunishmentLetter);
        insert_document(&conn, &doc).unwrap();

        assert!(delete_document(&conn, &doc.id).unwrap());
        assert!(!delete_document(&conn, &doc.id).unwrap());
    }

    #[test]
    fn search_matches_case_id_and_fields() {
        let conn = open_memory_database().unwrap();
        let doc = sample_document("CASE-SRCH", DocumentType::MedicalLeave);
        insert_document(&conn, &doc).unwrap();

        assert_eq!(search_documents(&conn, "SRCH", None).unwrap().len(), 1);
        assert_eq!(search_documents(&conn, "Ramesh", None).unwrap().len(), 1);
        assert!(search_documents(&conn, "nomatch", None).unwrap().is_empty());
    }

    #[test]
    fn search_respects_type_filter() {
        let conn = open_memory_database().unwrap();
        insert_document(&conn, &sample_document("CASE-A", DocumentType::MedicalLeave)).unwrap();
        insert_document(&conn, &sample_document("CASE-B", DocumentType::RewardLetter)).unwrap();

        let hits = search_documents(&conn, "CASE", Some(DocumentType::RewardLetter)).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doc_type, DocumentType::RewardLetter);
    }

    #[test]
    fn statistics_counts_by_type_and_status() {
        let conn = open_memory_database().unwrap();
        insert_document(&conn, &sample_document("C1", DocumentType::MedicalLeave)).unwrap();
        insert_document(&conn, &sample_document("C2", DocumentType::MedicalLeave)).unwrap();
        let mut review = sample_document("C3", DocumentType::RewardLetter);
        review.status = DocumentStatus::NeedsReview;
        insert_document(&conn, &review).unwrap();

        let stats = statistics(&conn).unwrap();
        assert_eq!(stats.total_documents, 3);
        assert_eq!(stats.documents_by_type["medical_leave"], 2);
        assert_eq!(stats.documents_by_type["reward_letter"], 1);
        assert_eq!(stats.documents_by_status["validated"], 2);
        assert_eq!(stats.documents_by_status["needs_review"], 1);
        assert_eq!(stats.recent_documents, 3);
    }
}
