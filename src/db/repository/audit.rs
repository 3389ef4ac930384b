use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::document::ProcessingLogEntry;
use crate::models::enums::LogAction;
use crate::models::now_naive;

use super::document::{format_datetime, parse_datetime};

/// Append one entry to the processing log. The log is append-only and
/// deliberately carries no foreign key, so history outlives deletion.
pub fn insert_log_entry(
    conn: &Connection,
    document_id: &Uuid,
    action: LogAction,
    details: Option<&str>,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO processing_logs (document_id, action, details, timestamp)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            document_id.to_string(),
            action.as_str(),
            details,
            format_datetime(&now_naive()),
        ],
    )?;
    Ok(())
}

/// Full history for one document, oldest first.
pub fn get_document_history(
    conn: &Connection,
    document_id: &Uuid,
) -> Result<Vec<ProcessingLogEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, document_id, action, details, timestamp
         FROM processing_logs WHERE document_id = ?1 ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(params![document_id.to_string()], row_to_log_row)?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(entry_from_row(row?)?);
    }
    Ok(entries)
}

struct LogRow {
    id: i64,
    document_id: String,
    action: String,
    details: Option<String>,
    timestamp: String,
}

fn row_to_log_row(row: &rusqlite::Row<'_>) -> Result<LogRow, rusqlite::Error> {
    Ok(LogRow {
        id: row.get(0)?,
        document_id: row.get(1)?,
        action: row.get(2)?,
        details: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

fn entry_from_row(row: LogRow) -> Result<ProcessingLogEntry, DatabaseError> {
    Ok(ProcessingLogEntry {
        id: row.id,
        document_id: Uuid::parse_str(&row.document_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        action: LogAction::from_str(&row.action)?,
        details: row.details,
        timestamp: parse_datetime(&row.timestamp),
    })
}
