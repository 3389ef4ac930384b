//! Soft-failure storage adapter over the repository layer.
//!
//! Each call opens its own connection, so the store can be shared across
//! request handlers without a connection pool. Failures are logged and
//! reported as absent data instead of propagating, matching the archive's
//! rule that a storage hiccup must not abort letter processing.

use std::path::PathBuf;

use rusqlite::Connection;
use uuid::Uuid;

use super::repository::{self, Statistics};
use super::sqlite::open_database;
use super::DatabaseError;
use crate::models::document::ProcessingLogEntry;
use crate::models::enums::{DocumentType, LogAction};
use crate::models::Document;

pub struct DocumentStore {
    db_path: PathBuf,
}

impl DocumentStore {
    /// Open (and migrate) the database at the given path.
    pub fn new(db_path: PathBuf) -> Result<Self, DatabaseError> {
        // Run migrations once up front so later per-call opens are cheap.
        open_database(&db_path)?;
        Ok(Self { db_path })
    }

    fn connect(&self) -> Result<Connection, DatabaseError> {
        open_database(&self.db_path)
    }

    /// Store a document and its INSERT log entry in one transaction.
    /// Returns false on any storage failure.
    pub fn insert(&self, doc: &Document) -> bool {
        let result = (|| -> Result<(), DatabaseError> {
            let mut conn = self.connect()?;
            let tx = conn.transaction()?;
            repository::insert_document(&tx, doc)?;
            repository::insert_log_entry(
                &tx,
                &doc.id,
                LogAction::Insert,
                Some(doc.doc_type.as_str()),
            )?;
            tx.commit()?;
            Ok(())
        })();

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, document_id = %doc.id, "document insert failed");
                false
            }
        }
    }

    pub fn get_by_id(&self, id: &Uuid) -> Option<Document> {
        match self.connect().and_then(|conn| repository::get_document(&conn, id)) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(error = %e, document_id = %id, "document lookup failed");
                None
            }
        }
    }

    pub fn get_all(&self) -> Vec<Document> {
        match self.connect().and_then(|conn| repository::get_all_documents(&conn)) {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!(error = %e, "document listing failed");
                Vec::new()
            }
        }
    }

    /// Delete a document and record a DELETE log entry in one transaction.
    /// Returns false if the document did not exist or storage failed.
    pub fn delete(&self, id: &Uuid) -> bool {
        let result = (|| -> Result<bool, DatabaseError> {
            let mut conn = self.connect()?;
            let tx = conn.transaction()?;
            let deleted = repository::delete_document(&tx, id)?;
            if deleted {
                repository::insert_log_entry(&tx, id, LogAction::Delete, None)?;
            }
            tx.commit()?;
            Ok(deleted)
        })();

        match result {
            Ok(deleted) => deleted,
            Err(e) => {
                tracing::warn!(error = %e, document_id = %id, "document delete failed");
                false
            }
        }
    }

    pub fn search(&self, query: &str, type_filter: Option<DocumentType>) -> Vec<Document> {
        match self
            .connect()
            .and_then(|conn| repository::search_documents(&conn, query, type_filter))
        {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!(error = %e, query, "document search failed");
                Vec::new()
            }
        }
    }

    pub fn statistics(&self) -> Statistics {
        match self.connect().and_then(|conn| repository::statistics(&conn)) {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(error = %e, "statistics query failed");
                Statistics::default()
            }
        }
    }

    pub fn history(&self, id: &Uuid) -> Vec<ProcessingLogEntry> {
        match self
            .connect()
            .and_then(|conn| repository::get_document_history(&conn, id))
        {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, document_id = %id, "history lookup failed");
                Vec::new()
            }
        }
    }
}
