//! CSV export with flattened field columns.
//!
//! Fixed document columns come first, then one `Field_<name>` column per
//! field key observed anywhere in the export set. Letters of different
//! types leave each other's field columns blank, so mixed exports stay
//! rectangular.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::Value;

use super::ExportError;
use crate::models::Document;

const FIXED_COLUMNS: [&str; 10] = [
    "ID",
    "Case ID",
    "Document Type",
    "Status",
    "Created At",
    "Updated At",
    "Original Image",
    "Stamp Image",
    "Signature Image",
    "Extracted Text",
];

/// Write all documents to a timestamped CSV file in `out_dir`.
/// Returns the path of the written file.
pub fn export_csv(documents: &[Document], out_dir: &Path) -> Result<PathBuf, ExportError> {
    let filename = format!("documents_{}.csv", Local::now().format("%Y%m%d_%H%M%S"));
    let path = out_dir.join(filename);
    write_csv(documents, &path)?;
    tracing::info!(path = %path.display(), count = documents.len(), "CSV export written");
    Ok(path)
}

pub fn write_csv(documents: &[Document], path: &Path) -> Result<(), ExportError> {
    let field_columns = collect_field_columns(documents);

    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend(field_columns.iter().map(|name| format!("Field_{name}")));
    writer.write_record(&header)?;

    for doc in documents {
        let fields = doc.fields.as_map();
        let mut record: Vec<String> = vec![
            doc.id.to_string(),
            doc.case_id.clone(),
            doc.doc_type.as_str().to_string(),
            doc.status.as_str().to_string(),
            doc.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            doc.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            doc.original_image.clone().unwrap_or_default(),
            doc.stamp_image.clone().unwrap_or_default(),
            doc.signature_image.clone().unwrap_or_default(),
            doc.extracted_text.clone().unwrap_or_default(),
        ];
        for name in &field_columns {
            record.push(fields.get(name).map(cell_value).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Sorted union of field keys across the export set.
fn collect_field_columns(documents: &[Document]) -> Vec<String> {
    let mut columns = BTreeSet::new();
    for doc in documents {
        for key in doc.fields.as_map().keys() {
            columns.insert(key.clone());
        }
    }
    columns.into_iter().collect()
}

fn cell_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::DocumentType;
    use crate::models::fields::FieldSet;
    use serde_json::json;
    use tempfile::TempDir;

    fn doc(case_id: &str, doc_type: DocumentType, fields: Value) -> Document {
        Document::new(case_id, doc_type, FieldSet::from_value(doc_type, fields).unwrap())
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn header_has_fixed_then_field_columns() {
        let dir = TempDir::new().unwrap();
        let docs = vec![doc("C1", DocumentType::MedicalLeave, json!({"name": "K. Ramesh"}))];

        let path = export_csv(&docs, dir.path()).unwrap();
        let rows = read_rows(&path);

        assert_eq!(&rows[0][..10], FIXED_COLUMNS.map(String::from));
        assert!(rows[0][10..].iter().any(|c| c == "Field_name"));
        assert!(rows[0][10..].iter().all(|c| c.starts_with("Field_")));
    }

    #[test]
    fn mixed_types_produce_rectangular_output() {
        let dir = TempDir::new().unwrap();
        let docs = vec![
            doc("C1", DocumentType::MedicalLeave, json!({"name": "K. Ramesh"})),
            doc("C2", DocumentType::PunishmentLetter, json!({"rcNo": "55/2021"})),
        ];

        let path = export_csv(&docs, dir.path()).unwrap();
        let rows = read_rows(&path);

        let width = rows[0].len();
        assert!(rows.iter().all(|r| r.len() == width));

        // Medical leave row leaves punishment columns blank and vice versa.
        let rc_col = rows[0].iter().position(|c| c == "Field_rcNo").unwrap();
        let name_col = rows[0].iter().position(|c| c == "Field_name").unwrap();
        let rank_col = rows[0].iter().position(|c| c == "Field_rank").unwrap();
        assert_eq!(rows[1][name_col], "K. Ramesh");
        assert_eq!(rows[1][rank_col], "NONE");
        assert_eq!(rows[1][rc_col], "");
        assert_eq!(rows[2][rc_col], "55/2021");
        assert_eq!(rows[2][name_col], "");
    }

    #[test]
    fn nested_values_are_serialized_into_the_cell() {
        let dir = TempDir::new().unwrap();
        let docs = vec![doc(
            "C1",
            DocumentType::RewardLetter,
            json!({"rewardDetails": [{"Name": "B. Appala Naidu"}]}),
        )];

        let path = export_csv(&docs, dir.path()).unwrap();
        let rows = read_rows(&path);

        let col = rows[0]
            .iter()
            .position(|c| c == "Field_rewardDetails")
            .unwrap();
        assert!(rows[1][col].contains("B. Appala Naidu"));
    }

    #[test]
    fn empty_export_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = export_csv(&[], dir.path()).unwrap();
        let rows = read_rows(&path);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), FIXED_COLUMNS.len());
    }
}
