//! JSON export: the full document set as a pretty-printed array.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Local;

use super::ExportError;
use crate::models::Document;

/// Write all documents to a timestamped JSON file in `out_dir`.
/// Returns the path of the written file.
pub fn export_json(documents: &[Document], out_dir: &Path) -> Result<PathBuf, ExportError> {
    let filename = format!("documents_{}.json", Local::now().format("%Y%m%d_%H%M%S"));
    let path = out_dir.join(filename);

    let file = File::create(&path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), documents)?;

    tracing::info!(path = %path.display(), count = documents.len(), "JSON export written");
    Ok(path)
}
