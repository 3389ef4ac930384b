pub mod csv;
pub mod json;

pub use csv::export_csv;
pub use json::export_json;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
