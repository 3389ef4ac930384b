pub mod classify;
pub mod detect;
pub mod merge;
pub mod orchestrator;
pub mod prompts;
pub mod vision;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no input images provided")]
    NoImages,

    #[error("image not readable at {path}: {reason}")]
    ImageRead { path: String, reason: String },

    #[error("inference backend not reachable at {0}")]
    BackendConnection(String),

    #[error("inference request failed: {0}")]
    HttpClient(String),

    #[error("inference backend returned HTTP {status}: {body}")]
    BackendStatus { status: u16, body: String },

    #[error("failed to parse backend response: {0}")]
    ResponseParsing(String),

    #[error(transparent)]
    UnknownType(#[from] crate::registry::UnknownTypeError),
}
