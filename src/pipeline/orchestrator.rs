//! Extraction orchestrator: classify, normalize, extract, merge.
//!
//! The only hard failure is an empty input set. Everything downstream of
//! input validation degrades into a reviewable record: unrecognized labels
//! and capability outages produce an `unknown` document with a diagnostic
//! field payload rather than an error, so a scanning batch never stalls on
//! one bad letter.

use std::path::PathBuf;
use std::sync::Arc;

use super::classify::{normalize_label, NormalizedLabel};
use super::merge::{self, MergeOutcome};
use super::prompts;
use super::vision::VisionCapability;
use super::PipelineError;
use crate::models::enums::{DocumentStatus, DocumentType};
use crate::models::fields::FieldSet;
use crate::registry;

/// Pipeline stages, for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Classifying,
    Normalizing,
    Extracting,
    Merging,
}

impl Stage {
    fn as_str(&self) -> &'static str {
        match self {
            Stage::Classifying => "classifying",
            Stage::Normalizing => "normalizing",
            Stage::Extracting => "extracting",
            Stage::Merging => "merging",
        }
    }
}

/// Result of one pipeline run.
#[derive(Debug)]
pub struct ProcessedDocument {
    pub document_type: DocumentType,
    pub raw_text: String,
    pub parsed_fields: MergeOutcome,
    pub status: DocumentStatus,
}

impl ProcessedDocument {
    fn degraded(document_type: DocumentType, raw_text: String, detail: String) -> Self {
        Self {
            document_type,
            raw_text,
            parsed_fields: MergeOutcome::Fields(FieldSet::open_message("error", &detail)),
            status: DocumentStatus::NeedsReview,
        }
    }
}

/// Document pipeline with injected capabilities.
pub struct DocumentPipeline {
    vision: Arc<dyn VisionCapability>,
}

impl DocumentPipeline {
    pub fn new(vision: Arc<dyn VisionCapability>) -> Self {
        Self { vision }
    }

    /// Classify the letter without extracting fields. One classification
    /// call regardless of page count.
    pub fn classify(&self, images: &[PathBuf]) -> Result<NormalizedLabel, PipelineError> {
        if images.is_empty() {
            return Err(PipelineError::NoImages);
        }
        let raw = self
            .vision
            .chat_with_images(prompts::CLASSIFICATION_PROMPT, images)?;
        Ok(normalize_label(&raw))
    }

    /// Run the full pipeline over the pages of one letter.
    pub fn process(&self, images: &[PathBuf]) -> Result<ProcessedDocument, PipelineError> {
        if images.is_empty() {
            return Err(PipelineError::NoImages);
        }

        let _span = tracing::info_span!("pipeline_process", pages = images.len()).entered();

        tracing::debug!(stage = Stage::Classifying.as_str(), "stage transition");
        let raw_label = match self
            .vision
            .chat_with_images(prompts::CLASSIFICATION_PROMPT, images)
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "classification capability failed, degrading");
                return Ok(ProcessedDocument::degraded(
                    DocumentType::Unknown,
                    String::new(),
                    format!("classification unavailable: {e}"),
                ));
            }
        };

        tracing::debug!(stage = Stage::Normalizing.as_str(), label = %raw_label, "stage transition");
        let label = normalize_label(&raw_label);
        let doc_type = label.document_type();

        if !registry::is_known(doc_type) {
            tracing::info!(label = %raw_label, "unrecognized letter type, marking for review");
            return Ok(ProcessedDocument::degraded(
                DocumentType::Unknown,
                String::new(),
                format!("unknown document type: {raw_label}"),
            ));
        }

        tracing::debug!(
            stage = Stage::Extracting.as_str(),
            doc_type = doc_type.as_str(),
            "stage transition"
        );
        let prompt = prompts::extraction_prompt(doc_type)?;
        let raw_text = match self.vision.chat_with_images(prompt, images) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, doc_type = doc_type.as_str(), "extraction capability failed, degrading");
                return Ok(ProcessedDocument::degraded(
                    doc_type,
                    String::new(),
                    format!("field extraction unavailable: {e}"),
                ));
            }
        };

        tracing::debug!(stage = Stage::Merging.as_str(), "stage transition");
        let parsed_fields = merge::merge(&raw_text, doc_type)?;
        let status = if parsed_fields.is_parsed() {
            DocumentStatus::Validated
        } else {
            DocumentStatus::NeedsReview
        };

        tracing::info!(
            doc_type = doc_type.as_str(),
            status = status.as_str(),
            "pipeline run complete"
        );

        Ok(ProcessedDocument {
            document_type: doc_type,
            raw_text,
            parsed_fields,
            status,
        })
    }
}
