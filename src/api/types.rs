//! Shared state handed to every endpoint handler.

use std::path::PathBuf;
use std::sync::Arc;

use crate::db::DocumentStore;
use crate::pipeline::detect::RegionDetector;
use crate::pipeline::orchestrator::DocumentPipeline;

#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<DocumentStore>,
    pub pipeline: Arc<DocumentPipeline>,
    pub detector: Arc<dyn RegionDetector>,
    pub uploads_dir: PathBuf,
    pub stamps_dir: PathBuf,
    pub signatures_dir: PathBuf,
    pub exports_dir: PathBuf,
}

impl ApiContext {
    pub fn new(
        store: Arc<DocumentStore>,
        pipeline: Arc<DocumentPipeline>,
        detector: Arc<dyn RegionDetector>,
        uploads_dir: PathBuf,
        stamps_dir: PathBuf,
        signatures_dir: PathBuf,
        exports_dir: PathBuf,
    ) -> Self {
        Self {
            store,
            pipeline,
            detector,
            uploads_dir,
            stamps_dir,
            signatures_dir,
            exports_dir,
        }
    }
}
