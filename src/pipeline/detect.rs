//! Stamp and signature region detection.
//!
//! The detector sidecar returns candidate regions with confidence scores
//! and cropped image data. The first region above the confidence threshold
//! wins; its crop is written under the kind's output directory. No
//! qualifying region is a normal outcome, not an error.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::PipelineError;

/// Minimum confidence for a detection to be accepted.
const CONFIDENCE_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Stamp,
    Signature,
}

impl RegionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionKind::Stamp => "stamp",
            RegionKind::Signature => "signature",
        }
    }
}

/// Provider of stamp/signature region detection.
pub trait RegionDetector: Send + Sync {
    /// Detect a region of `kind` in the image. Returns the path of the
    /// saved crop, or `None` when no region clears the threshold.
    fn detect_region(&self, image: &Path, kind: RegionKind)
        -> Result<Option<PathBuf>, PipelineError>;
}

/// Detector backed by an HTTP sidecar running the detection models.
pub struct HttpRegionDetector {
    base_url: String,
    client: reqwest::blocking::Client,
    stamps_dir: PathBuf,
    signatures_dir: PathBuf,
}

impl HttpRegionDetector {
    pub fn new(
        base_url: &str,
        stamps_dir: PathBuf,
        signatures_dir: PathBuf,
        timeout_secs: u64,
    ) -> Result<Self, PipelineError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PipelineError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            stamps_dir,
            signatures_dir,
        })
    }

    fn output_dir(&self, kind: RegionKind) -> &Path {
        match kind {
            RegionKind::Stamp => &self.stamps_dir,
            RegionKind::Signature => &self.signatures_dir,
        }
    }
}

#[derive(Serialize)]
struct DetectRequest<'a> {
    image: &'a str,
}

#[derive(Deserialize)]
struct DetectResponse {
    detections: Vec<Detection>,
}

#[derive(Deserialize)]
struct Detection {
    confidence: f32,
    /// Base64-encoded JPEG crop of the detected region.
    crop: String,
}

impl RegionDetector for HttpRegionDetector {
    fn detect_region(
        &self,
        image: &Path,
        kind: RegionKind,
    ) -> Result<Option<PathBuf>, PipelineError> {
        let bytes = std::fs::read(image).map_err(|e| PipelineError::ImageRead {
            path: image.display().to_string(),
            reason: e.to_string(),
        })?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);

        let url = format!("{}/detect/{}", self.base_url, kind.as_str());
        let response = self
            .client
            .post(&url)
            .json(&DetectRequest { image: &encoded })
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    PipelineError::BackendConnection(self.base_url.clone())
                } else {
                    PipelineError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PipelineError::BackendStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: DetectResponse = response
            .json()
            .map_err(|e| PipelineError::ResponseParsing(e.to_string()))?;

        // First detection above threshold wins.
        let hit = parsed
            .detections
            .into_iter()
            .find(|d| d.confidence > CONFIDENCE_THRESHOLD);

        let detection = match hit {
            Some(detection) => detection,
            None => return Ok(None),
        };

        let crop_bytes = base64::engine::general_purpose::STANDARD
            .decode(&detection.crop)
            .map_err(|e| PipelineError::ResponseParsing(format!("crop decode: {e}")))?;

        let dir = self.output_dir(kind);
        std::fs::create_dir_all(dir).map_err(|e| PipelineError::ImageRead {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        let out = dir.join(format!("{}_{}.jpg", kind.as_str(), uuid::Uuid::new_v4()));
        std::fs::write(&out, crop_bytes).map_err(|e| PipelineError::ImageRead {
            path: out.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!(
            kind = kind.as_str(),
            confidence = detection.confidence,
            crop = %out.display(),
            "region detected"
        );
        Ok(Some(out))
    }
}

/// Mock detector for testing: returns a fixed path or nothing.
pub struct MockRegionDetector {
    result: Option<PathBuf>,
}

impl MockRegionDetector {
    pub fn hit(path: &str) -> Self {
        Self {
            result: Some(PathBuf::from(path)),
        }
    }

    pub fn miss() -> Self {
        Self { result: None }
    }
}

impl RegionDetector for MockRegionDetector {
    fn detect_region(
        &self,
        _image: &Path,
        _kind: RegionKind,
    ) -> Result<Option<PathBuf>, PipelineError> {
        Ok(self.result.clone())
    }
}
