//! Vision capability: sends page images plus a prompt to a local
//! Ollama-compatible backend and returns the raw model text.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::prompts::SYSTEM_MESSAGE;
use super::PipelineError;

/// Provider of vision-model inference over page images.
pub trait VisionCapability: Send + Sync {
    /// Send a prompt with one or more page images; returns raw model text.
    fn chat_with_images(&self, prompt: &str, image_paths: &[PathBuf])
        -> Result<String, PipelineError>;
}

/// Production client against a local Ollama instance.
pub struct OllamaVisionClient {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaVisionClient {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, PipelineError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PipelineError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<&'a [String]>,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

fn encode_image(path: &Path) -> Result<String, PipelineError> {
    let bytes = std::fs::read(path).map_err(|e| PipelineError::ImageRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

impl VisionCapability for OllamaVisionClient {
    fn chat_with_images(
        &self,
        prompt: &str,
        image_paths: &[PathBuf],
    ) -> Result<String, PipelineError> {
        if image_paths.is_empty() {
            return Err(PipelineError::NoImages);
        }

        let images: Vec<String> = image_paths
            .iter()
            .map(|p| encode_image(p))
            .collect::<Result<_, _>>()?;

        let url = format!("{}/api/chat", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                    images: None,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                    images: Some(&images),
                },
            ],
            stream: false,
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                PipelineError::BackendConnection(self.base_url.clone())
            } else if e.is_timeout() {
                PipelineError::HttpClient(format!(
                    "Request timed out after {}s",
                    self.timeout_secs
                ))
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

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| PipelineError::ResponseParsing(e.to_string()))?;

        Ok(parsed.message.content.trim().to_string())
    }
}

/// Mock vision capability for testing.
///
/// Returns configured responses in order, cycling the last one, and records
/// every prompt it receives.
pub struct MockVisionCapability {
    responses: std::sync::Mutex<std::collections::VecDeque<String>>,
    last_response: std::sync::Mutex<String>,
    calls: std::sync::Mutex<Vec<(String, usize)>>,
    fail: bool,
}

impl MockVisionCapability {
    pub fn new(response: &str) -> Self {
        Self::with_responses(vec![response.to_string()])
    }

    pub fn with_responses(responses: Vec<String>) -> Self {
        let last = responses.last().cloned().unwrap_or_default();
        Self {
            responses: std::sync::Mutex::new(responses.into()),
            last_response: std::sync::Mutex::new(last),
            calls: std::sync::Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            responses: std::sync::Mutex::new(Default::default()),
            last_response: std::sync::Mutex::new(String::new()),
            calls: std::sync::Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Prompts received so far, each with the number of images attached.
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl VisionCapability for MockVisionCapability {
    fn chat_with_images(
        &self,
        prompt: &str,
        image_paths: &[PathBuf],
    ) -> Result<String, PipelineError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((prompt.to_string(), image_paths.len()));
        }
        if self.fail {
            return Err(PipelineError::BackendConnection(
                "http://localhost:11434".to_string(),
            ));
        }
        let next = self.responses.lock().ok().and_then(|mut q| q.pop_front());
        match next {
            Some(response) => {
                if let Ok(mut last) = self.last_response.lock() {
                    *last = response.clone();
                }
                Ok(response)
            }
            None => Ok(self.last_response.lock().map(|s| s.clone()).unwrap_or_default()),
        }
    }
}
