use std::env;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Lekha";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Port the HTTP API listens on
pub const DEFAULT_PORT: u16 = 5000;

/// Get the application data directory
/// ~/Lekha/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join("Lekha"),
        None => PathBuf::from("Lekha"),
    }
}

/// Database file path
pub fn database_path() -> PathBuf {
    app_data_dir().join("documents.db")
}

/// Where original scanned pages are stored
pub fn uploads_dir() -> PathBuf {
    app_data_dir().join("uploads")
}

/// Cropped stamp regions
pub fn stamps_dir() -> PathBuf {
    app_data_dir().join("stamps")
}

/// Cropped signature regions
pub fn signatures_dir() -> PathBuf {
    app_data_dir().join("signatures")
}

/// CSV/JSON export output
pub fn exports_dir() -> PathBuf {
    app_data_dir().join("exports")
}

/// All directories that must exist before the server starts.
pub fn required_dirs() -> [PathBuf; 5] {
    [
        app_data_dir(),
        uploads_dir(),
        stamps_dir(),
        signatures_dir(),
        exports_dir(),
    ]
}

/// Base URL of the vision model backend (Ollama-compatible chat API)
pub fn vision_base_url() -> String {
    env::var("LEKHA_VISION_URL").unwrap_or_else(|_| "http://localhost:11434".to_string())
}

/// Vision model name used for classification and extraction
pub fn vision_model() -> String {
    env::var("LEKHA_VISION_MODEL").unwrap_or_else(|_| "llama3.2-vision".to_string())
}

/// Request timeout for vision calls, in seconds. Multi-page extraction
/// over scanned letters is slow, so the default is generous.
pub fn vision_timeout_secs() -> u64 {
    env::var("LEKHA_VISION_TIMEOUT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(300)
}

/// Base URL of the stamp/signature detection backend
pub fn detector_base_url() -> String {
    env::var("LEKHA_DETECTOR_URL").unwrap_or_else(|_| "http://localhost:8500".to_string())
}

pub fn port() -> u16 {
    env::var("LEKHA_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> String {
    format!("{}=info,tower_http=info", env!("CARGO_PKG_NAME"))
}
