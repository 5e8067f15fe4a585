//! Runtime configuration: endpoints, credentials, OCR language, bind address.
//!
//! Everything is env-driven with working defaults so the demo runs out of the
//! box: the remote OCR service falls back to its public test key, and the
//! correction service simply reports a configuration error until
//! `SNAPTEXT_CHAT_API_KEY` is set.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Application-level constants
pub const APP_NAME: &str = "Snaptext";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed per-call timeout for the remote OCR service.
pub const OCR_TIMEOUT_SECS: u64 = 60;
/// Fixed per-call timeout for the correction service.
pub const CHAT_TIMEOUT_SECS: u64 = 90;
/// Upload size cap enforced before the pipeline runs.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024; // 10 MB

const DEFAULT_OCR_ENDPOINT: &str = "https://api.ocr.space/parse/image";
/// OCR.Space's documented public test key (rate-limited but functional).
const DEFAULT_OCR_API_KEY: &str = "helloworld";
const DEFAULT_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_LANGUAGE: &str = "eng";
const DEFAULT_ADDR: &str = "127.0.0.1:8090";

/// Default log filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    "snaptext=info".to_string()
}

/// Remote OCR service settings (OCR.Space wire format).
#[derive(Debug, Clone)]
pub struct OcrSettings {
    pub endpoint: String,
    pub api_key: String,
    pub language: String,
}

/// Correction service settings (OpenAI chat-completions wire format).
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub endpoint: String,
    /// No default; absence is a configuration error surfaced on use.
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub ocr: OcrSettings,
    pub chat: ChatSettings,
    pub server: ServerSettings,
    /// Explicit tessdata directory override (`SNAPTEXT_TESSDATA`).
    pub tessdata: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ocr: OcrSettings {
                endpoint: DEFAULT_OCR_ENDPOINT.into(),
                api_key: DEFAULT_OCR_API_KEY.into(),
                language: DEFAULT_LANGUAGE.into(),
            },
            chat: ChatSettings {
                endpoint: DEFAULT_CHAT_ENDPOINT.into(),
                api_key: None,
                model: DEFAULT_CHAT_MODEL.into(),
                temperature: 0.0,
            },
            server: ServerSettings {
                addr: DEFAULT_ADDR.parse().expect("default bind address is valid"),
            },
            tessdata: None,
        }
    }
}

impl Settings {
    /// Build settings from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(endpoint) = std::env::var("SNAPTEXT_OCR_ENDPOINT") {
            settings.ocr.endpoint = endpoint;
        }
        if let Ok(key) = std::env::var("SNAPTEXT_OCR_API_KEY") {
            settings.ocr.api_key = key;
        }
        if let Ok(lang) = std::env::var("SNAPTEXT_LANG") {
            settings.ocr.language = lang;
        }
        if let Ok(endpoint) = std::env::var("SNAPTEXT_CHAT_ENDPOINT") {
            settings.chat.endpoint = endpoint;
        }
        if let Ok(key) = std::env::var("SNAPTEXT_CHAT_API_KEY") {
            if !key.trim().is_empty() {
                settings.chat.api_key = Some(key);
            }
        }
        if let Ok(model) = std::env::var("SNAPTEXT_CHAT_MODEL") {
            settings.chat.model = model;
        }
        if let Ok(addr) = std::env::var("SNAPTEXT_ADDR") {
            match addr.parse() {
                Ok(parsed) => settings.server.addr = parsed,
                Err(e) => tracing::warn!(
                    addr = %addr,
                    error = %e,
                    "SNAPTEXT_ADDR is not a valid socket address, using default"
                ),
            }
        }
        if let Ok(dir) = std::env::var("SNAPTEXT_TESSDATA") {
            settings.tessdata = Some(PathBuf::from(dir));
        }

        settings
    }

    /// Resolve the tessdata directory for the local OCR engine, if any.
    pub fn tessdata_dir(&self) -> Option<PathBuf> {
        find_tessdata(self.tessdata.as_deref())
    }
}

/// Locations probed for Tesseract language data, in order.
fn tessdata_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        candidates.push(PathBuf::from(prefix));
    }
    candidates.push(PathBuf::from("/usr/share/tesseract-ocr/5/tessdata"));
    candidates.push(PathBuf::from("/usr/share/tesseract-ocr/4.00/tessdata"));
    candidates.push(PathBuf::from("/usr/share/tessdata"));
    candidates.push(PathBuf::from("/usr/local/share/tessdata"));
    candidates.push(PathBuf::from("/opt/homebrew/share/tessdata"));
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".tessdata"));
    }
    candidates
}

/// First directory (override first, then the usual system locations) that
/// actually contains English language data.
pub fn find_tessdata(explicit: Option<&Path>) -> Option<PathBuf> {
    let has_eng = |dir: &Path| dir.join("eng.traineddata").exists();

    if let Some(dir) = explicit {
        return has_eng(dir).then(|| dir.to_path_buf());
    }
    tessdata_candidates().into_iter().find(|dir| has_eng(dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_endpoints() {
        let settings = Settings::default();
        assert_eq!(settings.ocr.endpoint, "https://api.ocr.space/parse/image");
        assert_eq!(settings.ocr.api_key, "helloworld");
        assert_eq!(settings.ocr.language, "eng");
        assert_eq!(
            settings.chat.endpoint,
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(settings.chat.model, "gpt-4o-mini");
        assert!((settings.chat.temperature - 0.0).abs() < f32::EPSILON);
        assert_eq!(settings.server.addr.port(), 8090);
    }

    #[test]
    fn chat_credential_has_no_default() {
        assert!(Settings::default().chat.api_key.is_none());
    }

    #[test]
    fn explicit_tessdata_requires_eng_data() {
        let dir = tempfile::tempdir().unwrap();
        // Empty directory: rejected even when explicitly configured
        assert!(find_tessdata(Some(dir.path())).is_none());

        std::fs::write(dir.path().join("eng.traineddata"), b"stub").unwrap();
        assert_eq!(find_tessdata(Some(dir.path())), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn explicit_tessdata_skips_system_probe() {
        let dir = tempfile::tempdir().unwrap();
        // An explicit override that lacks data must NOT fall through to
        // system locations; the operator asked for this directory.
        assert!(find_tessdata(Some(dir.path())).is_none());
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }
}
