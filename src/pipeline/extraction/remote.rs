//! Remote OCR fallback — HTTP client for the OCR.Space parse API.
//!
//! The service takes a multipart upload plus form fields (API key, language,
//! engine mode, scaling flag) and answers with JSON carrying the parsed text
//! or an error message. One call per extraction, fixed timeout, no retries.

use std::sync::Mutex;

use serde::Deserialize;

use super::types::RemoteOcr;
use super::ExtractionError;

/// OCR.Space engine mode 2, the higher-accuracy engine.
const OCR_ENGINE_MODE: &str = "2";

/// HTTP client for an OCR.Space-compatible parse endpoint.
pub struct OcrSpaceClient {
    endpoint: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OcrSpaceClient {
    pub fn new(endpoint: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        }
    }
}

impl RemoteOcr for OcrSpaceClient {
    fn parse_image(
        &self,
        image_bytes: &[u8],
        filename: &str,
        lang: &str,
    ) -> Result<String, ExtractionError> {
        let _span = tracing::info_span!(
            "remote_ocr",
            endpoint = %self.endpoint,
            image_size = image_bytes.len(),
        )
        .entered();

        let part = reqwest::blocking::multipart::Part::bytes(image_bytes.to_vec())
            .file_name(filename.to_string());
        let form = reqwest::blocking::multipart::Form::new()
            .part("filename", part)
            .text("apikey", self.api_key.clone())
            .text("language", lang.to_string())
            .text("OCREngine", OCR_ENGINE_MODE)
            .text("scale", "true")
            .text("isTable", "false");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ExtractionError::RemoteUnreachable(self.endpoint.clone())
                } else if e.is_timeout() {
                    ExtractionError::RemoteTimeout(self.timeout_secs)
                } else {
                    ExtractionError::ResponseParsing(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        if !status.is_success() {
            return Err(ExtractionError::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        parse_response_body(&body)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct OcrSpaceResponse {
    #[serde(rename = "ParsedResults")]
    parsed_results: Option<Vec<ParsedResult>>,
    #[serde(rename = "ErrorMessage")]
    error_message: Option<ErrorMessage>,
}

#[derive(Deserialize)]
struct ParsedResult {
    #[serde(rename = "ParsedText")]
    parsed_text: Option<String>,
}

/// OCR.Space reports errors as either a single string or a list of strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    fn join(&self) -> String {
        match self {
            ErrorMessage::One(message) => message.clone(),
            ErrorMessage::Many(messages) => messages.join("; "),
        }
    }
}

/// Pull the parsed text out of a successful HTTP response body.
///
/// An empty or missing `ParsedResults` means the service failed even though
/// it answered 200; surface its error message, or a generic one.
fn parse_response_body(body: &str) -> Result<String, ExtractionError> {
    let parsed: OcrSpaceResponse =
        serde_json::from_str(body).map_err(|e| ExtractionError::ResponseParsing(e.to_string()))?;

    let message = parsed
        .error_message
        .as_ref()
        .map(ErrorMessage::join)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "OCR API failed".to_string());

    let text = parsed
        .parsed_results
        .and_then(|results| results.into_iter().next())
        .and_then(|first| first.parsed_text);

    match text {
        Some(text) => Ok(text),
        None => Err(ExtractionError::RemoteNoResult(message)),
    }
}

// ---------------------------------------------------------------------------
// MockRemoteOcr (testing)
// ---------------------------------------------------------------------------

/// Mock remote OCR service. Records every invocation and the exact bytes
/// received, so tests can assert the fallback fired once with the original
/// upload.
pub struct MockRemoteOcr {
    response: Option<String>,
    failure_message: String,
    calls: Mutex<Vec<Vec<u8>>>,
}

impl MockRemoteOcr {
    /// Service that succeeds with the configured text.
    pub fn new(text: &str) -> Self {
        Self {
            response: Some(text.to_string()),
            failure_message: String::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Service that always fails with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            response: None,
            failure_message: message.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// How many times `parse_image` ran.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock lock").len()
    }

    /// The bytes received on a given call.
    pub fn received_bytes(&self, call: usize) -> Vec<u8> {
        self.calls.lock().expect("mock lock")[call].clone()
    }
}

impl RemoteOcr for MockRemoteOcr {
    fn parse_image(
        &self,
        image_bytes: &[u8],
        _filename: &str,
        _lang: &str,
    ) -> Result<String, ExtractionError> {
        self.calls
            .lock()
            .expect("mock lock")
            .push(image_bytes.to_vec());
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(ExtractionError::RemoteNoResult(self.failure_message.clone())),
        }
    }
}
