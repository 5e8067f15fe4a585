//! Chat-completion HTTP client (OpenAI wire format).
//!
//! One blocking POST per correction: bearer credential, JSON body with model,
//! temperature, and a system + user message pair; the assistant content comes
//! back in `choices[0].message.content`. The credential is optional at
//! construction and checked BEFORE any request is built, so a missing key
//! never causes network traffic.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::types::ChatClient;
use super::CorrectionError;

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
pub struct ChatApiClient {
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl ChatApiClient {
    pub fn new(
        endpoint: &str,
        api_key: Option<String>,
        model: &str,
        temperature: f32,
        timeout_secs: u64,
    ) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.to_string(),
            temperature,
            client,
            timeout_secs,
        }
    }

    /// Whether a credential is configured at all.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Request body for the chat-completions endpoint.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatClient for ChatApiClient {
    fn complete(&self, system: &str, user: &str) -> Result<String, CorrectionError> {
        // Configuration check comes first; no request is ever built
        // without a credential.
        let key = self
            .api_key
            .as_deref()
            .ok_or(CorrectionError::MissingCredential)?;

        let _span = tracing::info_span!(
            "chat_complete",
            endpoint = %self.endpoint,
            model = %self.model,
        )
        .entered();

        let body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    CorrectionError::Unreachable(self.endpoint.clone())
                } else if e.is_timeout() {
                    CorrectionError::Timeout(self.timeout_secs)
                } else {
                    CorrectionError::ResponseParsing(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CorrectionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| CorrectionError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(CorrectionError::MissingContent)
    }
}

// ---------------------------------------------------------------------------
// MockChatClient (testing)
// ---------------------------------------------------------------------------

/// Mock chat client. Returns a configurable response and records every
/// (system, user) pair, so tests can assert that fast-fail paths never
/// reached the "network".
pub struct MockChatClient {
    response: Result<String, fn() -> CorrectionError>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockChatClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Client that fails every call with `MissingContent`.
    pub fn failing() -> Self {
        Self::with_error(|| CorrectionError::MissingContent)
    }

    /// Client that fails every call with the given error.
    pub fn with_error(make_err: fn() -> CorrectionError) -> Self {
        Self {
            response: Err(make_err),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// How many completions were requested.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock lock").len()
    }

    /// The (system, user) pair of a given call.
    pub fn call(&self, index: usize) -> (String, String) {
        self.calls.lock().expect("mock lock")[index].clone()
    }
}

impl ChatClient for MockChatClient {
    fn complete(&self, system: &str, user: &str) -> Result<String, CorrectionError> {
        self.calls
            .lock()
            .expect("mock lock")
            .push((system.to_string(), user.to_string()));
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(make_err) => Err(make_err()),
        }
    }
}
