//! Request/response DTOs for the JSON API.

use serde::{Deserialize, Serialize};

use crate::pipeline::correction::CorrectionResult;
use crate::session::ExtractedText;

/// Response to a successful extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub text: String,
    pub method: crate::pipeline::extraction::ExtractionMethod,
    pub chars: usize,
    pub extracted_at: chrono::NaiveDateTime,
}

impl From<ExtractedText> for ExtractResponse {
    fn from(record: ExtractedText) -> Self {
        Self {
            chars: record.text.chars().count(),
            text: record.text,
            method: record.method,
            extracted_at: record.extracted_at,
        }
    }
}

/// Current session snapshot returned by `GET /api/result`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSnapshot {
    pub text: Option<ExtractResponse>,
    pub correction: Option<CorrectionResult>,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
