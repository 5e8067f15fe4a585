use serde::{Deserialize, Serialize};

use super::CorrectionError;

/// Structured result of one correction pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResult {
    /// The full text with all fixes applied.
    pub corrected: String,
    /// Individual fixes, in document order as reported by the service.
    pub issues: Vec<CorrectionIssue>,
}

/// One reported fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionIssue {
    pub original: String,
    pub suggestion: String,
    pub explanation: String,
    /// Character offsets into the submitted text, as reported by the service.
    pub start: usize,
    pub end: usize,
}

/// Chat-completion client abstraction (allows mocking for tests).
///
/// Returns the assistant message content for a system + user message pair.
/// Model, temperature, and credential are implementation concerns.
pub trait ChatClient: Send + Sync {
    fn complete(&self, system: &str, user: &str) -> Result<String, CorrectionError>;
}
