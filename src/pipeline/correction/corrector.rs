//! Correction orchestrator — validate, prompt, call, parse.

use std::sync::Arc;

use super::parser::parse_correction;
use super::prompt::{build_user_prompt, SYSTEM_PROMPT};
use super::types::{ChatClient, CorrectionResult};
use super::CorrectionError;

/// Thin wrapper around a `ChatClient` that owns the correction flow.
pub struct Corrector {
    client: Arc<dyn ChatClient>,
}

impl Corrector {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }

    /// Run one correction pass over the given text.
    ///
    /// Empty or whitespace-only input is rejected before any network call.
    /// A missing credential surfaces from the client the same way, before
    /// any request is built.
    pub fn correct(&self, text: &str) -> Result<CorrectionResult, CorrectionError> {
        if text.trim().is_empty() {
            return Err(CorrectionError::EmptyInput);
        }

        let _span = tracing::info_span!("correct", chars = text.len()).entered();
        let start = std::time::Instant::now();

        let content = self.client.complete(SYSTEM_PROMPT, &build_user_prompt(text))?;
        let result = parse_correction(&content)?;

        tracing::info!(
            elapsed_ms = %start.elapsed().as_millis(),
            issues = result.issues.len(),
            "correction complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::correction::client::MockChatClient;

    const RESPONSE: &str = r#"{
        "corrected": "The quick brown fox.",
        "issues": [
            {"original": "quik", "suggestion": "quick", "explanation": "typo", "start": 4, "end": 8}
        ]
    }"#;

    #[test]
    fn corrects_through_client_and_parser() {
        let client = Arc::new(MockChatClient::new(RESPONSE));
        let corrector = Corrector::new(client.clone());

        let result = corrector.correct("The quik brown fox.").unwrap();
        assert_eq!(result.corrected, "The quick brown fox.");
        assert_eq!(result.issues.len(), 1);
        assert_eq!(client.call_count(), 1);

        let (system, user) = client.call(0);
        assert_eq!(system, SYSTEM_PROMPT);
        assert!(user.contains("The quik brown fox."));
    }

    #[test]
    fn empty_input_is_rejected_before_any_call() {
        let client = Arc::new(MockChatClient::new(RESPONSE));
        let corrector = Corrector::new(client.clone());

        let err = corrector.correct("").unwrap_err();
        assert!(matches!(err, CorrectionError::EmptyInput));
        assert_eq!(client.call_count(), 0, "no network call for empty input");
    }

    #[test]
    fn whitespace_only_input_is_rejected_before_any_call() {
        let client = Arc::new(MockChatClient::new(RESPONSE));
        let corrector = Corrector::new(client.clone());

        let err = corrector.correct("  \n\t  ").unwrap_err();
        assert!(matches!(err, CorrectionError::EmptyInput));
        assert_eq!(client.call_count(), 0);
    }

    #[test]
    fn fenced_response_is_repaired() {
        let fenced = format!("```json\n{RESPONSE}\n```");
        let corrector = Corrector::new(Arc::new(MockChatClient::new(&fenced)));

        let result = corrector.correct("The quik brown fox.").unwrap();
        assert_eq!(result.corrected, "The quick brown fox.");
    }

    #[test]
    fn client_errors_propagate() {
        let corrector = Corrector::new(Arc::new(MockChatClient::failing()));
        let err = corrector.correct("some text").unwrap_err();
        assert!(matches!(err, CorrectionError::MissingContent));
    }

    #[test]
    fn unparsable_response_propagates_parse_error() {
        let corrector = Corrector::new(Arc::new(MockChatClient::new("I refuse to answer.")));
        let err = corrector.correct("some text").unwrap_err();
        assert!(matches!(err, CorrectionError::ResponseParsing(_)));
    }
}
