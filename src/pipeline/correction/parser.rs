//! Parse the correction service's JSON payload, with one repair attempt.
//!
//! The model is asked for strict JSON but sometimes wraps its answer in a
//! Markdown code fence anyway. Strategy: parse as-is; on failure strip the
//! fence (```json or bare ```) and parse ONCE more; then give up.

use serde::Deserialize;

use super::types::{CorrectionIssue, CorrectionResult};
use super::CorrectionError;

/// Parse the assistant message content into a `CorrectionResult`.
pub fn parse_correction(content: &str) -> Result<CorrectionResult, CorrectionError> {
    match parse_payload(content) {
        Ok(result) => Ok(result),
        Err(first_err) => match strip_code_fence(content) {
            Some(inner) => parse_payload(&inner),
            None => Err(first_err),
        },
    }
}

/// Strict parse of one JSON payload.
///
/// `corrected` is required; `issues` tolerates absence and skips items that
/// do not match the expected shape.
fn parse_payload(payload: &str) -> Result<CorrectionResult, CorrectionError> {
    #[derive(Deserialize)]
    struct RawCorrection {
        corrected: String,
        issues: Option<Vec<serde_json::Value>>,
    }

    let raw: RawCorrection = serde_json::from_str(payload.trim())
        .map_err(|e| CorrectionError::ResponseParsing(e.to_string()))?;

    Ok(CorrectionResult {
        corrected: raw.corrected,
        issues: parse_issues_lenient(raw.issues.as_deref()),
    })
}

/// Parse the issues array leniently — skip items that fail to deserialize.
fn parse_issues_lenient(items: Option<&[serde_json::Value]>) -> Vec<CorrectionIssue> {
    match items {
        None => vec![],
        Some(arr) => arr
            .iter()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect(),
    }
}

/// Strip a Markdown code fence from the content.
///
/// Takes everything between the first fence (skipping a `json` language tag)
/// and the closing fence; an unclosed fence keeps everything after the
/// opener. Returns `None` when there is no fence at all, so the caller can
/// keep the original parse error.
fn strip_code_fence(content: &str) -> Option<String> {
    let start = content.find("```")?;
    let mut inner = &content[start + 3..];
    if let Some(rest) = inner.strip_prefix("json") {
        inner = rest;
    }
    let inner = match inner.find("```") {
        Some(end) => &inner[..end],
        None => inner,
    };
    Some(inner.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "corrected": "The cat sat on the mat.",
        "issues": [
            {
                "original": "teh",
                "suggestion": "the",
                "explanation": "typo",
                "start": 4,
                "end": 7
            },
            {
                "original": "matt",
                "suggestion": "mat",
                "explanation": "spelling",
                "start": 19,
                "end": 23
            }
        ]
    }"#;

    #[test]
    fn parses_bare_payload() {
        let result = parse_correction(PAYLOAD).unwrap();
        assert_eq!(result.corrected, "The cat sat on the mat.");
        assert_eq!(result.issues.len(), 2);
        assert_eq!(result.issues[0].original, "teh");
        assert_eq!(result.issues[0].suggestion, "the");
        assert_eq!(result.issues[0].start, 4);
        assert_eq!(result.issues[1].end, 23);
    }

    #[test]
    fn fenced_payload_parses_identically_to_bare() {
        let fenced = format!("```json\n{PAYLOAD}\n```");
        assert_eq!(
            parse_correction(&fenced).unwrap(),
            parse_correction(PAYLOAD).unwrap()
        );
    }

    #[test]
    fn bare_fence_without_language_tag() {
        let fenced = format!("```\n{PAYLOAD}\n```");
        let result = parse_correction(&fenced).unwrap();
        assert_eq!(result.issues.len(), 2);
    }

    #[test]
    fn fence_with_leading_prose() {
        let fenced = format!("Here is the result you asked for:\n\n```json\n{PAYLOAD}\n```\n");
        let result = parse_correction(&fenced).unwrap();
        assert_eq!(result.corrected, "The cat sat on the mat.");
    }

    #[test]
    fn unclosed_fence_still_parses() {
        let fenced = format!("```json\n{PAYLOAD}");
        let result = parse_correction(&fenced).unwrap();
        assert_eq!(result.issues.len(), 2);
    }

    #[test]
    fn missing_issues_defaults_to_empty() {
        let result = parse_correction(r#"{"corrected": "All good."}"#).unwrap();
        assert_eq!(result.corrected, "All good.");
        assert!(result.issues.is_empty());
    }

    #[test]
    fn malformed_issue_items_are_skipped() {
        let payload = r#"{
            "corrected": "Fixed.",
            "issues": [
                {"original": "a", "suggestion": "b", "explanation": "c", "start": 0, "end": 1},
                {"unexpected": "shape"},
                "not even an object"
            ]
        }"#;
        let result = parse_correction(payload).unwrap();
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].original, "a");
    }

    #[test]
    fn missing_corrected_key_is_an_error() {
        let err = parse_correction(r#"{"issues": []}"#).unwrap_err();
        assert!(matches!(err, CorrectionError::ResponseParsing(_)));
    }

    #[test]
    fn unfenced_garbage_keeps_original_error() {
        let err = parse_correction("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, CorrectionError::ResponseParsing(_)));
    }

    #[test]
    fn fenced_garbage_fails_after_single_repair() {
        let err = parse_correction("```json\nstill not json\n```").unwrap_err();
        assert!(matches!(err, CorrectionError::ResponseParsing(_)));
    }

    #[test]
    fn strip_fence_returns_none_without_fence() {
        assert!(strip_code_fence("plain text").is_none());
    }

    #[test]
    fn strip_fence_extracts_inner_content() {
        assert_eq!(
            strip_code_fence("```json\n{\"a\": 1}\n```").as_deref(),
            Some("{\"a\": 1}")
        );
        assert_eq!(
            strip_code_fence("```\n{\"a\": 1}\n```").as_deref(),
            Some("{\"a\": 1}")
        );
    }
}
