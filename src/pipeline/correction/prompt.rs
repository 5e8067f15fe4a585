//! Fixed prompts for the correction pass.
//!
//! The service is used as a text-correction oracle, not a conversational
//! agent: one system instruction pinning down scope and output shape, one
//! user message carrying the text.

/// System instruction sent with every correction request.
pub const SYSTEM_PROMPT: &str = "\
You are a professional copy editor. \
Fix English spelling, obvious typos, and light grammar/punctuation only. \
Keep meaning and tone. Return strict JSON with keys: \
`corrected` (string) and `issues` (array of objects with `original`, `suggestion`, \
`explanation`, `start`, `end`). No extra text.";

/// Wrap the text to check in the user message.
pub fn build_user_prompt(text: &str) -> String {
    format!("Text to check:\n{text}\n\nReturn JSON only.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_names_both_output_keys() {
        assert!(SYSTEM_PROMPT.contains("`corrected`"));
        assert!(SYSTEM_PROMPT.contains("`issues`"));
        assert!(SYSTEM_PROMPT.contains("strict JSON"));
    }

    #[test]
    fn user_prompt_carries_the_text() {
        let prompt = build_user_prompt("Teh cat sat.");
        assert!(prompt.contains("Teh cat sat."));
        assert!(prompt.ends_with("Return JSON only."));
    }
}
