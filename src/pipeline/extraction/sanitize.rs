/// Sanitize extracted text before storing or display.
/// Strips control characters, trims trailing whitespace per line, and
/// collapses runs of blank lines down to one.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;
    for line in filtered.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }

    lines.join("\n").trim_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_null_bytes() {
        let clean = sanitize_extracted_text("Invoice\x00 #42");
        assert!(!clean.contains('\x00'));
        assert!(clean.contains("Invoice"));
        assert!(clean.contains("#42"));
    }

    #[test]
    fn strips_control_characters() {
        let clean = sanitize_extracted_text("Total: 18.50\x01\x02\nDate: 2024-01-15");
        assert!(!clean.contains('\x01'));
        assert!(clean.contains("18.50"));
        assert!(clean.contains("2024-01-15"));
    }

    #[test]
    fn normalizes_crlf() {
        let clean = sanitize_extracted_text("line one\r\nline two\r\n");
        assert_eq!(clean, "line one\nline two");
    }

    #[test]
    fn collapses_blank_line_runs() {
        let clean = sanitize_extracted_text("Paragraph one\n\n\n\nParagraph two");
        assert_eq!(clean, "Paragraph one\n\nParagraph two");
    }

    #[test]
    fn keeps_single_blank_line() {
        let clean = sanitize_extracted_text("one\n\ntwo");
        assert_eq!(clean, "one\n\ntwo");
    }

    #[test]
    fn trims_trailing_whitespace_per_line() {
        let clean = sanitize_extracted_text("ends with spaces   \nnext line\t ");
        assert_eq!(clean, "ends with spaces\nnext line");
    }

    #[test]
    fn preserves_leading_indentation() {
        let clean = sanitize_extracted_text("  indented item");
        assert_eq!(clean, "  indented item");
    }

    #[test]
    fn preserves_tabs_and_unicode() {
        let clean = sanitize_extracted_text("Café\tMenü — 12€");
        assert_eq!(clean, "Café\tMenü — 12€");
    }

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(sanitize_extracted_text(""), "");
    }

    #[test]
    fn only_control_chars_returns_empty() {
        assert_eq!(sanitize_extracted_text("\x00\x01\x02"), "");
    }
}
