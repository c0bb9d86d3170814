//! LaTeX text sanitizer.
//!
//! Every piece of user-supplied or AI-supplied text passes through here
//! exactly once before it is spliced into a document. Template fragments are
//! trusted and never escaped. The mapping is a single pass over the input so
//! escape sequences introduced for one character are never re-scanned.

/// Escapes all LaTeX-significant characters in `input`.
///
/// Not idempotent: escaping already-escaped text double-escapes it. Callers
/// escape at the point of insertion and nowhere else.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes text that may span multiple lines, converting user-entered
/// newlines into LaTeX forced line breaks.
pub fn escape_multiline(text: &str) -> String {
    text.split('\n')
        .map(|line| escape(line.trim_end_matches('\r')))
        .collect::<Vec<_>>()
        .join("\\\\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_replaces_every_significant_character() {
        assert_eq!(escape(r"\"), r"\textbackslash{}");
        assert_eq!(escape("&"), r"\&");
        assert_eq!(escape("%"), r"\%");
        assert_eq!(escape("$"), r"\$");
        assert_eq!(escape("#"), r"\#");
        assert_eq!(escape("_"), r"\_");
        assert_eq!(escape("{"), r"\{");
        assert_eq!(escape("}"), r"\}");
        assert_eq!(escape("~"), r"\textasciitilde{}");
        assert_eq!(escape("^"), r"\textasciicircum{}");
    }

    #[test]
    fn test_escape_leaves_plain_text_untouched() {
        assert_eq!(escape("Ada Lovelace, Engineer (2024)"), "Ada Lovelace, Engineer (2024)");
    }

    #[test]
    fn test_escape_mixed_input() {
        assert_eq!(
            escape("50% of C&D_dept {cost}"),
            r"50\% of C\&D\_dept \{cost\}"
        );
    }

    #[test]
    fn test_escape_single_pass_does_not_rescan_replacements() {
        // The braces introduced by \textbackslash{} must not themselves be escaped.
        assert_eq!(escape(r"\&"), r"\textbackslash{}\&");
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        let once = escape("&");
        assert_ne!(escape(&once), once);
    }

    #[test]
    fn test_escape_multiline_converts_newlines_to_breaks() {
        assert_eq!(escape_multiline("first\nsecond"), "first\\\\\nsecond");
    }

    #[test]
    fn test_escape_multiline_strips_carriage_returns_and_escapes() {
        assert_eq!(
            escape_multiline("100%\r\ndone & dusted"),
            "100\\%\\\\\ndone \\& dusted"
        );
    }
}
