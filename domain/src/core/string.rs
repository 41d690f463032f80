//! String utilities for the domain layer.

/// Cut `s` down to at most `max_chars` characters, appending `...` when
/// anything was dropped.
///
/// Counts characters rather than bytes so clinical text with accented
/// names or symbols never splits inside a code point.
pub fn excerpt(s: &str, max_chars: usize) -> String {
    let trimmed = s.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let kept: String = trimmed.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_short_text_unchanged() {
        assert_eq!(excerpt("  cough for 3 days ", 200), "cough for 3 days");
    }

    #[test]
    fn test_excerpt_truncates_with_ellipsis() {
        let text = "a".repeat(250);
        let out = excerpt(&text, 200);
        assert_eq!(out.chars().count(), 200);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_excerpt_multibyte() {
        let text = "é".repeat(10);
        assert_eq!(excerpt(&text, 6), "ééé...");
    }
}
