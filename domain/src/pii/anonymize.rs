//! Name anonymization: detected names become initials.

use crate::consultation::NameReplacement;
use regex::{NoExpand, Regex};

/// First letter of each whitespace-separated token, upper-cased
///
/// ```
/// assert_eq!(audit_domain::pii::initials("John Smith"), "JS");
/// ```
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Replace each name, case-insensitively and whole-word, with its initials.
///
/// Longest names are processed first so that "John Smith" is replaced
/// before a shorter overlapping "John" can break it up. Only names that
/// were actually found produce a [`NameReplacement`].
pub fn anonymize_names(text: &str, names: &[String]) -> (String, Vec<NameReplacement>) {
    let mut ordered: Vec<&str> = Vec::new();
    for name in names.iter().map(|n| n.trim()).filter(|n| n.chars().count() >= 2) {
        if !ordered.iter().any(|seen| seen.eq_ignore_ascii_case(name)) {
            ordered.push(name);
        }
    }
    ordered.sort_by_key(|name| std::cmp::Reverse(name.chars().count()));

    let mut output = text.to_string();
    let mut replacements = Vec::new();

    for name in ordered {
        let Ok(pattern) = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(name))) else {
            continue;
        };
        if !pattern.is_match(&output) {
            continue;
        }
        let replacement = initials(name);
        output = pattern
            .replace_all(&output, NoExpand(&replacement))
            .into_owned();
        replacements.push(NameReplacement::new(name, replacement));
    }

    (output, replacements)
}

/// Parse the name detector's answer.
///
/// Accepts a JSON array of `{"name": ".."}` objects or plain strings,
/// optionally wrapped as `{"names": [...]}` or surrounded by prose.
pub fn parse_detected_names(response: &str) -> Vec<String> {
    let Some(start) = response.find('[') else {
        return Vec::new();
    };
    let Some(end) = response[start..].rfind(']') else {
        return Vec::new();
    };
    let Ok(serde_json::Value::Array(items)) =
        serde_json::from_str::<serde_json::Value>(&response[start..start + end + 1])
    else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            serde_json::Value::String(s) => Some(s.as_str()),
            serde_json::Value::Object(map) => map.get("name").and_then(|v| v.as_str()),
            _ => None,
        })
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("John Smith"), "JS");
        assert_eq!(initials("  mary  ann   o'neil "), "MAO");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_round_trip_john_smith() {
        let text = "Seen with john smith today. JOHN SMITH consents.";
        let (out, replacements) = anonymize_names(text, &["John Smith".to_string()]);

        let check = Regex::new(r"(?i)\bjohn smith\b").unwrap();
        assert!(!check.is_match(&out));
        assert_eq!(out, "Seen with JS today. JS consents.");
        assert_eq!(replacements, vec![NameReplacement::new("John Smith", "JS")]);
    }

    #[test]
    fn test_longest_name_first() {
        let names = vec!["John".to_string(), "John Smith".to_string()];
        let (out, replacements) = anonymize_names("John Smith called; John later", &names);
        assert_eq!(out, "JS called; J later");
        assert_eq!(replacements[0].original, "John Smith");
        assert_eq!(replacements[1].replacement, "J");
    }

    #[test]
    fn test_whole_word_only_and_unmatched_names_skipped() {
        let names = vec!["Ann".to_string(), "Zed Zulu".to_string()];
        let (out, replacements) = anonymize_names("Annual review with Ann", &names);
        assert_eq!(out, "Annual review with A");
        assert_eq!(replacements.len(), 1);
    }

    #[test]
    fn test_parse_detected_names() {
        let response = "Names found:\n```json\n[{\"name\": \"John Smith\"}, \"Dr Patel\", {\"name\": \" \"}]\n```";
        assert_eq!(
            parse_detected_names(response),
            vec!["John Smith".to_string(), "Dr Patel".to_string()]
        );
        assert_eq!(
            parse_detected_names("{\"names\": [{\"name\": \"Ann Lee\"}]}"),
            vec!["Ann Lee".to_string()]
        );
        assert!(parse_detected_names("none").is_empty());
        assert!(parse_detected_names("[]").is_empty());
    }
}
