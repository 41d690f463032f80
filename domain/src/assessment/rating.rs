//! Per-criterion rating and parsing of the judge's rating tag.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Outcome for one criterion on one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Acceptable,
    Concern,
    Unacceptable,
    NotRelevant,
}

impl Rating {
    /// Fixed scoring weight; `None` means excluded from the score entirely
    pub fn weight(&self) -> Option<f64> {
        match self {
            Rating::Acceptable => Some(1.0),
            Rating::Concern => Some(0.6),
            Rating::Unacceptable => Some(0.0),
            Rating::NotRelevant => None,
        }
    }

    /// The single-letter tag used in judgment answers
    pub fn tag(&self) -> char {
        match self {
            Rating::Acceptable => 'A',
            Rating::Concern => 'C',
            Rating::Unacceptable => 'U',
            Rating::NotRelevant => 'N',
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "a" | "acceptable" => Some(Rating::Acceptable),
            "c" | "concern" => Some(Rating::Concern),
            "u" | "unacceptable" => Some(Rating::Unacceptable),
            "n" | "not relevant" | "not_relevant" | "n/a" => Some(Rating::NotRelevant),
            _ => None,
        }
    }

    pub fn is_relevant(&self) -> bool {
        !matches!(self, Rating::NotRelevant)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Acceptable => write!(f, "Acceptable"),
            Rating::Concern => write!(f, "Concern"),
            Rating::Unacceptable => write!(f, "Unacceptable"),
            Rating::NotRelevant => write!(f, "Not relevant"),
        }
    }
}

/// Rating and explanation extracted from a free-form judgment answer
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedJudgment {
    /// `None` when no valid tag could be found
    pub rating: Option<Rating>,
    pub explanation: String,
}

static LABELLED_RATING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:^|[^a-z0-9])rating[*_\s]*[:=\-]?[*_\[(`'"<>\s]*((?i:unacceptable|acceptable|concern|not relevant)|(?-i:[ACUN]))(?:\b|_)"#,
    )
    .expect("static regex")
});

static BARE_TAG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*[*\[(`]*([ACUN])[*\])`.]*\s*$").expect("static regex")
});

static LABELLED_EXPLANATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\b(?:explanation|reason|rationale)[*_\s]*[:=\-]?[*_\s]*(.+)")
        .expect("static regex")
});

/// Parse a judgment answer into a rating tag and explanation.
///
/// Tolerates surrounding prose and markup. Formats tried in order:
///
/// 1. **JSON**: `{"rating": "A", "explanation": "..."}` (also inside code fences)
/// 2. **Labelled**: `Rating: C`, `**Rating:** U`, `**Rating**: A`, `<rating>A</rating>`, `Rating: Concern`
/// 3. **Bare tag line**: a line containing only `A`, `C`, `U` or `N`
///
/// # Examples
///
/// ```
/// use audit_domain::assessment::{Rating, parse_judgment_response};
///
/// let parsed = parse_judgment_response("RATING: C\nEXPLANATION: No duration recorded.");
/// assert_eq!(parsed.rating, Some(Rating::Concern));
/// assert_eq!(parsed.explanation, "No duration recorded.");
///
/// assert_eq!(parse_judgment_response("no tag here").rating, None);
/// ```
pub fn parse_judgment_response(response: &str) -> ParsedJudgment {
    if let Some(parsed) = parse_json_judgment(response) {
        return parsed;
    }

    let rating = LABELLED_RATING
        .captures(response)
        .and_then(|c| c.get(1))
        .and_then(|m| Rating::from_tag(m.as_str()))
        .or_else(|| {
            BARE_TAG_LINE
                .captures(response)
                .and_then(|c| c.get(1))
                .and_then(|m| Rating::from_tag(m.as_str()))
        });

    let explanation = LABELLED_EXPLANATION
        .captures(response)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| response.trim().to_string());

    ParsedJudgment {
        rating,
        explanation,
    }
}

fn parse_json_judgment(response: &str) -> Option<ParsedJudgment> {
    let start = response.find('{')?;
    let end = response[start..].rfind('}')?;
    let value: serde_json::Value = serde_json::from_str(&response[start..start + end + 1]).ok()?;
    let rating = value
        .get("rating")
        .and_then(|v| v.as_str())
        .and_then(Rating::from_tag)?;
    let explanation = value
        .get("explanation")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .trim()
        .to_string();
    Some(ParsedJudgment {
        rating: Some(rating),
        explanation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights() {
        assert_eq!(Rating::Acceptable.weight(), Some(1.0));
        assert_eq!(Rating::Concern.weight(), Some(0.6));
        assert_eq!(Rating::Unacceptable.weight(), Some(0.0));
        assert_eq!(Rating::NotRelevant.weight(), None);
    }

    #[test]
    fn test_parse_json() {
        let response = "Here is my assessment:\n```json\n{\"rating\": \"U\", \"explanation\": \"No plan.\"}\n```";
        let parsed = parse_judgment_response(response);
        assert_eq!(parsed.rating, Some(Rating::Unacceptable));
        assert_eq!(parsed.explanation, "No plan.");
    }

    #[test]
    fn test_parse_markdown_label() {
        let parsed = parse_judgment_response("**Rating:** A\n**Explanation:** Clear history.");
        assert_eq!(parsed.rating, Some(Rating::Acceptable));
        assert_eq!(parsed.explanation, "Clear history.");
    }

    #[test]
    fn test_parse_bold_label_before_separator() {
        let parsed = parse_judgment_response("**Rating**: A\n**Explanation**: Clear.");
        assert_eq!(parsed.rating, Some(Rating::Acceptable));
        assert_eq!(parsed.explanation, "Clear.");

        assert_eq!(
            parse_judgment_response("__Rating__: U").rating,
            Some(Rating::Unacceptable)
        );
    }

    #[test]
    fn test_parse_xml_like_label() {
        let parsed = parse_judgment_response("<rating>N</rating> not applicable");
        assert_eq!(parsed.rating, Some(Rating::NotRelevant));
    }

    #[test]
    fn test_parse_word_rating() {
        assert_eq!(
            parse_judgment_response("Rating: Unacceptable").rating,
            Some(Rating::Unacceptable)
        );
        assert_eq!(
            parse_judgment_response("rating - concern").rating,
            Some(Rating::Concern)
        );
    }

    #[test]
    fn test_parse_bare_tag_line() {
        let parsed = parse_judgment_response("C\nSafety-netting is generic.");
        assert_eq!(parsed.rating, Some(Rating::Concern));
        assert_eq!(parsed.explanation, "C\nSafety-netting is generic.");
    }

    #[test]
    fn test_parse_missing_tag() {
        let parsed = parse_judgment_response("The note is fairly thorough overall.");
        assert_eq!(parsed.rating, None);
        assert_eq!(parsed.explanation, "The note is fairly thorough overall.");
    }

    #[test]
    fn test_invalid_json_tag_falls_through() {
        let parsed = parse_judgment_response("{\"rating\": \"B\"}\nRating: A");
        assert_eq!(parsed.rating, Some(Rating::Acceptable));
    }
}
