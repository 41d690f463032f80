//! PII issue types reported by the guard.

use crate::consultation::NameReplacement;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiType {
    NhsNumber,
    DateOfBirth,
    Postcode,
    PhoneNumber,
    Email,
    PersonNames,
}

impl PiiType {
    /// Fixed severity for each class
    pub fn severity(&self) -> Severity {
        match self {
            PiiType::NhsNumber | PiiType::DateOfBirth | PiiType::PersonNames => Severity::High,
            PiiType::Postcode | PiiType::PhoneNumber | PiiType::Email => Severity::Medium,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PiiType::NhsNumber => "NHS number",
            PiiType::DateOfBirth => "date of birth",
            PiiType::Postcode => "postcode",
            PiiType::PhoneNumber => "phone number",
            PiiType::Email => "email address",
            PiiType::PersonNames => "person name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
        }
    }
}

/// One class of PII found in the submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiIssue {
    #[serde(rename = "type")]
    pub pii_type: PiiType,
    pub severity: Severity,
    pub count: usize,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacements: Option<Vec<NameReplacement>>,
}

impl PiiIssue {
    /// Issue for `count` regex matches of a class
    pub fn matches(pii_type: PiiType, count: usize) -> Self {
        let action = match pii_type.severity() {
            Severity::High => "Remove these before submitting.",
            Severity::Medium => "Please check and remove if identifying.",
        };
        Self {
            pii_type,
            severity: pii_type.severity(),
            count,
            message: format!("Found {} possible {}(s). {}", count, pii_type.label(), action),
            replacements: None,
        }
    }

    /// Issue for names detected and replaced with initials
    pub fn person_names(replacements: Vec<NameReplacement>) -> Self {
        Self {
            pii_type: PiiType::PersonNames,
            severity: Severity::High,
            count: replacements.len(),
            message: format!(
                "Found {} person name(s); replaced with initials in the suggested text.",
                replacements.len()
            ),
            replacements: Some(replacements),
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::High
    }
}

/// True when any issue is HIGH severity
pub fn has_blocking(issues: &[PiiIssue]) -> bool {
    issues.iter().any(PiiIssue::is_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severities() {
        assert_eq!(PiiType::NhsNumber.severity(), Severity::High);
        assert_eq!(PiiType::Email.severity(), Severity::Medium);
        assert!(Severity::High > Severity::Medium);
    }

    #[test]
    fn test_serialized_shape() {
        let issue = PiiIssue::matches(PiiType::NhsNumber, 2);
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["type"], "NHS_NUMBER");
        assert_eq!(json["severity"], "HIGH");
        assert_eq!(json["count"], 2);
        assert!(json.get("replacements").is_none());
    }

    #[test]
    fn test_blocking() {
        let medium = vec![PiiIssue::matches(PiiType::Postcode, 1)];
        assert!(!has_blocking(&medium));
        let high = vec![PiiIssue::person_names(vec![NameReplacement::new("A B", "AB")])];
        assert!(has_blocking(&high));
    }
}
