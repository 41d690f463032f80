//! Consultation record entity

use serde::{Deserialize, Serialize};

/// A single name substitution applied during anonymization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameReplacement {
    /// The name as detected (e.g. "John Smith")
    pub original: String,
    /// Its initials (e.g. "JS")
    pub replacement: String,
}

impl NameReplacement {
    pub fn new(original: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            replacement: replacement.into(),
        }
    }
}

/// One `{date, text}` block produced by the parser, before ordinals and
/// anonymization are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConsultation {
    pub date: String,
    pub text: String,
}

/// A consultation under review.
///
/// Created by the parser, anonymized once by the PII guard, and read-only
/// after that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationRecord {
    /// 1-based position in the submitted text
    pub ordinal: usize,
    /// `DD-MMM-YYYY HH:MM`
    pub date: String,
    pub raw_text: String,
    pub anonymized_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replacements: Vec<NameReplacement>,
}

impl ConsultationRecord {
    pub fn new(ordinal: usize, date: impl Into<String>, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        Self {
            ordinal,
            date: date.into(),
            anonymized_text: raw_text.clone(),
            raw_text,
            replacements: Vec::new(),
        }
    }

    /// Build ordered records (ordinals from 1) from parser output
    pub fn from_parsed(parsed: Vec<ParsedConsultation>) -> Vec<Self> {
        parsed
            .into_iter()
            .enumerate()
            .map(|(i, p)| Self::new(i + 1, p.date, p.text))
            .collect()
    }

    /// Replace the anonymized text and record the substitutions made
    pub fn with_anonymization(
        mut self,
        anonymized_text: impl Into<String>,
        replacements: Vec<NameReplacement>,
    ) -> Self {
        self.anonymized_text = anonymized_text.into();
        self.replacements = replacements;
        self
    }

    /// Text that is safe to send to the judgment capability
    pub fn judged_text(&self) -> &str {
        &self.anonymized_text
    }
}
