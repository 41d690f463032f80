//! Criterion assessment value object

use super::rating::Rating;
use crate::core::string::excerpt;
use crate::rubric::CriterionId;
use serde::{Deserialize, Serialize};

/// Maximum length of the evidence excerpt attached to an assessment
pub const EVIDENCE_MAX_CHARS: usize = 200;

/// How an assessment was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentSource {
    /// Decided by a deterministic relevance rule; no judgment call
    Rule,
    /// Rating tag parsed from the judgment answer
    Judgment,
    /// Judgment answered but no tag could be parsed; defaulted to Concern
    DefaultedFromUnparseable,
}

/// The outcome for one criterion on one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionAssessment {
    pub criterion_id: CriterionId,
    pub rating: Rating,
    pub explanation: String,
    #[serde(default)]
    pub evidence_snippet: String,
    pub source: AssessmentSource,
}

impl CriterionAssessment {
    /// A short-circuited Not-relevant outcome
    pub fn not_relevant(criterion_id: CriterionId, explanation: impl Into<String>) -> Self {
        Self {
            criterion_id,
            rating: Rating::NotRelevant,
            explanation: explanation.into(),
            evidence_snippet: String::new(),
            source: AssessmentSource::Rule,
        }
    }

    /// A rule-decided outcome other than Not-relevant
    pub fn by_rule(
        criterion_id: CriterionId,
        rating: Rating,
        explanation: impl Into<String>,
        record_text: &str,
    ) -> Self {
        Self {
            criterion_id,
            rating,
            explanation: explanation.into(),
            evidence_snippet: evidence_from(record_text),
            source: AssessmentSource::Rule,
        }
    }

    /// An outcome produced from a judgment answer
    pub fn judged(
        criterion_id: CriterionId,
        rating: Rating,
        explanation: impl Into<String>,
        record_text: &str,
        source: AssessmentSource,
    ) -> Self {
        Self {
            criterion_id,
            rating,
            explanation: explanation.into(),
            evidence_snippet: evidence_from(record_text),
            source,
        }
    }

    pub fn needed_judgment(&self) -> bool {
        !matches!(self.source, AssessmentSource::Rule)
    }
}

/// Bounded excerpt of the record text used as supporting evidence
pub fn evidence_from(record_text: &str) -> String {
    excerpt(record_text, EVIDENCE_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_relevant_has_no_evidence() {
        let a = CriterionAssessment::not_relevant(5, "Telephone");
        assert_eq!(a.rating, Rating::NotRelevant);
        assert!(a.evidence_snippet.is_empty());
        assert!(!a.needed_judgment());
    }

    #[test]
    fn test_judged_evidence_is_bounded() {
        let long = "word ".repeat(100);
        let a = CriterionAssessment::judged(1, Rating::Acceptable, "ok", &long, AssessmentSource::Judgment);
        assert!(a.evidence_snippet.chars().count() <= EVIDENCE_MAX_CHARS);
        assert!(a.needed_judgment());
    }
}
