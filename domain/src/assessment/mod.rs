//! Per-criterion assessments: ratings, rating-tag parsing, and the
//! deterministic relevance pre-filter.

pub mod criterion_assessment;
pub mod rating;
pub mod relevance;

pub use criterion_assessment::{AssessmentSource, CriterionAssessment, EVIDENCE_MAX_CHARS, evidence_from};
pub use rating::{ParsedJudgment, Rating, parse_judgment_response};
pub use relevance::{RelevanceClassifier, RelevanceDecision};
