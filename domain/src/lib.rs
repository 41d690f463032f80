//! Domain layer for consult-audit
//!
//! This crate contains the core audit logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Rubric
//!
//! Twelve fixed documentation-quality criteria, each rated Acceptable,
//! Concern, Unacceptable, or Not-relevant.
//!
//! ## Relevance before judgment
//!
//! A deterministic pre-filter ([`RelevanceClassifier`]) settles which
//! criteria apply to a record. Only the remainder are sent to the
//! non-deterministic judgment capability.
//!
//! ## Scoring
//!
//! Not-relevant criteria are excluded from both numerator and denominator;
//! the resulting percentage maps to a RAG band.
//!
//! ```text
//! raw text ─▶ ConsultationParser ─▶ records ─▶ PII scan/anonymize
//!          ─▶ RelevanceClassifier ─▶ (judge) ─▶ ScoreSummary ─▶ AuditReport
//! ```

pub mod analysis;
pub mod assessment;
pub mod consultation;
pub mod core;
pub mod pii;
pub mod prompt;
pub mod review;
pub mod rubric;
pub mod scoring;
pub mod signals;

// Re-export commonly used types
pub use analysis::{CriterionStatistics, PatternAnalysis, PatternAnalyzer, criteria_statistics};
pub use assessment::{
    AssessmentSource, CriterionAssessment, ParsedJudgment, Rating, RelevanceClassifier,
    RelevanceDecision, parse_judgment_response,
};
pub use consultation::{ConsultationParser, ConsultationRecord, NameReplacement, ParsedConsultation};
pub use core::error::{DomainError, RecordCountRule};
pub use pii::{PiiIssue, PiiScanner, PiiType, Severity};
pub use prompt::PromptTemplate;
pub use review::{
    AggregateSummary, AuditMetadata, AuditReport, RagDistribution, RecordResult, ReportFormat,
    ReviewType,
};
pub use rubric::{CRITERIA_COUNT, Criterion, CriterionId, GuidancePolicy, Rubric, SAFETY_NET_CRITERION};
pub use scoring::{RagBand, ScoreSummary, calculate_score};
pub use signals::{KeywordSignalDetector, Signal, SignalSet, TextSignalDetector};
