//! Audit report value objects.

use crate::analysis::{CriterionStatistics, PatternAnalysis};
use crate::assessment::{CriterionAssessment, Rating};
use crate::consultation::ConsultationRecord;
use crate::pii::PiiIssue;
use crate::rubric::{CriterionId, GuidancePolicy};
use crate::scoring::{RagBand, ScoreSummary, round2, score_assessments};
use serde::{Deserialize, Serialize};

/// Review mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewType {
    /// Fixed two-record audit
    Rapid,
    /// Ten-or-more-record audit with pattern analysis
    Full,
}

impl ReviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewType::Rapid => "rapid",
            ReviewType::Full => "full",
        }
    }
}

impl std::fmt::Display for ReviewType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewType::Rapid => write!(f, "Rapid"),
            ReviewType::Full => write!(f, "Full"),
        }
    }
}

/// Optional caller-supplied identifiers for the audit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditMetadata {
    pub doctor_identifier: Option<String>,
    pub reference_number: Option<String>,
}

/// One record together with its twelve assessments and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    pub record: ConsultationRecord,
    /// Ordered by criterion id
    pub assessments: Vec<CriterionAssessment>,
    pub score: ScoreSummary,
}

impl RecordResult {
    /// Build a result, scoring from the assessments
    pub fn new(record: ConsultationRecord, mut assessments: Vec<CriterionAssessment>) -> Self {
        assessments.sort_by_key(|a| a.criterion_id);
        let score = score_assessments(&assessments);
        Self {
            record,
            assessments,
            score,
        }
    }

    pub fn rating_for(&self, criterion_id: CriterionId) -> Option<Rating> {
        self.assessments
            .iter()
            .find(|a| a.criterion_id == criterion_id)
            .map(|a| a.rating)
    }

    pub fn assessment_for(&self, criterion_id: CriterionId) -> Option<&CriterionAssessment> {
        self.assessments.iter().find(|a| a.criterion_id == criterion_id)
    }
}

/// Rollup over every criterion of every record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub records: usize,
    pub acceptable: usize,
    pub concern: usize,
    pub unacceptable: usize,
    pub not_relevant: usize,
    pub total: usize,
    pub total_relevant: usize,
    /// Pooled weighted score over all relevant criteria
    pub percentage: f64,
    /// Mean of the per-record percentages
    pub average_percentage: f64,
    pub rag_band: RagBand,
}

impl AggregateSummary {
    pub fn from_results(results: &[RecordResult]) -> Self {
        let sum = |f: fn(&ScoreSummary) -> usize| results.iter().map(|r| f(&r.score)).sum::<usize>();
        let total_relevant: usize = sum(|s| s.total_relevant);
        let score: f64 = results.iter().map(|r| r.score.score).sum();

        let percentage = if total_relevant > 0 {
            round2(score / total_relevant as f64 * 100.0)
        } else {
            0.0
        };
        let average_percentage = if results.is_empty() {
            0.0
        } else {
            round2(results.iter().map(|r| r.score.percentage).sum::<f64>() / results.len() as f64)
        };

        Self {
            records: results.len(),
            acceptable: sum(|s| s.acceptable),
            concern: sum(|s| s.concern),
            unacceptable: sum(|s| s.unacceptable),
            not_relevant: sum(|s| s.not_relevant),
            total: sum(|s| s.total),
            total_relevant,
            percentage,
            average_percentage,
            rag_band: RagBand::from_percentage(percentage),
        }
    }
}

/// Number of records in each band
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagDistribution {
    pub green: usize,
    pub yellow: usize,
    pub amber: usize,
    pub red: usize,
}

impl RagDistribution {
    pub fn from_results(results: &[RecordResult]) -> Self {
        let mut distribution = Self::default();
        for result in results {
            match result.score.rag_band {
                RagBand::Green => distribution.green += 1,
                RagBand::Yellow => distribution.yellow += 1,
                RagBand::Amber => distribution.amber += 1,
                RagBand::Red => distribution.red += 1,
            }
        }
        distribution
    }

    pub fn count(&self, band: RagBand) -> usize {
        match band {
            RagBand::Green => self.green,
            RagBand::Yellow => self.yellow,
            RagBand::Amber => self.amber,
            RagBand::Red => self.red,
        }
    }
}

/// The complete, immutable result of one review invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub review_type: ReviewType,
    #[serde(default)]
    pub metadata: AuditMetadata,
    pub guidance: GuidancePolicy,
    /// In input order
    pub records: Vec<RecordResult>,
    pub aggregate: AggregateSummary,
    pub rag_distribution: RagDistribution,
    pub criteria_statistics: Vec<CriterionStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<PatternAnalysis>,
    /// Records beyond the full-review ceiling that were not assessed
    pub excluded_records: usize,
    /// Non-blocking PII findings (MEDIUM severity, or remediated names)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pii_issues: Vec<PiiIssue>,
}
