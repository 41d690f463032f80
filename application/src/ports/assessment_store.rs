//! Assessment store port
//!
//! Append-only persistence of one document per assessed record. The audit
//! flow only ever writes; listing and statistics are read-side concerns.

use async_trait::async_trait;
use audit_domain::{AuditReport, CriterionAssessment, ReviewType, ScoreSummary};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// One persisted record assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAssessment {
    pub audit_reference: Option<String>,
    pub doctor_identifier: Option<String>,
    pub review_type: ReviewType,
    pub ordinal: usize,
    pub consultation_date: String,
    pub assessments: Vec<CriterionAssessment>,
    pub score: ScoreSummary,
    /// RFC 3339, UTC
    pub recorded_at: String,
}

impl StoredAssessment {
    /// One document per record in the report
    pub fn from_report(report: &AuditReport) -> Vec<Self> {
        let recorded_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        report
            .records
            .iter()
            .map(|r| Self {
                audit_reference: report.metadata.reference_number.clone(),
                doctor_identifier: report.metadata.doctor_identifier.clone(),
                review_type: report.review_type,
                ordinal: r.record.ordinal,
                consultation_date: r.record.date.clone(),
                assessments: r.assessments.clone(),
                score: r.score.clone(),
                recorded_at: recorded_at.clone(),
            })
            .collect()
    }
}

/// Append-only assessment persistence
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    async fn insert_many(&self, documents: Vec<StoredAssessment>) -> Result<(), StoreError>;
}
