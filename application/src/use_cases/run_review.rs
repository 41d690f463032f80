//! Run Review use case
//!
//! Orchestrates a complete rapid or full review:
//! validate → guard PII → batch the per-record pipeline → aggregate →
//! persist (detached).

use super::assess_record::{AssessRecordError, RecordAssessor};
use super::batch_scheduler::{BatchError, BatchScheduler};
use super::guard_pii::{PiiCheck, PiiGuard};
use super::judge_criterion::CriterionJudge;
use crate::config::ReviewParams;
use crate::ports::assessment_store::{AssessmentStore, StoredAssessment};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use audit_domain::pii::anonymize_names;
use audit_domain::{
    AggregateSummary, AuditMetadata, AuditReport, ConsultationParser, ConsultationRecord,
    CriterionId, DomainError, KeywordSignalDetector, PatternAnalyzer, PiiIssue, RagDistribution,
    RecordCountRule, RecordResult, RelevanceClassifier, ReviewType, TextSignalDetector, criteria_statistics,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Errors that can occur during a review
#[derive(Error, Debug)]
pub enum RunReviewError {
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("Submission blocked: {} PII issue(s) must be removed", .issues.len())]
    PiiBlocked {
        issues: Vec<PiiIssue>,
        /// Input with detected names replaced by initials
        suggested_text: String,
    },

    #[error("Judgment failed for record {ordinal}, criterion {criterion_id}: {source}")]
    Judgment {
        ordinal: usize,
        criterion_id: CriterionId,
        #[source]
        source: GatewayError,
    },

    #[error("Name detection failed: {0}")]
    NameDetection(#[source] GatewayError),

    #[error("Review task failed: {0}")]
    Internal(String),
}

impl From<BatchError<AssessRecordError>> for RunReviewError {
    fn from(err: BatchError<AssessRecordError>) -> Self {
        match err {
            BatchError::Failed { error, .. } => RunReviewError::Judgment {
                ordinal: error.ordinal,
                criterion_id: error.criterion_id,
                source: error.source,
            },
            BatchError::Join(msg) => RunReviewError::Internal(msg),
        }
    }
}

/// Input for the RunReview use case
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub review_type: ReviewType,
    /// Bulk consultation text as pasted from the clinical system
    pub text: String,
    pub metadata: AuditMetadata,
}

impl ReviewRequest {
    pub fn new(review_type: ReviewType, text: impl Into<String>) -> Self {
        Self {
            review_type,
            text: text.into(),
            metadata: AuditMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: AuditMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Use case for running a review
pub struct RunReviewUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    detector: Arc<dyn TextSignalDetector>,
    store: Option<Arc<dyn AssessmentStore>>,
    params: ReviewParams,
    pending_writes: Mutex<Vec<JoinHandle<()>>>,
}

impl<G: LlmGateway + 'static> RunReviewUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            detector: Arc::new(KeywordSignalDetector::new()),
            store: None,
            params: ReviewParams::default(),
            pending_writes: Mutex::new(Vec::new()),
        }
    }

    pub fn with_params(mut self, params: ReviewParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_detector(mut self, detector: Arc<dyn TextSignalDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_store(mut self, store: Arc<dyn AssessmentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn params(&self) -> &ReviewParams {
        &self.params
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, request: ReviewRequest) -> Result<AuditReport, RunReviewError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        request: ReviewRequest,
        progress: &dyn ProgressNotifier,
    ) -> Result<AuditReport, RunReviewError> {
        let (records, excluded_records) = self.prepare(&request)?;
        info!(
            "Starting {} review of {} record(s)",
            request.review_type,
            records.len()
        );

        let check = self
            .pii_guard()
            .check(&request.text)
            .await
            .map_err(RunReviewError::NameDetection)?;

        let blocked = if self.params.block_on_person_names {
            check.is_blocked()
        } else {
            check.is_blocked_excluding_names()
        };
        progress.on_pii_checked(check.issues.len(), blocked);
        if blocked {
            warn!("Submission blocked by {} PII issue(s)", check.issues.len());
            return Err(RunReviewError::PiiBlocked {
                issues: check.issues,
                suggested_text: check.anonymized_text,
            });
        }

        let records = Self::apply_anonymization(records, &check);
        let results = self.assess_all(records, progress).await?;

        let criteria_statistics = criteria_statistics(&results);
        let analysis = match request.review_type {
            ReviewType::Full => Some(PatternAnalyzer::analyze_with_statistics(
                &results,
                &criteria_statistics,
            )),
            ReviewType::Rapid => None,
        };

        let report = AuditReport {
            review_type: request.review_type,
            metadata: request.metadata,
            guidance: self.params.guidance,
            aggregate: AggregateSummary::from_results(&results),
            rag_distribution: RagDistribution::from_results(&results),
            records: results,
            criteria_statistics,
            analysis,
            excluded_records,
            pii_issues: check.issues,
        };

        info!(
            "Review complete: {:.2}% ({})",
            report.aggregate.percentage, report.aggregate.rag_band
        );
        self.persist(&report);
        Ok(report)
    }

    /// Run only the PII guard
    pub async fn check_pii(&self, text: &str) -> Result<PiiCheck, RunReviewError> {
        if text.trim().is_empty() {
            return Err(DomainError::EmptyInput.into());
        }
        self.pii_guard()
            .check(text)
            .await
            .map_err(RunReviewError::NameDetection)
    }

    fn pii_guard(&self) -> PiiGuard<G> {
        PiiGuard::new(
            Arc::clone(&self.gateway),
            self.params.name_detection_prefix_chars,
        )
        .with_timeout(self.params.judgment_timeout)
    }

    /// Parse and validate the record count; returns the records to assess
    /// and how many were dropped by the full-review ceiling.
    fn prepare(
        &self,
        request: &ReviewRequest,
    ) -> Result<(Vec<ConsultationRecord>, usize), DomainError> {
        if request.text.trim().is_empty() {
            return Err(DomainError::EmptyInput);
        }

        let mut records = ConsultationRecord::from_parsed(ConsultationParser::parse(&request.text));
        if records.is_empty() {
            return Err(DomainError::NoRecords);
        }

        let found = records.len();
        match request.review_type {
            ReviewType::Rapid => {
                let expected = self.params.rapid_record_count;
                if found != expected {
                    return Err(DomainError::InvalidRecordCount {
                        review_type: ReviewType::Rapid,
                        expected: RecordCountRule::Exactly(expected),
                        found,
                    });
                }
                Ok((records, 0))
            }
            ReviewType::Full => {
                let min = self.params.full_min_records;
                if found < min {
                    return Err(DomainError::InvalidRecordCount {
                        review_type: ReviewType::Full,
                        expected: RecordCountRule::AtLeast(min),
                        found,
                    });
                }
                let max = self.params.full_max_records;
                let excluded = found.saturating_sub(max);
                if excluded > 0 {
                    warn!("{} record(s) beyond the limit of {} were excluded", excluded, max);
                    records.truncate(max);
                }
                Ok((records, excluded))
            }
        }
    }

    fn apply_anonymization(
        records: Vec<ConsultationRecord>,
        check: &PiiCheck,
    ) -> Vec<ConsultationRecord> {
        if check.replacements.is_empty() {
            return records;
        }
        records
            .into_iter()
            .map(|record| {
                let (text, replacements) = anonymize_names(&record.raw_text, &check.names);
                record.with_anonymization(text, replacements)
            })
            .collect()
    }

    async fn assess_all(
        &self,
        records: Vec<ConsultationRecord>,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<RecordResult>, RunReviewError> {
        let judge = CriterionJudge::new(Arc::clone(&self.gateway), self.params.guidance)
            .with_timeout(self.params.judgment_timeout)
            .with_retries(self.params.judgment_retries);
        let assessor = RecordAssessor::new(RelevanceClassifier::new(Arc::clone(&self.detector)), judge);

        let results = BatchScheduler::new(self.params.batch_size)
            .run(records, progress, |record| {
                let assessor = assessor.clone();
                async move { assessor.assess(record).await }
            })
            .await?;
        Ok(results)
    }

    /// Fire-and-forget; failures are logged only
    fn persist(&self, report: &AuditReport) {
        let Some(store) = self.store.as_ref().map(Arc::clone) else {
            return;
        };
        let documents = StoredAssessment::from_report(report);
        let handle = tokio::spawn(async move {
            let count = documents.len();
            match store.insert_many(documents).await {
                Ok(()) => info!("Persisted {} assessment document(s)", count),
                Err(e) => warn!("Failed to persist assessments: {}", e),
            }
        });
        if let Ok(mut pending) = self.pending_writes.lock() {
            pending.retain(|h| !h.is_finished());
            pending.push(handle);
        }
    }

    /// Wait for detached persistence to finish (e.g. before process exit)
    pub async fn wait_for_persistence(&self) {
        let handles = match self.pending_writes.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => return,
        };
        for handle in handles {
            if let Err(e) = handle.await {
                warn!("Persistence task failed: {}", e);
            }
        }
    }
}
