//! Per-record assessment pipeline
//!
//! RelevanceClassifier → CriterionJudge (only where needed) → scoring.
//! Judgments for one record run concurrently; each writes its own criterion.

use super::judge_criterion::CriterionJudge;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use audit_domain::{
    ConsultationRecord, CriterionAssessment, CriterionId, RecordResult, RelevanceClassifier,
    RelevanceDecision,
};
use futures::future::try_join_all;
use thiserror::Error;
use tracing::debug;

/// A judgment call that failed after its retries
#[derive(Error, Debug, Clone)]
#[error("Record {ordinal}, criterion {criterion_id}: {source}")]
pub struct AssessRecordError {
    pub ordinal: usize,
    pub criterion_id: CriterionId,
    #[source]
    pub source: GatewayError,
}

/// Assesses one record against every criterion
pub struct RecordAssessor<G: LlmGateway + 'static> {
    classifier: RelevanceClassifier,
    judge: CriterionJudge<G>,
}

impl<G: LlmGateway + 'static> Clone for RecordAssessor<G> {
    fn clone(&self) -> Self {
        Self {
            classifier: self.classifier.clone(),
            judge: self.judge.clone(),
        }
    }
}

impl<G: LlmGateway + 'static> RecordAssessor<G> {
    pub fn new(classifier: RelevanceClassifier, judge: CriterionJudge<G>) -> Self {
        Self { classifier, judge }
    }

    pub async fn assess(&self, record: ConsultationRecord) -> Result<RecordResult, AssessRecordError> {
        let ordinal = record.ordinal;
        let text = record.judged_text();
        let decisions = self.classifier.classify_record(text);

        let mut assessments: Vec<CriterionAssessment> = Vec::with_capacity(decisions.len());
        let mut pending = Vec::new();
        for (criterion, decision) in decisions {
            match decision {
                RelevanceDecision::Decided(assessment) => {
                    debug!(
                        "Record {}: criterion {} settled by rule as {}",
                        ordinal, criterion.id, assessment.rating
                    );
                    assessments.push(assessment);
                }
                RelevanceDecision::NeedsJudgment => pending.push(criterion),
            }
        }

        let judged = try_join_all(pending.into_iter().map(|criterion| async move {
            self.judge
                .judge(criterion, text)
                .await
                .map_err(|source| AssessRecordError {
                    ordinal,
                    criterion_id: criterion.id,
                    source,
                })
        }))
        .await?;

        assessments.extend(judged);
        Ok(RecordResult::new(record, assessments))
    }
}
