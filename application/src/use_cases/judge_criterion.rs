//! Criterion judgment
//!
//! Sends one rubric criterion and one record to the judgment capability and
//! turns the free-form answer into a [`CriterionAssessment`].

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use audit_domain::{
    AssessmentSource, Criterion, CriterionAssessment, GuidancePolicy, PromptTemplate, Rating,
    parse_judgment_response,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const UNPARSEABLE_EXPLANATION: &str =
    "The judgment response did not contain a recognisable rating; recorded as Concern.";

/// Judges a single criterion against a single record
pub struct CriterionJudge<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    guidance: GuidancePolicy,
    timeout: Duration,
    retries: u32,
}

impl<G: LlmGateway + 'static> Clone for CriterionJudge<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            guidance: self.guidance,
            timeout: self.timeout,
            retries: self.retries,
        }
    }
}

impl<G: LlmGateway + 'static> CriterionJudge<G> {
    pub fn new(gateway: Arc<G>, guidance: GuidancePolicy) -> Self {
        Self {
            gateway,
            guidance,
            timeout: Duration::from_secs(60),
            retries: 1,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Judge `criterion` against `text`.
    ///
    /// A transient capability failure (connection, request or timeout) is retried up to the
    /// configured count and then returned. An answer without a valid tag is
    /// not a failure: it is recorded as [`Rating::Concern`].
    pub async fn judge(
        &self,
        criterion: &Criterion,
        text: &str,
    ) -> Result<CriterionAssessment, GatewayError> {
        let answer = self.call_with_retry(criterion, text).await?;
        let parsed = parse_judgment_response(&answer);

        let assessment = match parsed.rating {
            Some(rating) => {
                debug!("Criterion {} judged {}", criterion.id, rating);
                CriterionAssessment::judged(
                    criterion.id,
                    rating,
                    parsed.explanation,
                    text,
                    AssessmentSource::Judgment,
                )
            }
            None => {
                warn!(
                    "Criterion {}: no rating tag in judgment response, defaulting to Concern",
                    criterion.id
                );
                let explanation = if parsed.explanation.is_empty() {
                    UNPARSEABLE_EXPLANATION.to_string()
                } else {
                    parsed.explanation
                };
                CriterionAssessment::judged(
                    criterion.id,
                    Rating::Concern,
                    explanation,
                    text,
                    AssessmentSource::DefaultedFromUnparseable,
                )
            }
        };

        Ok(assessment)
    }

    async fn call_with_retry(&self, criterion: &Criterion, text: &str) -> Result<String, GatewayError> {
        let system = PromptTemplate::judgment_system(self.guidance);
        let prompt = PromptTemplate::judgment_prompt(criterion, text);

        let mut attempt = 0;
        loop {
            match self.call_once(&system, &prompt).await {
                Ok(answer) => return Ok(answer),
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        "Criterion {} judgment failed ({}), retrying ({}/{})",
                        criterion.id, e, attempt, self.retries
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn call_once(&self, system: &str, prompt: &str) -> Result<String, GatewayError> {
        let call = async {
            let session = self.gateway.create_session_with_system_prompt(system).await?;
            session.send(prompt).await
        };
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| GatewayError::Timeout)?
    }
}
