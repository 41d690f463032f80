//! Scripted in-memory ports shared by the use case tests.

use crate::ports::assessment_store::{AssessmentStore, StoreError, StoredAssessment};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use async_trait::async_trait;
use audit_domain::{CRITERIA_COUNT, CriterionId, PromptTemplate};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct ScriptState {
    default_answer: String,
    answers: HashMap<CriterionId, String>,
    failing_criteria: Vec<CriterionId>,
    names_answer: String,
    fail_first: usize,
    fail_first_error: Option<GatewayError>,
    fail_names: bool,
    delay: Option<Duration>,
    judgment_calls: AtomicUsize,
    name_calls: AtomicUsize,
    judged: Mutex<Vec<CriterionId>>,
}

/// Gateway answering from a script and counting every call
pub struct ScriptedGateway {
    state: Arc<ScriptState>,
}

impl ScriptedGateway {
    /// Every judgment gets `answer`; name detection finds nobody
    pub fn answering(answer: &str) -> Self {
        Self {
            state: Arc::new(ScriptState {
                default_answer: answer.to_string(),
                names_answer: "[]".to_string(),
                ..Default::default()
            }),
        }
    }

    fn state_mut(&mut self) -> &mut ScriptState {
        Arc::get_mut(&mut self.state).expect("script configured before use")
    }

    pub fn with_answer(mut self, criterion: CriterionId, answer: &str) -> Self {
        self.state_mut().answers.insert(criterion, answer.to_string());
        self
    }

    pub fn failing_criterion(mut self, criterion: CriterionId) -> Self {
        self.state_mut().failing_criteria.push(criterion);
        self
    }

    /// The first `n` judgment calls fail with a connection error
    pub fn failing_first(mut self, n: usize) -> Self {
        self.state_mut().fail_first = n;
        self
    }

    /// The first `n` judgment calls fail with a malformed-response error
    pub fn malformed_first(mut self, n: usize) -> Self {
        let state = self.state_mut();
        state.fail_first = n;
        state.fail_first_error = Some(GatewayError::MalformedResponse("no choices".to_string()));
        self
    }

    pub fn with_names(mut self, answer: &str) -> Self {
        self.state_mut().names_answer = answer.to_string();
        self
    }

    pub fn failing_names(mut self) -> Self {
        self.state_mut().fail_names = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.state_mut().delay = Some(delay);
        self
    }

    pub fn judgment_calls(&self) -> usize {
        self.state.judgment_calls.load(Ordering::SeqCst)
    }

    pub fn name_calls(&self) -> usize {
        self.state.name_calls.load(Ordering::SeqCst)
    }

    /// Criterion ids in the order their judgments were requested
    pub fn judged_criteria(&self) -> Vec<CriterionId> {
        self.state.judged.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.judgment_calls() + self.name_calls()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn create_session_with_system_prompt(
        &self,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(ScriptedSession {
            state: Arc::clone(&self.state),
            name_detection: system_prompt == PromptTemplate::name_detection_system(),
        }))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

struct ScriptedSession {
    state: Arc<ScriptState>,
    name_detection: bool,
}

fn criterion_in(prompt: &str) -> Option<CriterionId> {
    (1..=CRITERIA_COUNT as CriterionId).find(|id| prompt.contains(&format!("Criterion {}:", id)))
}

#[async_trait]
impl LlmSession for ScriptedSession {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        if let Some(delay) = self.state.delay {
            tokio::time::sleep(delay).await;
        }

        if self.name_detection {
            self.state.name_calls.fetch_add(1, Ordering::SeqCst);
            if self.state.fail_names {
                return Err(GatewayError::RequestFailed("name detection down".to_string()));
            }
            return Ok(self.state.names_answer.clone());
        }

        let call = self.state.judgment_calls.fetch_add(1, Ordering::SeqCst);
        let criterion = criterion_in(content);
        if let Some(id) = criterion {
            self.state.judged.lock().unwrap().push(id);
        }

        if call < self.state.fail_first {
            return Err(self
                .state
                .fail_first_error
                .clone()
                .unwrap_or_else(|| GatewayError::ConnectionError("scripted failure".to_string())));
        }
        if let Some(id) = criterion {
            if self.state.failing_criteria.contains(&id) {
                return Err(GatewayError::RequestFailed(format!("criterion {} failed", id)));
            }
            if let Some(answer) = self.state.answers.get(&id) {
                return Ok(answer.clone());
            }
        }
        Ok(self.state.default_answer.clone())
    }
}

/// Store that records what it was asked to insert
#[derive(Default)]
pub struct RecordingStore {
    pub documents: Mutex<Vec<StoredAssessment>>,
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl RecordingStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssessmentStore for RecordingStore {
    async fn insert_many(&self, documents: Vec<StoredAssessment>) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StoreError::Unavailable("scripted store failure".to_string()));
        }
        self.documents.lock().unwrap().extend(documents);
        Ok(())
    }
}

/// Build `count` standard date-stamped records, each with `body` appended
pub fn records_text(count: usize, body: &str) -> String {
    (0..count)
        .map(|i| format!("{:02}-Mar-2024 09:{:02} Consultation {}\n{}", i + 1, i, i + 1, body))
        .collect::<Vec<_>>()
        .join("\n")
}
