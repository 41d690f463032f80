//! Rubric criterion definitions

use crate::signals::Signal;
use serde::{Deserialize, Serialize};

/// Identifier of a rubric criterion (1..=12)
pub type CriterionId = u8;

/// Tiered rubric wording for one criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RubricText {
    pub acceptable: &'static str,
    pub concern: &'static str,
    pub unacceptable: &'static str,
}

/// When a criterion applies to a consultation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelevanceRule {
    /// Always judged (unless the encounter failed)
    Always,
    /// Judged only if the signal is present in the record
    RequiresSignal(Signal),
    /// Judged only if the signal is absent from the record
    ExcludedBySignal(Signal),
}

/// A static rubric criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub title: &'static str,
    pub rubric: RubricText,
    pub relevance: RelevanceRule,
    /// Still judged when the patient did not attend / could not be reached
    pub applies_to_failed_encounter: bool,
    /// Rated Acceptable without judgment when this signal is present
    pub auto_accept_on: Option<Signal>,
}

impl Criterion {
    /// Render the rubric tiers for inclusion in a judgment prompt
    pub fn rubric_prompt(&self) -> String {
        format!(
            "Criterion {}: {}\n\
             A (Acceptable): {}\n\
             C (Concern): {}\n\
             U (Unacceptable): {}",
            self.id,
            self.title,
            self.rubric.acceptable,
            self.rubric.concern,
            self.rubric.unacceptable
        )
    }
}
