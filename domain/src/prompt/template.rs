//! Prompt templates for the audit flow

use crate::rubric::{Criterion, GuidancePolicy};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a criterion judgment
    pub fn judgment_system(guidance: GuidancePolicy) -> String {
        format!(
            r#"You are an experienced GP appraiser auditing the quality of clinical consultation notes.
You assess one rubric criterion at a time against a single consultation record.
{}

Answer in exactly this format:
RATING: <A|C|U|N>
EXPLANATION: <one or two sentences citing the record>

A = Acceptable, C = Concern, U = Unacceptable, N = Not relevant to this consultation."#,
            guidance.instructions()
        )
    }

    /// User prompt for a criterion judgment
    pub fn judgment_prompt(criterion: &Criterion, consultation_text: &str) -> String {
        format!(
            r#"Rubric:
{}

Consultation record:
---
{}
---

Rate the record against this criterion only."#,
            criterion.rubric_prompt(),
            consultation_text
        )
    }

    /// System prompt for person-name detection
    pub fn name_detection_system() -> &'static str {
        r#"You identify personal names of real people in clinical text so they can be anonymized.
Return ONLY person names: patients, relatives, carers and staff.
Do NOT return medication names, medical conditions, eponymous diseases or signs
(e.g. "Parkinson's", "Crohn's", "Murphy's sign"), organisations, or place names."#
    }

    /// User prompt for person-name detection
    pub fn name_detection_prompt(text: &str) -> String {
        format!(
            r#"Find all person names in the following text.

Text:
---
{}
---

Respond with a JSON array only, for example:
[{{"name": "John Smith"}}, {{"name": "Dr Patel"}}]
Respond with [] if there are none."#,
            text
        )
    }
}
