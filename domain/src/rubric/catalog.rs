//! The twelve-criterion consultation documentation rubric.

use super::criterion::{Criterion, CriterionId, RelevanceRule, RubricText};
use crate::signals::Signal;

/// Number of criteria in the rubric
pub const CRITERIA_COUNT: usize = 12;

/// Criterion that survives a failed encounter (continuing care / safety-net)
pub const SAFETY_NET_CRITERION: CriterionId = 11;

static CRITERIA: [Criterion; CRITERIA_COUNT] = [
    Criterion {
        id: 1,
        title: "History of presenting complaint",
        rubric: RubricText {
            acceptable: "Presenting complaint, duration and relevant history are clearly recorded.",
            concern: "History is recorded but brief or missing relevant detail such as duration.",
            unacceptable: "No meaningful history of the presenting complaint is recorded.",
        },
        relevance: RelevanceRule::Always,
        applies_to_failed_encounter: false,
        auto_accept_on: None,
    },
    Criterion {
        id: 2,
        title: "Problem coding",
        rubric: RubricText {
            acceptable: "The consultation is linked to a clear coded problem or diagnosis.",
            concern: "A problem is implied in free text but not clearly coded.",
            unacceptable: "No problem or diagnosis can be identified from the record.",
        },
        relevance: RelevanceRule::Always,
        applies_to_failed_encounter: false,
        auto_accept_on: Some(Signal::ProblemField),
    },
    Criterion {
        id: 3,
        title: "Red flags and relevant negatives",
        rubric: RubricText {
            acceptable: "Red flag symptoms appropriate to the presentation are documented as asked about.",
            concern: "Some relevant negatives are recorded but key red flags are not.",
            unacceptable: "No red flags or relevant negatives are documented where clearly indicated.",
        },
        relevance: RelevanceRule::Always,
        applies_to_failed_encounter: false,
        auto_accept_on: None,
    },
    Criterion {
        id: 4,
        title: "Ideas, concerns and expectations",
        rubric: RubricText {
            acceptable: "The patient's ideas, concerns or expectations are explored and recorded.",
            concern: "The patient's perspective is touched on but not meaningfully recorded.",
            unacceptable: "No evidence the patient's perspective was considered.",
        },
        relevance: RelevanceRule::Always,
        applies_to_failed_encounter: false,
        auto_accept_on: None,
    },
    Criterion {
        id: 5,
        title: "Examination findings",
        rubric: RubricText {
            acceptable: "A focused examination relevant to the complaint is documented with findings.",
            concern: "Examination is documented but incomplete for the presentation.",
            unacceptable: "No examination is documented where one was clearly required.",
        },
        relevance: RelevanceRule::ExcludedBySignal(Signal::TelephoneEncounter),
        applies_to_failed_encounter: false,
        auto_accept_on: None,
    },
    Criterion {
        id: 6,
        title: "Clinical reasoning and working diagnosis",
        rubric: RubricText {
            acceptable: "A working diagnosis or differential is stated and follows from the findings.",
            concern: "An impression is given but the reasoning is unclear or unsupported.",
            unacceptable: "No assessment or diagnosis is recorded.",
        },
        relevance: RelevanceRule::Always,
        applies_to_failed_encounter: false,
        auto_accept_on: None,
    },
    Criterion {
        id: 7,
        title: "Appropriateness of prescribing",
        rubric: RubricText {
            acceptable: "Medicines prescribed are appropriate for the documented diagnosis and guidelines.",
            concern: "Prescribing is plausible but the indication is not clearly documented.",
            unacceptable: "Prescribing is inappropriate or contradicts the documented assessment.",
        },
        relevance: RelevanceRule::RequiresSignal(Signal::PrescribingEvidence),
        applies_to_failed_encounter: false,
        auto_accept_on: None,
    },
    Criterion {
        id: 8,
        title: "Dose, quantity and instructions",
        rubric: RubricText {
            acceptable: "Dose, frequency, duration or quantity of prescribed items are recorded.",
            concern: "Some prescribing details are recorded but others are missing.",
            unacceptable: "Prescribed items are recorded without dose or instructions.",
        },
        relevance: RelevanceRule::RequiresSignal(Signal::PrescribingEvidence),
        applies_to_failed_encounter: false,
        auto_accept_on: None,
    },
    Criterion {
        id: 9,
        title: "Medicines safety",
        rubric: RubricText {
            acceptable: "Allergies, interactions, contraindications or monitoring are considered and documented.",
            concern: "Safety considerations are partially documented.",
            unacceptable: "A clear medicines safety issue is not addressed.",
        },
        relevance: RelevanceRule::RequiresSignal(Signal::PrescribingEvidence),
        applies_to_failed_encounter: false,
        auto_accept_on: None,
    },
    Criterion {
        id: 10,
        title: "Management plan and shared decision making",
        rubric: RubricText {
            acceptable: "A clear management plan is recorded and agreed with the patient.",
            concern: "A plan is recorded but vague or not shown to be shared with the patient.",
            unacceptable: "No management plan is recorded.",
        },
        relevance: RelevanceRule::Always,
        applies_to_failed_encounter: false,
        auto_accept_on: None,
    },
    Criterion {
        id: SAFETY_NET_CRITERION,
        title: "Safety-netting and continuing care",
        rubric: RubricText {
            acceptable: "Specific safety-netting advice and follow-up arrangements are documented.",
            concern: "Generic safety-netting only, or follow-up arrangements are unclear.",
            unacceptable: "No safety-netting or follow-up is documented where needed.",
        },
        relevance: RelevanceRule::Always,
        applies_to_failed_encounter: true,
        auto_accept_on: None,
    },
    Criterion {
        id: 12,
        title: "Test results actioned",
        rubric: RubricText {
            acceptable: "Test results are reviewed, interpreted and an action or plan is recorded.",
            concern: "Results are mentioned but the action taken is unclear.",
            unacceptable: "Abnormal results are recorded without any action.",
        },
        relevance: RelevanceRule::RequiresSignal(Signal::TestResultEvidence),
        applies_to_failed_encounter: false,
        auto_accept_on: None,
    },
];

/// Process-wide read-only rubric
pub struct Rubric;

impl Rubric {
    /// All criteria in id order
    pub fn criteria() -> &'static [Criterion; CRITERIA_COUNT] {
        &CRITERIA
    }

    /// Look up a criterion by id
    pub fn get(id: CriterionId) -> Option<&'static Criterion> {
        CRITERIA.iter().find(|c| c.id == id)
    }

    /// Title for a criterion id, or an empty string if unknown
    pub fn title(id: CriterionId) -> &'static str {
        Self::get(id).map_or("", |c| c.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_one_to_twelve_in_order() {
        let ids: Vec<_> = Rubric::criteria().iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_only_safety_net_survives_failed_encounter() {
        let survivors: Vec<_> = Rubric::criteria()
            .iter()
            .filter(|c| c.applies_to_failed_encounter)
            .map(|c| c.id)
            .collect();
        assert_eq!(survivors, vec![SAFETY_NET_CRITERION]);
    }

    #[test]
    fn test_rubric_prompt_contains_tiers() {
        let prompt = Rubric::get(5).unwrap().rubric_prompt();
        assert!(prompt.starts_with("Criterion 5: Examination findings"));
        assert!(prompt.contains("A (Acceptable):"));
        assert!(prompt.contains("U (Unacceptable):"));
    }

    #[test]
    fn test_unknown_criterion() {
        assert!(Rubric::get(13).is_none());
        assert_eq!(Rubric::title(0), "");
    }
}
