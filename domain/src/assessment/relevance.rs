//! Relevance classification.
//!
//! Runs before any judgment call and settles, per criterion, whether the
//! criterion applies to the record at all. Rules, in priority order:
//!
//! 1. Failed encounter: everything except the safety-net criterion is Not-relevant.
//! 2. A criterion's [`RelevanceRule`] is not met: Not-relevant.
//! 3. The criterion's auto-accept signal (a filled `Problem:` field) is
//!    present: Acceptable without judgment.
//! 4. Otherwise the criterion needs judgment.

use super::criterion_assessment::CriterionAssessment;
use super::rating::Rating;
use crate::rubric::{Criterion, RelevanceRule, Rubric};
use crate::signals::{Signal, SignalSet, TextSignalDetector};
use std::sync::Arc;

pub const FAILED_ENCOUNTER_EXPLANATION: &str =
    "Not relevant: the patient did not attend or could not be contacted.";

/// Result of classifying one criterion against one record
#[derive(Debug, Clone, PartialEq)]
pub enum RelevanceDecision {
    /// Settled without judgment
    Decided(CriterionAssessment),
    /// Must be forwarded to the judge
    NeedsJudgment,
}

impl RelevanceDecision {
    pub fn needs_judgment(&self) -> bool {
        matches!(self, RelevanceDecision::NeedsJudgment)
    }
}

/// Applies deterministic domain rules before judgment
#[derive(Clone)]
pub struct RelevanceClassifier {
    detector: Arc<dyn TextSignalDetector>,
}

impl RelevanceClassifier {
    pub fn new(detector: Arc<dyn TextSignalDetector>) -> Self {
        Self { detector }
    }

    pub fn signals(&self, text: &str) -> SignalSet {
        SignalSet::detect(self.detector.as_ref(), text)
    }

    /// Classify every rubric criterion for a record, in criterion order
    pub fn classify_record(&self, text: &str) -> Vec<(&'static Criterion, RelevanceDecision)> {
        let signals = self.signals(text);
        Rubric::criteria()
            .iter()
            .map(|c| (c, Self::classify(&signals, c, text)))
            .collect()
    }

    /// Classify one criterion given precomputed signals
    pub fn classify(signals: &SignalSet, criterion: &Criterion, text: &str) -> RelevanceDecision {
        if signals.failed {
            if criterion.applies_to_failed_encounter {
                return RelevanceDecision::NeedsJudgment;
            }
            return RelevanceDecision::Decided(CriterionAssessment::not_relevant(
                criterion.id,
                FAILED_ENCOUNTER_EXPLANATION,
            ));
        }

        match criterion.relevance {
            RelevanceRule::Always => {}
            RelevanceRule::RequiresSignal(signal) if !signals.contains(signal) => {
                return RelevanceDecision::Decided(CriterionAssessment::not_relevant(
                    criterion.id,
                    missing_signal_explanation(signal),
                ));
            }
            RelevanceRule::ExcludedBySignal(signal) if signals.contains(signal) => {
                return RelevanceDecision::Decided(CriterionAssessment::not_relevant(
                    criterion.id,
                    present_signal_explanation(signal),
                ));
            }
            _ => {}
        }

        if let Some(signal) = criterion.auto_accept_on
            && signals.contains(signal)
        {
            return RelevanceDecision::Decided(CriterionAssessment::by_rule(
                criterion.id,
                Rating::Acceptable,
                auto_accept_explanation(signal),
                text,
            ));
        }

        RelevanceDecision::NeedsJudgment
    }
}

fn missing_signal_explanation(signal: Signal) -> &'static str {
    match signal {
        Signal::PrescribingEvidence => "Not relevant: no prescribing in this consultation.",
        Signal::TestResultEvidence => "Not relevant: no test results in this consultation.",
        Signal::TelephoneEncounter => "Not relevant: not a telephone consultation.",
        Signal::FailedEncounter => "Not relevant: consultation took place.",
        Signal::ProblemField => "Not relevant: no problem recorded.",
    }
}

fn present_signal_explanation(signal: Signal) -> &'static str {
    match signal {
        Signal::TelephoneEncounter => {
            "Not relevant: remote consultation, no physical examination possible."
        }
        Signal::FailedEncounter => FAILED_ENCOUNTER_EXPLANATION,
        Signal::PrescribingEvidence => "Not relevant: prescribing present.",
        Signal::TestResultEvidence => "Not relevant: test results present.",
        Signal::ProblemField => "Not relevant: problem field present.",
    }
}

fn auto_accept_explanation(signal: Signal) -> &'static str {
    match signal {
        Signal::ProblemField => "Problem field is completed in the record.",
        _ => "Accepted by rule.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::KeywordSignalDetector;

    fn classifier() -> RelevanceClassifier {
        RelevanceClassifier::new(Arc::new(KeywordSignalDetector::new()))
    }

    fn decision_for(decisions: &[(&Criterion, RelevanceDecision)], id: u8) -> RelevanceDecision {
        decisions
            .iter()
            .find(|(c, _)| c.id == id)
            .map(|(_, d)| d.clone())
            .unwrap()
    }

    fn rating_of(decision: &RelevanceDecision) -> Option<Rating> {
        match decision {
            RelevanceDecision::Decided(a) => Some(a.rating),
            RelevanceDecision::NeedsJudgment => None,
        }
    }

    #[test]
    fn test_telephone_excludes_examination() {
        let decisions = classifier().classify_record("Telephone consultation re back pain");
        assert_eq!(rating_of(&decision_for(&decisions, 5)), Some(Rating::NotRelevant));
        assert!(decision_for(&decisions, 1).needs_judgment());
    }

    #[test]
    fn test_failed_encounter_keeps_only_safety_net() {
        let decisions = classifier().classify_record("Patient did not attend. Letter sent.");
        for (criterion, decision) in &decisions {
            if criterion.id == 11 {
                assert!(decision.needs_judgment());
            } else {
                assert_eq!(rating_of(decision), Some(Rating::NotRelevant));
            }
        }
    }

    #[test]
    fn test_prescribing_criteria_need_prescribing_evidence() {
        let none = classifier().classify_record("Sore throat, advised fluids");
        for id in [7, 8, 9] {
            assert_eq!(rating_of(&decision_for(&none, id)), Some(Rating::NotRelevant));
        }

        let some = classifier().classify_record("Sore throat, phenoxymethylpenicillin 500mg qds");
        for id in [7, 8, 9] {
            assert!(decision_for(&some, id).needs_judgment());
        }
    }

    #[test]
    fn test_results_criterion_needs_results() {
        let without = classifier().classify_record("Knee pain");
        assert_eq!(rating_of(&decision_for(&without, 12)), Some(Rating::NotRelevant));

        let with = classifier().classify_record("Bloods reviewed, HbA1c 48");
        assert!(decision_for(&with, 12).needs_judgment());
    }

    #[test]
    fn test_problem_field_auto_accepts_coding() {
        let decisions = classifier().classify_record("Problem: Hypertension\nBP 150/90");
        match decision_for(&decisions, 2) {
            RelevanceDecision::Decided(a) => {
                assert_eq!(a.rating, Rating::Acceptable);
                assert!(!a.needed_judgment());
            }
            RelevanceDecision::NeedsJudgment => panic!("expected auto-accept"),
        }

        let empty = classifier().classify_record("Problem:\nBP 150/90");
        assert!(decision_for(&empty, 2).needs_judgment());
    }

    #[test]
    fn test_failed_encounter_overrides_problem_field() {
        let decisions = classifier().classify_record("Problem: Asthma\nDNA");
        assert_eq!(rating_of(&decision_for(&decisions, 2)), Some(Rating::NotRelevant));
    }
}
