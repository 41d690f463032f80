//! Criterion-level prevalence across records.

use crate::assessment::Rating;
use crate::review::RecordResult;
use crate::rubric::{CriterionId, Rubric};
use crate::scoring::round2;
use serde::{Deserialize, Serialize};

/// Rating counts for one criterion across all records.
///
/// Percentages are against the number of records, not against the
/// relevant count: this is a prevalence view, not a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionStatistics {
    pub criterion_id: CriterionId,
    pub title: String,
    pub acceptable: usize,
    pub concern: usize,
    pub unacceptable: usize,
    pub not_relevant: usize,
    pub acceptable_pct: f64,
    pub concern_pct: f64,
    pub unacceptable_pct: f64,
    pub not_relevant_pct: f64,
}

impl CriterionStatistics {
    /// Concern + Unacceptable occurrences
    pub fn problem_count(&self) -> usize {
        self.concern + self.unacceptable
    }
}

/// Statistics for every rubric criterion, in criterion order
pub fn criteria_statistics(results: &[RecordResult]) -> Vec<CriterionStatistics> {
    let records = results.len();
    let pct = |n: usize| {
        if records == 0 {
            0.0
        } else {
            round2(n as f64 / records as f64 * 100.0)
        }
    };

    Rubric::criteria()
        .iter()
        .map(|criterion| {
            let ratings: Vec<Rating> = results
                .iter()
                .filter_map(|r| r.rating_for(criterion.id))
                .collect();
            let count = |rating: Rating| ratings.iter().filter(|r| **r == rating).count();
            let (acceptable, concern, unacceptable, not_relevant) = (
                count(Rating::Acceptable),
                count(Rating::Concern),
                count(Rating::Unacceptable),
                count(Rating::NotRelevant),
            );
            CriterionStatistics {
                criterion_id: criterion.id,
                title: criterion.title.to_string(),
                acceptable,
                concern,
                unacceptable,
                not_relevant,
                acceptable_pct: pct(acceptable),
                concern_pct: pct(concern),
                unacceptable_pct: pct(unacceptable),
                not_relevant_pct: pct(not_relevant),
            }
        })
        .collect()
}
