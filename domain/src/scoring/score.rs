//! Exclusion-aware score calculation.

use super::rag::RagBand;
use crate::assessment::{CriterionAssessment, Rating};
use serde::{Deserialize, Serialize};

/// Score for one record, derived from its criterion ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub acceptable: usize,
    pub concern: usize,
    pub unacceptable: usize,
    pub not_relevant: usize,
    pub total: usize,
    /// `total - not_relevant`
    pub total_relevant: usize,
    /// Weighted sum of relevant ratings
    pub score: f64,
    /// `score / total_relevant * 100`, rounded to 2 dp; 0 when nothing is relevant
    pub percentage: f64,
    pub rag_band: RagBand,
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score a set of ratings.
///
/// Not-relevant ratings are removed from both numerator and denominator.
///
/// # Examples
///
/// ```
/// use audit_domain::assessment::Rating;
/// use audit_domain::scoring::{RagBand, calculate_score};
///
/// let mut ratings = vec![Rating::Acceptable; 8];
/// ratings.extend([Rating::Concern, Rating::Concern, Rating::Unacceptable, Rating::NotRelevant]);
///
/// let summary = calculate_score(&ratings);
/// assert_eq!(summary.total_relevant, 11);
/// assert_eq!(summary.percentage, 83.64);
/// assert_eq!(summary.rag_band, RagBand::Yellow);
/// ```
pub fn calculate_score(ratings: &[Rating]) -> ScoreSummary {
    let count = |r: Rating| ratings.iter().filter(|x| **x == r).count();
    let acceptable = count(Rating::Acceptable);
    let concern = count(Rating::Concern);
    let unacceptable = count(Rating::Unacceptable);
    let not_relevant = count(Rating::NotRelevant);

    let total = ratings.len();
    let total_relevant = total - not_relevant;
    let score: f64 = ratings.iter().filter_map(Rating::weight).sum();

    let percentage = if total_relevant > 0 {
        round2(score / total_relevant as f64 * 100.0)
    } else {
        0.0
    };

    ScoreSummary {
        acceptable,
        concern,
        unacceptable,
        not_relevant,
        total,
        total_relevant,
        score: round2(score),
        percentage,
        rag_band: RagBand::from_percentage(percentage),
    }
}

/// Score a record's assessments
pub fn score_assessments(assessments: &[CriterionAssessment]) -> ScoreSummary {
    let ratings: Vec<Rating> = assessments.iter().map(|a| a.rating).collect();
    calculate_score(&ratings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(a: usize, c: usize, u: usize, n: usize) -> Vec<Rating> {
        let mut v = vec![Rating::Acceptable; a];
        v.extend(vec![Rating::Concern; c]);
        v.extend(vec![Rating::Unacceptable; u]);
        v.extend(vec![Rating::NotRelevant; n]);
        v
    }

    #[test]
    fn test_worked_example() {
        let summary = calculate_score(&ratings(8, 2, 1, 1));
        assert_eq!(summary.total, 12);
        assert_eq!(summary.total_relevant, 11);
        assert_eq!(summary.score, 9.2);
        assert_eq!(summary.percentage, 83.64);
        assert_eq!(summary.rag_band, RagBand::Yellow);
    }

    #[test]
    fn test_all_not_relevant_is_zero() {
        let summary = calculate_score(&ratings(0, 0, 0, 12));
        assert_eq!(summary.total_relevant, 0);
        assert_eq!(summary.percentage, 0.0);
        assert_eq!(summary.rag_band, RagBand::Red);
    }

    #[test]
    fn test_percentage_bounds() {
        for a in 0..=12 {
            for c in 0..=(12 - a) {
                for u in 0..=(12 - a - c) {
                    let n = 12 - a - c - u;
                    let p = calculate_score(&ratings(a, c, u, n)).percentage;
                    assert!((0.0..=100.0).contains(&p), "{a}/{c}/{u}/{n} -> {p}");
                }
            }
        }
    }

    #[test]
    fn test_not_relevant_entries_do_not_move_the_score() {
        let base = calculate_score(&ratings(3, 2, 1, 0)).percentage;
        for extra in 1..=6 {
            assert_eq!(calculate_score(&ratings(3, 2, 1, extra)).percentage, base);
        }
    }

    #[test]
    fn test_all_acceptable_is_green() {
        let summary = calculate_score(&ratings(12, 0, 0, 0));
        assert_eq!(summary.percentage, 100.0);
        assert_eq!(summary.rag_band, RagBand::Green);
    }

    #[test]
    fn test_all_concern_is_amber() {
        let summary = calculate_score(&ratings(0, 12, 0, 0));
        assert_eq!(summary.percentage, 60.0);
        assert_eq!(summary.rag_band, RagBand::Amber);
    }
}
