//! Cross-record pattern analysis for full reviews.

use super::statistics::{CriterionStatistics, criteria_statistics};
use crate::review::RecordResult;
use crate::rubric::CriterionId;
use crate::scoring::RagBand;
use serde::{Deserialize, Serialize};

/// Number of entries kept in the concern and strength rankings
pub const TOP_N: usize = 5;

/// Acceptable rate (percent of records) at or above which a criterion is a strength
pub const STRENGTH_THRESHOLD_PCT: f64 = 80.0;

/// A record singled out as best or worst performing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordHighlight {
    pub ordinal: usize,
    pub date: String,
    pub percentage: f64,
    pub rag_band: RagBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonConcern {
    pub criterion_id: CriterionId,
    pub title: String,
    /// Concern + Unacceptable occurrences across records
    pub occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strength {
    pub criterion_id: CriterionId,
    pub title: String,
    pub acceptable_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecommendationPriority {
    High,
    Positive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: RecommendationPriority,
    pub message: String,
    /// Criterion titles this recommendation refers to
    pub criteria: Vec<String>,
}

/// Output of [`PatternAnalyzer::analyze`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    pub best_record: Option<RecordHighlight>,
    pub worst_record: Option<RecordHighlight>,
    pub common_concerns: Vec<CommonConcern>,
    pub strengths: Vec<Strength>,
    pub recommendations: Vec<Recommendation>,
}

pub struct PatternAnalyzer;

impl PatternAnalyzer {
    /// Analyze per-record results.
    ///
    /// Best/worst ties resolve to the lowest record ordinal: results are
    /// visited in ordinal order and only a strictly better (or worse)
    /// percentage replaces the current pick.
    pub fn analyze(results: &[RecordResult]) -> PatternAnalysis {
        let stats = criteria_statistics(results);
        Self::analyze_with_statistics(results, &stats)
    }

    /// Same as [`analyze`](Self::analyze) with statistics already computed
    pub fn analyze_with_statistics(
        results: &[RecordResult],
        stats: &[CriterionStatistics],
    ) -> PatternAnalysis {
        let common_concerns = Self::common_concerns(stats);
        let strengths = Self::strengths(stats);
        let recommendations = Self::recommendations(&common_concerns, &strengths);

        PatternAnalysis {
            best_record: Self::pick(results, |candidate, current| candidate > current),
            worst_record: Self::pick(results, |candidate, current| candidate < current),
            common_concerns,
            strengths,
            recommendations,
        }
    }

    fn pick(results: &[RecordResult], replaces: impl Fn(f64, f64) -> bool) -> Option<RecordHighlight> {
        let mut ordered: Vec<&RecordResult> = results.iter().collect();
        ordered.sort_by_key(|r| r.record.ordinal);

        let mut chosen: Option<&RecordResult> = None;
        for result in ordered {
            match chosen {
                Some(current) if !replaces(result.score.percentage, current.score.percentage) => {}
                _ => chosen = Some(result),
            }
        }

        chosen.map(|r| RecordHighlight {
            ordinal: r.record.ordinal,
            date: r.record.date.clone(),
            percentage: r.score.percentage,
            rag_band: r.score.rag_band,
        })
    }

    fn common_concerns(stats: &[CriterionStatistics]) -> Vec<CommonConcern> {
        let mut ranked: Vec<&CriterionStatistics> =
            stats.iter().filter(|s| s.problem_count() > 0).collect();
        // Stable: equal counts keep criterion order
        ranked.sort_by(|a, b| b.problem_count().cmp(&a.problem_count()));
        ranked
            .into_iter()
            .take(TOP_N)
            .map(|s| CommonConcern {
                criterion_id: s.criterion_id,
                title: s.title.clone(),
                occurrences: s.problem_count(),
            })
            .collect()
    }

    fn strengths(stats: &[CriterionStatistics]) -> Vec<Strength> {
        let mut ranked: Vec<&CriterionStatistics> = stats
            .iter()
            .filter(|s| s.acceptable_pct >= STRENGTH_THRESHOLD_PCT)
            .collect();
        ranked.sort_by(|a, b| b.acceptable_pct.total_cmp(&a.acceptable_pct));
        ranked
            .into_iter()
            .take(TOP_N)
            .map(|s| Strength {
                criterion_id: s.criterion_id,
                title: s.title.clone(),
                acceptable_pct: s.acceptable_pct,
            })
            .collect()
    }

    fn recommendations(concerns: &[CommonConcern], strengths: &[Strength]) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();
        if !concerns.is_empty() {
            recommendations.push(Recommendation {
                priority: RecommendationPriority::High,
                message: "Focus improvement on the most frequently flagged criteria.".to_string(),
                criteria: concerns.iter().map(|c| c.title.clone()).collect(),
            });
        }
        if !strengths.is_empty() {
            recommendations.push(Recommendation {
                priority: RecommendationPriority::Positive,
                message: "Maintain the consistently strong documentation in these areas.".to_string(),
                criteria: strengths.iter().map(|s| s.title.clone()).collect(),
            });
        }
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{CriterionAssessment, Rating};
    use crate::consultation::ConsultationRecord;
    use crate::review::RecordResult;
    use crate::rubric::Rubric;

    fn result(ordinal: usize, ratings: [Rating; 12]) -> RecordResult {
        let assessments = Rubric::criteria()
            .iter()
            .zip(ratings)
            .map(|(c, r)| CriterionAssessment::by_rule(c.id, r, "test", "text"))
            .collect();
        RecordResult::new(
            ConsultationRecord::new(ordinal, format!("0{ordinal}-Jan-2024 09:00"), "text"),
            assessments,
        )
    }

    fn uniform(rating: Rating) -> [Rating; 12] {
        [rating; 12]
    }

    #[test]
    fn test_best_and_worst_records() {
        let results = vec![
            result(1, uniform(Rating::Concern)),
            result(2, uniform(Rating::Acceptable)),
            result(3, uniform(Rating::Unacceptable)),
        ];
        let analysis = PatternAnalyzer::analyze(&results);
        assert_eq!(analysis.best_record.unwrap().ordinal, 2);
        assert_eq!(analysis.worst_record.unwrap().ordinal, 3);
    }

    #[test]
    fn test_ties_resolve_to_lowest_ordinal() {
        let results = vec![
            result(2, uniform(Rating::Acceptable)),
            result(1, uniform(Rating::Acceptable)),
            result(3, uniform(Rating::Acceptable)),
        ];
        let analysis = PatternAnalyzer::analyze(&results);
        assert_eq!(analysis.best_record.unwrap().ordinal, 1);
        assert_eq!(analysis.worst_record.unwrap().ordinal, 1);
    }

    #[test]
    fn test_common_concerns_ranked_and_capped() {
        let mut ratings = uniform(Rating::Acceptable);
        // Criteria 1..=7 flagged; 3 flagged in both records
        for r in ratings.iter_mut().take(7) {
            *r = Rating::Concern;
        }
        let mut second = uniform(Rating::Acceptable);
        second[2] = Rating::Unacceptable;

        let analysis = PatternAnalyzer::analyze(&[result(1, ratings), result(2, second)]);
        assert_eq!(analysis.common_concerns.len(), TOP_N);
        assert_eq!(analysis.common_concerns[0].criterion_id, 3);
        assert_eq!(analysis.common_concerns[0].occurrences, 2);
        assert_eq!(analysis.common_concerns[1].criterion_id, 1);
    }

    #[test]
    fn test_strengths_threshold() {
        let results: Vec<_> = (1..=5)
            .map(|i| {
                let mut ratings = uniform(Rating::Acceptable);
                // Criterion 1 acceptable in 3/5 records only
                if i > 3 {
                    ratings[0] = Rating::Concern;
                }
                result(i, ratings)
            })
            .collect();
        let analysis = PatternAnalyzer::analyze(&results);
        assert_eq!(analysis.strengths.len(), TOP_N);
        assert!(analysis.strengths.iter().all(|s| s.criterion_id != 1));
        assert!(analysis.strengths.iter().all(|s| s.acceptable_pct >= 80.0));
    }

    #[test]
    fn test_recommendation_buckets() {
        let mut ratings = uniform(Rating::Acceptable);
        ratings[10] = Rating::Unacceptable;
        let analysis = PatternAnalyzer::analyze(&[result(1, ratings)]);

        let high = analysis
            .recommendations
            .iter()
            .find(|r| r.priority == RecommendationPriority::High)
            .unwrap();
        assert_eq!(high.criteria, vec!["Safety-netting and continuing care".to_string()]);

        let positive = analysis
            .recommendations
            .iter()
            .find(|r| r.priority == RecommendationPriority::Positive)
            .unwrap();
        assert_eq!(positive.criteria.len(), TOP_N);
    }

    #[test]
    fn test_statistics_use_record_count() {
        let mut ratings = uniform(Rating::Acceptable);
        ratings[4] = Rating::NotRelevant;
        let results = vec![result(1, ratings), result(2, uniform(Rating::Acceptable))];
        let stats = criteria_statistics(&results);
        let exam = &stats[4];
        assert_eq!(exam.not_relevant, 1);
        assert_eq!(exam.not_relevant_pct, 50.0);
        assert_eq!(exam.acceptable_pct, 50.0);
    }

    #[test]
    fn test_empty_results() {
        let analysis = PatternAnalyzer::analyze(&[]);
        assert!(analysis.best_record.is_none());
        assert!(analysis.common_concerns.is_empty());
        assert!(analysis.recommendations.is_empty());
    }
}
