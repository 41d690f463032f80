//! Cross-record statistics and pattern analysis.

pub mod pattern;
pub mod statistics;

pub use pattern::{
    CommonConcern, PatternAnalysis, PatternAnalyzer, RecommendationPriority, Recommendation,
    RecordHighlight, Strength,
};
pub use statistics::{CriterionStatistics, criteria_statistics};
