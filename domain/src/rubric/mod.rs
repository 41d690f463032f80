//! The documentation-quality rubric: twelve static criteria, their
//! relevance rules, and the guidance stance given to the judge.

pub mod catalog;
pub mod criterion;
pub mod guidance;

pub use catalog::{CRITERIA_COUNT, Rubric, SAFETY_NET_CRITERION};
pub use criterion::{Criterion, CriterionId, RelevanceRule, RubricText};
pub use guidance::GuidancePolicy;
