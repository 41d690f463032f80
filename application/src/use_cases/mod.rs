//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod assess_record;
pub mod batch_scheduler;
pub mod guard_pii;
pub mod judge_criterion;
pub mod run_review;

#[cfg(test)]
pub(crate) mod test_support;
