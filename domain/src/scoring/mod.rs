//! Scoring engine: weighted ratings to a percentage and RAG band.
//!
//! | Rating | Weight |
//! |--------|--------|
//! | Acceptable | 1.0 |
//! | Concern | 0.6 |
//! | Unacceptable | 0.0 |
//! | Not relevant | excluded |

pub mod rag;
pub mod score;

pub use rag::{RagBand, RagGuidance};
pub use score::{ScoreSummary, calculate_score, round2, score_assessments};
