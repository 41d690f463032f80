//! Deterministic text signals used by relevance classification.
//!
//! Identifier-shaped and name-shaped token detection lives in [`crate::pii`].

pub mod detector;

pub use detector::{KeywordSignalDetector, Signal, SignalSet, TextSignalDetector, keyword_regex};
