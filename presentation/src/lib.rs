//! Presentation layer for consult-audit
//!
//! This crate contains CLI definitions, output formatters,
//! and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, InputArgs, OutputFormat, ReviewArgs};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ProgressReporter;
