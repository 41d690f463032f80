//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] — validation errors raised before any work starts
//! - [`string`] — text helpers for evidence excerpts

pub mod error;
pub mod string;
