//! Prompt domain
//!
//! Templates for the criterion judgment and name-detection requests.

mod template;

pub use template::PromptTemplate;
