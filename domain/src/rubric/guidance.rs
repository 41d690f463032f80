//! Guidance policy for the judgment capability.
//!
//! A policy only changes the natural-language stance given to the judge;
//! the expected answer format is the same for every policy.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuidancePolicy {
    #[default]
    Standard,
    Strict,
    Lenient,
}

impl GuidancePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuidancePolicy::Standard => "standard",
            GuidancePolicy::Strict => "strict",
            GuidancePolicy::Lenient => "lenient",
        }
    }

    /// Stance paragraph appended to the judge's system prompt
    pub fn instructions(&self) -> &'static str {
        match self {
            GuidancePolicy::Standard => {
                "Apply the rubric as a reasonable experienced GP appraiser would. \
                 Give credit for information that is clearly implied by the record."
            }
            GuidancePolicy::Strict => {
                "Apply the rubric strictly. Only credit what is explicitly written. \
                 If information is missing, rate it as missing."
            }
            GuidancePolicy::Lenient => {
                "Apply the rubric leniently. Short but clinically adequate notes are acceptable, \
                 and reasonable clinical shorthand should be given credit."
            }
        }
    }
}

impl std::fmt::Display for GuidancePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuidancePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "default" => Ok(GuidancePolicy::Standard),
            "strict" => Ok(GuidancePolicy::Strict),
            "lenient" => Ok(GuidancePolicy::Lenient),
            other => Err(DomainError::InvalidGuidance(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_guidance() {
        assert_eq!("Strict".parse::<GuidancePolicy>().unwrap(), GuidancePolicy::Strict);
        assert_eq!("default".parse::<GuidancePolicy>().unwrap(), GuidancePolicy::Standard);
        assert!("harsh".parse::<GuidancePolicy>().is_err());
    }

    #[test]
    fn test_policies_differ_in_instructions() {
        assert_ne!(
            GuidancePolicy::Strict.instructions(),
            GuidancePolicy::Lenient.instructions()
        );
    }
}
