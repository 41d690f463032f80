//! Red/Amber/Yellow/Green quality banding.

use serde::{Deserialize, Serialize};

/// Quality tier derived from a percentage score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RagBand {
    Green,
    Yellow,
    Amber,
    Red,
}

/// Static description and escalation action for a band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RagGuidance {
    pub band: RagBand,
    /// Inclusive lower bound of the band's percentage range
    pub min_percentage: f64,
    pub description: &'static str,
    pub action: &'static str,
}

const LADDER: [RagGuidance; 4] = [
    RagGuidance {
        band: RagBand::Green,
        min_percentage: 90.0,
        description: "Consistently good documentation standard.",
        action: "Routine re-audit in 12 months.",
    },
    RagGuidance {
        band: RagBand::Yellow,
        min_percentage: 70.0,
        description: "Generally satisfactory documentation with minor areas for improvement.",
        action: "Written feedback on the flagged criteria; re-audit in 6 months.",
    },
    RagGuidance {
        band: RagBand::Amber,
        min_percentage: 50.0,
        description: "Significant documentation concerns affecting several criteria.",
        action: "Supervised review with a clinical lead and re-audit within 3 months.",
    },
    RagGuidance {
        band: RagBand::Red,
        min_percentage: 0.0,
        description: "Documentation is inadequate and may be unsafe.",
        action: "Mandatory face-to-face review with the clinical lead before further unsupervised sessions.",
    },
];

impl RagBand {
    /// Band for a percentage score: `>=90` Green, `>=70` Yellow, `>=50` Amber, else Red
    pub fn from_percentage(percentage: f64) -> Self {
        LADDER
            .iter()
            .find(|g| percentage >= g.min_percentage)
            .map_or(RagBand::Red, |g| g.band)
    }

    pub fn guidance(&self) -> &'static RagGuidance {
        match self {
            RagBand::Green => &LADDER[0],
            RagBand::Yellow => &LADDER[1],
            RagBand::Amber => &LADDER[2],
            RagBand::Red => &LADDER[3],
        }
    }

    pub fn description(&self) -> &'static str {
        self.guidance().description
    }

    pub fn action(&self) -> &'static str {
        self.guidance().action
    }

    pub fn all() -> [RagBand; 4] {
        [RagBand::Green, RagBand::Yellow, RagBand::Amber, RagBand::Red]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RagBand::Green => "GREEN",
            RagBand::Yellow => "YELLOW",
            RagBand::Amber => "AMBER",
            RagBand::Red => "RED",
        }
    }
}

impl std::fmt::Display for RagBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RagBand::from_percentage(100.0), RagBand::Green);
        assert_eq!(RagBand::from_percentage(90.0), RagBand::Green);
        assert_eq!(RagBand::from_percentage(89.99), RagBand::Yellow);
        assert_eq!(RagBand::from_percentage(70.0), RagBand::Yellow);
        assert_eq!(RagBand::from_percentage(69.99), RagBand::Amber);
        assert_eq!(RagBand::from_percentage(50.0), RagBand::Amber);
        assert_eq!(RagBand::from_percentage(49.99), RagBand::Red);
        assert_eq!(RagBand::from_percentage(0.0), RagBand::Red);
    }

    #[test]
    fn test_guidance_is_static_per_band() {
        for band in RagBand::all() {
            assert_eq!(band.guidance().band, band);
            assert!(!band.action().is_empty());
        }
        assert!(RagBand::Red.action().contains("face-to-face"));
    }
}
