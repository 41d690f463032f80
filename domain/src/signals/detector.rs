//! Keyword-based text signal detection.
//!
//! Tunable word lists behind the [`TextSignalDetector`] trait.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A deterministic fact about a consultation's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    TelephoneEncounter,
    FailedEncounter,
    PrescribingEvidence,
    TestResultEvidence,
    /// A structural `Problem:` field followed by text
    ProblemField,
}

/// Boolean predicates over consultation text
pub trait TextSignalDetector: Send + Sync {
    fn is_telephone_encounter(&self, text: &str) -> bool;
    fn is_failed_encounter(&self, text: &str) -> bool;
    fn has_prescribing_evidence(&self, text: &str) -> bool;
    fn has_test_result_evidence(&self, text: &str) -> bool;
    fn has_problem_field(&self, text: &str) -> bool;
}

/// All signals evaluated once for a record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    pub telephone: bool,
    pub failed: bool,
    pub prescribing: bool,
    pub test_results: bool,
    pub problem_field: bool,
}

impl SignalSet {
    pub fn detect(detector: &dyn TextSignalDetector, text: &str) -> Self {
        Self {
            telephone: detector.is_telephone_encounter(text),
            failed: detector.is_failed_encounter(text),
            prescribing: detector.has_prescribing_evidence(text),
            test_results: detector.has_test_result_evidence(text),
            problem_field: detector.has_problem_field(text),
        }
    }

    pub fn contains(&self, signal: Signal) -> bool {
        match signal {
            Signal::TelephoneEncounter => self.telephone,
            Signal::FailedEncounter => self.failed,
            Signal::PrescribingEvidence => self.prescribing,
            Signal::TestResultEvidence => self.test_results,
            Signal::ProblemField => self.problem_field,
        }
    }
}

pub const TELEPHONE_KEYWORDS: &[&str] = &[
    "telephone",
    "telephone consultation",
    "phone call",
    "phone consultation",
    "phoned",
    "called patient",
    "spoke to patient",
    "t/c",
    "tel con",
    "telecon",
    "video consultation",
    "remote consultation",
];

pub const FAILED_ENCOUNTER_KEYWORDS: &[&str] = &[
    "did not attend",
    "dna",
    "dna'd",
    "failed to attend",
    "failed encounter",
    "no answer",
    "not answered",
    "did not answer",
    "no reply",
    "unable to contact",
    "unable to reach",
    "could not contact",
    "not contactable",
];

pub const PRESCRIBING_KEYWORDS: &[&str] = &[
    "prescribed",
    "prescribe",
    "prescription",
    "rx",
    "script",
    "issued",
    "started on",
    "commenced",
    "increase dose",
    "reduce dose",
    "tablets",
    "tablet",
    "capsules",
    "inhaler",
    "cream",
    "ointment",
    "antibiotic",
    "antibiotics",
    "repeat medication",
    "mg",
    "mcg",
];

pub const TEST_RESULT_KEYWORDS: &[&str] = &[
    "result",
    "results",
    "blood test",
    "bloods",
    "hba1c",
    "fbc",
    "u&e",
    "u&es",
    "lft",
    "lfts",
    "tft",
    "egfr",
    "crp",
    "cholesterol",
    "psa",
    "inr",
    "x-ray",
    "xray",
    "ultrasound",
    "scan",
    "ecg",
    "urine dip",
    "msu",
    "swab",
];

/// Dose quantities written without a space, e.g. `500mg`
static DOSE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?\s*(?:mg|mcg|micrograms|ml|units)\b").expect("static regex")
});

static PROBLEM_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bproblem\s*:[ \t]*\S").expect("static regex"));

/// Build a case-insensitive whole-word alternation from a keyword list
pub fn keyword_regex(keywords: &[&str]) -> Result<Regex, regex::Error> {
    let alt = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alt})\b"))
}

/// Default detector backed by the keyword lists above
#[derive(Debug, Clone)]
pub struct KeywordSignalDetector {
    telephone: Regex,
    failed: Regex,
    prescribing: Regex,
    test_results: Regex,
}

impl KeywordSignalDetector {
    pub fn new() -> Self {
        Self::with_keywords(
            TELEPHONE_KEYWORDS,
            FAILED_ENCOUNTER_KEYWORDS,
            PRESCRIBING_KEYWORDS,
            TEST_RESULT_KEYWORDS,
        )
        .expect("escaped keyword lists always compile")
    }

    /// Build a detector with custom word lists
    pub fn with_keywords(
        telephone: &[&str],
        failed: &[&str],
        prescribing: &[&str],
        test_results: &[&str],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            telephone: keyword_regex(telephone)?,
            failed: keyword_regex(failed)?,
            prescribing: keyword_regex(prescribing)?,
            test_results: keyword_regex(test_results)?,
        })
    }
}

impl Default for KeywordSignalDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSignalDetector for KeywordSignalDetector {
    fn is_telephone_encounter(&self, text: &str) -> bool {
        self.telephone.is_match(text)
    }

    fn is_failed_encounter(&self, text: &str) -> bool {
        self.failed.is_match(text)
    }

    fn has_prescribing_evidence(&self, text: &str) -> bool {
        self.prescribing.is_match(text) || DOSE_PATTERN.is_match(text)
    }

    fn has_test_result_evidence(&self, text: &str) -> bool {
        self.test_results.is_match(text)
    }

    fn has_problem_field(&self, text: &str) -> bool {
        PROBLEM_FIELD.is_match(text)
    }
}
