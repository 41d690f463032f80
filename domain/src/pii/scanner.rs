//! Deterministic regex scan for identifier-shaped tokens.

use super::issue::{PiiIssue, PiiType};
use regex::Regex;
use std::sync::LazyLock;

static NHS_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}[ -]?\d{3}[ -]?\d{4}\b").expect("static regex"));

static DATE_OF_BIRTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:dob|d\.o\.b\.?|date of birth|born)\s*[:\-]?\s*(?:\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}|\d{1,2}[\s\-](?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*[\s\-]\d{2,4})",
    )
    .expect("static regex")
});

/// Upper-case UK postcode shape: outward code, optional space, inward code
static POSTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]{1,2}\d[A-Z\d]?)\s*(\d[A-Z]{2})\b").expect("static regex")
});

static SINGLE_LETTER_OUTWARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]\d+$").expect("static regex"));

static VITAMIN_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:vitamin|vit\.?)\s*$").expect("static regex"));

static PHONE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+44\s?\d{2,4}|\b0\d{2,4})[\s-]?\d{3,4}[\s-]?\d{3,4}\b").expect("static regex")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("static regex")
});

pub struct PiiScanner;

impl PiiScanner {
    /// Scan bulk text and return one issue per class found, in fixed class order
    pub fn scan(text: &str) -> Vec<PiiIssue> {
        [
            (PiiType::NhsNumber, Self::count_nhs_numbers(text)),
            (PiiType::DateOfBirth, DATE_OF_BIRTH.find_iter(text).count()),
            (PiiType::Postcode, Self::count_postcodes(text)),
            (PiiType::PhoneNumber, PHONE_NUMBER.find_iter(text).count()),
            (PiiType::Email, EMAIL.find_iter(text).count()),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(pii_type, count)| PiiIssue::matches(pii_type, count))
        .collect()
    }

    /// NHS-shaped digit runs that are not part of a phone number
    fn count_nhs_numbers(text: &str) -> usize {
        let phones: Vec<_> = PHONE_NUMBER.find_iter(text).map(|m| m.range()).collect();
        NHS_NUMBER
            .find_iter(text)
            .filter(|m| {
                !phones
                    .iter()
                    .any(|p| m.start() < p.end && p.start < m.end())
            })
            .count()
    }

    /// Postcode matches, skipping vitamin names such as `vitamin B12 1AA`-style
    /// false positives where a single-letter outward code follows "vitamin".
    fn count_postcodes(text: &str) -> usize {
        POSTCODE
            .captures_iter(text)
            .filter(|caps| {
                let (Some(whole), Some(outward)) = (caps.get(0), caps.get(1)) else {
                    return false;
                };
                if !SINGLE_LETTER_OUTWARD.is_match(outward.as_str()) {
                    return true;
                }
                !VITAMIN_PREFIX.is_match(&text[..whole.start()])
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_of(issues: &[PiiIssue], pii_type: PiiType) -> usize {
        issues
            .iter()
            .find(|i| i.pii_type == pii_type)
            .map_or(0, |i| i.count)
    }

    #[test]
    fn test_nhs_number_shapes() {
        let issues = PiiScanner::scan("NHS 943 476 5919 and 9434765870");
        assert_eq!(count_of(&issues, PiiType::NhsNumber), 2);
    }

    #[test]
    fn test_date_of_birth_needs_label() {
        let issues = PiiScanner::scan("DOB: 01/02/1980. Seen 03/04/2024. Date of birth 5 March 1975");
        assert_eq!(count_of(&issues, PiiType::DateOfBirth), 2);
    }

    #[test]
    fn test_postcode_and_vitamin_exclusion() {
        let issues = PiiScanner::scan("Lives at SW1A 1AA. Low vitamin D3 1AB noted? M1 1AE");
        assert_eq!(count_of(&issues, PiiType::Postcode), 2);

        let none = PiiScanner::scan("Vitamin B12 injections, D3 supplements");
        assert_eq!(count_of(&none, PiiType::Postcode), 0);
    }

    #[test]
    fn test_phone_and_email() {
        let issues = PiiScanner::scan("Call 07700 900123 or +44 161 496 0000, mail jo@example.nhs.uk");
        assert_eq!(count_of(&issues, PiiType::PhoneNumber), 2);
        assert_eq!(count_of(&issues, PiiType::Email), 1);
        assert_eq!(count_of(&issues, PiiType::NhsNumber), 0);
    }

    #[test]
    fn test_international_phone_is_not_blocking() {
        let issues = PiiScanner::scan("Surgery phone +44 161 496 0000 given for results");
        assert_eq!(count_of(&issues, PiiType::NhsNumber), 0);
        assert_eq!(count_of(&issues, PiiType::PhoneNumber), 1);
        assert!(!issues.iter().any(|i| i.is_blocking()));
    }

    #[test]
    fn test_clean_text_has_no_issues() {
        assert!(PiiScanner::scan("12-Mar-2024 09:30 Cough, chest clear. BP 120/80").is_empty());
    }
}
