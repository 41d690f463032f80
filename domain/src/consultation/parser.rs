//! Bulk consultation text parser.
//!
//! Input is a loosely tabular paste from a clinical system: an optional
//! header line, then repeating blocks. Each line is classified on its own
//! by [`classify_line`]; the only state carried between lines is the
//! currently open record.
//!
//! | Line shape | Example | Classification |
//! |------------|---------|----------------|
//! | Date-time + text | `12-Mar-2024 09:30 Telephone consultation` | [`LineKind::NewRecordStandard`] |
//! | UUID + bare date | `9f0c...e1 12-Mar-2024 Seen in clinic` | [`LineKind::NewRecordUuid`] (time `00:00`) |
//! | Anything else non-empty | `Advised fluids` | [`LineKind::Continuation`] |

use super::record::ParsedConsultation;
use regex::Regex;
use std::sync::LazyLock;

const MONTHS: &str = "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec";

static STANDARD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^\s*(\d{{1,2}}-(?:{MONTHS})-\d{{4}})\s+(\d{{1,2}}:\d{{2}})(?:\s|$)"
    ))
    .expect("static regex")
});

static UUID_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^\s*[0-9a-f]{{8}}-[0-9a-f]{{4}}-[0-9a-f]{{4}}-[0-9a-f]{{4}}-[0-9a-f]{{12}}\s+(\d{{1,2}}-(?:{MONTHS})-\d{{4}})(?:\s+(\d{{1,2}}:\d{{2}}))?(?:\s+(.*))?\s*$"
    ))
    .expect("static regex")
});

/// Classification of a single input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `DD-MMM-YYYY HH:MM ...`; the whole line is the first text line
    NewRecordStandard { date: String, text: &'a str },
    /// `<uuid> DD-MMM-YYYY [HH:MM] ...`; text is whatever follows the date
    NewRecordUuid { date: String, text: &'a str },
    Continuation(&'a str),
    Blank,
}

/// Classify one line of bulk input
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim_end();
    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    if let Some(caps) = UUID_LINE.captures(line) {
        let day = caps.get(1).map_or("", |m| m.as_str());
        let time = caps.get(2).map_or("00:00", |m| m.as_str());
        let text = caps.get(3).map_or("", |m| m.as_str().trim());
        return LineKind::NewRecordUuid {
            date: format!("{} {}", normalize_day(day), time),
            text,
        };
    }

    if let Some(caps) = STANDARD_LINE.captures(line) {
        let day = caps.get(1).map_or("", |m| m.as_str());
        let time = caps.get(2).map_or("00:00", |m| m.as_str());
        return LineKind::NewRecordStandard {
            date: format!("{} {}", normalize_day(day), time),
            text: line,
        };
    }

    LineKind::Continuation(line)
}

/// `1-mar-2024` -> `01-Mar-2024`
fn normalize_day(day: &str) -> String {
    let mut parts = day.splitn(3, '-');
    let (Some(d), Some(m), Some(y)) = (parts.next(), parts.next(), parts.next()) else {
        return day.to_string();
    };
    let mut month = m.to_lowercase();
    if let Some(first) = month.get(0..1) {
        month = format!("{}{}", first.to_uppercase(), &month[1..]);
    }
    format!("{:0>2}-{}-{}", d, month, y)
}

#[derive(Debug)]
struct OpenRecord {
    date: String,
    lines: Vec<String>,
}

impl OpenRecord {
    fn flush(self) -> ParsedConsultation {
        ParsedConsultation {
            date: self.date,
            text: self.lines.join("\n"),
        }
    }
}

/// Splits bulk text into ordered consultation blocks
pub struct ConsultationParser;

impl ConsultationParser {
    /// Parse bulk text into `{date, text}` blocks in input order.
    ///
    /// Returns an empty list when no line opens a record. Continuation
    /// lines seen before the first record (e.g. a header row) are dropped.
    pub fn parse(input: &str) -> Vec<ParsedConsultation> {
        let mut records = Vec::new();
        let mut current: Option<OpenRecord> = None;

        for line in input.lines() {
            match classify_line(line) {
                LineKind::NewRecordStandard { date, text }
                | LineKind::NewRecordUuid { date, text } => {
                    if let Some(open) = current.take() {
                        records.push(open.flush());
                    }
                    let mut lines = Vec::new();
                    if !text.is_empty() {
                        lines.push(text.to_string());
                    }
                    current = Some(OpenRecord { date, lines });
                }
                LineKind::Continuation(text) => {
                    if let Some(open) = current.as_mut() {
                        open.lines.push(text.to_string());
                    }
                }
                LineKind::Blank => {}
            }
        }

        if let Some(open) = current {
            records.push(open.flush());
        }
        records
    }
}
