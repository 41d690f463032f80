//! Consultation records and the bulk-text parser that produces them.

pub mod parser;
pub mod record;

pub use parser::{ConsultationParser, LineKind, classify_line};
pub use record::{ConsultationRecord, NameReplacement, ParsedConsultation};
