//! Review modes and the audit report model.

pub mod format;
pub mod report;

pub use format::ReportFormat;
pub use report::{
    AggregateSummary, AuditMetadata, AuditReport, RagDistribution, RecordResult, ReviewType,
};
