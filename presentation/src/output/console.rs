//! Console output formatter for audit reports

use audit_application::PiiCheck;
use audit_domain::analysis::RecommendationPriority;
use audit_domain::{AuditReport, PiiIssue, RagBand, Rating, RecordResult, Rubric, Severity};
use colored::{ColoredString, Colorize};

/// Formats audit reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colored output on or off for the whole process
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format the complete report
    pub fn format(report: &AuditReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("{} Review", report.review_type)));
        output.push('\n');

        if let Some(doctor) = &report.metadata.doctor_identifier {
            output.push_str(&format!("{} {}\n", "Clinician:".cyan().bold(), doctor));
        }
        if let Some(reference) = &report.metadata.reference_number {
            output.push_str(&format!("{} {}\n", "Reference:".cyan().bold(), reference));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Guidance:".cyan().bold(),
            report.guidance
        ));

        let aggregate = &report.aggregate;
        output.push_str(&format!(
            "{} {} records, {:.2}% {}\n",
            "Overall:".cyan().bold(),
            aggregate.records,
            aggregate.percentage,
            Self::band(aggregate.rag_band)
        ));
        output.push_str(&format!(
            "  {}\n  {} {}\n",
            aggregate.rag_band.description(),
            "Action:".bold(),
            aggregate.rag_band.action()
        ));

        if report.excluded_records > 0 {
            output.push_str(&format!(
                "{}\n",
                format!(
                    "{} record(s) beyond the review limit were not assessed.",
                    report.excluded_records
                )
                .yellow()
            ));
        }

        if !report.pii_issues.is_empty() {
            output.push_str(&Self::section_header("PII Notices"));
            for issue in &report.pii_issues {
                output.push_str(&Self::pii_line(issue));
            }
        }

        output.push_str(&Self::section_header("Records"));
        for result in &report.records {
            output.push_str(&Self::record(result));
        }

        if report.records.len() > 1 {
            let d = &report.rag_distribution;
            output.push_str(&Self::section_header("RAG Distribution"));
            output.push_str(&format!(
                "  {} {}  {} {}  {} {}  {} {}\n",
                Self::band(RagBand::Green),
                d.green,
                Self::band(RagBand::Yellow),
                d.yellow,
                Self::band(RagBand::Amber),
                d.amber,
                Self::band(RagBand::Red),
                d.red
            ));
        }

        if let Some(analysis) = &report.analysis {
            output.push_str(&Self::section_header("Criteria Statistics"));
            output.push_str(&format!(
                "  {:<4}{:<46}{:>6}{:>6}{:>6}{:>6}\n",
                "#", "Criterion", "A", "C", "U", "N/R"
            ));
            for stats in &report.criteria_statistics {
                output.push_str(&format!(
                    "  {:<4}{:<46}{:>6}{:>6}{:>6}{:>6}\n",
                    stats.criterion_id,
                    stats.title,
                    stats.acceptable,
                    stats.concern,
                    stats.unacceptable,
                    stats.not_relevant
                ));
            }

            output.push_str(&Self::section_header("Patterns"));
            if let Some(best) = &analysis.best_record {
                output.push_str(&format!(
                    "  Best:  record {} ({}) {:.2}% {}\n",
                    best.ordinal,
                    best.date,
                    best.percentage,
                    Self::band(best.rag_band)
                ));
            }
            if let Some(worst) = &analysis.worst_record {
                output.push_str(&format!(
                    "  Worst: record {} ({}) {:.2}% {}\n",
                    worst.ordinal,
                    worst.date,
                    worst.percentage,
                    Self::band(worst.rag_band)
                ));
            }
            if !analysis.common_concerns.is_empty() {
                output.push_str(&format!("\n{}\n", "Common Concerns:".yellow().bold()));
                for concern in &analysis.common_concerns {
                    output.push_str(&format!(
                        "  * {} ({} record(s))\n",
                        concern.title, concern.occurrences
                    ));
                }
            }
            if !analysis.strengths.is_empty() {
                output.push_str(&format!("\n{}\n", "Strengths:".green().bold()));
                for strength in &analysis.strengths {
                    output.push_str(&format!(
                        "  * {} ({:.0}% acceptable)\n",
                        strength.title, strength.acceptable_pct
                    ));
                }
            }
            if !analysis.recommendations.is_empty() {
                output.push_str(&format!("\n{}\n", "Recommendations:".cyan().bold()));
                for rec in &analysis.recommendations {
                    let tag = match rec.priority {
                        RecommendationPriority::High => "HIGH".red().bold(),
                        RecommendationPriority::Positive => "POSITIVE".green().bold(),
                    };
                    output.push_str(&format!("  [{}] {}\n", tag, rec.message));
                    if !rec.criteria.is_empty() {
                        output.push_str(&format!("         {}\n", rec.criteria.join(", ")));
                    }
                }
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(report: &AuditReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Issues that stopped a submission, plus the suggested anonymized text
    pub fn format_pii_block(issues: &[PiiIssue], suggested_text: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{}\n",
            "Submission blocked: remove identifying information and resubmit."
                .red()
                .bold()
        ));
        output.push_str(&Self::section_header("PII Issues"));
        for issue in issues {
            output.push_str(&Self::pii_line(issue));
        }
        if !suggested_text.is_empty() && issues.iter().any(|i| i.replacements.is_some()) {
            output.push_str(&Self::section_header("Suggested Text"));
            output.push_str(suggested_text);
            output.push('\n');
        }
        output
    }

    pub fn format_pii_block_json(issues: &[PiiIssue], suggested_text: &str) -> String {
        serde_json::to_string_pretty(&serde_json::json!({
            "blocked": true,
            "issues": issues,
            "suggested_text": suggested_text,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    /// Result of a standalone PII check
    pub fn format_pii_check(check: &PiiCheck) -> String {
        let mut output = String::new();
        if check.issues.is_empty() {
            output.push_str(&format!("{}\n", "No PII detected.".green().bold()));
        } else {
            let verdict = if check.is_blocked() {
                "Submission would be blocked.".red().bold()
            } else {
                "Submission would proceed with notices.".yellow().bold()
            };
            output.push_str(&format!("{}\n", verdict));
            output.push_str(&Self::section_header("PII Issues"));
            for issue in &check.issues {
                output.push_str(&Self::pii_line(issue));
            }
        }
        if !check.replacements.is_empty() {
            output.push_str(&Self::section_header("Anonymized Text"));
            output.push_str(&check.anonymized_text);
            output.push('\n');
        }
        output
    }

    pub fn format_pii_check_json(check: &PiiCheck) -> String {
        serde_json::to_string_pretty(&serde_json::json!({
            "blocked": check.is_blocked(),
            "issues": check.issues,
            "replacements": check.replacements,
            "anonymized_text": check.anonymized_text,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    fn record(result: &RecordResult) -> String {
        let mut output = format!(
            "\n{} {:.2}% {}\n",
            format!("── Record {} · {} ──", result.record.ordinal, result.record.date)
                .yellow()
                .bold(),
            result.score.percentage,
            Self::band(result.score.rag_band)
        );
        for assessment in &result.assessments {
            output.push_str(&format!(
                "  {} {:>2}. {}\n",
                Self::rating(assessment.rating),
                assessment.criterion_id,
                Rubric::title(assessment.criterion_id)
            ));
            if assessment.rating.is_relevant() && !assessment.explanation.is_empty() {
                output.push_str(&Self::indent(&assessment.explanation, "       "));
                output.push('\n');
            }
        }
        output
    }

    fn pii_line(issue: &PiiIssue) -> String {
        let severity = match issue.severity {
            Severity::High => issue.severity.to_string().red().bold(),
            Severity::Medium => issue.severity.to_string().yellow().bold(),
        };
        let mut line = format!("  [{}] {}\n", severity, issue.message);
        if let Some(replacements) = &issue.replacements {
            for r in replacements {
                line.push_str(&format!("      {} -> {}\n", r.original, r.replacement));
            }
        }
        line
    }

    fn rating(rating: Rating) -> ColoredString {
        let tag = format!("[{}]", rating.tag());
        match rating {
            Rating::Acceptable => tag.green().bold(),
            Rating::Concern => tag.yellow().bold(),
            Rating::Unacceptable => tag.red().bold(),
            Rating::NotRelevant => tag.dimmed(),
        }
    }

    fn band(band: RagBand) -> ColoredString {
        match band {
            RagBand::Green => band.as_str().green().bold(),
            RagBand::Yellow => band.as_str().bright_yellow().bold(),
            RagBand::Amber => band.as_str().yellow().bold(),
            RagBand::Red => band.as_str().red().bold(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_domain::{
        AggregateSummary, AuditMetadata, ConsultationRecord, CriterionAssessment, GuidancePolicy,
        NameReplacement, PatternAnalyzer, PiiType, RagDistribution, ReviewType, criteria_statistics,
    };

    fn report(review_type: ReviewType, count: usize) -> AuditReport {
        let records: Vec<RecordResult> = (1..=count)
            .map(|ordinal| {
                let assessments = Rubric::criteria()
                    .iter()
                    .map(|c| {
                        let rating = if c.id == 4 { Rating::Concern } else { Rating::Acceptable };
                        CriterionAssessment::by_rule(c.id, rating, "Documented.", "text")
                    })
                    .collect();
                RecordResult::new(
                    ConsultationRecord::new(ordinal, "01-Mar-2024 09:00", "text"),
                    assessments,
                )
            })
            .collect();
        let stats = criteria_statistics(&records);
        let analysis = (review_type == ReviewType::Full)
            .then(|| PatternAnalyzer::analyze_with_statistics(&records, &stats));
        AuditReport {
            review_type,
            metadata: AuditMetadata {
                doctor_identifier: Some("DR-42".to_string()),
                reference_number: None,
            },
            guidance: GuidancePolicy::Standard,
            aggregate: AggregateSummary::from_results(&records),
            rag_distribution: RagDistribution::from_results(&records),
            records,
            criteria_statistics: stats,
            analysis,
            excluded_records: 0,
            pii_issues: vec![],
        }
    }

    #[test]
    fn test_format_rapid_report() {
        let output = ConsoleFormatter::format(&report(ReviewType::Rapid, 2));
        assert!(output.contains("Rapid Review"));
        assert!(output.contains("DR-42"));
        assert!(output.contains("Record 2"));
        assert!(output.contains("Ideas, concerns and expectations"));
        assert!(!output.contains("Patterns"));
    }

    #[test]
    fn test_format_full_report_includes_patterns() {
        let output = ConsoleFormatter::format(&report(ReviewType::Full, 10));
        assert!(output.contains("Criteria Statistics"));
        assert!(output.contains("Common Concerns"));
        assert!(output.contains("HIGH"));
    }

    #[test]
    fn test_recommendations_list_criterion_titles() {
        let output = ConsoleFormatter::format(&report(ReviewType::Full, 10));
        let recommendations = output
            .split("Recommendations:")
            .nth(1)
            .expect("recommendations section");
        assert!(recommendations.contains(Rubric::get(4).unwrap().title));
        assert!(recommendations.contains(Rubric::get(1).unwrap().title));
    }

    #[test]
    fn test_format_json_round_trips() {
        let original = report(ReviewType::Rapid, 2);
        let json = ConsoleFormatter::format_json(&original);
        let parsed: AuditReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_pii_block_lists_issues_and_suggestion() {
        let issues = vec![
            PiiIssue::matches(PiiType::NhsNumber, 1),
            PiiIssue::person_names(vec![NameReplacement::new("John Smith", "JS")]),
        ];
        let output = ConsoleFormatter::format_pii_block(&issues, "JS has a cough");
        assert!(output.contains("NHS number"));
        assert!(output.contains("John Smith"));
        assert!(output.contains("JS has a cough"));

        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_pii_block_json(&issues, "x")).unwrap();
        assert_eq!(json["blocked"], true);
        assert_eq!(json["issues"][0]["type"], "NHS_NUMBER");
    }
}
