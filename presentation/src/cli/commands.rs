//! CLI command definitions

use audit_domain::{GuidancePolicy, ReportFormat};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for audit reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// CLI arguments for consult-audit
#[derive(Parser, Debug)]
#[command(name = "consult-audit")]
#[command(author, version, about = "Clinical consultation documentation audit")]
#[command(long_about = r#"
consult-audit rates consultation notes against a twelve-criterion
documentation rubric and produces a scored, RAG-banded report.

Review modes:
  rapid       Exactly two consultations
  full        Ten or more consultations (the first twenty are assessed)
  check-pii   Only run the identifying-information guard

Input is read from --input or stdin. Submissions containing NHS numbers,
dates of birth or person names are blocked before any assessment.

Configuration files are loaded from (in priority order):
1. AUDIT_* environment variables
2. --config <path>     Explicit config file
3. ./audit.toml        Project-level config
4. ~/.config/consult-audit/config.toml   Global config

Example:
  consult-audit rapid --input notes.txt --doctor GMC1234567
  consult-audit full --guidance strict --output json < notes.txt
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Review exactly two consultations
    Rapid(ReviewArgs),
    /// Review ten or more consultations with pattern analysis
    Full(ReviewArgs),
    /// Scan for identifying information without assessing
    CheckPii(InputArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Consultation text file (reads stdin when omitted)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ReviewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Clinician identifier recorded with the audit
    #[arg(long, value_name = "ID")]
    pub doctor: Option<String>,

    /// Audit reference number
    #[arg(long, value_name = "REF")]
    pub reference: Option<String>,

    /// Judgment stance: standard, strict or lenient
    #[arg(long, value_parser = parse_guidance)]
    pub guidance: Option<GuidancePolicy>,
}

fn parse_guidance(value: &str) -> Result<GuidancePolicy, String> {
    value.parse::<GuidancePolicy>().map_err(|e| e.to_string())
}
