//! CLI entrypoint for consult-audit
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use audit_application::{AssessmentStore, ReviewRequest, RunReviewError, RunReviewUseCase};
use audit_domain::{AuditMetadata, ReportFormat, ReviewType};
use audit_infrastructure::{ConfigLoader, FileConfig, JsonlAssessmentStore, OpenAiCompatGateway};
use audit_presentation::{Cli, Command, ConsoleFormatter, InputArgs, ProgressReporter};
use clap::Parser;
use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Exit status when the PII guard rejects a submission
const EXIT_PII_BLOCKED: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; stdout is kept for reports
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    if !config.output.color {
        ConsoleFormatter::set_color(false);
    }

    let Some(command) = cli.command else {
        bail!("No command given. Use `consult-audit rapid`, `full` or `check-pii` (see --help).");
    };

    let format = cli
        .output
        .map(ReportFormat::from)
        .or(config.output.format)
        .unwrap_or_default();

    info!("Starting consult-audit");

    // === Dependency Injection ===
    if config.judgment.api_key().is_none() {
        warn!(
            "{} is not set; requests will be sent without authentication",
            config.judgment.api_key_env
        );
    }
    let gateway = Arc::new(OpenAiCompatGateway::from_config(&config.judgment)?);

    let mut params = config.review_params();
    if let Command::Rapid(args) | Command::Full(args) = &command
        && let Some(guidance) = args.guidance
    {
        params = params.with_guidance(guidance);
    }

    let mut use_case = RunReviewUseCase::new(gateway).with_params(params);
    if let Some(store) = open_store(&config) {
        use_case = use_case.with_store(store);
    }

    let (review_type, args) = match command {
        Command::CheckPii(input) => {
            let text = read_input(&input)?;
            let check = use_case.check_pii(&text).await?;
            let output = match format {
                ReportFormat::Text => ConsoleFormatter::format_pii_check(&check),
                ReportFormat::Json => ConsoleFormatter::format_pii_check_json(&check),
            };
            println!("{}", output);
            return Ok(if check.is_blocked() {
                ExitCode::from(EXIT_PII_BLOCKED)
            } else {
                ExitCode::SUCCESS
            });
        }
        Command::Rapid(args) => (ReviewType::Rapid, args),
        Command::Full(args) => (ReviewType::Full, args),
    };

    let text = read_input(&args.input)?;
    let request = ReviewRequest::new(review_type, text).with_metadata(AuditMetadata {
        doctor_identifier: args.doctor,
        reference_number: args.reference,
    });

    let show_progress = !cli.quiet && config.output.show_progress;
    let progress: Option<ProgressReporter> = show_progress.then(ProgressReporter::new);
    let result = match &progress {
        Some(reporter) => use_case.execute_with_progress(request, reporter).await,
        None => use_case.execute(request).await,
    };

    let report = match result {
        Ok(report) => report,
        Err(RunReviewError::PiiBlocked {
            issues,
            suggested_text,
        }) => {
            let output = match format {
                ReportFormat::Text => ConsoleFormatter::format_pii_block(&issues, &suggested_text),
                ReportFormat::Json => {
                    ConsoleFormatter::format_pii_block_json(&issues, &suggested_text)
                }
            };
            println!("{}", output);
            return Ok(ExitCode::from(EXIT_PII_BLOCKED));
        }
        Err(e) => return Err(e.into()),
    };

    let output = match format {
        ReportFormat::Text => ConsoleFormatter::format(&report),
        ReportFormat::Json => ConsoleFormatter::format_json(&report),
    };
    println!("{}", output);

    use_case.wait_for_persistence().await;
    Ok(ExitCode::SUCCESS)
}

/// Read the consultation text from `--input` or stdin
fn read_input(args: &InputArgs) -> Result<String> {
    match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Open the JSONL store; persistence is optional, so failures only warn
fn open_store(config: &FileConfig) -> Option<Arc<dyn AssessmentStore>> {
    if !config.store.enabled {
        return None;
    }
    let path = config.store.resolved_path()?;
    match JsonlAssessmentStore::open(&path) {
        Ok(store) => {
            info!("Persisting assessments to {}", path.display());
            Some(Arc::new(store))
        }
        Err(e) => {
            warn!("Assessment store unavailable ({}): {}", path.display(), e);
            None
        }
    }
}
