use crate::error::AppError;
use crate::infra::{evaluation_date, parse_check, parse_date, read_json};
use crate::server;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use credit_qa::config::AppConfig;
use credit_qa::quality::engine::{generate_quality_dashboard, QuickCheck};
use credit_qa::quality::{CreditReport, DisputeLetter};
use credit_qa::{QualityAssuranceEngine, QualityAssuranceResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "Credit Report Quality Assurance",
    about = "Grade extracted credit reports and dispute letters from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run the full quality assessment over a report and optional letter
    Assess(AssessArgs),
    /// Run a fast subset of the validators
    Quick(QuickArgs),
    /// Summarise a history of saved assessments
    Dashboard(DashboardArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Path to the extracted credit report (JSON)
    #[arg(long)]
    report: PathBuf,
    /// Path to the generated dispute letter (JSON)
    #[arg(long)]
    letter: Option<PathBuf>,
    /// Evaluation date (YYYY-MM-DD); defaults to today
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct AssessArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Emit the full assessment as JSON instead of the readable summary
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct QuickArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Validators to run; repeat or comma separate (default: data_quality,completeness)
    #[arg(long = "check", value_delimiter = ',', value_parser = parse_check)]
    checks: Vec<QuickCheck>,
}

#[derive(Args, Debug)]
struct DashboardArgs {
    /// Saved assessment results (JSON), in any order
    #[arg(required = true)]
    history: Vec<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Quick(args) => run_quick(args),
        Command::Dashboard(args) => run_dashboard(args),
    }
}

struct LoadedInput {
    report: CreditReport,
    letter: Option<DisputeLetter>,
    today: NaiveDate,
}

fn load_input(args: &InputArgs) -> Result<LoadedInput, AppError> {
    let report = read_json(&args.report)?;
    let letter = args
        .letter
        .as_deref()
        .map(read_json::<DisputeLetter>)
        .transpose()?;
    Ok(LoadedInput {
        report,
        letter,
        today: evaluation_date(args.today),
    })
}

fn engine() -> Result<QualityAssuranceEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(QualityAssuranceEngine::new(config.quality))
}

fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let input = load_input(&args.input)?;
    let result = engine()?.assess_quality(&input.report, input.letter.as_ref(), input.today);

    if args.json {
        return print_json(&result);
    }

    let report = &result.report;
    println!(
        "Quality {:.1} ({}) assessed on {}",
        result.overall_score,
        result.overall_grade.label(),
        result.assessed_on
    );
    println!("{}", report.summary);
    print_section("Strengths", &report.strengths);
    print_section("Concerns", &report.concerns);
    print_section("Next steps", &report.next_steps);
    if !result.action_items.is_empty() {
        println!("Action items:");
        for item in &result.action_items {
            println!(
                "  [{}] p{} due {}: {}",
                item.id, item.priority, item.due_date, item.title
            );
        }
    }
    Ok(())
}

fn run_quick(args: QuickArgs) -> Result<(), AppError> {
    let input = load_input(&args.input)?;
    let result = engine()?.quick_quality_check(
        &input.report,
        input.letter.as_ref(),
        &args.checks,
        input.today,
    );
    print_json(&result)
}

fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let history = args
        .history
        .iter()
        .map(|path| read_json::<QualityAssuranceResult>(Path::new(path)))
        .collect::<Result<Vec<_>, _>>()?;
    let dashboard = generate_quality_dashboard(&history)?;
    print_json(&dashboard)
}

fn print_section(title: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    println!("{title}:");
    for line in lines {
        println!("  - {line}");
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn quick_checks_accept_comma_lists() {
        let cli = Cli::try_parse_from([
            "credit-qa-api",
            "quick",
            "--report",
            "report.json",
            "--check",
            "consistency,compliance",
            "--today",
            "2025-06-01",
        ])
        .expect("arguments parse");

        let Some(Command::Quick(args)) = cli.command else {
            panic!("expected quick command");
        };
        assert_eq!(
            args.checks,
            vec![QuickCheck::Consistency, QuickCheck::Compliance]
        );
        assert_eq!(
            args.input.today,
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
    }

    #[test]
    fn dashboard_requires_history() {
        assert!(Cli::try_parse_from(["credit-qa-api", "dashboard"]).is_err());
    }
}
