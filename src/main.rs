use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use clovergate::coverage::{self, GateOutcome};
use clovergate::Invocation;

/// Exit code for usage, validation and report errors
const ERROR_EXIT_CODE: i32 = 2;

#[derive(Parser)]
#[command(name = "clovergate")]
#[command(about = "Fail the build when Clover coverage is below a minimum percentage")]
#[command(version)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Clover XML coverage report
    #[arg(value_name = "CLOVER_REPORT_FILE")]
    report: PathBuf,

    /// Minimum elements coverage, an integer in [0,100]
    #[arg(value_name = "MINIMUM_COVER_PERCENT")]
    minimum: String,

    /// Log each stage and the per-metric breakdown to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(ERROR_EXIT_CODE);
        }
    }
}

fn run(cli: &Cli) -> Result<GateOutcome> {
    let invocation = Invocation::validate(&cli.report, &cli.minimum)?;

    if cli.verbose {
        eprintln!(
            "{} Loading {} (minimum {}%)",
            "→".cyan(),
            invocation.report_path.display(),
            invocation.minimum_coverage
        );
    }

    let document = coverage::load_clover(&invocation.report_path)?;

    if cli.verbose {
        eprintln!(
            "{} Parsed {} elements, {} <metrics>; using the last one",
            "→".cyan(),
            document.len(),
            document.find_all("metrics").count()
        );
    }

    let metrics = coverage::get_metrics(&document)?;
    let outcome = coverage::evaluate(&metrics, invocation.minimum_coverage)?;

    println!("{}", outcome.summary_line());

    if cli.verbose {
        coverage::print_breakdown(&metrics, &outcome);
    }

    Ok(outcome)
}
