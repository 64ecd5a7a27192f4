mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::debug;

use commands::portfolio::PortfolioArgs;
use commands::rules::RulesArgs;
use commands::scoring::ScoreArgs;
use commands::underwriting::{EvaluateArgs, UnderwriteArgs};

/// Applicant scoring and underwriting decisions
#[derive(Parser)]
#[command(
    name = "cdesk",
    version,
    about = "Applicant scoring and underwriting decisions",
    long_about = "A CLI for the lending desk: scores loan applicants on an additive \
                  scorecard, applies the underwriting cascade (reject, manual review, \
                  approve with amount, rate and term) and summarises evaluated \
                  applications. All arithmetic uses decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is not set (e.g. "info", "credit_desk_core=debug")
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an applicant (qualitative, historical, quantitative sub-scores)
    Score(ScoreArgs),
    /// Apply the underwriting cascade to an applicant and total score
    Underwrite(UnderwriteArgs),
    /// Score and underwrite an applicant in one step
    Evaluate(EvaluateArgs),
    /// Validate and list the business-rule parameters
    Rules(RulesArgs),
    /// Summarise a set of evaluated applications
    Portfolio(PortfolioArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Score(args) => commands::scoring::run_score(args),
        Commands::Underwrite(args) => commands::underwriting::run_underwrite(args),
        Commands::Evaluate(args) => commands::underwriting::run_evaluate(args),
        Commands::Rules(args) => commands::rules::run_rules(args),
        Commands::Portfolio(args) => commands::portfolio::run_portfolio(args),
        Commands::Version => {
            println!("cdesk {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            debug!("command completed");
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
