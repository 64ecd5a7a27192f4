use clap::Args;
use serde_json::Value;
use tracing::info;

use credit_desk_core::scoring;

use super::applicant_from;
use crate::input;

#[derive(Args)]
pub struct ScoreArgs {
    /// Applicant document (JSON or YAML); stdin when omitted
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_score(args: ScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let document = input::read_document(args.input.as_deref())?;
    let applicant = applicant_from(&document)?;
    let breakdown = scoring::score(&applicant)?;
    info!(total_score = breakdown.total_score, "applicant scored");
    Ok(serde_json::to_value(breakdown)?)
}
