use chrono::Utc;
use clap::Args;
use serde_json::Value;
use tracing::info;

use credit_desk_core::portfolio::{ApplicationNumber, ApplicationRecord};
use credit_desk_core::Points;
use credit_desk_core::underwriting::{self, EvaluationInput};

use super::applicant_from;
use crate::input;

#[derive(Args)]
pub struct UnderwriteArgs {
    /// Document with `applicant` and `total_score`; stdin when omitted
    #[arg(long)]
    pub input: Option<String>,

    /// Business-rules file (JSON or YAML); defaults apply when omitted
    #[arg(long, env = "CREDIT_DESK_RULES")]
    pub rules: Option<String>,
}

#[derive(Args)]
pub struct EvaluateArgs {
    /// Applicant document (JSON or YAML); stdin when omitted
    #[arg(long)]
    pub input: Option<String>,

    /// Business-rules file (JSON or YAML); defaults apply when omitted
    #[arg(long, env = "CREDIT_DESK_RULES")]
    pub rules: Option<String>,

    /// Emit a stored application record with this number (e.g. S-00042)
    #[arg(long)]
    pub application_number: Option<String>,

    /// Analyst who captured the application
    #[arg(long, requires = "application_number")]
    pub analyst: Option<u32>,
}

pub fn run_underwrite(args: UnderwriteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rules = input::rules::load_rules(args.rules.as_deref())?;
    let document = input::read_document(args.input.as_deref())?;
    let applicant = applicant_from(&document)?;
    let total_score = total_score_from(&document)?;

    let decision = underwriting::underwrite(&applicant, total_score, &rules)?;
    info!(total_score, outcome = %decision.outcome, "underwriting decision made");
    Ok(serde_json::to_value(decision)?)
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rules = input::rules::load_rules(args.rules.as_deref())?;
    let document = input::read_document(args.input.as_deref())?;
    let applicant = applicant_from(&document)?;

    let input_data = EvaluationInput { applicant, rules };
    let output = underwriting::evaluate(&input_data)?;
    info!(
        total_score = output.result.breakdown.total_score,
        outcome = %output.result.decision.outcome,
        "application evaluated"
    );

    match args.application_number {
        Some(number) => {
            let number: ApplicationNumber = number.parse()?;
            let record = ApplicationRecord::new(
                number,
                args.analyst,
                Utc::now(),
                input_data.applicant,
                output.result,
            );
            Ok(serde_json::to_value(record)?)
        }
        None => Ok(serde_json::to_value(output)?),
    }
}

fn total_score_from(document: &Value) -> Result<Points, Box<dyn std::error::Error>> {
    let raw = document
        .get("total_score")
        .ok_or("Missing required field: total_score")?;
    let total = match raw {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| format!("total_score must be a non-negative whole number, got {raw}"))?;
    Ok(Points::try_from(total)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_score_number_or_string() {
        assert_eq!(total_score_from(&json!({"total_score": 315})).unwrap(), 315);
        assert_eq!(total_score_from(&json!({"total_score": " 90 "})).unwrap(), 90);
    }

    #[test]
    fn test_total_score_rejects_fractions_and_negatives() {
        assert!(total_score_from(&json!({"total_score": 12.5})).is_err());
        assert!(total_score_from(&json!({"total_score": -1})).is_err());
        assert!(total_score_from(&json!({})).is_err());
    }
}
