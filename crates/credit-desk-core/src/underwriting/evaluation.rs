use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::policy::{income_proportional_amount, underwrite, Decision, DecisionOutcome};
use super::rules::BusinessRules;
use crate::applicant::ApplicantRecord;
use crate::scoring::{score, score_fraction, ScoreBreakdown};
use crate::types::*;
use crate::CreditDeskResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub applicant: ApplicantRecord,
    /// Rules snapshot for this evaluation; defaults when omitted.
    #[serde(default)]
    pub rules: BusinessRules,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub breakdown: ScoreBreakdown,
    pub decision: Decision,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score an applicant and underwrite the result in one call.
pub fn evaluate(input: &EvaluationInput) -> CreditDeskResult<ComputationOutput<Evaluation>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.rules.validate()?;

    let breakdown = score(&input.applicant)?;
    let decision = underwrite(&input.applicant, breakdown.total_score, &input.rules)?;

    tracing::debug!(
        total_score = breakdown.total_score,
        outcome = %decision.outcome,
        "application evaluated"
    );

    // The cascade uses the fixed 42.5% threshold; the configured maximum is
    // only reported.
    let ratio = input.applicant.debt_service_ratio;
    if decision.outcome != DecisionOutcome::Rejected
        && ratio > input.rules.max_debt_service_ratio_pct
    {
        warnings.push(format!(
            "Debt-service ratio {ratio}% exceeds the configured maximum of {}%; \
             the decision applies the fixed rejection threshold instead.",
            input.rules.max_debt_service_ratio_pct
        ));
    }

    if decision.is_approved() {
        let proportional = income_proportional_amount(
            input.applicant.monthly_income,
            score_fraction(breakdown.total_score)?,
        )?;
        if proportional < input.rules.min_amount {
            warnings.push(format!(
                "Approved amount raised to the minimum of {} (income-proportional amount {}).",
                input.rules.min_amount,
                proportional.round_dp(2)
            ));
        }
    }

    let assumptions = serde_json::json!({
        "rules": input.rules,
        "score_scale": crate::scoring::SCORE_SCALE,
        "max_attainable_score": crate::scoring::max_attainable_score(),
    });

    Ok(with_metadata(
        "Additive applicant scorecard with threshold underwriting cascade",
        &assumptions,
        warnings,
        start.elapsed(),
        Evaluation {
            breakdown,
            decision,
        },
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
