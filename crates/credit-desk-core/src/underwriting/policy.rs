use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::rules::{BusinessRules, MIN_TERM_MONTHS};
use crate::applicant::{ApplicantRecord, BureauRating};
use crate::scoring::{score_fraction, SCORE_SCALE};
use crate::types::{Money, Percent, Points};
use crate::{CreditDeskError, CreditDeskResult};

/// Debt-service ratio above which an application is rejected outright.
pub const REJECT_DEBT_SERVICE_RATIO: Percent = dec!(42.5);

/// Lower edge of the manual-review ("gray zone") debt-service band.
pub const REVIEW_DEBT_SERVICE_RATIO: Percent = dec!(35);

/// Approved amount as a multiple of monthly income at a perfect score.
const INCOME_MULTIPLE: Decimal = dec!(10);

/// Share of payment capacity an instalment may consume.
const PAYMENT_CAPACITY_USAGE: Decimal = dec!(0.8);

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionOutcome {
    Rejected,
    ManualReview,
    Approved,
}

impl std::fmt::Display for DecisionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionOutcome::Rejected => write!(f, "REJECTED"),
            DecisionOutcome::ManualReview => write!(f, "MANUAL_REVIEW"),
            DecisionOutcome::Approved => write!(f, "APPROVED"),
        }
    }
}

/// Why an application was rejected. Every triggered reason is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    BureauScoreBelowMinimum { bureau_score: u32, minimum: u32 },
    ExcessiveDebtService { debt_service_ratio: Percent },
    AdverseBureauRating { code: BureauRating },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::BureauScoreBelowMinimum {
                bureau_score,
                minimum,
            } => format!("Insufficient bureau score ({bureau_score} < {minimum})"),
            RejectionReason::ExcessiveDebtService { debt_service_ratio } => format!(
                "Excessive debt-service ratio ({debt_service_ratio}% > {REJECT_DEBT_SERVICE_RATIO}%)"
            ),
            RejectionReason::AdverseBureauRating { code } => {
                format!("Adverse credit history (bureau rating code {code})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub outcome: DecisionOutcome,
    /// Zero unless approved.
    pub approved_amount: Money,
    /// Zero unless approved.
    pub annual_rate_pct: Percent,
    /// Zero unless approved.
    pub term_months: u32,
    pub remarks: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejection_reasons: Vec<RejectionReason>,
}

impl Decision {
    fn rejected(reasons: Vec<RejectionReason>) -> Self {
        Decision {
            outcome: DecisionOutcome::Rejected,
            approved_amount: Decimal::ZERO,
            annual_rate_pct: Decimal::ZERO,
            term_months: 0,
            remarks: reasons.iter().map(|r| r.summary()).collect(),
            rejection_reasons: reasons,
        }
    }

    fn manual_review(debt_service_ratio: Percent, total_score: Points) -> Self {
        Decision {
            outcome: DecisionOutcome::ManualReview,
            approved_amount: Decimal::ZERO,
            annual_rate_pct: Decimal::ZERO,
            term_months: 0,
            remarks: vec![format!(
                "Requires managerial approval (debt-service ratio {debt_service_ratio}%, score {total_score}/{SCORE_SCALE})"
            )],
            rejection_reasons: Vec::new(),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.outcome == DecisionOutcome::Approved
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Apply the underwriting cascade to a scored applicant. The first matching
/// branch wins: reject, then manual review, then approve with terms.
pub fn underwrite(
    applicant: &ApplicantRecord,
    total_score: Points,
    rules: &BusinessRules,
) -> CreditDeskResult<Decision> {
    rules.validate()?;
    applicant.validate()?;
    let fraction = score_fraction(total_score)?;

    let ratio = applicant.debt_service_ratio;
    if ratio >= dec!(100) {
        return Err(CreditDeskError::invalid(
            "debt_service_ratio",
            format!("A ratio of {ratio}% leaves no payment capacity."),
        ));
    }

    // -- 1. Reject ----------------------------------------------------------
    let reasons = rejection_reasons(applicant, rules);
    if !reasons.is_empty() {
        return Ok(Decision::rejected(reasons));
    }

    // -- 2. Manual review ---------------------------------------------------
    if ratio >= REVIEW_DEBT_SERVICE_RATIO && ratio <= REJECT_DEBT_SERVICE_RATIO {
        return Ok(Decision::manual_review(ratio, total_score));
    }

    // -- 3. Approve ---------------------------------------------------------
    let amount = income_proportional_amount(applicant.monthly_income, fraction)?
        .min(rules.max_amount)
        .max(rules.min_amount);

    let rate = rules.max_rate_pct - fraction * (rules.max_rate_pct - rules.min_rate_pct);

    let capacity = applicant.monthly_income * (Decimal::ONE - ratio / dec!(100));
    if capacity <= Decimal::ZERO {
        return Err(CreditDeskError::DivisionByZero {
            context: "payment capacity (monthly income leaves nothing to service debt)".into(),
        });
    }
    let instalment = capacity * PAYMENT_CAPACITY_USAGE;
    let raw_term = amount
        .checked_div(instalment)
        .ok_or_else(|| CreditDeskError::DivisionByZero {
            context: format!("payment capacity (instalment of {instalment} cannot repay {amount})"),
        })?
        .floor();
    let term = raw_term
        .to_u32()
        .unwrap_or(u32::MAX)
        .clamp(MIN_TERM_MONTHS, rules.max_term_months);

    Ok(Decision {
        outcome: DecisionOutcome::Approved,
        approved_amount: amount.round_dp(2),
        annual_rate_pct: rate.round_dp(2),
        term_months: term,
        remarks: vec![format!(
            "Credit approved. Score {total_score}/{SCORE_SCALE} ({:.1}%)",
            fraction * dec!(100)
        )],
        rejection_reasons: Vec::new(),
    })
}

/// Amount the income alone would justify: monthly income x 10 x score fraction.
/// The approved amount is this figure capped at the maximum, then floored at
/// the minimum, so it may end up above the income-proportional figure.
pub fn income_proportional_amount(
    monthly_income: Money,
    score_fraction: Decimal,
) -> CreditDeskResult<Money> {
    monthly_income
        .checked_mul(INCOME_MULTIPLE)
        .and_then(|v| v.checked_mul(score_fraction))
        .ok_or_else(|| {
            CreditDeskError::invalid(
                "monthly_income",
                format!("Monthly income {monthly_income} is too large to price."),
            )
        })
}

fn rejection_reasons(applicant: &ApplicantRecord, rules: &BusinessRules) -> Vec<RejectionReason> {
    let mut reasons = Vec::new();
    if applicant.bureau_score < rules.minimum_bureau_score {
        reasons.push(RejectionReason::BureauScoreBelowMinimum {
            bureau_score: applicant.bureau_score,
            minimum: rules.minimum_bureau_score,
        });
    }
    if applicant.debt_service_ratio > REJECT_DEBT_SERVICE_RATIO {
        reasons.push(RejectionReason::ExcessiveDebtService {
            debt_service_ratio: applicant.debt_service_ratio,
        });
    }
    if let Some(code) = applicant.bureau_rating_code {
        if code.is_severe_delinquency() {
            reasons.push(RejectionReason::AdverseBureauRating { code });
        }
    }
    reasons
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
