//! Additive applicant scorecard.
//!
//! Three sub-scores, each a sum of fixed increments gated by predicates over
//! the applicant:
//! 1. **Qualitative** (max 185) -- residence, household, education, employment.
//! 2. **Historical** (max 150) -- bureau rating, inquiries and bureau score.
//! 3. **Quantitative** (max 90) -- income proof, salaried work, debt burden.
//!
//! Each factor is visited exactly once, so no increment can be applied twice
//! and the best reachable total is 425. Pricing still scales the total against
//! [`SCORE_SCALE`] (450), so even a perfect applicant prices slightly above the
//! minimum rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::factors::{ScoreCategory, ScoreFactor};
use crate::applicant::ApplicantRecord;
use crate::types::Points;
use crate::{CreditDeskError, CreditDeskResult};

/// Denominator of the score fraction used for pricing and amounts. Not
/// reachable: see [`max_attainable_score`].
pub const SCORE_SCALE: Points = 450;

/// Highest total any applicant can reach: every factor applied.
pub fn max_attainable_score() -> Points {
    ScoreCategory::ALL.iter().map(|c| c.cap()).sum()
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A factor that awarded points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreContribution {
    pub category: ScoreCategory,
    pub factor: ScoreFactor,
    pub points: Points,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub qualitative_score: Points,
    pub historical_score: Points,
    pub quantitative_score: Points,
    /// Sum of the three sub-scores, within [0, 425].
    pub total_score: Points,
    /// Factors that awarded points, in scorecard order.
    pub contributions: Vec<ScoreContribution>,
}

impl ScoreBreakdown {
    pub fn category_score(&self, category: ScoreCategory) -> Points {
        match category {
            ScoreCategory::Qualitative => self.qualitative_score,
            ScoreCategory::Historical => self.historical_score,
            ScoreCategory::Quantitative => self.quantitative_score,
        }
    }
}

/// `total_score / 450`, in [0, 1]. Totals above the scale are rejected.
pub fn score_fraction(total_score: Points) -> CreditDeskResult<Decimal> {
    if total_score > SCORE_SCALE {
        return Err(CreditDeskError::invalid(
            "total_score",
            format!("Total score {total_score} exceeds the scale of {SCORE_SCALE}."),
        ));
    }
    Ok(Decimal::from(total_score) / Decimal::from(SCORE_SCALE))
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Score an applicant.
pub fn score(applicant: &ApplicantRecord) -> CreditDeskResult<ScoreBreakdown> {
    applicant.validate()?;

    let mut qualitative_score = 0;
    let mut historical_score = 0;
    let mut quantitative_score = 0;
    let mut contributions = Vec::new();

    for factor in ScoreFactor::ALL {
        if !factor.applies(applicant) {
            continue;
        }
        let points = factor.points();
        match factor.category() {
            ScoreCategory::Qualitative => qualitative_score += points,
            ScoreCategory::Historical => historical_score += points,
            ScoreCategory::Quantitative => quantitative_score += points,
        }
        contributions.push(ScoreContribution {
            category: factor.category(),
            factor,
            points,
            description: factor.description().to_string(),
        });
    }

    Ok(ScoreBreakdown {
        qualitative_score,
        historical_score,
        quantitative_score,
        total_score: qualitative_score + historical_score + quantitative_score,
        contributions,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
