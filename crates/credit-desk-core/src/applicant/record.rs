use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::categories::{BureauRating, EducationLevel, MaritalStatus, Occupation, Zone};
use crate::types::{Money, Percent};
use crate::{CreditDeskError, CreditDeskResult};

/// Applicant data captured by an analyst, immutable for one evaluation.
///
/// Fields fall into two tiers:
///
/// * **Required** -- `age`, `monthly_income`, `bureau_score` and
///   `debt_service_ratio`. The decision cannot be made without them, so
///   form parsing fails with [`CreditDeskError::MissingField`] when any is
///   absent.
/// * **Optional scoring predicates** -- every `Option` field. An absent value
///   makes the predicate that reads it evaluate false: no points are awarded
///   and, for `bureau_rating_code`, no exclusion code applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub age: u32,
    pub monthly_income: Money,
    /// FICO-style bureau score.
    pub bureau_score: u32,
    /// Total debt-service ratio, in percent of monthly income.
    pub debt_service_ratio: Percent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residence_tenure_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<Zone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependents_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_level: Option<EducationLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<Occupation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_tenure_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bureau_rating_code: Option<BureauRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bureau_inquiries_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_proof_provided: Option<bool>,
}

impl ApplicantRecord {
    /// A record with only the required tier filled in.
    pub fn new(
        age: u32,
        monthly_income: Money,
        bureau_score: u32,
        debt_service_ratio: Percent,
    ) -> Self {
        ApplicantRecord {
            age,
            monthly_income,
            bureau_score,
            debt_service_ratio,
            residence_tenure_months: None,
            zone: None,
            marital_status: None,
            dependents_count: None,
            education_level: None,
            occupation: None,
            employment_tenure_years: None,
            identity_verified: None,
            bureau_rating_code: None,
            bureau_inquiries_count: None,
            income_proof_provided: None,
        }
    }

    /// Range checks that the type system does not already enforce.
    pub fn validate(&self) -> CreditDeskResult<()> {
        if self.monthly_income < Decimal::ZERO {
            return Err(CreditDeskError::invalid(
                "monthly_income",
                "Monthly income cannot be negative.",
            ));
        }
        if self.debt_service_ratio < Decimal::ZERO {
            return Err(CreditDeskError::invalid(
                "debt_service_ratio",
                "Debt-service ratio cannot be negative.",
            ));
        }
        Ok(())
    }
}
