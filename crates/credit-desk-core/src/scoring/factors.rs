use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::applicant::{ApplicantRecord, EducationLevel, MaritalStatus, Occupation, Zone};
use crate::types::{Percent, Points};

/// Debt-service ratio below which the quantitative low-burden points apply.
const LOW_DEBT_SERVICE_RATIO: Percent = dec!(30);

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Qualitative,
    Historical,
    Quantitative,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 3] = [
        ScoreCategory::Qualitative,
        ScoreCategory::Historical,
        ScoreCategory::Quantitative,
    ];

    /// Maximum attainable points: the sum of every factor in the category.
    pub fn cap(&self) -> Points {
        ScoreFactor::ALL
            .iter()
            .filter(|f| f.category() == *self)
            .map(|f| f.points())
            .sum()
    }
}

impl std::fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreCategory::Qualitative => write!(f, "Qualitative"),
            ScoreCategory::Historical => write!(f, "Historical"),
            ScoreCategory::Quantitative => write!(f, "Quantitative"),
        }
    }
}

// ---------------------------------------------------------------------------
// Factors
// ---------------------------------------------------------------------------

/// One fixed point increment of the scorecard, gated by a predicate over the
/// applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    // Qualitative
    ResidenceTenure,
    UrbanZone,
    Married,
    FewDependents,
    UniversityEducation,
    PublicEmployee,
    EmploymentTenure,
    IdentityVerified,
    MatureAge,
    // Historical
    CurrentBureauRating,
    FewBureauInquiries,
    StrongBureauScore,
    // Quantitative
    IncomeProof,
    SalariedOccupation,
    LowDebtService,
}

impl ScoreFactor {
    /// Every factor, in scorecard order.
    pub const ALL: [ScoreFactor; 15] = [
        ScoreFactor::ResidenceTenure,
        ScoreFactor::UrbanZone,
        ScoreFactor::Married,
        ScoreFactor::FewDependents,
        ScoreFactor::UniversityEducation,
        ScoreFactor::PublicEmployee,
        ScoreFactor::EmploymentTenure,
        ScoreFactor::IdentityVerified,
        ScoreFactor::MatureAge,
        ScoreFactor::CurrentBureauRating,
        ScoreFactor::FewBureauInquiries,
        ScoreFactor::StrongBureauScore,
        ScoreFactor::IncomeProof,
        ScoreFactor::SalariedOccupation,
        ScoreFactor::LowDebtService,
    ];

    pub fn category(&self) -> ScoreCategory {
        use ScoreFactor::*;
        match self {
            ResidenceTenure | UrbanZone | Married | FewDependents | UniversityEducation
            | PublicEmployee | EmploymentTenure | IdentityVerified | MatureAge => {
                ScoreCategory::Qualitative
            }
            CurrentBureauRating | FewBureauInquiries | StrongBureauScore => {
                ScoreCategory::Historical
            }
            IncomeProof | SalariedOccupation | LowDebtService => ScoreCategory::Quantitative,
        }
    }

    pub fn points(&self) -> Points {
        match self {
            ScoreFactor::ResidenceTenure => 30,
            ScoreFactor::UrbanZone => 15,
            ScoreFactor::Married => 20,
            ScoreFactor::FewDependents => 15,
            ScoreFactor::UniversityEducation => 20,
            ScoreFactor::PublicEmployee => 25,
            ScoreFactor::EmploymentTenure => 20,
            ScoreFactor::IdentityVerified => 10,
            ScoreFactor::MatureAge => 30,
            ScoreFactor::CurrentBureauRating => 100,
            ScoreFactor::FewBureauInquiries => 30,
            ScoreFactor::StrongBureauScore => 20,
            ScoreFactor::IncomeProof => 35,
            ScoreFactor::SalariedOccupation => 25,
            ScoreFactor::LowDebtService => 30,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScoreFactor::ResidenceTenure => "At least 6 months at current residence",
            ScoreFactor::UrbanZone => "Lives in an urban zone",
            ScoreFactor::Married => "Married",
            ScoreFactor::FewDependents => "Two or fewer dependents",
            ScoreFactor::UniversityEducation => "University education",
            ScoreFactor::PublicEmployee => "Public-sector employee",
            ScoreFactor::EmploymentTenure => "At least 3 years in current employment",
            ScoreFactor::IdentityVerified => "Identity document verified",
            ScoreFactor::MatureAge => "Older than 45",
            ScoreFactor::CurrentBureauRating => "Bureau rating code 1 (current)",
            ScoreFactor::FewBureauInquiries => "Five or fewer bureau inquiries",
            ScoreFactor::StrongBureauScore => "Bureau score of 700 or more",
            ScoreFactor::IncomeProof => "Proof of income provided",
            ScoreFactor::SalariedOccupation => "Salaried employee (public or private)",
            ScoreFactor::LowDebtService => "Debt-service ratio below 30%",
        }
    }

    /// Whether the increment applies. Absent optional fields never apply.
    pub fn applies(&self, a: &ApplicantRecord) -> bool {
        match self {
            ScoreFactor::ResidenceTenure => a.residence_tenure_months.is_some_and(|m| m >= 6),
            ScoreFactor::UrbanZone => a.zone == Some(Zone::Urban),
            ScoreFactor::Married => a.marital_status == Some(MaritalStatus::Married),
            ScoreFactor::FewDependents => a.dependents_count.is_some_and(|d| d <= 2),
            ScoreFactor::UniversityEducation => {
                a.education_level == Some(EducationLevel::University)
            }
            ScoreFactor::PublicEmployee => a.occupation == Some(Occupation::PublicEmployee),
            ScoreFactor::EmploymentTenure => a.employment_tenure_years.is_some_and(|y| y >= 3),
            ScoreFactor::IdentityVerified => a.identity_verified == Some(true),
            ScoreFactor::MatureAge => a.age > 45,
            ScoreFactor::CurrentBureauRating => {
                a.bureau_rating_code.is_some_and(|r| r.is_current())
            }
            ScoreFactor::FewBureauInquiries => a.bureau_inquiries_count.is_some_and(|n| n <= 5),
            ScoreFactor::StrongBureauScore => a.bureau_score >= 700,
            ScoreFactor::IncomeProof => a.income_proof_provided == Some(true),
            ScoreFactor::SalariedOccupation => a.occupation.is_some_and(|o| o.is_salaried()),
            ScoreFactor::LowDebtService => a.debt_service_ratio < LOW_DEBT_SERVICE_RATIO,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
