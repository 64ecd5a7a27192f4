use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::application::{ApplicationNumber, ApplicationRecord};
use crate::types::{Money, Percent, Points};
use crate::underwriting::DecisionOutcome;

/// How many applications the "recent" list carries.
pub const RECENT_LIMIT: usize = 10;

/// One line of the application listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRow {
    pub application_number: ApplicationNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyst_number: Option<u32>,
    pub captured_at: DateTime<Utc>,
    pub outcome: DecisionOutcome,
    pub approved_amount: Money,
    pub total_score: Points,
}

/// Administrator dashboard statistics over a set of applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_applications: usize,
    pub approved: usize,
    pub rejected: usize,
    pub manual_review: usize,
    /// approved / total x 100, one decimal place.
    pub approval_rate_pct: Percent,
    pub total_approved_amount: Money,
    /// Mean over approved applications, two decimal places.
    pub average_approved_amount: Money,
    /// Most recent first.
    pub recent: Vec<ApplicationRow>,
}

pub fn summarize_portfolio(applications: &[ApplicationRecord]) -> PortfolioSummary {
    let count = |outcome: DecisionOutcome| {
        applications
            .iter()
            .filter(|a| a.decision.outcome == outcome)
            .count()
    };
    let approved = count(DecisionOutcome::Approved);
    let rejected = count(DecisionOutcome::Rejected);
    let manual_review = count(DecisionOutcome::ManualReview);
    let total = applications.len();

    let total_approved_amount: Money = applications
        .iter()
        .filter(|a| a.decision.is_approved())
        .map(|a| a.decision.approved_amount)
        .sum();

    let approval_rate_pct = if total == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(approved as u64) / Decimal::from(total as u64) * dec!(100)).round_dp(1)
    };

    let average_approved_amount = if approved == 0 {
        Decimal::ZERO
    } else {
        (total_approved_amount / Decimal::from(approved as u64)).round_dp(2)
    };

    let mut recent = list_applications(applications);
    recent.truncate(RECENT_LIMIT);

    PortfolioSummary {
        total_applications: total,
        approved,
        rejected,
        manual_review,
        approval_rate_pct,
        total_approved_amount,
        average_approved_amount,
        recent,
    }
}

/// Every application, newest `captured_at` first; ties go to the higher
/// application number.
pub fn list_applications(applications: &[ApplicationRecord]) -> Vec<ApplicationRow> {
    let mut ordered: Vec<&ApplicationRecord> = applications.iter().collect();
    ordered.sort_by(|a, b| {
        b.captured_at
            .cmp(&a.captured_at)
            .then_with(|| b.application_number.cmp(&a.application_number))
    });
    ordered
        .into_iter()
        .map(|a| ApplicationRow {
            application_number: a.application_number.clone(),
            analyst_number: a.analyst_number,
            captured_at: a.captured_at,
            outcome: a.decision.outcome,
            approved_amount: a.decision.approved_amount,
            total_score: a.breakdown.total_score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::ApplicantRecord;
    use crate::underwriting::{evaluate, BusinessRules, EvaluationInput};
    use chrono::TimeZone;

    fn application(sequence: u32, minute: u32, income: Decimal, ratio: Decimal) -> ApplicationRecord {
        let applicant = ApplicantRecord::new(30, income, 700, ratio);
        let evaluation = evaluate(&EvaluationInput {
            applicant: applicant.clone(),
            rules: BusinessRules::default(),
        })
        .unwrap()
        .result;
        ApplicationRecord::new(
            ApplicationNumber::from_sequence(sequence).unwrap(),
            Some(1),
            Utc.with_ymd_and_hms(2024, 3, 1, 9, minute, 0).unwrap(),
            applicant,
            evaluation,
        )
    }

    #[test]
    fn test_empty_portfolio() {
        let s = summarize_portfolio(&[]);
        assert_eq!(s.total_applications, 0);
        assert_eq!(s.approval_rate_pct, Decimal::ZERO);
        assert_eq!(s.average_approved_amount, Decimal::ZERO);
        assert!(s.recent.is_empty());
    }

    #[test]
    fn test_mixed_portfolio() {
        // score 50 (bureau 700 + ratio < 30) -> amount income * 10 * 50/450
        let apps = vec![
            application(1, 0, dec!(45000), dec!(20)), // approved 50000
            application(2, 1, dec!(90000), dec!(20)), // approved 100000
            application(3, 2, dec!(20000), dec!(38)), // manual review
            application(4, 3, dec!(20000), dec!(50)), // rejected
        ];
        let s = summarize_portfolio(&apps);
        assert_eq!(s.total_applications, 4);
        assert_eq!(s.approved, 2);
        assert_eq!(s.manual_review, 1);
        assert_eq!(s.rejected, 1);
        assert_eq!(s.approval_rate_pct, dec!(50));
        assert_eq!(s.total_approved_amount, dec!(150000));
        assert_eq!(s.average_approved_amount, dec!(75000));
        assert_eq!(s.recent[0].application_number.to_string(), "S-00004");
        assert_eq!(s.recent[3].application_number.to_string(), "S-00001");
    }

    #[test]
    fn test_recent_list_is_capped() {
        let apps: Vec<_> = (1..=12)
            .map(|i| application(i, i, dec!(45000), dec!(20)))
            .collect();
        let s = summarize_portfolio(&apps);
        assert_eq!(s.recent.len(), RECENT_LIMIT);
        assert_eq!(s.recent[0].application_number.sequence(), 12);
        assert_eq!(s.approval_rate_pct, dec!(100));
    }

    #[test]
    fn test_listing_is_uncapped_and_newest_first() {
        let mut apps: Vec<_> = (1..=12)
            .map(|i| application(i, i, dec!(45000), dec!(20)))
            .collect();
        apps[4].analyst_number = Some(7);
        let rows = list_applications(&apps);
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].application_number.sequence(), 12);
        assert_eq!(rows[11].application_number.sequence(), 1);
        let row = rows.iter().find(|r| r.application_number.sequence() == 5).unwrap();
        assert_eq!(row.analyst_number, Some(7));
        assert_eq!(row.total_score, 50);
    }

    #[test]
    fn test_same_timestamp_orders_by_number() {
        let apps = vec![
            application(3, 0, dec!(45000), dec!(20)),
            application(8, 0, dec!(45000), dec!(20)),
        ];
        let rows = list_applications(&apps);
        assert_eq!(rows[0].application_number.sequence(), 8);
    }

    #[test]
    fn test_approval_rate_rounded() {
        let apps = vec![
            application(1, 0, dec!(45000), dec!(20)),
            application(2, 1, dec!(20000), dec!(50)),
            application(3, 2, dec!(20000), dec!(50)),
        ];
        let s = summarize_portfolio(&apps);
        assert_eq!(s.approval_rate_pct, dec!(33.3));
    }
}
