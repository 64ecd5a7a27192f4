use credit_desk_core::applicant::{
    ApplicantRecord, BureauRating, EducationLevel, MaritalStatus, Occupation, Zone,
};
use credit_desk_core::scoring::max_attainable_score;
use credit_desk_core::underwriting::{
    evaluate, BusinessRules, Decision, DecisionOutcome, EvaluationInput, RejectionReason,
};
use credit_desk_core::{score, underwrite, CreditDeskError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

// ===========================================================================
// Fixtures
// ===========================================================================

fn strong_applicant() -> ApplicantRecord {
    ApplicantRecord {
        age: 52,
        monthly_income: dec!(20000),
        bureau_score: 720,
        debt_service_ratio: dec!(25),
        residence_tenure_months: Some(60),
        zone: Some(Zone::Urban),
        marital_status: Some(MaritalStatus::Married),
        dependents_count: Some(1),
        education_level: Some(EducationLevel::University),
        occupation: Some(Occupation::PublicEmployee),
        employment_tenure_years: Some(12),
        identity_verified: Some(true),
        bureau_rating_code: Some(BureauRating::CURRENT),
        bureau_inquiries_count: Some(0),
        income_proof_provided: Some(true),
    }
}

fn policy_rules() -> BusinessRules {
    BusinessRules {
        minimum_bureau_score: 650,
        min_rate_pct: dec!(22),
        max_rate_pct: dec!(36),
        max_debt_service_ratio_pct: dec!(40),
        min_amount: dec!(5000),
        max_amount: dec!(250000),
        max_term_months: 18,
    }
}

// ===========================================================================
// End-to-end scenarios
// ===========================================================================

#[test]
fn test_strong_applicant_approved_end_to_end() {
    let applicant = strong_applicant();
    let breakdown = score(&applicant).unwrap();
    assert_eq!(breakdown.qualitative_score, 185);
    assert_eq!(breakdown.total_score, 425);

    let decision = underwrite(&applicant, breakdown.total_score, &policy_rules()).unwrap();
    assert_eq!(
        decision,
        Decision {
            outcome: DecisionOutcome::Approved,
            approved_amount: dec!(188888.89),
            annual_rate_pct: dec!(22.78),
            term_months: 15,
            remarks: vec!["Credit approved. Score 425/450 (94.4%)".to_string()],
            rejection_reasons: vec![],
        }
    );
    assert!(decision.term_months >= 3 && decision.term_months <= 18);
}

#[test]
fn test_low_bureau_score_rejected_regardless_of_profile() {
    let mut applicant = strong_applicant();
    applicant.bureau_score = 600;
    let breakdown = score(&applicant).unwrap();
    let decision = underwrite(&applicant, breakdown.total_score, &policy_rules()).unwrap();

    assert_eq!(decision.outcome, DecisionOutcome::Rejected);
    assert_eq!(
        decision.rejection_reasons,
        vec![RejectionReason::BureauScoreBelowMinimum {
            bureau_score: 600,
            minimum: 650,
        }]
    );
    assert!(decision.remarks[0].contains("600 < 650"));
}

#[test]
fn test_rating_code_96_rejected_at_max_score() {
    let mut applicant = strong_applicant();
    applicant.bureau_rating_code = Some("96".parse().unwrap());
    let decision = underwrite(&applicant, 450, &policy_rules()).unwrap();
    assert_eq!(decision.outcome, DecisionOutcome::Rejected);
    assert_eq!(decision.approved_amount, Decimal::ZERO);
}

#[test]
fn test_ratio_exactly_at_rejection_threshold_goes_to_review() {
    let mut applicant = strong_applicant();
    applicant.debt_service_ratio = dec!(42.5);
    let decision = underwrite(&applicant, 300, &policy_rules()).unwrap();
    assert_eq!(decision.outcome, DecisionOutcome::ManualReview);
    assert_eq!(decision.term_months, 0);
    assert!(decision.remarks[0].contains("42.5%"));
    assert!(decision.remarks[0].contains("300/450"));
}

#[test]
fn test_ratio_just_above_threshold_rejected() {
    let mut applicant = strong_applicant();
    applicant.debt_service_ratio = dec!(42.50001);
    let decision = underwrite(&applicant, 300, &policy_rules()).unwrap();
    assert_eq!(decision.outcome, DecisionOutcome::Rejected);
    assert_eq!(
        decision.rejection_reasons,
        vec![RejectionReason::ExcessiveDebtService {
            debt_service_ratio: dec!(42.50001),
        }]
    );
}

#[test]
fn test_minimum_amount_floor_applied_at_zero_score() {
    let mut applicant = strong_applicant();
    applicant.monthly_income = dec!(100);
    let decision = underwrite(&applicant, 0, &policy_rules()).unwrap();
    assert_eq!(decision.outcome, DecisionOutcome::Approved);
    assert_eq!(decision.approved_amount, dec!(5000));
}

#[test]
fn test_rate_interpolation_endpoints() {
    let rules = policy_rules();
    let applicant = strong_applicant();
    assert_eq!(
        underwrite(&applicant, 450, &rules).unwrap().annual_rate_pct,
        rules.min_rate_pct
    );
    assert_eq!(
        underwrite(&applicant, 0, &rules).unwrap().annual_rate_pct,
        rules.max_rate_pct
    );
}

#[test]
fn test_best_reachable_score_prices_above_minimum_rate() {
    let applicant = strong_applicant();
    let best = score(&applicant).unwrap().total_score;
    assert_eq!(best, max_attainable_score());
    assert_eq!(best, 425);

    let d = underwrite(&applicant, best, &policy_rules()).unwrap();
    assert_eq!(d.annual_rate_pct, dec!(22.78));
    assert!(d.annual_rate_pct > policy_rules().min_rate_pct);
}

#[test]
fn test_rate_never_leaves_configured_band() {
    let rules = policy_rules();
    let applicant = strong_applicant();
    for total in (0..=450).step_by(15) {
        let d = underwrite(&applicant, total, &rules).unwrap();
        assert!(d.annual_rate_pct >= rules.min_rate_pct);
        assert!(d.annual_rate_pct <= rules.max_rate_pct);
        assert!(d.approved_amount >= rules.min_amount);
        assert!(d.approved_amount <= rules.max_amount);
    }
}

// ===========================================================================
// Validation failures
// ===========================================================================

#[test]
fn test_inverted_rate_bounds_fail() {
    let rules = BusinessRules {
        min_rate_pct: dec!(36),
        max_rate_pct: dec!(22),
        ..policy_rules()
    };
    let err = underwrite(&strong_applicant(), 300, &rules).unwrap_err();
    assert!(matches!(err, CreditDeskError::InconsistentRules(_)));
    assert!(err.is_validation());
}

#[test]
fn test_full_debt_service_fails_fast() {
    let mut applicant = strong_applicant();
    applicant.debt_service_ratio = dec!(100);
    let err = underwrite(&applicant, 100, &policy_rules()).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_extreme_form_incomes_fail_without_panicking() {
    let form = |income: &str| -> BTreeMap<String, String> {
        [
            ("edad", "35"),
            ("ingreso_mensual", income),
            ("fico_score", "720"),
            ("tdsr", "25"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    };

    let huge = ApplicantRecord::from_form(&form("10000000000000000000000000000")).unwrap();
    let err = underwrite(&huge, 300, &policy_rules()).unwrap_err();
    assert!(matches!(err, CreditDeskError::InvalidInput { ref field, .. } if field == "monthly_income"));

    let tiny = ApplicantRecord::from_form(&form("0.0000000000000000000000000001")).unwrap();
    let err = underwrite(&tiny, 0, &policy_rules()).unwrap_err();
    assert!(matches!(err, CreditDeskError::DivisionByZero { .. }));
}

#[test]
fn test_form_with_missing_income_cannot_be_scored() {
    let form: BTreeMap<String, String> = [
        ("edad", "35"),
        ("fico_score", "700"),
        ("tdsr", "20"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let err = ApplicantRecord::from_form(&form).unwrap_err();
    assert!(matches!(err, CreditDeskError::MissingField { ref field } if field == "monthly_income"));
}

// ===========================================================================
// Evaluation pipeline
// ===========================================================================

#[test]
fn test_evaluate_from_legacy_rules_table() {
    let table: BTreeMap<String, Decimal> = [
        ("fico_minimo", dec!(650)),
        ("tasa_minima", dec!(22)),
        ("tasa_maxima", dec!(36)),
        ("tdsr_maximo", dec!(40)),
        ("monto_minimo", dec!(5000)),
        ("monto_maximo", dec!(250000)),
        ("plazo_maximo", dec!(18)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    let rules = BusinessRules::from_parameters(&table).unwrap();
    assert_eq!(rules, policy_rules());

    let out = evaluate(&EvaluationInput {
        applicant: strong_applicant(),
        rules,
    })
    .unwrap();
    assert_eq!(out.result.breakdown.total_score, 425);
    assert_eq!(out.result.decision.outcome, DecisionOutcome::Approved);
    assert!(out.warnings.is_empty());
}

#[test]
fn test_evaluation_output_serializes() {
    let out = evaluate(&EvaluationInput {
        applicant: strong_applicant(),
        rules: policy_rules(),
    })
    .unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["decision"]["outcome"], "APPROVED");
    assert_eq!(json["result"]["breakdown"]["total_score"], 425);
}
