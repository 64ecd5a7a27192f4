//! Lenient key/value parsing of the capture form.
//!
//! The capture screen posts every field as a string, under either the English
//! field names or the legacy form names. Parsing applies the two-tier
//! contract documented on [`ApplicantRecord`]: required fields must be present
//! and well-formed, optional fields default to "absent" (predicate false) when
//! missing or blank, and a value that is present but malformed is always an
//! error. Keys that do not feed scoring (name, tax id, address...) are
//! ignored.

use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

use super::categories::{
    parse_flag, BureauRating, EducationLevel, MaritalStatus, Occupation, Zone,
};
use super::record::ApplicantRecord;
use crate::{CreditDeskError, CreditDeskResult};

/// Field name followed by the legacy capture-form aliases.
const AGE: &[&str] = &["age", "edad"];
const MONTHLY_INCOME: &[&str] = &["monthly_income", "ingreso_mensual"];
const BUREAU_SCORE: &[&str] = &["bureau_score", "fico_score"];
const DEBT_SERVICE_RATIO: &[&str] = &["debt_service_ratio", "tdsr"];
const RESIDENCE_TENURE: &[&str] = &["residence_tenure_months", "antiguedad_domicilio"];
const ZONE: &[&str] = &["zone", "zona"];
const MARITAL_STATUS: &[&str] = &["marital_status", "estado_civil"];
const DEPENDENTS: &[&str] = &["dependents_count", "dependientes"];
const EDUCATION: &[&str] = &["education_level", "nivel_estudios"];
const OCCUPATION: &[&str] = &["occupation", "ocupacion"];
const EMPLOYMENT_TENURE: &[&str] = &["employment_tenure_years", "antiguedad_empleo"];
const IDENTITY_VERIFIED: &[&str] = &["identity_verified", "validacion_id"];
const BUREAU_RATING: &[&str] = &["bureau_rating_code", "calificacion_sic"];
const BUREAU_INQUIRIES: &[&str] = &["bureau_inquiries_count", "consultas_sic"];
const INCOME_PROOF: &[&str] = &["income_proof_provided", "comprobante_ingresos"];

impl ApplicantRecord {
    /// Build a record from string form fields.
    pub fn from_form(form: &BTreeMap<String, String>) -> CreditDeskResult<Self> {
        let fields = FormFields { form };

        let record = ApplicantRecord {
            age: fields.required(AGE, parse_count)?,
            monthly_income: fields.required(MONTHLY_INCOME, parse_amount)?,
            bureau_score: fields.required(BUREAU_SCORE, parse_count)?,
            debt_service_ratio: fields.required(DEBT_SERVICE_RATIO, parse_amount)?,
            residence_tenure_months: fields.optional(RESIDENCE_TENURE, parse_count)?,
            zone: fields.optional(ZONE, |_, raw| Ok(Zone::parse(raw)))?,
            marital_status: fields.optional(MARITAL_STATUS, |_, raw| {
                Ok(MaritalStatus::parse(raw))
            })?,
            dependents_count: fields.optional(DEPENDENTS, parse_count)?,
            education_level: fields.optional(EDUCATION, |_, raw| {
                Ok(EducationLevel::parse(raw))
            })?,
            occupation: fields.optional(OCCUPATION, |_, raw| Ok(Occupation::parse(raw)))?,
            employment_tenure_years: fields.optional(EMPLOYMENT_TENURE, parse_count)?,
            identity_verified: fields.optional(IDENTITY_VERIFIED, parse_flag)?,
            bureau_rating_code: fields.optional(BUREAU_RATING, |_, raw| {
                BureauRating::from_str(raw)
            })?,
            bureau_inquiries_count: fields.optional(BUREAU_INQUIRIES, parse_count)?,
            income_proof_provided: fields.optional(INCOME_PROOF, parse_flag)?,
        };
        record.validate()?;
        Ok(record)
    }

    /// Build a record from a JSON object whose values may be strings, numbers
    /// or booleans. `null` is treated as absent.
    pub fn from_json_value(value: &Value) -> CreditDeskResult<Self> {
        let map = value.as_object().ok_or_else(|| {
            CreditDeskError::invalid("applicant", "Expected a JSON object of applicant fields.")
        })?;

        let mut form = BTreeMap::new();
        for (key, val) in map {
            let text = match val {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(CreditDeskError::invalid(
                        key,
                        "Expected a scalar value, found a nested structure.",
                    ));
                }
            };
            form.insert(key.clone(), text);
        }
        ApplicantRecord::from_form(&form)
    }
}

// ---------------------------------------------------------------------------
// Field lookup
// ---------------------------------------------------------------------------

struct FormFields<'a> {
    form: &'a BTreeMap<String, String>,
}

impl<'a> FormFields<'a> {
    /// First non-blank value under any alias, with the alias it was found at.
    fn lookup(&self, keys: &[&'static str]) -> Option<(&'static str, &'a str)> {
        let form: &'a BTreeMap<String, String> = self.form;
        keys.iter().find_map(|key| {
            form.get(*key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| (*key, v))
        })
    }

    fn required<T>(
        &self,
        keys: &[&'static str],
        parse: impl Fn(&str, &str) -> CreditDeskResult<T>,
    ) -> CreditDeskResult<T> {
        match self.lookup(keys) {
            Some((key, raw)) => parse(key, raw),
            None => Err(CreditDeskError::missing(keys[0])),
        }
    }

    fn optional<T>(
        &self,
        keys: &[&'static str],
        parse: impl Fn(&str, &str) -> CreditDeskResult<T>,
    ) -> CreditDeskResult<Option<T>> {
        self.lookup(keys)
            .map(|(key, raw)| parse(key, raw))
            .transpose()
    }
}

// ---------------------------------------------------------------------------
// Scalar parsers
// ---------------------------------------------------------------------------

fn parse_count(field: &str, raw: &str) -> CreditDeskResult<u32> {
    if raw.starts_with('-') {
        return Err(CreditDeskError::invalid(field, "Value cannot be negative."));
    }
    raw.parse::<u32>().map_err(|_| {
        CreditDeskError::invalid(field, format!("'{raw}' is not a whole number."))
    })
}

/// Plain decimal, or exponent notation as JSON numbers are sometimes printed
/// (`1e-7`, `1e16`).
fn parse_amount(field: &str, raw: &str) -> CreditDeskResult<Decimal> {
    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| CreditDeskError::invalid(field, format!("'{raw}' is not numeric.")))?;
    if value < Decimal::ZERO {
        return Err(CreditDeskError::invalid(field, "Value cannot be negative."));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn legacy_form() -> BTreeMap<String, String> {
        [
            ("numero_solicitud", "S-00012"),
            ("nombre_cliente", "Ana Torres"),
            ("edad", "48"),
            ("ingreso_mensual", "20000"),
            ("fico_score", "720"),
            ("tdsr", "25"),
            ("antiguedad_domicilio", "24"),
            ("zona", "URBANA"),
            ("estado_civil", "CASADO"),
            ("dependientes", "1"),
            ("nivel_estudios", "UNIVERSIDAD"),
            ("ocupacion", "EMPLEADO PÚBLICO"),
            ("antiguedad_empleo", "8"),
            ("validacion_id", "SI"),
            ("calificacion_sic", "1"),
            ("consultas_sic", "2"),
            ("comprobante_ingresos", "SI"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_legacy_form_parses_every_field() {
        let a = ApplicantRecord::from_form(&legacy_form()).unwrap();
        assert_eq!(a.age, 48);
        assert_eq!(a.monthly_income, dec!(20000));
        assert_eq!(a.bureau_score, 720);
        assert_eq!(a.debt_service_ratio, dec!(25));
        assert_eq!(a.residence_tenure_months, Some(24));
        assert_eq!(a.zone, Some(Zone::Urban));
        assert_eq!(a.marital_status, Some(MaritalStatus::Married));
        assert_eq!(a.dependents_count, Some(1));
        assert_eq!(a.education_level, Some(EducationLevel::University));
        assert_eq!(a.occupation, Some(Occupation::PublicEmployee));
        assert_eq!(a.employment_tenure_years, Some(8));
        assert_eq!(a.identity_verified, Some(true));
        assert_eq!(a.bureau_rating_code, Some(BureauRating::CURRENT));
        assert_eq!(a.bureau_inquiries_count, Some(2));
        assert_eq!(a.income_proof_provided, Some(true));
    }

    #[test]
    fn test_missing_required_field() {
        let mut form = legacy_form();
        form.remove("fico_score");
        let err = ApplicantRecord::from_form(&form).unwrap_err();
        assert!(
            matches!(err, CreditDeskError::MissingField { ref field } if field == "bureau_score")
        );
    }

    #[test]
    fn test_blank_required_field_is_missing() {
        let mut form = legacy_form();
        form.insert("edad".into(), "   ".into());
        assert!(matches!(
            ApplicantRecord::from_form(&form),
            Err(CreditDeskError::MissingField { .. })
        ));
    }

    #[test]
    fn test_non_numeric_age_rejected() {
        let mut form = legacy_form();
        form.insert("edad".into(), "forty".into());
        let err = ApplicantRecord::from_form(&form).unwrap_err();
        assert!(matches!(err, CreditDeskError::InvalidInput { ref field, .. } if field == "edad"));
    }

    #[test]
    fn test_missing_optional_fields_are_absent() {
        let mut form = legacy_form();
        form.remove("dependientes");
        form.remove("calificacion_sic");
        form.insert("consultas_sic".into(), "".into());
        let a = ApplicantRecord::from_form(&form).unwrap();
        assert_eq!(a.dependents_count, None);
        assert_eq!(a.bureau_rating_code, None);
        assert_eq!(a.bureau_inquiries_count, None);
    }

    #[test]
    fn test_malformed_optional_field_rejected() {
        let mut form = legacy_form();
        form.insert("dependientes".into(), "-2".into());
        assert!(ApplicantRecord::from_form(&form).is_err());

        let mut form = legacy_form();
        form.insert("calificacion_sic".into(), "A".into());
        assert!(ApplicantRecord::from_form(&form).is_err());
    }

    #[test]
    fn test_negative_income_rejected() {
        let mut form = legacy_form();
        form.insert("ingreso_mensual".into(), "-500".into());
        assert!(ApplicantRecord::from_form(&form).is_err());
    }

    #[test]
    fn test_english_keys_take_precedence_over_legacy() {
        let mut form = legacy_form();
        form.insert("age".into(), "33".into());
        let a = ApplicantRecord::from_form(&form).unwrap();
        assert_eq!(a.age, 33);
    }

    #[test]
    fn test_from_json_value_with_typed_scalars() {
        let value = json!({
            "age": 29,
            "monthly_income": 9500.50,
            "bureau_score": 655,
            "debt_service_ratio": 42.5,
            "identity_verified": true,
            "bureau_rating_code": "97",
            "occupation": "PRIVATE_EMPLOYEE",
            "zone": null
        });
        let a = ApplicantRecord::from_json_value(&value).unwrap();
        assert_eq!(a.monthly_income, dec!(9500.5));
        assert_eq!(a.debt_service_ratio, dec!(42.5));
        assert_eq!(a.identity_verified, Some(true));
        assert!(a.bureau_rating_code.unwrap().is_severe_delinquency());
        assert_eq!(a.occupation, Some(Occupation::PrivateEmployee));
        assert_eq!(a.zone, None);
    }

    #[test]
    fn test_from_json_value_accepts_exponent_numbers() {
        let value = json!({
            "age": 29,
            "monthly_income": 1e16,
            "bureau_score": 655,
            "debt_service_ratio": 1e-7
        });
        let a = ApplicantRecord::from_json_value(&value).unwrap();
        assert_eq!(a.monthly_income, dec!(10000000000000000));
        assert_eq!(a.debt_service_ratio, dec!(0.0000001));
    }

    #[test]
    fn test_exponent_string_in_form() {
        let mut form = legacy_form();
        form.insert("ingreso_mensual".into(), "2.5E4".into());
        let a = ApplicantRecord::from_form(&form).unwrap();
        assert_eq!(a.monthly_income, dec!(25000));
    }

    #[test]
    fn test_from_json_value_rejects_non_object() {
        assert!(ApplicantRecord::from_json_value(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_from_json_value_rejects_nested_value() {
        let value = json!({
            "age": 29,
            "monthly_income": 9500,
            "bureau_score": 655,
            "debt_service_ratio": 20,
            "zone": {"name": "URBAN"}
        });
        assert!(ApplicantRecord::from_json_value(&value).is_err());
    }
}
