use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CreditDeskError;

// ---------------------------------------------------------------------------
// Normalisation
// ---------------------------------------------------------------------------

/// Upper-case, fold separators to single spaces and strip the accents the
/// capture screen uses, so `empleado_público` and `EMPLEADO PUBLICO` compare
/// equal.
pub(crate) fn normalize_code(raw: &str) -> String {
    let folded: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '_' | '-' => ' ',
            'á' | 'Á' => 'A',
            'é' | 'É' => 'E',
            'í' | 'Í' => 'I',
            'ó' | 'Ó' => 'O',
            'ú' | 'Ú' | 'ü' | 'Ü' => 'U',
            other => other,
        })
        .collect::<String>()
        .to_uppercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Zone
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Zone {
    Urban,
    Rural,
    Other,
}

impl Zone {
    /// Lenient parse: unknown zones are `Other`, never an error.
    pub fn parse(raw: &str) -> Zone {
        match normalize_code(raw).as_str() {
            "URBAN" | "URBANA" | "URBANO" => Zone::Urban,
            "RURAL" => Zone::Rural,
            _ => Zone::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// Marital status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
    Other,
}

impl MaritalStatus {
    pub fn parse(raw: &str) -> MaritalStatus {
        match normalize_code(raw).as_str() {
            "SINGLE" | "SOLTERO" | "SOLTERA" => MaritalStatus::Single,
            "MARRIED" | "CASADO" | "CASADA" => MaritalStatus::Married,
            "DIVORCED" | "DIVORCIADO" | "DIVORCIADA" => MaritalStatus::Divorced,
            "WIDOWED" | "VIUDO" | "VIUDA" => MaritalStatus::Widowed,
            _ => MaritalStatus::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// Education level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EducationLevel {
    Primary,
    Secondary,
    HighSchool,
    University,
    Postgraduate,
    Other,
}

impl EducationLevel {
    pub fn parse(raw: &str) -> EducationLevel {
        match normalize_code(raw).as_str() {
            "PRIMARY" | "PRIMARIA" => EducationLevel::Primary,
            "SECONDARY" | "SECUNDARIA" => EducationLevel::Secondary,
            "HIGH SCHOOL" | "PREPARATORIA" | "BACHILLERATO" => EducationLevel::HighSchool,
            "UNIVERSITY" | "UNIVERSIDAD" => EducationLevel::University,
            "POSTGRADUATE" | "POSGRADO" => EducationLevel::Postgraduate,
            _ => EducationLevel::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// Occupation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Occupation {
    PublicEmployee,
    PrivateEmployee,
    SelfEmployed,
    Retired,
    Other,
}

impl Occupation {
    pub fn parse(raw: &str) -> Occupation {
        match normalize_code(raw).as_str() {
            "PUBLIC EMPLOYEE" | "EMPLEADO PUBLICO" => Occupation::PublicEmployee,
            "PRIVATE EMPLOYEE" | "EMPLEADO PRIVADO" => Occupation::PrivateEmployee,
            "SELF EMPLOYED" | "INDEPENDIENTE" | "NEGOCIO PROPIO" => Occupation::SelfEmployed,
            "RETIRED" | "JUBILADO" | "PENSIONADO" => Occupation::Retired,
            _ => Occupation::Other,
        }
    }

    /// Salaried occupations carry the quantitative employment points.
    pub fn is_salaried(&self) -> bool {
        matches!(self, Occupation::PublicEmployee | Occupation::PrivateEmployee)
    }
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

/// Parse a yes/no flag. Unlike the categorical fields a flag has no lenient
/// fallback: an unrecognised spelling is rejected.
pub fn parse_flag(field: &str, raw: &str) -> Result<bool, CreditDeskError> {
    match normalize_code(raw).as_str() {
        "TRUE" | "YES" | "Y" | "SI" | "S" | "1" => Ok(true),
        "FALSE" | "NO" | "N" | "0" => Ok(false),
        other => Err(CreditDeskError::invalid(
            field,
            format!("'{other}' is not a yes/no flag"),
        )),
    }
}

// ---------------------------------------------------------------------------
// Bureau rating code
// ---------------------------------------------------------------------------

/// Credit-bureau account rating, coded "1" (current) to "99". Codes 96..=99
/// mark charge-offs and severe delinquency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BureauRating(u8);

impl BureauRating {
    pub const CURRENT: BureauRating = BureauRating(1);

    pub fn new(code: u8) -> Result<Self, CreditDeskError> {
        if (1..=99).contains(&code) {
            Ok(BureauRating(code))
        } else {
            Err(CreditDeskError::invalid(
                "bureau_rating_code",
                format!("code {code} is outside 1..99"),
            ))
        }
    }

    pub fn code(&self) -> u8 {
        self.0
    }

    pub fn is_current(&self) -> bool {
        self.0 == 1
    }

    pub fn is_severe_delinquency(&self) -> bool {
        (96..=99).contains(&self.0)
    }
}

impl FromStr for BureauRating {
    type Err = CreditDeskError;

    /// Codes are compared as the bureau writes them, so "01" is not "1".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() > 1 && trimmed.starts_with('0') {
            return Err(CreditDeskError::invalid(
                "bureau_rating_code",
                format!("'{trimmed}' is not a canonical rating code"),
            ));
        }
        let code: u8 = trimmed.parse().map_err(|_| {
            CreditDeskError::invalid(
                "bureau_rating_code",
                format!("'{}' is not a numeric rating code", s.trim()),
            )
        })?;
        BureauRating::new(code)
    }
}

impl TryFrom<String> for BureauRating {
    type Error = CreditDeskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BureauRating> for String {
    fn from(value: BureauRating) -> Self {
        value.0.to_string()
    }
}

impl fmt::Display for BureauRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
