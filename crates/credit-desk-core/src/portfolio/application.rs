use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::applicant::ApplicantRecord;
use crate::scoring::ScoreBreakdown;
use crate::underwriting::{Decision, Evaluation};
use crate::{CreditDeskError, CreditDeskResult};

const NUMBER_PREFIX: &str = "S-";

/// Human-readable application identifier in the `S-00001` scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApplicationNumber(u32);

impl ApplicationNumber {
    pub fn from_sequence(sequence: u32) -> CreditDeskResult<Self> {
        if sequence == 0 {
            return Err(CreditDeskError::invalid(
                "application_number",
                "Sequence numbers start at 1.",
            ));
        }
        Ok(ApplicationNumber(sequence))
    }

    /// Number following `count` existing applications.
    pub fn next_after(count: usize) -> CreditDeskResult<Self> {
        let next = u32::try_from(count)
            .ok()
            .and_then(|c| c.checked_add(1))
            .ok_or_else(|| {
                CreditDeskError::invalid("application_number", "Sequence space exhausted.")
            })?;
        ApplicationNumber::from_sequence(next)
    }

    pub fn sequence(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ApplicationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{NUMBER_PREFIX}{:05}", self.0)
    }
}

impl FromStr for ApplicationNumber {
    type Err = CreditDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix(NUMBER_PREFIX).ok_or_else(|| {
            CreditDeskError::invalid(
                "application_number",
                format!("'{s}' does not start with '{NUMBER_PREFIX}'"),
            )
        })?;
        let sequence: u32 = digits.parse().map_err(|_| {
            CreditDeskError::invalid("application_number", format!("'{s}' has no sequence"))
        })?;
        ApplicationNumber::from_sequence(sequence)
    }
}

impl TryFrom<String> for ApplicationNumber {
    type Error = CreditDeskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ApplicationNumber> for String {
    fn from(value: ApplicationNumber) -> Self {
        value.to_string()
    }
}

/// An evaluated application as persisted by the surrounding system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application_number: ApplicationNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyst_number: Option<u32>,
    pub captured_at: DateTime<Utc>,
    pub applicant: ApplicantRecord,
    pub breakdown: ScoreBreakdown,
    pub decision: Decision,
}

impl ApplicationRecord {
    pub fn new(
        application_number: ApplicationNumber,
        analyst_number: Option<u32>,
        captured_at: DateTime<Utc>,
        applicant: ApplicantRecord,
        evaluation: Evaluation,
    ) -> Self {
        ApplicationRecord {
            application_number,
            analyst_number,
            captured_at,
            applicant,
            breakdown: evaluation.breakdown,
            decision: evaluation.decision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_formatting() {
        assert_eq!(ApplicationNumber::from_sequence(1).unwrap().to_string(), "S-00001");
        assert_eq!(ApplicationNumber::from_sequence(123456).unwrap().to_string(), "S-123456");
    }

    #[test]
    fn test_next_after_count() {
        assert_eq!(ApplicationNumber::next_after(0).unwrap().to_string(), "S-00001");
        assert_eq!(ApplicationNumber::next_after(41).unwrap().to_string(), "S-00042");
    }

    #[test]
    fn test_zero_sequence_rejected() {
        assert!(ApplicationNumber::from_sequence(0).is_err());
        assert!("S-00000".parse::<ApplicationNumber>().is_err());
    }

    #[test]
    fn test_parse_number() {
        let n: ApplicationNumber = "S-00017".parse().unwrap();
        assert_eq!(n.sequence(), 17);
        assert!("X-00017".parse::<ApplicationNumber>().is_err());
        assert!("S-abc".parse::<ApplicationNumber>().is_err());
    }

    #[test]
    fn test_number_serializes_as_string() {
        let n = ApplicationNumber::from_sequence(9).unwrap();
        assert_eq!(serde_json::to_string(&n).unwrap(), "\"S-00009\"");
    }
}
