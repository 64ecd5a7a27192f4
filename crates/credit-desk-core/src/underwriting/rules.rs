use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Money, Percent};
use crate::{CreditDeskError, CreditDeskResult};

/// Shortest term ever offered. The term clamp uses it as a hard floor, so the
/// configured maximum term may not be lower.
pub const MIN_TERM_MONTHS: u32 = 3;

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Administrator-owned underwriting parameters, read-only to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRules {
    pub minimum_bureau_score: u32,
    pub min_rate_pct: Percent,
    pub max_rate_pct: Percent,
    pub max_debt_service_ratio_pct: Percent,
    pub min_amount: Money,
    pub max_amount: Money,
    pub max_term_months: u32,
}

impl Default for BusinessRules {
    fn default() -> Self {
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
}

impl BusinessRules {
    /// Reject inconsistent bounds before any evaluation uses them.
    pub fn validate(&self) -> CreditDeskResult<()> {
        for (name, rate) in [
            ("min_rate_pct", self.min_rate_pct),
            ("max_rate_pct", self.max_rate_pct),
            ("max_debt_service_ratio_pct", self.max_debt_service_ratio_pct),
        ] {
            if rate < Decimal::ZERO || rate > dec!(100) {
                return Err(CreditDeskError::invalid(
                    name,
                    "Percentage must be within [0, 100].",
                ));
            }
        }
        if self.min_amount < Decimal::ZERO {
            return Err(CreditDeskError::invalid(
                "min_amount",
                "Minimum amount cannot be negative.",
            ));
        }
        if self.min_rate_pct > self.max_rate_pct {
            return Err(CreditDeskError::InconsistentRules(format!(
                "min_rate_pct ({}) exceeds max_rate_pct ({})",
                self.min_rate_pct, self.max_rate_pct
            )));
        }
        if self.min_amount > self.max_amount {
            return Err(CreditDeskError::InconsistentRules(format!(
                "min_amount ({}) exceeds max_amount ({})",
                self.min_amount, self.max_amount
            )));
        }
        if self.max_term_months < MIN_TERM_MONTHS {
            return Err(CreditDeskError::InconsistentRules(format!(
                "max_term_months ({}) is below the {MIN_TERM_MONTHS}-month minimum term",
                self.max_term_months
            )));
        }
        Ok(())
    }

    /// Build rules from a loosely typed parameter table keyed by parameter
    /// name. Both the current and the legacy keys are accepted; parameters
    /// not in the table keep their default. The result is validated.
    pub fn from_parameters(params: &BTreeMap<String, Decimal>) -> CreditDeskResult<Self> {
        let mut rules = BusinessRules::default();
        let mut seen: BTreeMap<RuleKey, &str> = BTreeMap::new();

        for (name, value) in params {
            let key = RuleKey::from_name(name).ok_or_else(|| {
                CreditDeskError::invalid(name, "Unknown business-rule parameter.")
            })?;
            if let Some(previous) = seen.insert(key, name.as_str()) {
                return Err(CreditDeskError::InconsistentRules(format!(
                    "parameter '{}' given twice (as '{previous}' and '{name}')",
                    key.name()
                )));
            }
            rules.set(key, *value)?;
        }

        rules.validate()?;
        Ok(rules)
    }

    /// Parameter table for display, in a fixed order.
    pub fn parameters(&self) -> Vec<RuleParameter> {
        RuleKey::ALL
            .iter()
            .map(|key| RuleParameter {
                key: key.name().to_string(),
                legacy_key: key.legacy_name().to_string(),
                value: self.get(*key),
                description: key.description().to_string(),
            })
            .collect()
    }

    pub fn get(&self, key: RuleKey) -> Decimal {
        match key {
            RuleKey::MinimumBureauScore => Decimal::from(self.minimum_bureau_score),
            RuleKey::MinRate => self.min_rate_pct,
            RuleKey::MaxRate => self.max_rate_pct,
            RuleKey::MaxDebtServiceRatio => self.max_debt_service_ratio_pct,
            RuleKey::MinAmount => self.min_amount,
            RuleKey::MaxAmount => self.max_amount,
            RuleKey::MaxTerm => Decimal::from(self.max_term_months),
        }
    }

    fn set(&mut self, key: RuleKey, value: Decimal) -> CreditDeskResult<()> {
        match key {
            RuleKey::MinimumBureauScore => self.minimum_bureau_score = whole(key, value)?,
            RuleKey::MinRate => self.min_rate_pct = value,
            RuleKey::MaxRate => self.max_rate_pct = value,
            RuleKey::MaxDebtServiceRatio => self.max_debt_service_ratio_pct = value,
            RuleKey::MinAmount => self.min_amount = value,
            RuleKey::MaxAmount => self.max_amount = value,
            RuleKey::MaxTerm => self.max_term_months = whole(key, value)?,
        }
        Ok(())
    }
}

fn whole(key: RuleKey, value: Decimal) -> CreditDeskResult<u32> {
    if !value.fract().is_zero() {
        return Err(CreditDeskError::invalid(
            key.name(),
            format!("Expected a whole number, got {value}."),
        ));
    }
    value
        .to_u32()
        .ok_or_else(|| CreditDeskError::invalid(key.name(), format!("{value} is out of range.")))
}

// ---------------------------------------------------------------------------
// Parameter keys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKey {
    MinimumBureauScore,
    MinRate,
    MaxRate,
    MaxDebtServiceRatio,
    MinAmount,
    MaxAmount,
    MaxTerm,
}

impl RuleKey {
    pub const ALL: [RuleKey; 7] = [
        RuleKey::MinimumBureauScore,
        RuleKey::MinRate,
        RuleKey::MaxRate,
        RuleKey::MaxDebtServiceRatio,
        RuleKey::MinAmount,
        RuleKey::MaxAmount,
        RuleKey::MaxTerm,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RuleKey::MinimumBureauScore => "minimum_bureau_score",
            RuleKey::MinRate => "min_rate_pct",
            RuleKey::MaxRate => "max_rate_pct",
            RuleKey::MaxDebtServiceRatio => "max_debt_service_ratio_pct",
            RuleKey::MinAmount => "min_amount",
            RuleKey::MaxAmount => "max_amount",
            RuleKey::MaxTerm => "max_term_months",
        }
    }

    /// Key used by the legacy rules table.
    pub fn legacy_name(&self) -> &'static str {
        match self {
            RuleKey::MinimumBureauScore => "fico_minimo",
            RuleKey::MinRate => "tasa_minima",
            RuleKey::MaxRate => "tasa_maxima",
            RuleKey::MaxDebtServiceRatio => "tdsr_maximo",
            RuleKey::MinAmount => "monto_minimo",
            RuleKey::MaxAmount => "monto_maximo",
            RuleKey::MaxTerm => "plazo_maximo",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RuleKey::MinimumBureauScore => "Minimum bureau score for approval",
            RuleKey::MinRate => "Minimum annual rate (%)",
            RuleKey::MaxRate => "Maximum annual rate (%)",
            RuleKey::MaxDebtServiceRatio => "Maximum debt-service ratio allowed (%)",
            RuleKey::MinAmount => "Minimum credit amount",
            RuleKey::MaxAmount => "Maximum credit amount",
            RuleKey::MaxTerm => "Maximum term in months",
        }
    }

    pub fn from_name(name: &str) -> Option<RuleKey> {
        let name = name.trim();
        RuleKey::ALL
            .into_iter()
            .find(|k| k.name() == name || k.legacy_name() == name)
    }
}

/// One row of the parameter table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleParameter {
    pub key: String,
    pub legacy_key: String,
    pub value: Decimal,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
