use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages expressed as percent points (25 = 25%), matching how rates
/// and debt-service ratios are captured and quoted to applicants.
pub type Percent = Decimal;

/// Scorecard points.
pub type Points = u32;

/// Envelope returned by the evaluation pipeline: the result plus the rules
/// it was computed under and any non-fatal observations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed: Duration,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
