pub mod portfolio;
pub mod rules;
pub mod scoring;
pub mod underwriting;

use serde_json::Value;

use credit_desk_core::applicant::ApplicantRecord;

/// Accept either a bare applicant object or one wrapped as `{"applicant": {...}}`.
pub(crate) fn applicant_from(document: &Value) -> Result<ApplicantRecord, Box<dyn std::error::Error>> {
    let fields = document.get("applicant").unwrap_or(document);
    Ok(ApplicantRecord::from_json_value(fields)?)
}
