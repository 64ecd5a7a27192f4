use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use credit_desk_core::underwriting::BusinessRules;

use super::file;

/// A rules document is either a parameter map or a list of parameter rows.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RulesDocument {
    Table(BTreeMap<String, Decimal>),
    Rows(Vec<RuleRow>),
}

#[derive(Debug, Deserialize)]
struct RuleRow {
    #[serde(alias = "parametro")]
    key: String,
    #[serde(alias = "valor")]
    value: Decimal,
}

/// Load business rules from a JSON/YAML file, or fall back to the defaults.
pub fn load_rules(path: Option<&str>) -> Result<BusinessRules, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let rules = rules_from_value(file::read_value(path)?)?;
            debug!(path, ?rules, "loaded business rules");
            Ok(rules)
        }
        None => Ok(BusinessRules::default()),
    }
}

pub fn rules_from_value(value: Value) -> Result<BusinessRules, Box<dyn std::error::Error>> {
    let document: RulesDocument = serde_json::from_value(value)
        .map_err(|e| format!("Rules must be a parameter map or a list of rows: {e}"))?;
    let table = match document {
        RulesDocument::Table(table) => table,
        RulesDocument::Rows(rows) => {
            let mut table = BTreeMap::new();
            for row in rows {
                if table.insert(row.key.clone(), row.value).is_some() {
                    return Err(format!("Rule parameter '{}' listed twice", row.key).into());
                }
            }
            table
        }
    };
    Ok(BusinessRules::from_parameters(&table)?)
}
