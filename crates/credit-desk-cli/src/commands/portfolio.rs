use clap::Args;
use serde_json::Value;
use tracing::info;

use credit_desk_core::portfolio::{list_applications, summarize_portfolio, ApplicationRecord};

use crate::input;

#[derive(Args)]
pub struct PortfolioArgs {
    /// List of evaluated application records; stdin when omitted
    #[arg(long)]
    pub input: Option<String>,

    /// List every application, newest first, instead of the summary
    #[arg(long)]
    pub all: bool,
}

pub fn run_portfolio(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let document = input::read_document(args.input.as_deref())?;
    let records = match document {
        Value::Object(mut map) if map.contains_key("applications") => {
            map.remove("applications").unwrap_or(Value::Null)
        }
        other => other,
    };
    let applications: Vec<ApplicationRecord> = serde_json::from_value(records)?;
    if args.all {
        let rows = list_applications(&applications);
        info!(total = rows.len(), "applications listed");
        return Ok(serde_json::to_value(rows)?);
    }
    let summary = summarize_portfolio(&applications);
    info!(
        total = summary.total_applications,
        approved = summary.approved,
        "portfolio summarised"
    );
    Ok(serde_json::to_value(summary)?)
}
