use clap::Args;
use serde_json::Value;

use crate::input;

#[derive(Args)]
pub struct RulesArgs {
    /// Business-rules file (JSON or YAML); shows the defaults when omitted
    #[arg(long, env = "CREDIT_DESK_RULES")]
    pub rules: Option<String>,
}

/// Validate a rules file and list every parameter with its effective value.
pub fn run_rules(args: RulesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rules = input::rules::load_rules(args.rules.as_deref())?;
    Ok(serde_json::to_value(rules.parameters())?)
}
