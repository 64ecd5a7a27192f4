use serde_json::Value;

/// Dotted paths of the headline answer for each command, in priority order.
const PRIORITY_PATHS: [&str; 5] = [
    "decision.outcome",
    "outcome",
    "total_score",
    "approval_rate_pct",
    "application_number",
];

/// Print just the key answer value from the output.
///
/// Looks for the well-known result paths first, then falls back to the first
/// field in the result object.
pub fn print_minimal(value: &Value) {
    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(headline) = headline(result_obj) {
        println!("{}", format_minimal(headline));
        return;
    }

    match result_obj {
        Value::Object(map) => match map.iter().next() {
            Some((key, val)) => println!("{}: {}", key, format_minimal(val)),
            None => println!("{{}}"),
        },
        Value::Array(rows) => {
            for row in rows {
                match headline(row) {
                    Some(val) => println!("{}", format_minimal(val)),
                    None => println!("{}", format_minimal(row)),
                }
            }
        }
        other => println!("{}", format_minimal(other)),
    }
}

fn headline(value: &Value) -> Option<&Value> {
    PRIORITY_PATHS
        .iter()
        .filter_map(|path| lookup(value, path))
        .find(|v| !v.is_null())
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |node, segment| node.get(segment))
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
