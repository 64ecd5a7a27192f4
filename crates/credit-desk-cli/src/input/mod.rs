pub mod file;
pub mod rules;
pub mod stdin;

use serde_json::Value;

/// Input document from `--input <file>` or piped stdin.
pub fn read_document(path: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        file::read_value(path)
    } else if let Some(data) = stdin::read_stdin()? {
        Ok(data)
    } else {
        Err("--input <file.json|file.yaml> or stdin required".into())
    }
}
