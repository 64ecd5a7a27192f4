use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML file as a generic serde_json::Value. The format is
/// chosen by extension; unknown extensions are tried as JSON, then YAML.
pub fn read_value(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let format = DocumentFormat::from_path(&canonical);
    parse_document(&contents, format)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e).into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Option<DocumentFormat> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(DocumentFormat::Json),
            Some("yaml") | Some("yml") => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }
}

/// Parse text in the given format, or sniff it when the format is unknown.
pub fn parse_document(
    contents: &str,
    format: Option<DocumentFormat>,
) -> Result<Value, Box<dyn std::error::Error>> {
    match format {
        Some(DocumentFormat::Json) => Ok(serde_json::from_str(contents)?),
        Some(DocumentFormat::Yaml) => Ok(serde_yaml::from_str(contents)?),
        None => match serde_json::from_str(contents) {
            Ok(value) => Ok(value),
            Err(_) => Ok(serde_yaml::from_str(contents)?),
        },
    }
}

/// Resolve and validate the path, preventing directory traversal.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    // Basic existence check
    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
