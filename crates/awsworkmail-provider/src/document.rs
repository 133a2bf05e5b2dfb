//! JSON property documents read by the CLI

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Source name that reads from standard input
pub const STDIN: &str = "-";

/// Read a JSON document from a file path, or from stdin when `source` is `-`.
pub fn read_document(source: &str) -> Result<Value> {
    let text = if source == STDIN {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read JSON from stdin")?;
        buf
    } else {
        read_file(Path::new(source))?
    };

    parse_document(&text).with_context(|| format!("Failed to parse JSON document {source}"))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// An empty document is an empty property bag.
fn parse_document(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"region": "eu-west-1", "alias": "acme"}}"#).unwrap();

        let value = read_document(file.path().to_str().unwrap()).unwrap();
        assert_eq!(value, json!({"region": "eu-west-1", "alias": "acme"}));
    }

    #[test]
    fn test_empty_file_is_empty_object() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let value = read_document(file.path().to_str().unwrap()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_invalid_json_names_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let err = read_document(&path).unwrap_err();
        assert!(err.to_string().contains(&path));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = read_document(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
