//! Raw configuration values
//!
//! Variable values arrive as untyped documents. Maps keep their source order so
//! resource titles come out in the order they were written.

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

/// Truthiness of a configured value: null, false, zero, and empty strings,
/// lists, or mappings are falsy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Short name of a value's kind, used in error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Supported document formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
    Toml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self, ApiError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            Some("json") => Ok(DocumentFormat::Json),
            Some("toml") => Ok(DocumentFormat::Toml),
            _ => Err(ApiError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn parse<T: DeserializeOwned>(self, content: &str, origin: &str) -> Result<T, ApiError> {
        let parse_error = |message: String| ApiError::Parse {
            path: origin.to_string(),
            message,
        };
        match self {
            DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string())),
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
            DocumentFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
        }
    }
}

/// Read and deserialize a document, picking the format from its extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, ApiError> {
    let format = DocumentFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| ApiError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(path = %path.display(), ?format, "loading document");
    format.parse(&content, &path.display().to_string())
}
