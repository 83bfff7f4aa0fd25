//! Template filters for deployment manifests
//!
//! These extend MiniJinja's builtins with the Helm-style helpers Secret and
//! values templates tend to need.

use base64::Engine as _;
use minijinja::{Error, ErrorKind, Value};

fn invalid(message: impl std::fmt::Display) -> Error {
    Error::new(ErrorKind::InvalidOperation, message.to_string())
}

/// Render a value as YAML
///
/// Usage: {{ connections | toyaml }}
pub fn toyaml(value: Value) -> Result<String, Error> {
    let json: serde_json::Value = serde_json::to_value(&value).map_err(invalid)?;
    let yaml = serde_yaml::to_string(&json).map_err(invalid)?;

    Ok(yaml.trim_start_matches("---\n").trim_end().to_string())
}

/// Render a value as compact JSON
///
/// Keys are sorted as in Jinja2's `tojson`, but there are no spaces after `,`
/// and `:` and `<>&'` are not HTML-escaped.
///
/// Usage: {{ connections | map(attribute="name") | list | tojson }}
pub fn tojson(value: Value) -> Result<String, Error> {
    let json: serde_json::Value = serde_json::to_value(&value).map_err(invalid)?;
    serde_json::to_string(&json).map_err(invalid)
}

/// Base64 encode a string
///
/// Usage: {{ namespace | b64encode }}
#[must_use]
pub fn b64encode(value: String) -> String {
    base64::engine::general_purpose::STANDARD.encode(value.as_bytes())
}

/// Base64 decode a string
///
/// Usage: {{ connection.data | b64decode }}
pub fn b64decode(value: String) -> Result<String, Error> {
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(value.as_bytes())
        .map_err(|e| invalid(format!("base64 decode error: {}", e)))?;

    String::from_utf8(decoded).map_err(|e| invalid(format!("UTF-8 decode error: {}", e)))
}

fn as_text(value: &Value) -> String {
    value
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

/// Wrap in double quotes
///
/// Usage: {{ namespace | quote }}
#[must_use]
pub fn quote(value: Value) -> String {
    let s = as_text(&value);
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Wrap in single quotes, YAML style
///
/// Usage: {{ connection.name | squote }}
#[must_use]
pub fn squote(value: Value) -> String {
    format!("'{}'", as_text(&value).replace('\'', "''"))
}

/// Newline followed by the text with every non-empty line indented, Helm style
///
/// Jinja2's own `indent` is left to the MiniJinja builtin.
///
/// Usage: {{ connections | toyaml | nindent(2) }}
#[must_use]
pub fn nindent(value: String, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    let mut result = String::with_capacity(1 + value.len() + spaces * value.lines().count());

    for line in value.lines() {
        result.push('\n');
        if !line.is_empty() {
            result.push_str(&pad);
            result.push_str(line);
        }
    }

    result
}

/// Fail rendering when a value is missing or empty
///
/// Usage: {{ namespace | required("namespace is required") }}
pub fn required(value: Value, message: Option<String>) -> Result<Value, Error> {
    let missing = value.is_undefined()
        || value.is_none()
        || value.as_str().is_some_and(str::is_empty);

    if missing {
        Err(invalid(
            message.unwrap_or_else(|| "required value is missing".to_string()),
        ))
    } else {
        Ok(value)
    }
}
