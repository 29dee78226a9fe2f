//! Design payload decoding and template handling.
//!
//! Designs arrive as base64-encoded HTML written in Go template syntax:
//! `{{.amount}}` interpolates a field, `{{.address.city}}` reaches into a
//! map, and `{{range .items}}...{{end}}` or `{{range $key, $value := .itemMap}}`
//! iterate arrays and maps. String values are HTML-escaped before they are
//! bound.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use gtmpl::{Context, Template, Value};
use serde_json::Value as JsonValue;

use crate::error::DesignError;
use crate::types::Fields;

/// What the engine prints for a key that is absent from the bound data.
const NO_VALUE: &str = "<no value>";

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),

    #[error("template execution error: {0}")]
    Execute(String),

    #[error("template references a field with no value")]
    MissingField,
}

/// Decode a base64 design payload into HTML text.
///
/// Alphabet, padding and length errors map to
/// [`DesignError::MustBeBase64Encoded`]; bytes that decode but are not UTF-8
/// map to [`DesignError::InvalidDesign`].
pub fn decode_design(encoded: &str) -> Result<String, DesignError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|_| DesignError::MustBeBase64Encoded)?;
    String::from_utf8(bytes).map_err(|_| DesignError::InvalidDesign)
}

/// Parse `html` as a template without binding any values.
pub fn parse_template(html: &str) -> Result<Template, TemplateError> {
    let mut template = Template::default();
    template
        .parse(html)
        .map_err(|e| TemplateError::Parse(e.to_string()))?;
    Ok(template)
}

/// Syntax-check `html`, reporting failures as [`DesignError::InvalidHtml`].
pub fn check_syntax(html: &str) -> Result<(), DesignError> {
    parse_template(html)
        .map(|_| ())
        .map_err(|source| DesignError::InvalidHtml { source })
}

/// Execute a parsed design against concrete field values.
///
/// A placeholder whose key is absent from `fields` fails the render instead
/// of printing a marker into the document.
pub fn execute(template: &Template, fields: &Fields) -> Result<String, TemplateError> {
    let context = Context::from(map_value(fields));
    let output = template
        .render(&context)
        .map_err(|e| TemplateError::Execute(e.to_string()))?;

    if output.contains(NO_VALUE) {
        return Err(TemplateError::MissingField);
    }
    Ok(output)
}

fn map_value(fields: &Fields) -> Value {
    Value::Map(
        fields
            .iter()
            .map(|(key, value)| (key.clone(), to_value(value)))
            .collect(),
    )
}

fn to_value(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Nil,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                Value::from(n.as_f64().unwrap_or_default())
            }
        }
        JsonValue::String(s) => Value::String(escape_html(s)),
        JsonValue::Array(items) => Value::Array(items.iter().map(to_value).collect()),
        JsonValue::Object(map) => map_value(map),
    }
}

/// Escape the characters that are significant in HTML text and attributes.
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
