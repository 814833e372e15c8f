use serde_json::{Map, Value};

/// Unprocessed result of a network call.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    /// Body that parsed as JSON, of any shape.
    Json(Value),
    /// Body that was not valid JSON.
    Text(String),
}

impl RawResponse {
    /// Classifies a decoded body: JSON when it parses, raw text otherwise.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => RawResponse::Json(value),
            Err(_) => RawResponse::Text(body.to_string()),
        }
    }
}

impl From<Value> for RawResponse {
    fn from(value: Value) -> Self {
        RawResponse::Json(value)
    }
}

impl From<&str> for RawResponse {
    fn from(text: &str) -> Self {
        RawResponse::Text(text.to_string())
    }
}

/// Extracts the verse text from a response of unknown shape.
///
/// Never fails: a `body` envelope is unwrapped once (a JSON-encoded string
/// body is decoded, an undecodable one is kept literally), then the value is
/// read as a string, as one of the `text` / `verse` / `message` fields, or as
/// a last resort serialized back to JSON.
pub fn normalize(raw: &RawResponse) -> String {
    let value = match raw {
        RawResponse::Text(text) => return text.clone(),
        RawResponse::Json(value) => value,
    };
    if !is_truthy(value) {
        return String::new();
    }

    match unwrap_envelope(value) {
        Some(inner) => extract(&inner),
        None => extract(value),
    }
}

fn unwrap_envelope(value: &Value) -> Option<Value> {
    let body = value.as_object()?.get("body").filter(|body| is_truthy(body))?;
    let unwrapped = match body {
        Value::String(encoded) => {
            serde_json::from_str(encoded).unwrap_or_else(|_| Value::String(encoded.clone()))
        }
        other => other.clone(),
    };
    Some(unwrapped)
}

fn extract(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(fields) => known_field(fields).unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

fn known_field(fields: &Map<String, Value>) -> Option<String> {
    let truthy = |name: &str| fields.get(name).filter(|field| is_truthy(field));

    if let Some(text) = truthy("text") {
        return Some(display_string(text));
    }
    if let Some(verse) = truthy("verse") {
        return Some(display_string(verse));
    }
    match truthy("message") {
        Some(Value::String(message)) => Some(message.clone()),
        _ => None,
    }
}

fn display_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
