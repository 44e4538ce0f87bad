use serde::Serialize;
use serde_json::Value;

use crate::{errors::Error, ports::FormFields, Result};

/// Flatten a serializable struct into multipart form fields.
///
/// Strings are taken verbatim, booleans become `"1"`/`"0"`, numbers keep their JSON
/// text and nested values are rendered as compact JSON. `null` fields are skipped.
pub fn to_form_fields<T: Serialize>(value: &T) -> Result<FormFields> {
    let Value::Object(map) = serde_json::to_value(value)? else {
        return Err(Error::Validation(
            "form payload must serialize to a JSON object".to_string(),
        ));
    };

    let mut fields = FormFields::new();
    for (key, val) in map {
        let rendered = match val {
            Value::Null => continue,
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => "0".to_string(),
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other @ (Value::Array(_) | Value::Object(_)) => other.to_string(),
        };
        fields.insert(key, rendered);
    }
    Ok(fields)
}
