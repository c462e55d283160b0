//! Value mapping supplied to template expansion.
//!
//! The engine expands against [`serde_json::Value`]: strings, numbers and
//! booleans are scalars, arrays are ordered sequences, objects are ordered
//! key/value structures (`serde_json` is built with `preserve_order`, so
//! object entries keep insertion order) and `Null` plays the role of an
//! empty optional — a `Null` entry is treated the same as an absent one.

use serde::Serialize;
use serde_json::Value;

use crate::error::UriTemplateError;

/// Named values for template expansion, in insertion order.
pub type Values = serde_json::Map<String, Value>;

/// Convert an arbitrary structured value into named expansion values.
///
/// This is the structured-value introspection boundary: any `Serialize`
/// type becomes an ordered sequence of `(name, value)` pairs — for plain
/// structs the order is field declaration order. The expansion core assumes
/// nothing about the conversion beyond that.
///
/// Fails when the value does not serialize to an object (e.g. a bare
/// string or a sequence), since there are no named properties to bind.
pub fn introspect<T: Serialize>(value: &T) -> Result<Values, UriTemplateError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(UriTemplateError::Introspection {
            message: format!("expected named properties, got {}", value_kind(&other)),
        }),
        Err(err) => Err(UriTemplateError::Introspection {
            message: err.to_string(),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
