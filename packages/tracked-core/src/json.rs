//! Conversion between record values and JSON.
//!
//! Timestamps serialize as RFC 3339 strings with millisecond precision;
//! parsing never produces timestamps, since JSON has no date type.

use chrono::SecondsFormat;
use serde_json::{Map, Number, Value as JsonValue};

use crate::error::{Result, TrackError};
use crate::value::{ObjectMap, Value};

/// Converts a JSON value into a record value.
///
/// Integers that fit `i64` become `Int`; other numbers become `Float`.
pub fn json_to_value(json: JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        JsonValue::String(s) => Value::String(s),
        JsonValue::Array(items) => Value::array(items.into_iter().map(json_to_value).collect()),
        JsonValue::Object(fields) => Value::object(json_object_to_map(fields)),
    }
}

/// Converts a record value into JSON.
///
/// # Errors
/// Returns `TrackError::Serialization` for non-finite floats, anywhere in
/// the value.
pub fn value_to_json(value: &Value) -> Result<JsonValue> {
    Ok(match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(i) => JsonValue::Number(Number::from(*i)),
        Value::Float(f) => JsonValue::Number(Number::from_f64(*f).ok_or_else(|| {
            TrackError::Serialization(format!("Cannot represent {} as JSON", f))
        })?),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Timestamp(t) => JsonValue::String(t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Value::Array(items) => JsonValue::Array(
            items
                .iter()
                .map(value_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Object(fields) => JsonValue::Object(map_to_json_object(fields.as_ref())?),
    })
}

/// Builds a record from a JSON document, which must be an object.
///
/// # Errors
/// Returns `TrackError::NotARecord` for any other JSON shape.
pub fn record_from_json(json: JsonValue) -> Result<ObjectMap> {
    match json {
        JsonValue::Object(fields) => Ok(json_object_to_map(fields)),
        other => Err(TrackError::NotARecord {
            found: json_type_name(&other),
        }),
    }
}

/// Serializes any field map as a JSON object, preserving field order.
pub fn map_to_json_object<'a, I>(fields: I) -> Result<Map<String, JsonValue>>
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    fields
        .into_iter()
        .map(|(name, value)| Ok((name.clone(), value_to_json(value)?)))
        .collect()
}

fn json_object_to_map(fields: Map<String, JsonValue>) -> ObjectMap {
    fields
        .into_iter()
        .map(|(name, value)| (name, json_to_value(value)))
        .collect()
}

fn json_type_name(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
