//! Naive (timezone-less) ISO-8601 datetimes.

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use crate::error::FieldError;
use crate::traits::Field;

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Exchanges [`NaiveDateTime`] values as ISO-8601 strings and refuses input
/// that carries a UTC offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveDateTimeField;

impl Field for NaiveDateTimeField {
    type Input = Option<NaiveDateTime>;
    type Output = Option<NaiveDateTime>;

    fn serialize(&self, value: &Option<NaiveDateTime>) -> Result<Value, FieldError> {
        Ok(value.map_or(Value::Null, |dt| {
            Value::String(dt.format(ISO_FORMAT).to_string())
        }))
    }

    fn deserialize(&self, value: &Value) -> Result<Option<NaiveDateTime>, FieldError> {
        let text = match value {
            Value::Null => return Ok(None),
            Value::String(text) => text,
            _ => return Err(FieldError::Type),
        };
        if let Ok(dt) = text.parse::<NaiveDateTime>() {
            return Ok(Some(dt));
        }
        if DateTime::parse_from_rfc3339(text).is_ok() {
            return Err(FieldError::Invalid("expected naive datetime".to_string()));
        }
        Err(FieldError::Parse("Not a valid datetime.".to_string()))
    }
}
