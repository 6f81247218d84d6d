//! Record identifiers and the coercions that produce them from wire values.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display as StrumDisplay, EnumString};
use utoipa::ToSchema;

use crate::error::FieldError;

/// A primitive value addressing one record through a lookup column.
#[derive(
    Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(untagged)]
pub enum Identifier {
    Integer(i64),
    Text(String),
}

impl Identifier {
    pub fn kind(&self) -> IdentifierKind {
        match self {
            Identifier::Integer(_) => IdentifierKind::Integer,
            Identifier::Text(_) => IdentifierKind::Text,
        }
    }

    /// The JSON form of this identifier.
    pub fn to_wire(&self) -> Value {
        match self {
            Identifier::Integer(n) => Value::from(*n),
            Identifier::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Identifier::Integer(n) => write!(f, "{n}"),
            Identifier::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Identifier {
    fn from(n: i64) -> Self {
        Identifier::Integer(n)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::Text(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier::Text(s)
    }
}

/// The primitive type a lookup column holds, picked when a field is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    Integer,
    Text,
}

impl IdentifierKind {
    /// Coerce a wire value into an identifier of this kind.
    ///
    /// Integers accept JSON integers, integral floats and numeric strings
    /// (surrounding whitespace ignored). Text accepts strings verbatim and
    /// numbers in their JSON rendering. Anything else is a [`FieldError::Type`].
    pub fn coerce(&self, value: &Value) -> Result<Identifier, FieldError> {
        match (self, value) {
            (IdentifierKind::Integer, Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    return Ok(Identifier::Integer(i));
                }
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                        Ok(Identifier::Integer(f as i64))
                    }
                    _ => Err(FieldError::Type),
                }
            }
            (IdentifierKind::Integer, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Identifier::Integer)
                .map_err(|_| FieldError::Type),
            (IdentifierKind::Text, Value::String(s)) => Ok(Identifier::Text(s.clone())),
            (IdentifierKind::Text, Value::Number(n)) => Ok(Identifier::Text(n.to_string())),
            _ => Err(FieldError::Type),
        }
    }
}
