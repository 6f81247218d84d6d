//! Drives field converters over a whole JSON document.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{FieldError, FieldErrorEntry, SchemaError};
use crate::traits::Field;

static NULL: Value = Value::Null;

/// Key under which document-level failures are reported.
pub const SCHEMA_KEY: &str = "_schema";

/// Deserializes the fields of a JSON object one by one, collecting every
/// failure instead of stopping at the first.
///
/// ```rust
/// use fieldkit_core::{HumanizedDate, schema::Loader};
/// use serde_json::json;
///
/// let doc = json!({"since": "2024-01-15", "until": "soon"});
/// let mut loader = Loader::new(&doc).unwrap();
/// let since = loader.field("since", &HumanizedDate::new());
/// let until = loader.field("until", &HumanizedDate::new());
/// assert!(since.is_some());
/// assert!(until.is_none());
/// let err = loader.finish().unwrap_err();
/// assert_eq!(err.errors["until"].code, "parse");
/// ```
pub struct Loader<'a> {
    data: &'a Map<String, Value>,
    errors: BTreeMap<String, FieldErrorEntry>,
}

impl<'a> Loader<'a> {
    pub fn new(document: &'a Value) -> Result<Self, SchemaError> {
        match document {
            Value::Object(data) => Ok(Loader {
                data,
                errors: BTreeMap::new(),
            }),
            _ => {
                let mut errors = BTreeMap::new();
                errors.insert(
                    SCHEMA_KEY.to_string(),
                    FieldErrorEntry::from(&FieldError::Type),
                );
                Err(SchemaError { errors })
            }
        }
    }

    /// Deserialize `name` with `field`; a missing key reads as `null`.
    pub fn field<F: Field>(&mut self, name: &str, field: &F) -> Option<F::Output> {
        let value = self.data.get(name).unwrap_or(&NULL);
        match field.deserialize(value) {
            Ok(output) => Some(output),
            Err(err) => {
                debug!(
                    event = "Load",
                    phase = "Field",
                    field = name,
                    code = err.code(),
                    error = %err
                );
                self.errors.insert(name.to_string(), FieldErrorEntry::from(&err));
                None
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn finish(self) -> Result<(), SchemaError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            warn!(event = "Load", phase = "Finish", failed = self.errors.len());
            Err(SchemaError {
                errors: self.errors,
            })
        }
    }
}

/// Serializes domain values into a JSON object, collecting failures.
#[derive(Default)]
pub struct Dumper {
    out: Map<String, Value>,
    errors: BTreeMap<String, FieldErrorEntry>,
}

impl Dumper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<F: Field>(&mut self, name: &str, field: &F, value: &F::Input) -> &mut Self {
        match field.serialize(value) {
            Ok(wire) => {
                self.out.insert(name.to_string(), wire);
            }
            Err(err) => {
                debug!(
                    event = "Dump",
                    phase = "Field",
                    field = name,
                    code = err.code(),
                    error = %err
                );
                self.errors.insert(name.to_string(), FieldErrorEntry::from(&err));
            }
        }
        self
    }

    pub fn finish(self) -> Result<Value, SchemaError> {
        if self.errors.is_empty() {
            Ok(Value::Object(self.out))
        } else {
            Err(SchemaError {
                errors: self.errors,
            })
        }
    }
}
