//! A field for a single persisted record, exchanged as its identifier.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::FieldError;
use crate::traits::{Field, Record, RecordStore};

use super::lookup::{Lookup, LookupBuilder};

/// Serializes a record to its lookup-column value (usually the primary key)
/// and deserializes such a value back into the record.
pub struct ModelField<R> {
    lookup: Lookup<R>,
}

impl<R: Record> ModelField<R> {
    pub fn builder(store: Arc<dyn RecordStore<R>>) -> LookupBuilder<R, Self> {
        LookupBuilder::new(store)
    }

    /// A field looking records up by their primary key.
    pub fn new(store: Arc<dyn RecordStore<R>>) -> Result<Self, FieldError> {
        Self::builder(store).build()
    }

    pub fn lookup(&self) -> &Lookup<R> {
        &self.lookup
    }
}

impl<R: Record> From<Lookup<R>> for ModelField<R> {
    fn from(lookup: Lookup<R>) -> Self {
        ModelField { lookup }
    }
}

impl<R: Record> Field for ModelField<R> {
    type Input = Option<R>;
    type Output = Option<R>;

    fn serialize(&self, value: &Option<R>) -> Result<Value, FieldError> {
        match value {
            Some(record) => Ok(self.lookup.key_of(record)?.to_wire()),
            None => Ok(Value::Null),
        }
    }

    fn deserialize(&self, value: &Value) -> Result<Option<R>, FieldError> {
        if value.is_null() {
            return Ok(None);
        }
        let key = self.lookup.kind().coerce(value)?;

        debug!(
            event = "Lookup",
            phase = "Query",
            collection = R::collection(),
            column = self.lookup.column(),
            value = %key
        );

        match self.lookup.query().find_one(self.lookup.column(), &key)? {
            Some(record) => Ok(Some(record)),
            None => {
                debug!(
                    event = "Lookup",
                    phase = "NotFound",
                    collection = R::collection(),
                    value = %key
                );
                Err(FieldError::NotFound { value: key })
            }
        }
    }
}
