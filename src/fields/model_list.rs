//! A field for a list of persisted records, exchanged as their identifiers.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FieldError;
use crate::traits::{Field, Record, RecordStore};
use crate::types::{Identifier, RecordSet};

use super::lookup::{Lookup, LookupBuilder};

/// Serializes records to their lookup-column values and resolves a list of
/// such values with a single store query.
///
/// Deserialization yields a [`RecordSet`]: duplicate identifiers collapse
/// and the request order is not kept.
pub struct ModelList<R> {
    lookup: Lookup<R>,
}

impl<R: Record> ModelList<R> {
    pub fn builder(store: Arc<dyn RecordStore<R>>) -> LookupBuilder<R, Self> {
        LookupBuilder::new(store)
    }

    pub fn new(store: Arc<dyn RecordStore<R>>) -> Result<Self, FieldError> {
        Self::builder(store).build()
    }

    pub fn lookup(&self) -> &Lookup<R> {
        &self.lookup
    }
}

impl<R: Record> From<Lookup<R>> for ModelList<R> {
    fn from(lookup: Lookup<R>) -> Self {
        ModelList { lookup }
    }
}

impl<R: Record> Field for ModelList<R> {
    type Input = [R];
    type Output = RecordSet<R>;

    fn serialize(&self, value: &[R]) -> Result<Value, FieldError> {
        value
            .iter()
            .map(|record| self.lookup.key_of(record).map(|key| key.to_wire()))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn deserialize(&self, value: &Value) -> Result<RecordSet<R>, FieldError> {
        let items = match value {
            Value::Null => return Ok(RecordSet::new()),
            Value::Array(items) if items.is_empty() => return Ok(RecordSet::new()),
            Value::Array(items) => items,
            _ => return Err(FieldError::Type),
        };

        let kind = self.lookup.kind();
        let requested = items
            .iter()
            .map(|item| kind.coerce(item))
            .collect::<Result<BTreeSet<Identifier>, _>>()?;

        debug!(
            event = "Lookup",
            phase = "QueryMany",
            collection = R::collection(),
            column = self.lookup.column(),
            requested = requested.len()
        );

        let records = self
            .lookup
            .query()
            .find_many(self.lookup.column(), &requested)?;
        let fetched = records.len();
        let found = records
            .into_iter()
            .map(|record| -> Result<_, FieldError> { Ok((self.lookup.key_of(&record)?, record)) })
            .collect::<Result<RecordSet<R>, FieldError>>()?;

        if let Some(missing) = requested.iter().find(|key| !found.contains(key)) {
            debug!(
                event = "Lookup",
                phase = "NotFound",
                collection = R::collection(),
                value = %missing,
                found = found.len()
            );
            return Err(FieldError::NotFound {
                value: missing.clone(),
            });
        }

        // every requested key is present, so any surplus is an extra or a duplicate record
        if fetched != requested.len() || found.len() != requested.len() {
            warn!(
                event = "Lookup",
                phase = "Unexpected",
                collection = R::collection(),
                requested = requested.len(),
                fetched = fetched,
                found = found.len()
            );
            return Err(FieldError::Store("unexpected records returned".to_string()));
        }

        Ok(found)
    }
}
