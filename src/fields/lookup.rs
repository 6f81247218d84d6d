//! Lookup configuration shared by the single- and multi-record fields.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::FieldError;
use crate::store::QueryScope;
use crate::traits::{Record, RecordStore};
use crate::types::{Identifier, IdentifierKind};

/// A resolved lookup: which store, which column, which coercion.
pub struct Lookup<R> {
    store: Arc<dyn RecordStore<R>>,
    column: String,
    kind: IdentifierKind,
    scope: Option<QueryScope<R>>,
}

impl<R: Record> Lookup<R> {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// The store lookups run against, with the scope applied.
    pub(crate) fn query(&self) -> Arc<dyn RecordStore<R>> {
        match &self.scope {
            Some(scope) => scope(Arc::clone(&self.store)),
            None => Arc::clone(&self.store),
        }
    }

    /// The lookup-column value of `record`.
    pub(crate) fn key_of(&self, record: &R) -> Result<Identifier, FieldError> {
        record.column(&self.column).ok_or_else(|| {
            FieldError::Config(format!(
                "{} record has no value for column '{}'",
                R::collection(),
                self.column
            ))
        })
    }
}

/// Builder for [`crate::ModelField`] and [`crate::ModelList`].
pub struct LookupBuilder<R, F> {
    store: Arc<dyn RecordStore<R>>,
    column: Option<String>,
    kind: Option<IdentifierKind>,
    scope: Option<QueryScope<R>>,
    _field: PhantomData<fn() -> F>,
}

impl<R: Record, F: From<Lookup<R>>> LookupBuilder<R, F> {
    pub(crate) fn new(store: Arc<dyn RecordStore<R>>) -> Self {
        LookupBuilder {
            store,
            column: None,
            kind: None,
            scope: None,
            _field: PhantomData,
        }
    }

    /// Look records up by `column` instead of the primary key.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Override the coercion applied to incoming values.
    pub fn kind(mut self, kind: IdentifierKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Narrow every lookup through `scope`.
    pub fn scope(mut self, scope: QueryScope<R>) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Validate the configuration and build the field.
    ///
    /// A custom column defaults to text values; the primary key defaults to
    /// integers and must be the record type's only key column.
    pub fn build(self) -> Result<F, FieldError> {
        let (column, default_kind) = match self.column {
            Some(column) => {
                if !R::columns().contains(&column.as_str()) {
                    return Err(FieldError::Config(format!(
                        "{} has no column '{column}'",
                        R::collection()
                    )));
                }
                (column, IdentifierKind::Text)
            }
            None => match R::primary_key() {
                [pk] => (pk.to_string(), IdentifierKind::Integer),
                pks => {
                    return Err(FieldError::Config(format!(
                        "{} must have exactly one primary key column, found {}",
                        R::collection(),
                        pks.len()
                    )));
                }
            },
        };

        Ok(F::from(Lookup {
            store: self.store,
            column,
            kind: self.kind.unwrap_or(default_kind),
            scope: self.scope,
        }))
    }
}
