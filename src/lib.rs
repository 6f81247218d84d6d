// src/lib.rs
pub use directory::{Directory, StandardUnifier};
pub use error::{FieldError, FieldErrorEntry, ResolveError, SchemaError, StoreError};
pub use fields::{
    HUMANIZED_DATE_ERROR, HumanizedDate, Lookup, LookupBuilder, ModelField, ModelList,
    NaiveDateTimeField, PrincipalField, PrincipalList, PrincipalPermissionList, TimeUnit,
    Validated, validate_with_message,
};
pub use store::{MemoryStore, QueryScope, ScopedStore, scope_where};
pub use traits::{Field, PermissionUnifier, PrincipalGrant, PrincipalResolver, Record, RecordStore};
pub use types::*;

mod directory;
mod error;
mod fields;
pub mod schema;
mod store;
mod traits;
mod types;

#[cfg(test)]
mod tests;
