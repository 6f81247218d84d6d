use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::{FieldError, ResolveError, StoreError};
use crate::types::{Identifier, Principal, ResolvePolicy};

/// The plugin contract every field converter fulfils towards the schema.
pub trait Field {
    /// The domain value handed to `serialize`
    type Input: ?Sized;
    /// The domain value produced by `deserialize`
    type Output;

    /// Turn a domain value into its wire form.
    fn serialize(&self, value: &Self::Input) -> Result<Value, FieldError>;

    /// Turn a wire value into a domain value, or explain why it can't be.
    fn deserialize(&self, value: &Value) -> Result<Self::Output, FieldError>;
}

/// A persisted object addressable through one of its columns.
pub trait Record: Clone + Send + Sync {
    /// The collection name, used in logs and store errors
    fn collection() -> &'static str;

    /// The primary-key columns; lookup by default requires exactly one
    fn primary_key() -> &'static [&'static str];

    /// Every column usable for lookups
    fn columns() -> &'static [&'static str];

    /// The value of `name` on this record, `None` if the column is unknown
    fn column(&self, name: &str) -> Option<Identifier>;
}

/// Lookup access to one typed collection.
pub trait RecordStore<R>: Send + Sync {
    /// The record whose `column` equals `value`, if any.
    fn find_one(&self, column: &str, value: &Identifier) -> Result<Option<R>, StoreError>;

    /// Every record whose `column` is in `values`.
    fn find_many(&self, column: &str, values: &BTreeSet<Identifier>) -> Result<Vec<R>, StoreError>;
}

/// Turns an identifier string into a principal, honoring the policy flags.
pub trait PrincipalResolver: Send + Sync {
    fn resolve(&self, identifier: &str, policy: ResolvePolicy) -> Result<Principal, ResolveError>;
}

/// An access-control entry that belongs to one principal.
pub trait PrincipalGrant {
    fn principal(&self) -> &Principal;
}

/// Computes the effective permission tags for a grant entry.
pub trait PermissionUnifier<G>: Send + Sync {
    fn unify(&self, entry: &G) -> BTreeSet<String>;
}
