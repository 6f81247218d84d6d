use std::collections::BTreeMap;
use std::sync::PoisonError;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::types::{Identifier, PrincipalType};

/// Failure raised by a field converter towards the enclosing schema.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum FieldError {
    #[error("Invalid input type.")]
    Type,

    #[error("\"{value}\" does not exist")]
    NotFound { value: Identifier },

    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    Parse(String),

    #[error("serialization is not supported by this field")]
    NotImplemented,

    #[error("invalid field configuration: {0}")]
    Config(String),

    #[error("record store error: {0}")]
    Store(String),
}

impl FieldError {
    /// Stable, field-level error code reported next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::Type => "type",
            FieldError::NotFound { .. } => "not_found",
            FieldError::Invalid(_) => "invalid",
            FieldError::Parse(_) => "parse",
            FieldError::NotImplemented => "not_implemented",
            FieldError::Config(_) => "config",
            FieldError::Store(_) => "store",
        }
    }
}

/// Errors reported by a [`crate::PrincipalResolver`].
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Invalid principal identifier: {0}")]
    Malformed(String),

    #[error("{0} principals are not allowed here")]
    Disallowed(PrincipalType),

    #[error("Unknown principal: {0}")]
    Unknown(String),

    #[error("principal directory unavailable: {0}")]
    Unavailable(String),
}

impl<T> From<PoisonError<T>> for ResolveError {
    fn from(err: PoisonError<T>) -> Self {
        ResolveError::Unavailable(err.to_string())
    }
}

impl From<ResolveError> for FieldError {
    fn from(err: ResolveError) -> Self {
        FieldError::Invalid(err.to_string())
    }
}

/// Errors reported by a [`crate::RecordStore`].
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown column '{column}' on {collection}")]
    UnknownColumn { collection: String, column: String },

    #[error("failed to lock record store: {0}")]
    PoisonedLock(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for FieldError {
    fn from(err: StoreError) -> Self {
        FieldError::Store(err.to_string())
    }
}

/// A single field failure as reported by [`crate::schema::Loader`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct FieldErrorEntry {
    pub code: String,
    pub message: String,
}

impl From<&FieldError> for FieldErrorEntry {
    fn from(err: &FieldError) -> Self {
        FieldErrorEntry {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Every failed field of a document, keyed by field name.
#[derive(Debug, Clone, Default, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("validation failed for {} field(s): {}", .errors.len(), .errors.keys().join(", "))]
pub struct SchemaError {
    pub errors: BTreeMap<String, FieldErrorEntry>,
}
