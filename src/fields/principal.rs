//! Fields for single principals and sets of principals.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::FieldError;
use crate::traits::{Field, PrincipalResolver};
use crate::types::{Principal, ResolvePolicy};

fn resolve(
    resolver: &dyn PrincipalResolver,
    identifier: &str,
    policy: ResolvePolicy,
) -> Result<Principal, FieldError> {
    resolver.resolve(identifier, policy).map_err(|err| {
        debug!(
            event = "Resolve",
            phase = "Rejected",
            identifier = identifier,
            error = %err
        );
        FieldError::from(err)
    })
}

/// A single principal, exchanged as its identifier string.
pub struct PrincipalField {
    resolver: Arc<dyn PrincipalResolver>,
    policy: ResolvePolicy,
}

impl PrincipalField {
    pub fn new(resolver: Arc<dyn PrincipalResolver>, policy: ResolvePolicy) -> Self {
        PrincipalField { resolver, policy }
    }

    pub fn policy(&self) -> ResolvePolicy {
        self.policy
    }
}

impl Field for PrincipalField {
    type Input = Option<Principal>;
    type Output = Option<Principal>;

    fn serialize(&self, value: &Option<Principal>) -> Result<Value, FieldError> {
        Ok(value
            .as_ref()
            .map_or(Value::Null, |p| Value::String(p.identifier())))
    }

    fn deserialize(&self, value: &Value) -> Result<Option<Principal>, FieldError> {
        match value {
            Value::Null => Ok(None),
            Value::String(identifier) => {
                resolve(self.resolver.as_ref(), identifier, self.policy).map(Some)
            }
            _ => Err(FieldError::Type),
        }
    }
}

/// A collection of principals, exchanged as a list of identifier strings.
///
/// Deserialization yields a set; duplicates collapse and order is lost.
pub struct PrincipalList {
    resolver: Arc<dyn PrincipalResolver>,
    policy: ResolvePolicy,
}

impl PrincipalList {
    pub fn new(resolver: Arc<dyn PrincipalResolver>, policy: ResolvePolicy) -> Self {
        PrincipalList { resolver, policy }
    }

    pub fn policy(&self) -> ResolvePolicy {
        self.policy
    }
}

impl Field for PrincipalList {
    type Input = [Principal];
    type Output = HashSet<Principal>;

    fn serialize(&self, value: &[Principal]) -> Result<Value, FieldError> {
        Ok(Value::Array(
            value.iter().map(|p| Value::String(p.identifier())).collect(),
        ))
    }

    fn deserialize(&self, value: &Value) -> Result<HashSet<Principal>, FieldError> {
        let items = match value {
            Value::Null => return Ok(HashSet::new()),
            Value::Array(items) => items,
            _ => return Err(FieldError::Type),
        };
        items
            .iter()
            .map(|item| match item {
                Value::String(identifier) => {
                    resolve(self.resolver.as_ref(), identifier, self.policy)
                }
                _ => Err(FieldError::Type),
            })
            .collect()
    }
}
