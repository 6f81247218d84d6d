//! A field for principals paired with their permission tags.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::FieldError;
use crate::traits::{Field, PermissionUnifier, PrincipalGrant, PrincipalResolver};
use crate::types::{Principal, ResolvePolicy};

/// Serializes grant entries as `[identifier, [permission, ...]]` pairs and
/// deserializes such pairs into a principal → permission-set mapping.
///
/// Identifiers resolve with groups allowed and external users rejected.
/// Two pairs naming the same principal are refused.
pub struct PrincipalPermissionList<G> {
    resolver: Arc<dyn PrincipalResolver>,
    unifier: Arc<dyn PermissionUnifier<G>>,
}

impl<G> PrincipalPermissionList<G> {
    pub const POLICY: ResolvePolicy = ResolvePolicy {
        allow_groups: true,
        allow_external_users: false,
    };

    pub fn new(resolver: Arc<dyn PrincipalResolver>, unifier: Arc<dyn PermissionUnifier<G>>) -> Self {
        PrincipalPermissionList { resolver, unifier }
    }
}

fn parse_pair(item: &Value) -> Result<(&str, BTreeSet<String>), FieldError> {
    let [identifier, permissions] = item.as_array().map(Vec::as_slice).unwrap_or_default() else {
        return Err(FieldError::Type);
    };
    let identifier = identifier.as_str().ok_or(FieldError::Type)?;
    let permissions = permissions
        .as_array()
        .ok_or(FieldError::Type)?
        .iter()
        .map(|p| p.as_str().map(str::to_string).ok_or(FieldError::Type))
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok((identifier, permissions))
}

impl<G: PrincipalGrant> Field for PrincipalPermissionList<G> {
    type Input = [G];
    type Output = HashMap<Principal, BTreeSet<String>>;

    fn serialize(&self, value: &[G]) -> Result<Value, FieldError> {
        Ok(Value::Array(
            value
                .iter()
                .map(|entry| {
                    let permissions: Vec<Value> = self
                        .unifier
                        .unify(entry)
                        .into_iter()
                        .map(Value::String)
                        .collect();
                    Value::Array(vec![
                        Value::String(entry.principal().identifier()),
                        Value::Array(permissions),
                    ])
                })
                .collect(),
        ))
    }

    fn deserialize(&self, value: &Value) -> Result<Self::Output, FieldError> {
        let items = match value {
            Value::Null => return Ok(HashMap::new()),
            Value::Array(items) => items,
            _ => return Err(FieldError::Type),
        };

        let mut out = HashMap::with_capacity(items.len());
        for item in items {
            let (identifier, permissions) = parse_pair(item)?;
            let principal = self
                .resolver
                .resolve(identifier, Self::POLICY)
                .map_err(FieldError::from)?;
            match out.entry(principal) {
                Entry::Vacant(slot) => {
                    slot.insert(permissions);
                }
                Entry::Occupied(slot) => {
                    debug!(
                        event = "Resolve",
                        phase = "Duplicate",
                        identifier = identifier,
                        principal = %slot.key()
                    );
                    return Err(FieldError::Invalid(format!(
                        "duplicate principal: {}",
                        slot.key()
                    )));
                }
            }
        }
        Ok(out)
    }
}
