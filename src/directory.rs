//! In-process principal resolution and permission unification.

use std::collections::{BTreeSet, HashSet};
use std::str::FromStr;
use std::sync::RwLock;

use tracing::debug;

use crate::error::ResolveError;
use crate::traits::{PermissionUnifier, PrincipalResolver};
use crate::types::{FULL_ACCESS_PERMISSION, Grant, Principal, READ_ACCESS_PERMISSION, ResolvePolicy};

/// A registry of known principals that resolves identifier strings against itself.
#[derive(Debug, Default)]
pub struct Directory {
    principals: RwLock<HashSet<Principal>>,
}

impl Directory {
    pub fn new<I, P>(principals: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Principal>,
    {
        Directory {
            principals: RwLock::new(principals.into_iter().map(Into::into).collect()),
        }
    }

    /// Register a principal, returning `false` if it was already known.
    pub fn register(&self, principal: impl Into<Principal>) -> Result<bool, ResolveError> {
        let mut guard = self.principals.write()?;
        Ok(guard.insert(principal.into()))
    }
}

impl PrincipalResolver for Directory {
    fn resolve(&self, identifier: &str, policy: ResolvePolicy) -> Result<Principal, ResolveError> {
        let principal = Principal::from_str(identifier)?;
        let principal_type = principal.principal_type();
        if !policy.allows(principal_type) {
            debug!(
                event = "Resolve",
                phase = "Policy",
                identifier = identifier,
                principal_type = principal_type.as_ref(),
                allow_groups = policy.allow_groups,
                allow_external_users = policy.allow_external_users
            );
            return Err(ResolveError::Disallowed(principal_type));
        }

        let guard = self.principals.read()?;
        if guard.contains(&principal) {
            Ok(principal)
        } else {
            debug!(event = "Resolve", phase = "Lookup", identifier = identifier, found = false);
            Err(ResolveError::Unknown(principal.identifier()))
        }
    }
}

/// Effective permissions of a [`Grant`]: its explicit tags plus the
/// full-access and read-access tags when those flags are set.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardUnifier;

impl PermissionUnifier<Grant> for StandardUnifier {
    fn unify(&self, entry: &Grant) -> BTreeSet<String> {
        let mut permissions = entry.permissions.clone();
        if entry.full_access {
            permissions.insert(FULL_ACCESS_PERMISSION.to_string());
        }
        if entry.read_access {
            permissions.insert(READ_ACCESS_PERMISSION.to_string());
        }
        permissions
    }
}
