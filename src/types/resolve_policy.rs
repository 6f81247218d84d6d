//! Which principal kinds a resolver may hand back.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::principal_type::PrincipalType;

/// Capability flags passed to a [`crate::PrincipalResolver`]. Users are
/// always allowed; groups and external users must be opted into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ResolvePolicy {
    pub allow_groups: bool,
    pub allow_external_users: bool,
}

impl ResolvePolicy {
    pub fn new(allow_groups: bool, allow_external_users: bool) -> Self {
        ResolvePolicy {
            allow_groups,
            allow_external_users,
        }
    }

    /// Groups allowed, external users not.
    pub fn groups() -> Self {
        ResolvePolicy::new(true, false)
    }

    pub fn allows(&self, principal_type: PrincipalType) -> bool {
        match principal_type {
            PrincipalType::User => true,
            PrincipalType::Group => self.allow_groups,
            PrincipalType::ExternalUser => self.allow_external_users,
        }
    }
}
