//! Permission grants attached to a principal.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::traits::PrincipalGrant;

use super::principal::Principal;

/// Tag granting every permission on the protected object.
pub const FULL_ACCESS_PERMISSION: &str = "_full_access";

/// Tag granting read access to the protected object.
pub const READ_ACCESS_PERMISSION: &str = "_read_access";

/// A principal's entry in an access-control list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Grant {
    pub principal: Principal,
    #[serde(default)]
    pub permissions: BTreeSet<String>,
    #[serde(default)]
    pub full_access: bool,
    #[serde(default)]
    pub read_access: bool,
}

impl Grant {
    pub fn new(principal: impl Into<Principal>) -> Self {
        Grant {
            principal: principal.into(),
            permissions: BTreeSet::new(),
            full_access: false,
            read_access: false,
        }
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    pub fn with_full_access(mut self) -> Self {
        self.full_access = true;
        self
    }

    pub fn with_read_access(mut self) -> Self {
        self.read_access = true;
        self
    }
}

impl PrincipalGrant for Grant {
    fn principal(&self) -> &Principal {
        &self.principal
    }
}
