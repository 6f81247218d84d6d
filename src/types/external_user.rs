//! Users known only to an external identity provider.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ResolveError;

use super::principal::split_identifier;
use super::principal_type::PrincipalType;
use super::qualified_id::ExternalUserId;

/// A provider user without a local account (e.g. `ExternalUser:ldap:jdoe`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalUser {
    #[serde(flatten)]
    id: ExternalUserId,
}

impl ExternalUser {
    pub fn new<P: Into<String>, S: Into<String>>(provider: P, id: S) -> Self {
        ExternalUser {
            id: ExternalUserId::new(id, Some(provider.into())),
        }
    }

    pub fn id(&self) -> &ExternalUserId {
        &self.id
    }

    pub fn identifier(&self) -> String {
        self.id.fmt_qualified(PrincipalType::ExternalUser.as_ref())
    }
}

impl Display for ExternalUser {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.identifier())
    }
}

impl FromStr for ExternalUser {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_identifier(s)?;
        if parts.principal_type != PrincipalType::ExternalUser {
            return Err(ResolveError::Malformed(format!(
                "expected type 'ExternalUser', found type '{}' in '{s}' (expected format: ExternalUser:provider:id)",
                parts.principal_type
            )));
        }
        match parts.rest.split_once(':') {
            Some((provider, id)) if !provider.is_empty() && !id.is_empty() => {
                Ok(ExternalUser::new(provider, id))
            }
            _ => Err(ResolveError::Malformed(format!(
                "'{s}' (expected format: ExternalUser:provider:id)"
            ))),
        }
    }
}
