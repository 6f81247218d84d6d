//! Group principals, either local or owned by an identity provider.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ResolveError;

use super::principal::split_identifier;
use super::principal_type::PrincipalType;
use super::qualified_id::GroupId;

/// A group (e.g. `Group:7` or `Group:ldap:admins`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Group {
    #[serde(flatten)]
    pub(crate) id: GroupId,
}

impl Group {
    /// A local group.
    pub fn local<S: Into<String>>(id: S) -> Self {
        Group {
            id: GroupId::new(id, None),
        }
    }

    /// A group owned by `provider`.
    pub fn provider<P: Into<String>, S: Into<String>>(provider: P, name: S) -> Self {
        Group {
            id: GroupId::new(name, Some(provider.into())),
        }
    }

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn is_local(&self) -> bool {
        self.id.provider().is_none()
    }

    pub fn identifier(&self) -> String {
        self.id.fmt_qualified(PrincipalType::Group.as_ref())
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.identifier())
    }
}

impl FromStr for Group {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_identifier(s)?;
        if parts.principal_type != PrincipalType::Group {
            return Err(ResolveError::Malformed(format!(
                "expected type 'Group', found type '{}' in '{s}' (expected format: Group:group_id or Group:provider:name)",
                parts.principal_type
            )));
        }
        match parts.rest.split_once(':') {
            None if !parts.rest.is_empty() => Ok(Group::local(parts.rest)),
            Some((provider, name)) if !provider.is_empty() && !name.is_empty() => {
                Ok(Group::provider(provider, name))
            }
            _ => Err(ResolveError::Malformed(format!(
                "'{s}' (expected format: Group:group_id or Group:provider:name)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        local = { "Group:7", "7", None },
        local_lower = { "group:staff", "staff", None },
        provider = { "Group:ldap:admins", "admins", Some("ldap") },
        provider_name_with_colon = { "Group:ldap:cn=a:b", "cn=a:b", Some("ldap") },
    )]
    fn test_group_from_str(input: &str, expected_id: &str, expected_provider: Option<&str>) {
        let group = Group::from_str(input).unwrap();
        assert_eq!(group.id().id(), expected_id);
        assert_eq!(group.id().provider(), expected_provider);
        assert_eq!(group.is_local(), expected_provider.is_none());
    }

    #[parameterized(
        empty = { "Group:" },
        empty_provider = { "Group::admins" },
        empty_name = { "Group:ldap:" },
        user_tag = { "User:7" },
    )]
    fn test_group_from_str_rejects(input: &str) {
        assert!(matches!(Group::from_str(input), Err(ResolveError::Malformed(_))));
    }

    #[test]
    fn test_group_identifier_round_trips() {
        let group = Group::provider("ldap", "admins");
        assert_eq!(group.to_string(), "Group:ldap:admins");
        assert_eq!(Group::from_str(&group.identifier()).unwrap(), group);
    }
}
