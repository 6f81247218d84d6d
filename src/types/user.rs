//! Local user principals.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ResolveError;

use super::principal::split_identifier;
use super::principal_type::PrincipalType;
use super::qualified_id::UserId;

/// A local user (e.g. `User:42`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct User {
    #[serde(flatten)]
    id: UserId,
}

impl User {
    pub fn new<T: Into<String>>(id: T) -> Self {
        User {
            id: UserId::new(id, None),
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// The canonical identifier string, `User:<id>`.
    pub fn identifier(&self) -> String {
        self.id.fmt_qualified(PrincipalType::User.as_ref())
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.identifier())
    }
}

impl FromStr for User {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_identifier(s)?;
        if parts.principal_type != PrincipalType::User {
            return Err(ResolveError::Malformed(format!(
                "expected type 'User', found type '{}' in '{s}' (expected format: User:user_id)",
                parts.principal_type
            )));
        }
        if parts.rest.is_empty() || parts.rest.contains(':') {
            return Err(ResolveError::Malformed(format!(
                "'{s}' (expected format: User:user_id)"
            )));
        }
        Ok(User::new(parts.rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        canonical = { "User:42", "42" },
        lowercase_tag = { "user:1", "1" },
        padded = { "  User:alice ", "alice" },
    )]
    fn test_user_from_str(input: &str, expected_id: &str) {
        let user = User::from_str(input).unwrap();
        assert_eq!(user.id().id(), expected_id);
        assert_eq!(user.identifier(), format!("User:{expected_id}"));
    }

    #[parameterized(
        no_id = { "User:" },
        no_separator = { "alice" },
        provider_segment = { "User:ldap:alice" },
        group_tag = { "Group:admins" },
        unknown_tag = { "Event:5" },
    )]
    fn test_user_from_str_rejects(input: &str) {
        assert!(matches!(User::from_str(input), Err(ResolveError::Malformed(_))));
    }

    #[test]
    fn test_user_display() {
        assert_eq!(User::new("42").to_string(), "User:42");
    }

    #[test]
    fn test_user_serialization() {
        let user = User::new("42");
        let serialized = serde_json::to_value(&user).unwrap();
        insta::assert_json_snapshot!(serialized, @r#"
        {
          "id": "42"
        }
        "#);
        let deserialized: User = serde_json::from_value(serialized).unwrap();
        assert_eq!(user, deserialized);
    }
}
