//! Principal type that can be a User, a Group or an ExternalUser.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ResolveError;

use super::external_user::ExternalUser;
use super::group::Group;
use super::principal_type::PrincipalType;
use super::user::User;

pub(super) struct IdentifierParts<'a> {
    pub principal_type: PrincipalType,
    pub rest: &'a str,
}

/// Split `Type:rest` at the first colon and parse the type tag.
pub(super) fn split_identifier(s: &str) -> Result<IdentifierParts<'_>, ResolveError> {
    let s = s.trim();
    let (type_part, rest) = s.split_once(':').ok_or_else(|| {
        ResolveError::Malformed(format!("missing type in '{s}' (expected format: Type:id)"))
    })?;
    let principal_type = PrincipalType::from_str(type_part).map_err(|_| {
        ResolveError::Malformed(format!("unknown principal type '{type_part}' in '{s}'"))
    })?;
    Ok(IdentifierParts {
        principal_type,
        rest,
    })
}

/// An identity capable of holding permissions.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Principal {
    User(User),
    Group(Group),
    ExternalUser(ExternalUser),
}

impl Principal {
    pub fn principal_type(&self) -> PrincipalType {
        match self {
            Principal::User(_) => PrincipalType::User,
            Principal::Group(_) => PrincipalType::Group,
            Principal::ExternalUser(_) => PrincipalType::ExternalUser,
        }
    }

    /// The canonical identifier string of this principal.
    pub fn identifier(&self) -> String {
        match self {
            Principal::User(user) => user.identifier(),
            Principal::Group(group) => group.identifier(),
            Principal::ExternalUser(user) => user.identifier(),
        }
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Principal::User(user) => write!(f, "{user}"),
            Principal::Group(group) => write!(f, "{group}"),
            Principal::ExternalUser(user) => write!(f, "{user}"),
        }
    }
}

impl FromStr for Principal {
    type Err = ResolveError;

    /// Accepts:
    /// - User:42
    /// - Group:7 / Group:ldap:admins
    /// - ExternalUser:ldap:jdoe
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_identifier(s)?.principal_type {
            PrincipalType::User => User::from_str(s).map(Principal::User),
            PrincipalType::Group => Group::from_str(s).map(Principal::Group),
            PrincipalType::ExternalUser => ExternalUser::from_str(s).map(Principal::ExternalUser),
        }
    }
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Principal::User(user)
    }
}

impl From<Group> for Principal {
    fn from(group: Group) -> Self {
        Principal::Group(group)
    }
}

impl From<ExternalUser> for Principal {
    fn from(user: ExternalUser) -> Self {
        Principal::ExternalUser(user)
    }
}
