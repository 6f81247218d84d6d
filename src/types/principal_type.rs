//! Principal type tags and the canonical names used in identifier strings.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// The kinds of principal an identifier string can address.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    AsRefStr,
    Display,
    EnumString,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum PrincipalType {
    /// A local user (e.g., `User:42`)
    User,
    /// A local or provider group (e.g., `Group:7`, `Group:ldap:admins`)
    Group,
    /// A user known only to an identity provider (e.g., `ExternalUser:ldap:jdoe`)
    ExternalUser,
}
