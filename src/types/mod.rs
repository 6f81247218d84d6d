//! Data model types shared by the field converters.
//!
//! Canonical principal identifier strings:
//! - User: `User:42`
//! - Group: `Group:7` (local) or `Group:ldap:admins` (provider)
//! - ExternalUser: `ExternalUser:ldap:jdoe`
//!
//! The type tag is matched case-insensitively on input and always rendered
//! in its canonical case.

mod external_user;
mod grant;
mod group;
mod identifier;
mod principal;
mod principal_type;
mod qualified_id;
mod record_set;
mod resolve_policy;
mod user;

pub use external_user::ExternalUser;
pub use grant::{FULL_ACCESS_PERMISSION, Grant, READ_ACCESS_PERMISSION};
pub use group::Group;
pub use identifier::{Identifier, IdentifierKind};
pub use principal::Principal;
pub use principal_type::PrincipalType;
pub use qualified_id::{
    ExternalUserId, ExternalUserMarker, GroupId, GroupMarker, QualifiedId, UserId, UserMarker,
};
pub use record_set::RecordSet;
pub use resolve_policy::ResolvePolicy;
pub use user::User;
