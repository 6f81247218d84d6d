//! Provider-qualified identifiers for principals.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Marker type for Users
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum UserMarker {}

/// Marker type for Groups
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum GroupMarker {}

/// Marker type for ExternalUsers
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum ExternalUserMarker {}

/// An identifier, optionally scoped to the identity provider that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub struct QualifiedId<T> {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    provider: Option<String>,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> QualifiedId<T> {
    pub fn new(id: impl Into<String>, provider: Option<String>) -> Self {
        QualifiedId {
            id: id.into(),
            provider,
            _marker: PhantomData,
        }
    }

    /// Get the raw id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the issuing provider, `None` for local identifiers.
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Render as `Type:provider:id` or `Type:id`.
    pub fn fmt_qualified(&self, ty: &str) -> String {
        match &self.provider {
            Some(provider) => format!("{ty}:{provider}:{id}", id = self.id),
            None => format!("{ty}:{id}", id = self.id),
        }
    }
}

impl<T> Display for QualifiedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        // The type tag lives on the wrappers.
        write!(f, "{}", self.id)
    }
}

/// A User's id.
pub type UserId = QualifiedId<UserMarker>;

/// A Group's id, local or provider-qualified.
pub type GroupId = QualifiedId<GroupMarker>;

/// An ExternalUser's provider-qualified id.
pub type ExternalUserId = QualifiedId<ExternalUserMarker>;
