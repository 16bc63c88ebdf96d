//! Session user and access scope types.

use ats_records::{OwnerId, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The user a view is rendered for.
///
/// Always passed explicitly into the resolver; nothing in the engine
/// reads the role from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: OwnerId,
    pub role: Role,
}

impl SessionUser {
    pub fn new(id: impl Into<OwnerId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

/// The set of owners whose records a user may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "owners")]
pub enum AccessScope {
    /// Every record is visible; owner filtering is skipped entirely.
    Unrestricted,
    /// Only records owned by one of these ids are visible.
    Owners(BTreeSet<OwnerId>),
}

impl AccessScope {
    pub fn owners<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OwnerId>,
    {
        AccessScope::Owners(ids.into_iter().map(Into::into).collect())
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, AccessScope::Unrestricted)
    }

    /// Whether a record owned by `owner_id` is visible under this scope.
    pub fn permits(&self, owner_id: &str) -> bool {
        match self {
            AccessScope::Unrestricted => true,
            AccessScope::Owners(ids) => ids.contains(owner_id),
        }
    }

    /// Number of visible owners, `None` when unrestricted.
    pub fn owner_count(&self) -> Option<usize> {
        match self {
            AccessScope::Unrestricted => None,
            AccessScope::Owners(ids) => Some(ids.len()),
        }
    }
}
