//! Resolve which record owners a session user may see.
//!
//! The resolver is total: missing users, unknown roles and empty
//! directories all degrade to the most restrictive scope instead of failing.

use crate::directory::TeamDirectory;
use crate::types::{AccessScope, SessionUser};
use ats_records::{OwnerId, Role};
use std::collections::BTreeSet;
use tracing::debug;

/// Compute the access scope for `user`.
///
/// - admin: `Unrestricted`
/// - manager: self, direct reports, and members of any team the manager supervises
/// - user, unknown: self only
///
/// A non-admin whose id is missing from a non-empty directory sees nothing:
/// records owned by an unresolved id stay admin-only even for a session
/// carrying that same id.
pub fn resolve_accessible_owner_ids(user: &SessionUser, directory: &TeamDirectory) -> AccessScope {
    let scope = match user.role {
        Role::Admin => AccessScope::Unrestricted,
        _ if !directory.is_empty() && directory.get(&user.id).is_none() => {
            AccessScope::Owners(BTreeSet::new())
        }
        Role::Manager => AccessScope::Owners(managed_owner_ids(&user.id, directory)),
        Role::User | Role::Unknown => AccessScope::owners([user.id.clone()]),
    };

    debug!(
        user_id = %user.id,
        role = %user.role,
        owners = ?scope.owner_count(),
        "Resolved access scope"
    );
    scope
}

fn managed_owner_ids(manager_id: &str, directory: &TeamDirectory) -> BTreeSet<OwnerId> {
    let supervised = directory.supervised_teams(manager_id);

    let mut owners: BTreeSet<OwnerId> = directory
        .entries()
        .iter()
        .filter(|entry| {
            entry.manager_id.as_deref() == Some(manager_id)
                || entry
                    .team_ids
                    .iter()
                    .any(|team| supervised.contains(team.as_str()))
        })
        .map(|entry| entry.id.clone())
        .collect();

    owners.insert(manager_id.to_string());
    owners
}

impl SessionUser {
    /// Look up a session user's role in the directory-backed user list.
    ///
    /// An id that is not in `users` gets `Role::Unknown`, which resolves to
    /// a self-only scope.
    pub fn from_users(id: &str, users: &[ats_records::User]) -> Self {
        let role = users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.role)
            .unwrap_or(Role::Unknown);
        SessionUser::new(id, role)
    }
}
