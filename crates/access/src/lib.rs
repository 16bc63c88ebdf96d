//! # Access Scope Crate
//!
//! Decides which record owners a user may see.
//!
//! ## Components
//!
//! - **types**: `SessionUser` (explicit id + role) and `AccessScope`
//! - **directory**: `TeamDirectory`, the reporting lines and team supervision
//! - **resolver**: `resolve_accessible_owner_ids`
//!
//! ## Example Usage
//!
//! ```ignore
//! use access_scope::{resolve_accessible_owner_ids, SessionUser, TeamDirectory};
//!
//! let directory = TeamDirectory::from_index(&index);
//! let session = SessionUser::from_users("m1", index.users());
//! let scope = resolve_accessible_owner_ids(&session, &directory);
//!
//! if scope.permits(&candidate.owner_id) { /* visible */ }
//! ```

pub mod directory;
pub mod resolver;
pub mod types;

pub use directory::{DirectoryEntry, TeamDirectory};
pub use resolver::resolve_accessible_owner_ids;
pub use types::{AccessScope, SessionUser};
