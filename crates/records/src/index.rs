//! Building a RecordIndex from a dataset directory.
//!
//! A dataset directory holds one JSON array per collection:
//! - users.json (required)
//! - candidates.json (required)
//! - jobs.json (required)
//! - teams.json (optional)
//! - events.json (optional)

use crate::error::{RecordLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, instrument, warn};

/// A record whose owner is not in the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedOwner {
    pub kind: &'static str,
    pub record_id: RecordId,
    pub owner_id: OwnerId,
}

impl RecordIndex {
    /// Load an entire dataset directory.
    ///
    /// Steps:
    /// 1. Parse all files in parallel
    /// 2. Reject duplicate ids within each collection
    /// 3. Insert everything, preserving file order
    /// 4. Report records with unresolved owners
    #[instrument(skip_all, fields(data_dir = %data_dir.display()))]
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        let users_path = data_dir.join("users.json");
        let teams_path = data_dir.join("teams.json");
        let candidates_path = data_dir.join("candidates.json");
        let jobs_path = data_dir.join("jobs.json");
        let events_path = data_dir.join("events.json");

        let ((users, teams), ((candidates, jobs), events)) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_users(&users_path),
                    || parser::parse_teams(&teams_path),
                )
            },
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || parser::parse_candidates(&candidates_path),
                            || parser::parse_jobs(&jobs_path),
                        )
                    },
                    || parser::parse_events(&events_path),
                )
            },
        );

        let users = users?;
        let teams = teams?;
        let candidates = candidates?;
        let jobs = jobs?;
        let events = events?;

        ensure_unique("user", users.iter().map(|u| u.id.as_str()))?;
        ensure_unique("team", teams.iter().map(|t| t.id.as_str()))?;
        ensure_unique("candidate", candidates.iter().map(|c| c.id.as_str()))?;
        ensure_unique("job", jobs.iter().map(|j| j.id.as_str()))?;

        let mut index = RecordIndex::new();
        for user in users {
            index.insert_user(user);
        }
        for team in teams {
            index.insert_team(team);
        }
        for candidate in candidates {
            index.insert_candidate(candidate);
        }
        for job in jobs {
            index.insert_job(job);
        }
        for event in events {
            index.insert_event(event);
        }

        let unresolved = index.validate();
        for orphan in &unresolved {
            warn!(
                "{} {} is owned by unknown user {:?}; only admins will see it",
                orphan.kind, orphan.record_id, orphan.owner_id
            );
        }

        let (users, candidates, jobs, events) = index.counts();
        info!(
            "Loaded {} users, {} teams, {} candidates, {} jobs, {} events",
            users,
            index.teams.len(),
            candidates,
            jobs,
            events
        );
        Ok(index)
    }

    /// List records whose owner does not resolve to exactly one user.
    ///
    /// This is not an error: such records stay in the index and are simply
    /// invisible to everyone but admins.
    pub fn validate(&self) -> Vec<UnresolvedOwner> {
        let candidates = self.candidates.iter().map(|c| ("candidate", &c.id, &c.owner_id));
        let jobs = self.jobs.iter().map(|j| ("job", &j.id, &j.owner_id));

        candidates
            .chain(jobs)
            .filter(|(_, _, owner)| !self.user_lookup.contains_key(owner.as_str()))
            .map(|(kind, id, owner)| UnresolvedOwner {
                kind,
                record_id: id.clone(),
                owner_id: owner.clone(),
            })
            .collect()
    }
}

fn ensure_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RecordLoadError::DuplicateId {
                kind: kind.to_string(),
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
