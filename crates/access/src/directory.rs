//! Team directory: who reports to whom, and which teams each manager runs.

use ats_records::{OwnerId, RecordIndex, TeamId, User};
use std::collections::HashSet;

/// One potentially-owning user, reduced to the fields scoping needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub id: OwnerId,
    pub manager_id: Option<OwnerId>,
    pub team_ids: Vec<TeamId>,
}

impl From<&User> for DirectoryEntry {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            manager_id: user.manager_id.clone(),
            team_ids: user.team_ids.clone(),
        }
    }
}

/// Directory of users and team supervision used by the resolver.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    entries: Vec<DirectoryEntry>,
    /// (team id, supervising manager id)
    supervisors: Vec<(TeamId, OwnerId)>,
}

impl TeamDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the directory from a loaded dataset.
    pub fn from_index(index: &RecordIndex) -> Self {
        let mut directory = Self::new();
        for user in index.users() {
            directory.add_entry(DirectoryEntry::from(user));
        }
        for team in index.teams() {
            if let Some(manager_id) = &team.manager_id {
                directory.add_supervision(team.id.clone(), manager_id.clone());
            }
        }
        directory
    }

    pub fn add_entry(&mut self, entry: DirectoryEntry) {
        self.entries.push(entry);
    }

    /// Record that `manager_id` supervises `team_id`.
    pub fn add_supervision(&mut self, team_id: impl Into<TeamId>, manager_id: impl Into<OwnerId>) {
        self.supervisors.push((team_id.into(), manager_id.into()));
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&DirectoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Teams supervised by `manager_id`.
    pub fn supervised_teams(&self, manager_id: &str) -> HashSet<&str> {
        self.supervisors
            .iter()
            .filter(|(_, manager)| manager == manager_id)
            .map(|(team, _)| team.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ats_records::{Role, Team};

    #[test]
    fn test_from_index() {
        let mut index = RecordIndex::new();
        index.insert_user(User {
            id: "m1".to_string(),
            name: "Maya".to_string(),
            email: String::new(),
            role: Role::Manager,
            manager_id: None,
            team_ids: vec![],
        });
        index.insert_user(User {
            id: "r1".to_string(),
            name: "Raj".to_string(),
            email: String::new(),
            role: Role::User,
            manager_id: None,
            team_ids: vec!["t1".to_string()],
        });
        index.insert_team(Team {
            id: "t1".to_string(),
            name: "Engineering hiring".to_string(),
            manager_id: Some("m1".to_string()),
        });
        index.insert_team(Team {
            id: "t2".to_string(),
            name: "Unled".to_string(),
            manager_id: None,
        });

        let directory = TeamDirectory::from_index(&index);

        assert_eq!(directory.entries().len(), 2);
        assert_eq!(directory.get("r1").unwrap().team_ids, vec!["t1"]);
        assert_eq!(directory.supervised_teams("m1"), HashSet::from(["t1"]));
        assert!(directory.supervised_teams("r1").is_empty());
    }
}
