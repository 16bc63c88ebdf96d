//! # ATS Records Crate
//!
//! Canonical data model and dataset loading for the applicant-tracking
//! filter engine.
//!
//! ## Main Components
//!
//! - **types**: Users, teams, candidates, job postings, activity events,
//!   the `Record` trait and the in-memory `RecordIndex`
//! - **parser**: Raw source shapes and their normalisation into `types`
//! - **index**: Loading a `RecordIndex` from a dataset directory
//! - **error**: Error types for loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use ats_records::RecordIndex;
//! use std::path::Path;
//!
//! let index = RecordIndex::load_from_dir(Path::new("data/demo"))?;
//! let candidate = index.get_candidate("c1").unwrap();
//! println!("{} is owned by {}", candidate.name, candidate.owner_id);
//! ```

pub mod error;
pub mod index;
pub mod parser;
pub mod types;

pub use error::{RecordLoadError, Result};
pub use index::UnresolvedOwner;
pub use types::{
    // Identifiers
    OwnerId,
    RecordId,
    TeamId,
    // Directory
    Role,
    Team,
    User,
    // Records
    ActivityEvent,
    Candidate,
    JobPosting,
    Record,
    SalaryBand,
    RecordIndex,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            name: String::new(),
            email: String::new(),
            role,
            manager_id: None,
            team_ids: vec![],
        }
    }

    fn job(id: &str, min: Option<f64>, max: Option<f64>) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            owner_id: "r1".to_string(),
            title: "Engineer".to_string(),
            organization: "Acme".to_string(),
            client_id: None,
            skills: vec![],
            country: String::new(),
            city: String::new(),
            experience: String::new(),
            salary_min: min,
            salary_max: max,
            status: "active".to_string(),
            priority: String::new(),
            source: String::new(),
            job_type: String::new(),
            posted_date: String::new(),
        }
    }

    #[test]
    fn test_record_index_creation() {
        let index = RecordIndex::new();
        assert_eq!(index.counts(), (0, 0, 0, 0));
        assert!(index.get_user("nobody").is_none());
        assert!(index.get_candidate("nobody").is_none());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut index = RecordIndex::new();
        index.insert_job(job("j1", None, None));
        index.insert_job(job("j2", None, None));

        let mut edited = job("j1", Some(1.0), Some(2.0));
        edited.status = "filled".to_string();
        index.insert_job(edited);

        assert_eq!(index.jobs().len(), 2);
        assert_eq!(index.jobs()[0].id, "j1");
        assert_eq!(index.jobs()[0].status, "filled");
    }

    #[test]
    fn test_insert_user() {
        let mut index = RecordIndex::new();
        index.insert_user(user("u1", Role::Manager));

        let retrieved = index.get_user("u1").unwrap();
        assert_eq!(retrieved.role, Role::Manager);
    }

    #[test]
    fn test_job_salary_band() {
        assert_eq!(job("j", None, None).salary(), SalaryBand::Unknown);
        assert_eq!(
            job("j", Some(50000.0), None).salary(),
            SalaryBand::Range {
                min: 50000.0,
                max: f64::INFINITY
            }
        );
    }

    #[test]
    fn test_role_serde_round_trip_and_fallback() {
        let role: Role = serde_json::from_str("\"Manager\"").unwrap();
        assert_eq!(role, Role::Manager);
        let role: Role = serde_json::from_str("\"recruiter-lead\"").unwrap();
        assert_eq!(role, Role::Unknown);
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }
}
