//! Canonical domain types for the applicant-tracking dataset.
//!
//! Source data arrives in several loosely-typed shapes (see `parser`);
//! everything here is the normalised form the engine works with. Records
//! are immutable snapshots: an edit upstream produces a new record with the
//! same identifier, which `RecordIndex::insert_*` swaps in place.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of a candidate or job posting
pub type RecordId = String;

/// Identifier of a user that can own records (recruiter, agent, manager)
pub type OwnerId = String;

/// Identifier of a recruiting team
pub type TeamId = String;

// =============================================================================
// Users and teams
// =============================================================================

/// Fixed role enumeration.
///
/// Any role string that is not recognised becomes `Unknown`, which the
/// access resolver treats exactly like `User` (least privilege).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Manager,
    User,
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::User => "user",
            Role::Unknown => "unknown",
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "manager" => Role::Manager,
            "user" => Role::User,
            _ => Role::Unknown,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person in the user directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: OwnerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    /// Reporting line, by id. Not ownership.
    #[serde(default)]
    pub manager_id: Option<OwnerId>,
    #[serde(default)]
    pub team_ids: Vec<TeamId>,
}

/// A recruiting team. A manager supervises every team naming them here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub manager_id: Option<OwnerId>,
}

// =============================================================================
// Records
// =============================================================================

/// The salary information a record carries, in the form its filter needs.
///
/// Candidates state a single expectation; job postings advertise a band.
/// The two are matched differently against a salary filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SalaryBand {
    Point(f64),
    Range { min: f64, max: f64 },
    Unknown,
}

/// An applicant in a recruiter's pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: RecordId,
    pub owner_id: OwnerId,
    pub name: String,
    pub email: String,
    /// Current or target job title
    pub title: String,
    /// Current employer
    pub organization: String,
    pub skills: Vec<String>,
    pub country: String,
    pub city: String,
    /// Free text, e.g. "5+ years"
    pub experience: String,
    pub expected_salary: Option<f64>,
    pub status: String,
    pub priority: String,
    pub source: String,
    pub job_type: String,
    /// Job the candidate applied to, if any
    pub job_id: Option<RecordId>,
    pub job_title: Option<String>,
    pub client_id: Option<String>,
    pub applied_date: String,
}

/// An open (or closed) requisition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: RecordId,
    pub owner_id: OwnerId,
    pub title: String,
    /// Hiring client's display name
    pub organization: String,
    pub client_id: Option<String>,
    pub skills: Vec<String>,
    pub country: String,
    pub city: String,
    pub experience: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub status: String,
    pub priority: String,
    pub source: String,
    pub job_type: String,
    pub posted_date: String,
}

/// One tracked interaction with a job posting, used for analytics breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub id: String,
    #[serde(default)]
    pub job_id: Option<RecordId>,
    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub occurred_at: String,
}

/// Read-only view of a record that the filter engine understands.
///
/// Implemented by `Candidate` and `JobPosting`. Optional attributes return
/// `None` or an empty string; the engine never requires a field to be set.
pub trait Record: Send + Sync {
    fn id(&self) -> &str;

    /// Owning recruiter/agent
    fn owner_id(&self) -> &str;

    /// Fields covered by free-text search (skills are searched separately)
    fn search_fields(&self) -> Vec<&str>;

    fn skills(&self) -> &[String];
    fn country(&self) -> &str;
    fn city(&self) -> &str;
    fn experience(&self) -> &str;
    fn status(&self) -> &str;
    fn priority(&self) -> &str;
    fn source(&self) -> &str;
    fn job_type(&self) -> &str;
    fn job_id(&self) -> Option<&str>;
    fn job_title(&self) -> Option<&str>;
    fn client_id(&self) -> Option<&str>;
    fn organization(&self) -> &str;

    /// Applied date for candidates, posted date for jobs
    fn record_date(&self) -> &str;

    fn salary(&self) -> SalaryBand;
}

impl Record for Candidate {
    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.title, &self.organization]
    }

    fn skills(&self) -> &[String] {
        &self.skills
    }

    fn country(&self) -> &str {
        &self.country
    }

    fn city(&self) -> &str {
        &self.city
    }

    fn experience(&self) -> &str {
        &self.experience
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn priority(&self) -> &str {
        &self.priority
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn job_type(&self) -> &str {
        &self.job_type
    }

    fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    fn job_title(&self) -> Option<&str> {
        self.job_title.as_deref()
    }

    fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    fn organization(&self) -> &str {
        &self.organization
    }

    fn record_date(&self) -> &str {
        &self.applied_date
    }

    fn salary(&self) -> SalaryBand {
        match self.expected_salary {
            Some(value) => SalaryBand::Point(value),
            None => SalaryBand::Unknown,
        }
    }
}

impl Record for JobPosting {
    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.id, &self.organization]
    }

    fn skills(&self) -> &[String] {
        &self.skills
    }

    fn country(&self) -> &str {
        &self.country
    }

    fn city(&self) -> &str {
        &self.city
    }

    fn experience(&self) -> &str {
        &self.experience
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn priority(&self) -> &str {
        &self.priority
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn job_type(&self) -> &str {
        &self.job_type
    }

    fn job_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn job_title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    fn organization(&self) -> &str {
        &self.organization
    }

    fn record_date(&self) -> &str {
        &self.posted_date
    }

    /// A half-open band is closed with 0 below and +inf above.
    fn salary(&self) -> SalaryBand {
        match (self.salary_min, self.salary_max) {
            (None, None) => SalaryBand::Unknown,
            (min, max) => SalaryBand::Range {
                min: min.unwrap_or(0.0),
                max: max.unwrap_or(f64::INFINITY),
            },
        }
    }
}

// =============================================================================
// RecordIndex - the in-memory dataset
// =============================================================================

/// Holds one loaded dataset.
///
/// Record collections keep their source order (views display them in that
/// order and grouping is order-preserving); the `*_lookup` maps give O(1)
/// access by id into those vectors.
#[derive(Debug, Default)]
pub struct RecordIndex {
    pub(crate) users: Vec<User>,
    pub(crate) teams: Vec<Team>,
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) jobs: Vec<JobPosting>,
    pub(crate) events: Vec<ActivityEvent>,

    pub(crate) user_lookup: HashMap<OwnerId, usize>,
    pub(crate) candidate_lookup: HashMap<RecordId, usize>,
    pub(crate) job_lookup: HashMap<RecordId, usize>,
}

impl RecordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_user(&self, id: &str) -> Option<&User> {
        self.user_lookup.get(id).map(|&i| &self.users[i])
    }

    pub fn get_candidate(&self, id: &str) -> Option<&Candidate> {
        self.candidate_lookup.get(id).map(|&i| &self.candidates[i])
    }

    pub fn get_job(&self, id: &str) -> Option<&JobPosting> {
        self.job_lookup.get(id).map(|&i| &self.jobs[i])
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn events(&self) -> &[ActivityEvent] {
        &self.events
    }

    /// Insert a user, replacing any existing user with the same id in place
    pub fn insert_user(&mut self, user: User) {
        upsert(&mut self.users, &mut self.user_lookup, user.id.clone(), user);
    }

    pub fn insert_team(&mut self, team: Team) {
        match self.teams.iter_mut().find(|t| t.id == team.id) {
            Some(existing) => *existing = team,
            None => self.teams.push(team),
        }
    }

    /// Insert a candidate, replacing any existing candidate with the same id in place
    pub fn insert_candidate(&mut self, candidate: Candidate) {
        upsert(
            &mut self.candidates,
            &mut self.candidate_lookup,
            candidate.id.clone(),
            candidate,
        );
    }

    /// Insert a job posting, replacing any existing posting with the same id in place
    pub fn insert_job(&mut self, job: JobPosting) {
        upsert(&mut self.jobs, &mut self.job_lookup, job.id.clone(), job);
    }

    pub fn insert_event(&mut self, event: ActivityEvent) {
        self.events.push(event);
    }

    /// (users, candidates, jobs, events)
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.users.len(),
            self.candidates.len(),
            self.jobs.len(),
            self.events.len(),
        )
    }
}

fn upsert<T>(items: &mut Vec<T>, lookup: &mut HashMap<String, usize>, id: String, item: T) {
    match lookup.get(&id) {
        Some(&i) => items[i] = item,
        None => {
            lookup.insert(id, items.len());
            items.push(item);
        }
    }
}
