//! Parsing of dataset files and normalisation of raw record shapes.
//!
//! Mock data and REST payloads disagree on field names and types: owners
//! appear as `recruiterId`, `agentId` or `ownerId`, ids are sometimes
//! numbers, salaries can be `85000` or `"$85,000"`, skills come as a list
//! or as a comma-separated string. The `Raw*` structs accept all of these
//! and convert into the canonical types in `types`.

use crate::error::{RecordLoadError, Result};
use crate::types::*;
use rayon::prelude::*;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// A JSON scalar that may be written as a string, number or boolean.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Scalar {
    /// Trimmed string form; empty strings become `None`.
    fn into_text(self) -> Option<String> {
        let text = match self {
            Scalar::Text(s) => s.trim().to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        };
        if text.is_empty() { None } else { Some(text) }
    }

    fn into_amount(self) -> Option<f64> {
        match self {
            Scalar::Number(n) => n.as_f64().filter(|v| *v >= 0.0),
            Scalar::Text(s) => parse_amount(&s),
            Scalar::Bool(_) => None,
        }
    }
}

/// A list of strings written either as a JSON array or a comma-separated string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    List(Vec<Scalar>),
    Csv(String),
}

impl StringList {
    fn into_vec(self) -> Vec<String> {
        match self {
            StringList::List(items) => items.into_iter().filter_map(Scalar::into_text).collect(),
            StringList::Csv(s) => split_csv(&s),
        }
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a money amount such as `"$85,000"`, `"85000"` or `"120k"`.
///
/// Only a single non-negative number is accepted: an optional currency
/// sign, digits with `,` separators and an optional `.` fraction, then an
/// optional `k`. Ranges (`"$80,000 - $100,000"`), negatives and free text
/// give `None`.
pub fn parse_amount(s: &str) -> Option<f64> {
    let lowered = s.trim().to_ascii_lowercase();
    let body = lowered.trim_start_matches(['$', '€', '£']).trim_start();
    let (digits, multiplier) = match body.strip_suffix('k') {
        Some(rest) => (rest.trim_end(), 1000.0),
        None => (body, 1.0),
    };
    let well_formed = digits.starts_with(|c: char| c.is_ascii_digit())
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c == '.');
    if !well_formed {
        return None;
    }
    digits
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .map(|v| v * multiplier)
}

fn text(value: Option<Scalar>) -> String {
    value.and_then(Scalar::into_text).unwrap_or_default()
}

fn required_id(value: Option<Scalar>, kind: &str) -> Result<String> {
    value
        .and_then(Scalar::into_text)
        .ok_or_else(|| RecordLoadError::InvalidValue {
            field: format!("{kind}.id"),
            value: String::new(),
        })
}

// =============================================================================
// Raw shapes
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawUser {
    pub id: Option<Scalar>,
    #[serde(alias = "fullName")]
    pub name: Option<Scalar>,
    pub email: Option<Scalar>,
    pub role: Option<Scalar>,
    #[serde(alias = "manager_id", alias = "reportsTo")]
    pub manager_id: Option<Scalar>,
    #[serde(alias = "team_ids", alias = "teams")]
    pub team_ids: Option<StringList>,
    #[serde(alias = "team_id")]
    pub team_id: Option<Scalar>,
}

impl TryFrom<RawUser> for User {
    type Error = RecordLoadError;

    fn try_from(raw: RawUser) -> Result<Self> {
        let mut team_ids = raw.team_ids.map(StringList::into_vec).unwrap_or_default();
        if let Some(team) = raw.team_id.and_then(Scalar::into_text) {
            if !team_ids.contains(&team) {
                team_ids.push(team);
            }
        }
        Ok(User {
            id: required_id(raw.id, "user")?,
            name: text(raw.name),
            email: text(raw.email),
            role: Role::from(text(raw.role)),
            manager_id: raw.manager_id.and_then(Scalar::into_text),
            team_ids,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTeam {
    pub id: Option<Scalar>,
    pub name: Option<Scalar>,
    #[serde(alias = "manager_id", alias = "leadId", alias = "lead_id")]
    pub manager_id: Option<Scalar>,
}

impl TryFrom<RawTeam> for Team {
    type Error = RecordLoadError;

    fn try_from(raw: RawTeam) -> Result<Self> {
        Ok(Team {
            id: required_id(raw.id, "team")?,
            name: text(raw.name),
            manager_id: raw.manager_id.and_then(Scalar::into_text),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCandidate {
    pub id: Option<Scalar>,
    #[serde(alias = "owner_id", alias = "recruiterId", alias = "recruiter_id", alias = "agentId")]
    pub owner_id: Option<Scalar>,
    #[serde(alias = "fullName")]
    pub name: Option<Scalar>,
    #[serde(alias = "first_name")]
    pub first_name: Option<Scalar>,
    #[serde(alias = "last_name")]
    pub last_name: Option<Scalar>,
    pub email: Option<Scalar>,
    #[serde(alias = "currentTitle", alias = "position")]
    pub title: Option<Scalar>,
    #[serde(alias = "company", alias = "currentCompany")]
    pub organization: Option<Scalar>,
    pub skills: Option<StringList>,
    pub country: Option<Scalar>,
    pub city: Option<Scalar>,
    #[serde(alias = "experienceLevel")]
    pub experience: Option<Scalar>,
    #[serde(alias = "expected_salary", alias = "salary")]
    pub expected_salary: Option<Scalar>,
    pub status: Option<Scalar>,
    pub priority: Option<Scalar>,
    pub source: Option<Scalar>,
    #[serde(alias = "job_type", alias = "type")]
    pub job_type: Option<Scalar>,
    #[serde(alias = "job_id")]
    pub job_id: Option<Scalar>,
    #[serde(alias = "job_title", alias = "appliedFor")]
    pub job_title: Option<Scalar>,
    #[serde(alias = "client_id")]
    pub client_id: Option<Scalar>,
    #[serde(alias = "applied_date", alias = "appliedAt", alias = "createdAt")]
    pub applied_date: Option<Scalar>,
}

impl TryFrom<RawCandidate> for Candidate {
    type Error = RecordLoadError;

    fn try_from(raw: RawCandidate) -> Result<Self> {
        let name = match raw.name.and_then(Scalar::into_text) {
            Some(name) => name,
            None => {
                let first = text(raw.first_name);
                let last = text(raw.last_name);
                format!("{first} {last}").trim().to_string()
            }
        };
        Ok(Candidate {
            id: required_id(raw.id, "candidate")?,
            owner_id: text(raw.owner_id),
            name,
            email: text(raw.email),
            title: text(raw.title),
            organization: text(raw.organization),
            skills: raw.skills.map(StringList::into_vec).unwrap_or_default(),
            country: text(raw.country),
            city: text(raw.city),
            experience: text(raw.experience),
            expected_salary: raw.expected_salary.and_then(Scalar::into_amount),
            status: text(raw.status),
            priority: text(raw.priority),
            source: text(raw.source),
            job_type: text(raw.job_type),
            job_id: raw.job_id.and_then(Scalar::into_text),
            job_title: raw.job_title.and_then(Scalar::into_text),
            client_id: raw.client_id.and_then(Scalar::into_text),
            applied_date: text(raw.applied_date),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawJobPosting {
    pub id: Option<Scalar>,
    #[serde(
        alias = "owner_id",
        alias = "recruiterId",
        alias = "recruiter_id",
        alias = "agentId",
        alias = "postedBy"
    )]
    pub owner_id: Option<Scalar>,
    #[serde(alias = "jobTitle")]
    pub title: Option<Scalar>,
    #[serde(alias = "company", alias = "client", alias = "clientName")]
    pub organization: Option<Scalar>,
    #[serde(alias = "client_id")]
    pub client_id: Option<Scalar>,
    #[serde(alias = "requiredSkills")]
    pub skills: Option<StringList>,
    pub country: Option<Scalar>,
    pub city: Option<Scalar>,
    #[serde(alias = "experienceLevel")]
    pub experience: Option<Scalar>,
    #[serde(alias = "salary_min", alias = "minSalary")]
    pub salary_min: Option<Scalar>,
    #[serde(alias = "salary_max", alias = "maxSalary")]
    pub salary_max: Option<Scalar>,
    pub status: Option<Scalar>,
    pub priority: Option<Scalar>,
    pub source: Option<Scalar>,
    #[serde(alias = "job_type", alias = "type", alias = "employmentType")]
    pub job_type: Option<Scalar>,
    #[serde(alias = "posted_date", alias = "datePosted", alias = "createdAt")]
    pub posted_date: Option<Scalar>,
}

impl TryFrom<RawJobPosting> for JobPosting {
    type Error = RecordLoadError;

    fn try_from(raw: RawJobPosting) -> Result<Self> {
        Ok(JobPosting {
            id: required_id(raw.id, "job")?,
            owner_id: text(raw.owner_id),
            title: text(raw.title),
            organization: text(raw.organization),
            client_id: raw.client_id.and_then(Scalar::into_text),
            skills: raw.skills.map(StringList::into_vec).unwrap_or_default(),
            country: text(raw.country),
            city: text(raw.city),
            experience: text(raw.experience),
            salary_min: raw.salary_min.and_then(Scalar::into_amount),
            salary_max: raw.salary_max.and_then(Scalar::into_amount),
            status: text(raw.status),
            priority: text(raw.priority),
            source: text(raw.source),
            job_type: text(raw.job_type),
            posted_date: text(raw.posted_date),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawActivityEvent {
    pub id: Option<Scalar>,
    #[serde(alias = "job_id")]
    pub job_id: Option<Scalar>,
    #[serde(alias = "deviceType")]
    pub device: Option<Scalar>,
    #[serde(alias = "country", alias = "region")]
    pub location: Option<Scalar>,
    #[serde(alias = "event", alias = "type")]
    pub action: Option<Scalar>,
    #[serde(alias = "occurred_at", alias = "timestamp")]
    pub occurred_at: Option<Scalar>,
}

impl TryFrom<RawActivityEvent> for ActivityEvent {
    type Error = RecordLoadError;

    fn try_from(raw: RawActivityEvent) -> Result<Self> {
        Ok(ActivityEvent {
            id: required_id(raw.id, "event")?,
            job_id: raw.job_id.and_then(Scalar::into_text),
            device: text(raw.device),
            location: text(raw.location),
            action: text(raw.action),
            occurred_at: text(raw.occurred_at),
        })
    }
}

// =============================================================================
// File parsing
// =============================================================================

/// Read a JSON array file into raw shapes.
fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = path.display().to_string();
    if !path.exists() {
        return Err(RecordLoadError::FileNotFound { path: file });
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| RecordLoadError::Json { file, source })
}

/// Parse a file of raw shapes and normalise them in parallel.
///
/// `into_par_iter().collect()` on a Vec keeps source order.
fn parse_normalized<Raw, T>(path: &Path) -> Result<Vec<T>>
where
    Raw: DeserializeOwned + Send,
    T: TryFrom<Raw, Error = RecordLoadError> + Send,
{
    let raw: Vec<Raw> = read_json_array(path)?;
    raw.into_par_iter().map(T::try_from).collect()
}

/// Like `parse_normalized`, but a missing file is an empty collection.
fn parse_optional<Raw, T>(path: &Path) -> Result<Vec<T>>
where
    Raw: DeserializeOwned + Send,
    T: TryFrom<Raw, Error = RecordLoadError> + Send,
{
    if !path.exists() {
        tracing::debug!("{} not present, treating as empty", path.display());
        return Ok(Vec::new());
    }
    parse_normalized::<Raw, T>(path)
}

pub fn parse_users(path: &Path) -> Result<Vec<User>> {
    parse_normalized::<RawUser, User>(path)
}

pub fn parse_teams(path: &Path) -> Result<Vec<Team>> {
    parse_optional::<RawTeam, Team>(path)
}

pub fn parse_candidates(path: &Path) -> Result<Vec<Candidate>> {
    parse_normalized::<RawCandidate, Candidate>(path)
}

pub fn parse_jobs(path: &Path) -> Result<Vec<JobPosting>> {
    parse_normalized::<RawJobPosting, JobPosting>(path)
}

pub fn parse_events(path: &Path) -> Result<Vec<ActivityEvent>> {
    parse_optional::<RawActivityEvent, ActivityEvent>(path)
}
