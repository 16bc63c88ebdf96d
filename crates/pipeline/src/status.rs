//! Status display table and job status summary.
//!
//! Status keys map to a label and a tone through one explicit table, so
//! every caller renders the same status the same way. Unknown keys are not
//! an error: they render as the raw key with a neutral tone.

use ats_records::JobPosting;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Success,
    Info,
    Warning,
    Danger,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusInfo {
    pub label: &'static str,
    pub tone: StatusTone,
}

const fn info(label: &'static str, tone: StatusTone) -> StatusInfo {
    StatusInfo { label, tone }
}

/// Candidate pipeline, job posting and interview statuses.
pub const STATUS_TABLE: &[(&str, StatusInfo)] = &[
    // candidates
    ("new", info("New", StatusTone::Info)),
    ("screening", info("Screening", StatusTone::Info)),
    ("interview", info("Interview", StatusTone::Warning)),
    ("offer", info("Offer", StatusTone::Success)),
    ("hired", info("Hired", StatusTone::Success)),
    ("rejected", info("Rejected", StatusTone::Danger)),
    ("withdrawn", info("Withdrawn", StatusTone::Neutral)),
    ("on-hold", info("On Hold", StatusTone::Warning)),
    // jobs
    ("active", info("Active", StatusTone::Success)),
    ("draft", info("Draft", StatusTone::Neutral)),
    ("paused", info("Paused", StatusTone::Warning)),
    ("filled", info("Filled", StatusTone::Info)),
    ("closed", info("Closed", StatusTone::Danger)),
    // interviews
    ("scheduled", info("Scheduled", StatusTone::Info)),
    ("completed", info("Completed", StatusTone::Success)),
    ("cancelled", info("Cancelled", StatusTone::Danger)),
];

/// Look up a status key. Matching ignores case and treats `_` and spaces
/// as `-`.
pub fn status_info(key: &str) -> Option<StatusInfo> {
    let key = normalize_key(key);
    STATUS_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, info)| *info)
}

/// Label and tone for any status key; unknown keys render as themselves.
pub fn status_info_or_default(key: &str) -> (String, StatusTone) {
    match status_info(key) {
        Some(info) => (info.label.to_string(), info.tone),
        None => (key.to_string(), StatusTone::Neutral),
    }
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .to_ascii_lowercase()
        .replace(['_', ' '], "-")
}

/// Active vs filled job counts for dashboards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatusSummary {
    pub active: usize,
    pub filled: usize,
    pub other: usize,
    pub total: usize,
}

impl JobStatusSummary {
    pub fn from_jobs<'a>(jobs: impl IntoIterator<Item = &'a JobPosting>) -> Self {
        let mut summary = Self::default();
        for job in jobs {
            match normalize_key(&job.status).as_str() {
                "active" => summary.active += 1,
                "filled" => summary.filled += 1,
                _ => summary.other += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::job;

    #[test]
    fn test_known_statuses() {
        let hired = status_info("hired").unwrap();
        assert_eq!(hired.label, "Hired");
        assert_eq!(hired.tone, StatusTone::Success);

        assert_eq!(status_info("On_Hold").unwrap().label, "On Hold");
        assert_eq!(status_info("CANCELLED").unwrap().tone, StatusTone::Danger);
    }

    #[test]
    fn test_unknown_status_renders_raw() {
        assert_eq!(status_info("archived"), None);
        assert_eq!(
            status_info_or_default("archived"),
            ("archived".to_string(), StatusTone::Neutral)
        );
    }

    #[test]
    fn test_table_keys_are_unique() {
        for (i, (key, _)) in STATUS_TABLE.iter().enumerate() {
            assert!(STATUS_TABLE[i + 1..].iter().all(|(other, _)| other != key));
        }
    }

    #[test]
    fn test_job_status_summary() {
        let statuses = ["active", "Active", "filled", "draft"];
        let jobs: Vec<JobPosting> = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                let mut j = job(&format!("j{i}"), "r1");
                j.status = status.to_string();
                j
            })
            .collect();

        let summary = JobStatusSummary::from_jobs(&jobs);
        assert_eq!(
            summary,
            JobStatusSummary {
                active: 2,
                filled: 1,
                other: 1,
                total: 4
            }
        );
        assert_eq!(JobStatusSummary::from_jobs(&Vec::<JobPosting>::new()), JobStatusSummary::default());
    }
}
