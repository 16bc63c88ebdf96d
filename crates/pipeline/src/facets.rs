//! Grouping filtered records by a facet for alternate views.
//!
//! Groups come back in first-seen order, and each group keeps the relative
//! order of the input. Both matter: views render the groups as-is.

use ats_records::Record;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use std::str::FromStr;

use crate::error::ParseError;

/// Group key for records that have no value for the requested facet.
pub const UNASSIGNED_GROUP: &str = "unassigned";

/// Dimensions records can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Facet {
    /// Applied date (candidates) or posted date (jobs), exact string
    Date,
    /// Client id, falling back to the organization name
    Client,
    Job,
    Recruiter,
    JobType,
}

impl Facet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Date => "date",
            Facet::Client => "client",
            Facet::Job => "job",
            Facet::Recruiter => "recruiter",
            Facet::JobType => "job-type",
        }
    }

    /// The record's key for this facet, if it has one.
    pub fn key_of<'r, R: Record>(&self, record: &'r R) -> Option<&'r str> {
        let key = match self {
            Facet::Date => Some(record.record_date()),
            Facet::Client => record
                .client_id()
                .filter(|id| !id.trim().is_empty())
                .or(Some(record.organization())),
            Facet::Job => record.job_id(),
            Facet::Recruiter => Some(record.owner_id()),
            Facet::JobType => Some(record.job_type()),
        };
        key.filter(|k| !k.trim().is_empty())
    }
}

impl FromStr for Facet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" | "applied-date" | "posted-date" => Ok(Facet::Date),
            "client" | "organization" => Ok(Facet::Client),
            "job" => Ok(Facet::Job),
            "recruiter" | "owner" => Ok(Facet::Recruiter),
            "job-type" | "jobtype" | "type" => Ok(Facet::JobType),
            other => Err(ParseError::UnknownFacet(other.to_string())),
        }
    }
}

/// Ordered mapping from group key to the records in that group.
pub type FacetGroups<'a, R> = IndexMap<String, Vec<&'a R>>;

/// Group records by an arbitrary key, preserving first-seen key order and
/// input order within each group.
pub fn group_by_key<'a, T, K, F>(items: impl IntoIterator<Item = &'a T>, key_fn: F) -> IndexMap<K, Vec<&'a T>>
where
    T: 'a,
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<&'a T>> = IndexMap::new();
    for item in items {
        groups.entry(key_fn(item)).or_default().push(item);
    }
    groups
}

/// Group records by a facet. Records without a key land in `UNASSIGNED_GROUP`.
pub fn group_by<'a, R: Record + 'a>(records: impl IntoIterator<Item = &'a R>, facet: Facet) -> FacetGroups<'a, R> {
    group_by_key(records, |record| {
        facet
            .key_of(record)
            .unwrap_or(UNASSIGNED_GROUP)
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{candidate, job};
    use ats_records::Candidate;

    fn dated(id: &str, date: &str) -> Candidate {
        let mut c = candidate(id, "r1");
        c.applied_date = date.to_string();
        c
    }

    #[test]
    fn test_group_by_date_preserves_order() {
        let candidates = vec![
            dated("a", "2024-01-01"),
            dated("b", "2024-01-02"),
            dated("c", "2024-01-01"),
        ];

        let groups = group_by(&candidates, Facet::Date);
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["2024-01-01", "2024-01-02"]);

        let first: Vec<&str> = groups["2024-01-01"].iter().map(|c| c.id.as_str()).collect();
        assert_eq!(first, vec!["a", "c"]);
        let second: Vec<&str> = groups["2024-01-02"].iter().map(|c| c.id.as_str()).collect();
        assert_eq!(second, vec!["b"]);
    }

    #[test]
    fn test_missing_keys_are_unassigned() {
        let mut linked = candidate("c1", "r1");
        linked.job_id = Some("j1".to_string());
        let unlinked = candidate("c2", "r1");
        let candidates = vec![unlinked, linked];

        let groups = group_by(&candidates, Facet::Job);
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec![UNASSIGNED_GROUP, "j1"]);
    }

    #[test]
    fn test_client_falls_back_to_organization() {
        let mut with_client = job("j1", "r1");
        with_client.client_id = Some("cl-9".to_string());
        with_client.organization = "Acme".to_string();
        let mut without_client = job("j2", "r1");
        without_client.organization = "Globex".to_string();
        let nothing = job("j3", "r1");

        assert_eq!(Facet::Client.key_of(&with_client), Some("cl-9"));
        assert_eq!(Facet::Client.key_of(&without_client), Some("Globex"));
        assert_eq!(Facet::Client.key_of(&nothing), None);
    }

    #[test]
    fn test_group_sizes_sum_to_input() {
        let mut candidates = Vec::new();
        for (i, owner) in ["r1", "r2", "r1", "r3", "r2"].iter().enumerate() {
            candidates.push(candidate(&format!("c{i}"), owner));
        }
        let groups = group_by(&candidates, Facet::Recruiter);
        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, candidates.len());
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_parse_facet() {
        assert_eq!("date".parse::<Facet>().unwrap(), Facet::Date);
        assert_eq!("Job-Type".parse::<Facet>().unwrap(), Facet::JobType);
        assert_eq!("owner".parse::<Facet>().unwrap(), Facet::Recruiter);
        assert_eq!(
            "salary".parse::<Facet>(),
            Err(ParseError::UnknownFacet("salary".to_string()))
        );
    }
}
