//! Filter on required skills.

use crate::traits::Filter;
use ats_records::Record;

/// Keeps records that have at least one of the requested skills.
///
/// ## Algorithm
/// A requested skill matches a record skill when it is a case-insensitive
/// substring of it (`"react"` matches `"React Native"`). One match anywhere
/// is enough: this is OR across requested skills, not AND.
pub struct SkillsFilter {
    requested: Vec<String>,
}

impl SkillsFilter {
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested = skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { requested }
    }
}

impl<R: Record> Filter<R> for SkillsFilter {
    fn name(&self) -> &str {
        "SkillsFilter"
    }

    fn matches(&self, record: &R) -> bool {
        if self.requested.is_empty() {
            return true;
        }
        let skills: Vec<String> = record.skills().iter().map(|s| s.to_lowercase()).collect();
        self.requested
            .iter()
            .any(|wanted| skills.iter().any(|skill| skill.contains(wanted)))
    }
}
