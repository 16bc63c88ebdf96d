//! Filter on the linked job title (pre-populated from a `jobTitle` URL parameter).

use crate::traits::Filter;
use ats_records::Record;

/// Case-insensitive substring match against the record's job title.
///
/// For candidates that is the title of the job they applied to; for job
/// postings it is their own title.
pub struct JobTitleFilter {
    needle: String,
}

impl JobTitleFilter {
    pub fn new(title: &str) -> Self {
        Self {
            needle: title.trim().to_lowercase(),
        }
    }
}

impl<R: Record> Filter<R> for JobTitleFilter {
    fn name(&self) -> &str {
        "JobTitleFilter"
    }

    fn matches(&self, record: &R) -> bool {
        record
            .job_title()
            .is_some_and(|title| title.to_lowercase().contains(&self.needle))
    }
}
