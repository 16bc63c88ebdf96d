//! Free-text search across a record's identifying fields and skills.

use crate::traits::Filter;
use ats_records::Record;

/// Case-insensitive substring search.
///
/// A record matches when any one of its search fields or skills contains
/// the term; the term does not have to appear in the name.
pub struct TextSearchFilter {
    term: String,
}

impl TextSearchFilter {
    /// `term` is trimmed and lowercased once here, not per record.
    pub fn new(term: &str) -> Self {
        Self {
            term: term.trim().to_lowercase(),
        }
    }
}

impl<R: Record> Filter<R> for TextSearchFilter {
    fn name(&self) -> &str {
        "TextSearchFilter"
    }

    fn matches(&self, record: &R) -> bool {
        if self.term.is_empty() {
            return true;
        }
        record
            .search_fields()
            .into_iter()
            .chain(record.skills().iter().map(String::as_str))
            .any(|field| field.to_lowercase().contains(&self.term))
    }
}
