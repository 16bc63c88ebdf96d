//! Exact-match filter for categorical fields (country, status, ...).

use crate::criteria::Field;
use crate::traits::Filter;
use ats_records::Record;

/// Keeps records whose `field` equals `expected` exactly.
///
/// A record with no value for the field (e.g. a candidate not linked to a
/// job, for `Field::JobId`) never matches.
pub struct CategoricalFilter {
    field: Field,
    expected: String,
    name: String,
}

impl CategoricalFilter {
    pub fn new(field: Field, expected: impl Into<String>) -> Self {
        Self {
            field,
            expected: expected.into(),
            name: format!("CategoricalFilter({})", field.as_str()),
        }
    }
}

impl<R: Record> Filter<R> for CategoricalFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, record: &R) -> bool {
        self.field.value_of(record) == Some(self.expected.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{candidate, job};

    #[test]
    fn test_exact_match() {
        let mut c = candidate("c1", "r1");
        c.country = "USA".to_string();
        c.status = "interview".to_string();

        assert!(CategoricalFilter::new(Field::Country, "USA").matches(&c));
        assert!(!CategoricalFilter::new(Field::Country, "US").matches(&c));
        assert!(!CategoricalFilter::new(Field::Status, "Interview").matches(&c));
    }

    #[test]
    fn test_job_id_field() {
        let mut c = candidate("c1", "r1");
        let filter = CategoricalFilter::new(Field::JobId, "j1");
        assert!(!filter.matches(&c));

        c.job_id = Some("j1".to_string());
        assert!(filter.matches(&c));

        // a job posting's job id is its own id
        assert!(filter.matches(&job("j1", "r1")));
    }
}
