//! The FilterPipeline ANDs multiple filters together.
//!
//! A pipeline is the compiled form of a `FilterCriteria`: one filter per
//! active criterion, evaluated in the order they were added.

use crate::traits::Filter;
use ats_records::Record;
use tracing;

/// Chains filters into a single predicate.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(OwnershipFilter::new(scope))
///     .add_filter(SkillsFilter::new(["react"]))
///     .add_filter(SalaryFilter::new(80000.0, f64::INFINITY));
///
/// let visible = pipeline.apply(&candidates);
/// ```
pub struct FilterPipeline<R: Record> {
    filters: Vec<Box<dyn Filter<R>>>,
}

impl<R: Record> FilterPipeline<R> {
    /// Create a new empty FilterPipeline. It matches every record.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter<R> + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters, in evaluation order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Whether `record` passes every filter. Stops at the first failure.
    pub fn matches(&self, record: &R) -> bool {
        self.filters.iter().all(|filter| filter.matches(record))
    }

    /// The pipeline as a plain predicate closure.
    pub fn predicate(&self) -> impl Fn(&R) -> bool + '_ {
        move |record: &R| self.matches(record)
    }

    /// Apply all filters in sequence to a collection.
    ///
    /// ## Algorithm
    /// 1. Start with every record, in input order
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Keep records that pass
    ///    c. Log output count
    /// 3. Return the survivors, still in input order
    ///
    /// The input is only borrowed; the result refers into it.
    pub fn apply<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        let mut current: Vec<&'a R> = records.iter().collect();
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current.retain(|record| filter.matches(record));
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl<R: Record> Default for FilterPipeline<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::candidate;
    use crate::filters::{OwnershipFilter, SkillsFilter};
    use access_scope::AccessScope;
    use ats_records::Candidate;

    fn create_test_candidates() -> Vec<Candidate> {
        let mut c1 = candidate("c1", "r1");
        c1.skills = vec!["React".to_string()];
        let mut c2 = candidate("c2", "r2");
        c2.skills = vec!["React".to_string()];
        let mut c3 = candidate("c3", "r1");
        c3.skills = vec!["Go".to_string()];
        vec![c1, c2, c3]
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline: FilterPipeline<Candidate> = FilterPipeline::new();
        let candidates = create_test_candidates();

        let filtered = pipeline.apply(&candidates);
        assert_eq!(filtered.len(), 3);
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_single_filter() {
        let pipeline: FilterPipeline<Candidate> =
            FilterPipeline::new().add_filter(OwnershipFilter::new(AccessScope::owners(["r1"])));
        let candidates = create_test_candidates();

        let filtered = pipeline.apply(&candidates);
        let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);
    }

    #[test]
    fn test_filters_are_anded() {
        let pipeline: FilterPipeline<Candidate> = FilterPipeline::new()
            .add_filter(OwnershipFilter::new(AccessScope::owners(["r1"])))
            .add_filter(SkillsFilter::new(["react"]));
        let candidates = create_test_candidates();

        let filtered = pipeline.apply(&candidates);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "c1");

        let predicate = pipeline.predicate();
        let by_predicate: Vec<&Candidate> = candidates.iter().filter(|c| predicate(*c)).collect();
        assert_eq!(by_predicate, filtered);
        assert_eq!(pipeline.filter_names(), vec!["OwnershipFilter", "SkillsFilter"]);
    }
}
