//! Salary filter.
//!
//! Candidates and job postings are matched differently:
//! - a candidate's expected salary must lie inside `[min, max]`
//! - a job's advertised band must overlap `[min, max]`
//!
//! Both bounds are inclusive.

use crate::traits::Filter;
use ats_records::{Record, SalaryBand};

pub struct SalaryFilter {
    min: f64,
    max: f64,
}

impl SalaryFilter {
    /// Bounds as produced by `FilterCriteria::salary_bounds`.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl<R: Record> Filter<R> for SalaryFilter {
    fn name(&self) -> &str {
        "SalaryFilter"
    }

    fn matches(&self, record: &R) -> bool {
        match record.salary() {
            SalaryBand::Point(value) => value >= self.min && value <= self.max,
            SalaryBand::Range { min, max } => max >= self.min && min <= self.max,
            // nothing to compare against an active bound
            SalaryBand::Unknown => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{candidate, job};

    #[test]
    fn test_candidate_containment() {
        let mut c = candidate("c1", "r1");
        c.expected_salary = Some(90000.0);

        assert!(SalaryFilter::new(80000.0, 90000.0).matches(&c));
        assert!(SalaryFilter::new(90000.0, f64::INFINITY).matches(&c));
        assert!(!SalaryFilter::new(95000.0, f64::INFINITY).matches(&c));
        assert!(!SalaryFilter::new(0.0, 85000.0).matches(&c));
    }

    #[test]
    fn test_job_overlap() {
        let mut j = job("j1", "r1");
        j.salary_min = Some(50000.0);
        j.salary_max = Some(120000.0);

        assert!(SalaryFilter::new(80000.0, 200000.0).matches(&j));
        assert!(SalaryFilter::new(120000.0, 200000.0).matches(&j));
        assert!(!SalaryFilter::new(150000.0, 200000.0).matches(&j));
        assert!(!SalaryFilter::new(0.0, 40000.0).matches(&j));
    }

    #[test]
    fn test_unknown_salary_is_excluded() {
        let c = candidate("c1", "r1");
        assert!(!SalaryFilter::new(1.0, f64::INFINITY).matches(&c));
    }
}
