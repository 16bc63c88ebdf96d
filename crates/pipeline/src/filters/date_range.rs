//! Filter on the record's applied/posted date.

use crate::date_range::{DateBucket, DateRangeClassifier};
use crate::traits::Filter;
use ats_records::Record;
use std::sync::Arc;

/// Keeps records whose date falls into `bucket`, as decided by the classifier.
pub struct DateRangeFilter {
    bucket: DateBucket,
    classifier: Arc<dyn DateRangeClassifier>,
}

impl DateRangeFilter {
    pub fn new(bucket: DateBucket, classifier: Arc<dyn DateRangeClassifier>) -> Self {
        Self { bucket, classifier }
    }
}

impl<R: Record> Filter<R> for DateRangeFilter {
    fn name(&self) -> &str {
        "DateRangeFilter"
    }

    fn matches(&self, record: &R) -> bool {
        self.classifier.classify(record.record_date(), self.bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_range::CalendarClassifier;
    use crate::filters::test_support::candidate;
    use chrono::NaiveDate;

    #[test]
    fn test_date_range_filter() {
        let classifier = Arc::new(CalendarClassifier::new(
            NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
        ));
        let filter = DateRangeFilter::new(DateBucket::ThisMonth, classifier);

        let mut recent = candidate("c1", "r1");
        recent.applied_date = "2024-05-02".to_string();
        let mut old = candidate("c2", "r1");
        old.applied_date = "2024-02-02".to_string();
        let mut garbled = candidate("c3", "r1");
        garbled.applied_date = "last tuesday".to_string();

        assert!(filter.matches(&recent));
        assert!(!filter.matches(&old));
        assert!(!filter.matches(&garbled));
    }
}
