//! User-chosen filter criteria.
//!
//! Every field is independently optional. A field that is absent, blank,
//! or one of the sentinels `"all"` / `"any"` places no constraint.

use ats_records::Record;
use serde::{Deserialize, Serialize};

use crate::date_range::DateBucket;

/// Values that mean "no constraint" for a text field.
const UNCONSTRAINED: [&str; 3] = ["", "all", "any"];

/// Whether a criteria value places no constraint.
pub fn is_unconstrained(value: &str) -> bool {
    let value = value.trim();
    UNCONSTRAINED
        .iter()
        .any(|sentinel| value.eq_ignore_ascii_case(sentinel))
}

/// The active (trimmed) value of an optional criteria field.
fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !is_unconstrained(v))
        .map(str::trim)
}

/// Structured filter state owned by a view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub search_term: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub experience: Option<String>,
    pub skills: Vec<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub source: Option<String>,
    pub job_type: Option<String>,
    pub date_range: Option<String>,
    pub job_id: Option<String>,
    pub job_title: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate criteria from a URL query string.
    ///
    /// Recognised keys: `jobId`, `jobTitle`, `skills` (comma list) and
    /// `searchTerm`. Anything else is ignored. A leading `?` is allowed.
    pub fn from_query(query: &str) -> Self {
        let mut criteria = Self::new();
        criteria.apply_query(query);
        criteria
    }

    /// Overlay the recognised keys of a URL query string onto `self`.
    pub fn apply_query(&mut self, query: &str) {
        let query = query.trim().trim_start_matches('?');
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "jobId" => self.job_id = Some(value.into_owned()),
                "jobTitle" => self.job_title = Some(value.into_owned()),
                "searchTerm" => self.search_term = Some(value.into_owned()),
                "skills" => {
                    self.skills = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                _ => {}
            }
        }
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_salary_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.salary_min = min;
        self.salary_max = max;
        self
    }

    pub fn with_field(mut self, field: Field, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            Field::Country => self.country = value,
            Field::City => self.city = value,
            Field::JobType => self.job_type = value,
            Field::Status => self.status = value,
            Field::Priority => self.priority = value,
            Field::Source => self.source = value,
            Field::JobId => self.job_id = value,
        }
        self
    }

    pub fn with_experience(mut self, experience: impl Into<String>) -> Self {
        self.experience = Some(experience.into());
        self
    }

    pub fn with_date_range(mut self, bucket: impl Into<String>) -> Self {
        self.date_range = Some(bucket.into());
        self
    }

    pub fn with_job_title(mut self, title: impl Into<String>) -> Self {
        self.job_title = Some(title.into());
        self
    }

    /// Active search term; whitespace-only terms are inactive.
    pub fn active_search_term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Active exact-match value for a categorical field.
    pub fn active_field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Country => active(&self.country),
            Field::City => active(&self.city),
            Field::JobType => active(&self.job_type),
            Field::Status => active(&self.status),
            Field::Priority => active(&self.priority),
            Field::Source => active(&self.source),
            Field::JobId => active(&self.job_id),
        }
    }

    pub fn active_experience(&self) -> Option<&str> {
        active(&self.experience)
    }

    pub fn active_job_title(&self) -> Option<&str> {
        active(&self.job_title)
    }

    /// Requested skills with blanks and sentinels removed.
    pub fn active_skills(&self) -> Vec<&str> {
        self.skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !is_unconstrained(s))
            .collect()
    }

    /// Inclusive salary bounds, or `None` when neither bound constrains.
    ///
    /// Unset (or non-finite) bounds default to 0 and +inf.
    pub fn salary_bounds(&self) -> Option<(f64, f64)> {
        let min = self.salary_min.filter(|v| v.is_finite()).unwrap_or(0.0);
        let max = self.salary_max.filter(|v| v.is_finite()).unwrap_or(f64::INFINITY);
        if min <= 0.0 && max == f64::INFINITY {
            None
        } else {
            Some((min, max))
        }
    }

    /// Requested date bucket. Unparsable names and `all` are inactive.
    pub fn active_date_bucket(&self) -> Option<DateBucket> {
        self.date_range
            .as_deref()
            .and_then(|name| name.parse::<DateBucket>().ok())
            .filter(|bucket| *bucket != DateBucket::All)
    }

    /// True when no field constrains anything.
    pub fn is_empty(&self) -> bool {
        self.active_search_term().is_none()
            && Field::ALL.iter().all(|f| self.active_field(*f).is_none())
            && self.active_experience().is_none()
            && self.active_job_title().is_none()
            && self.active_skills().is_empty()
            && self.salary_bounds().is_none()
            && self.active_date_bucket().is_none()
    }
}

/// Categorical record fields matched by exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Country,
    City,
    JobType,
    Status,
    Priority,
    Source,
    JobId,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Country,
        Field::City,
        Field::JobType,
        Field::Status,
        Field::Priority,
        Field::Source,
        Field::JobId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Country => "country",
            Field::City => "city",
            Field::JobType => "job_type",
            Field::Status => "status",
            Field::Priority => "priority",
            Field::Source => "source",
            Field::JobId => "job_id",
        }
    }

    /// The record's value for this field, if it has one.
    pub fn value_of<'r, R: Record>(&self, record: &'r R) -> Option<&'r str> {
        match self {
            Field::Country => Some(record.country()),
            Field::City => Some(record.city()),
            Field::JobType => Some(record.job_type()),
            Field::Status => Some(record.status()),
            Field::Priority => Some(record.priority()),
            Field::Source => Some(record.source()),
            Field::JobId => record.job_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_unconstrained() {
        assert!(is_unconstrained(""));
        assert!(is_unconstrained("  "));
        assert!(is_unconstrained("all"));
        assert!(is_unconstrained("ALL"));
        assert!(is_unconstrained("any"));
        assert!(!is_unconstrained("USA"));
    }

    #[test]
    fn test_default_criteria_is_empty() {
        let criteria = FilterCriteria::new();
        assert!(criteria.is_empty());

        let sentinels = FilterCriteria::new()
            .with_field(Field::Status, "all")
            .with_field(Field::Country, "any")
            .with_search_term("   ")
            .with_date_range("all")
            .with_skills(["", " "]);
        assert!(sentinels.is_empty());
    }

    #[test]
    fn test_salary_bounds_defaults() {
        let criteria = FilterCriteria::new();
        assert_eq!(criteria.salary_bounds(), None);

        let min_only = FilterCriteria::new().with_salary_range(Some(80000.0), None);
        assert_eq!(min_only.salary_bounds(), Some((80000.0, f64::INFINITY)));

        let max_only = FilterCriteria::new().with_salary_range(None, Some(90000.0));
        assert_eq!(max_only.salary_bounds(), Some((0.0, 90000.0)));

        let zero_min = FilterCriteria::new().with_salary_range(Some(0.0), None);
        assert_eq!(zero_min.salary_bounds(), None);
    }

    #[test]
    fn test_from_query() {
        let criteria =
            FilterCriteria::from_query("?jobId=j42&jobTitle=Senior%20Engineer&skills=React,+Node.js,&searchTerm=john&page=3");

        assert_eq!(criteria.job_id.as_deref(), Some("j42"));
        assert_eq!(criteria.job_title.as_deref(), Some("Senior Engineer"));
        assert_eq!(criteria.skills, vec!["React", "Node.js"]);
        assert_eq!(criteria.search_term.as_deref(), Some("john"));
        assert_eq!(criteria.country, None);
    }

    #[test]
    fn test_unknown_date_range_is_inactive() {
        let criteria = FilterCriteria::new().with_date_range("last-decade");
        assert_eq!(criteria.active_date_bucket(), None);

        let criteria = FilterCriteria::new().with_date_range("this-month");
        assert_eq!(criteria.active_date_bucket(), Some(DateBucket::ThisMonth));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let criteria: FilterCriteria = serde_json::from_str(
            r#"{"searchTerm": "react", "salaryMin": 50000, "jobType": "contract"}"#,
        )
        .unwrap();
        assert_eq!(criteria.active_search_term(), Some("react"));
        assert_eq!(criteria.active_field(Field::JobType), Some("contract"));
        assert_eq!(criteria.salary_bounds(), Some((50000.0, f64::INFINITY)));
    }
}
