//! Experience filter over free-text experience strings.

use crate::traits::Filter;
use ats_records::Record;

/// Keeps records whose experience text contains the requested value,
/// ignoring case. `"5"` matches `"5+ years"`.
pub struct ExperienceFilter {
    needle: String,
}

impl ExperienceFilter {
    pub fn new(experience: &str) -> Self {
        Self {
            needle: experience.trim().to_lowercase(),
        }
    }
}

impl<R: Record> Filter<R> for ExperienceFilter {
    fn name(&self) -> &str {
        "ExperienceFilter"
    }

    fn matches(&self, record: &R) -> bool {
        record.experience().to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::candidate;

    #[test]
    fn test_substring_containment() {
        let mut c = candidate("c1", "r1");
        c.experience = "5+ years".to_string();

        assert!(ExperienceFilter::new("5").matches(&c));
        assert!(ExperienceFilter::new("YEARS").matches(&c));
        assert!(!ExperienceFilter::new("10").matches(&c));
    }
}
