//! Filter to keep only records the current user may see.
//!
//! Always the first filter in a compiled pipeline.

use crate::traits::Filter;
use access_scope::AccessScope;
use ats_records::Record;

/// Keeps records whose owner is inside the access scope.
///
/// An unrestricted scope keeps everything, but the compiler does not add
/// this filter at all in that case.
pub struct OwnershipFilter {
    scope: AccessScope,
}

impl OwnershipFilter {
    pub fn new(scope: AccessScope) -> Self {
        Self { scope }
    }
}

impl<R: Record> Filter<R> for OwnershipFilter {
    fn name(&self) -> &str {
        "OwnershipFilter"
    }

    fn matches(&self, record: &R) -> bool {
        self.scope.permits(record.owner_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::candidate;

    #[test]
    fn test_ownership_filter() {
        let filter = OwnershipFilter::new(AccessScope::owners(["r1"]));

        assert!(filter.matches(&candidate("c1", "r1")));
        assert!(!filter.matches(&candidate("c2", "r2")));
        assert!(!filter.matches(&candidate("c3", "")));
    }

    #[test]
    fn test_unrestricted_scope() {
        let filter = OwnershipFilter::new(AccessScope::Unrestricted);
        assert!(filter.matches(&candidate("c1", "anyone")));
    }
}
