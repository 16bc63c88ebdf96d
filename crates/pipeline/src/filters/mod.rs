//! Filter implementations for the predicate pipeline.
//!
//! Each filter checks one criterion. `compile_predicate` decides which of
//! them a given `FilterCriteria` activates and in what order.

pub mod categorical;
pub mod date_range;
pub mod experience;
pub mod job_title;
pub mod ownership;
pub mod salary;
pub mod skills;
pub mod text_search;

// Re-export for convenience
pub use categorical::CategoricalFilter;
pub use date_range::DateRangeFilter;
pub use experience::ExperienceFilter;
pub use job_title::JobTitleFilter;
pub use ownership::OwnershipFilter;
pub use salary::SalaryFilter;
pub use skills::SkillsFilter;
pub use text_search::TextSearchFilter;
