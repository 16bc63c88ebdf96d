//! Predicate compilation and aggregation over ATS records.
//!
//! This crate provides:
//! - `FilterCriteria` and the URL query pre-population
//! - Filter trait and one implementation per criterion
//! - FilterPipeline for composing filters into a single predicate
//! - `compile_predicate`, which turns criteria and an access scope into a pipeline
//! - Facet grouping, category counts, the status table and pagination
//!
//! ## Architecture
//! A view processes records in stages:
//! 1. The access scope and criteria are compiled into a `FilterPipeline`
//! 2. The pipeline keeps the matching records, in input order
//! 3. Survivors are grouped by a facet, counted, or paginated for display
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{compile_predicate, group_by, Facet, FilterCriteria};
//!
//! let criteria = FilterCriteria::from_query("skills=React,Node.js")
//!     .with_field(Field::Status, "new");
//! let pipeline = compile_predicate(&criteria, &scope);
//!
//! let visible = pipeline.apply(index.candidates());
//! let by_job = group_by(visible.iter().copied(), Facet::Job);
//! ```

pub mod compiler;
pub mod counts;
pub mod criteria;
pub mod date_range;
pub mod error;
pub mod facets;
pub mod filter_pipeline;
pub mod filters;
pub mod pagination;
pub mod status;
pub mod traits;

// Re-export main types
pub use compiler::{compile_predicate, compile_predicate_with};
pub use counts::{
    CategoryCount, CountBreakdown, EventDimension, breakdown_by_action, breakdown_by_device,
    breakdown_by_location, breakdown_events, compute_counts, compute_counts_seeded,
};
pub use criteria::{Field, FilterCriteria, is_unconstrained};
pub use date_range::{CalendarClassifier, DateBucket, DateRangeClassifier};
pub use error::ParseError;
pub use facets::{Facet, FacetGroups, UNASSIGNED_GROUP, group_by, group_by_key};
pub use filter_pipeline::FilterPipeline;
pub use pagination::{Page, paginate};
pub use status::{JobStatusSummary, StatusInfo, StatusTone, status_info, status_info_or_default};
pub use traits::Filter;
