//! Compile a `FilterCriteria` and an `AccessScope` into one predicate.
//!
//! This is the single place that decides which criteria are active. Views
//! hand over their criteria and the resolved scope, and get back a
//! `FilterPipeline` they can run over any `Record` collection.

use crate::criteria::{Field, FilterCriteria};
use crate::date_range::{CalendarClassifier, DateRangeClassifier};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::*;
use access_scope::AccessScope;
use ats_records::Record;
use std::sync::Arc;

/// Compile criteria using a calendar classifier anchored on today.
pub fn compile_predicate<R: Record>(criteria: &FilterCriteria, scope: &AccessScope) -> FilterPipeline<R> {
    compile_predicate_with(criteria, scope, Arc::new(CalendarClassifier::today()))
}

/// Compile criteria with an explicit date-range classifier.
///
/// ## Filter order
/// 1. Ownership (skipped when the scope is unrestricted)
/// 2. Free-text search
/// 3. Categorical fields: country, city, job type, status, priority, source, job id
/// 4. Experience
/// 5. Skills
/// 6. Salary
/// 7. Date range
/// 8. Job title
///
/// Criteria that are unset or hold a sentinel add no filter, so an empty
/// `FilterCriteria` with an unrestricted scope compiles to an empty
/// pipeline that keeps every record.
pub fn compile_predicate_with<R: Record>(
    criteria: &FilterCriteria,
    scope: &AccessScope,
    classifier: Arc<dyn DateRangeClassifier>,
) -> FilterPipeline<R> {
    let mut pipeline = FilterPipeline::new();

    if !scope.is_unrestricted() {
        pipeline = pipeline.add_filter(OwnershipFilter::new(scope.clone()));
    }

    if let Some(term) = criteria.active_search_term() {
        pipeline = pipeline.add_filter(TextSearchFilter::new(term));
    }

    for field in Field::ALL {
        if let Some(expected) = criteria.active_field(field) {
            pipeline = pipeline.add_filter(CategoricalFilter::new(field, expected));
        }
    }

    if let Some(experience) = criteria.active_experience() {
        pipeline = pipeline.add_filter(ExperienceFilter::new(experience));
    }

    let skills = criteria.active_skills();
    if !skills.is_empty() {
        pipeline = pipeline.add_filter(SkillsFilter::new(skills));
    }

    if let Some((min, max)) = criteria.salary_bounds() {
        pipeline = pipeline.add_filter(SalaryFilter::new(min, max));
    }

    if let Some(bucket) = criteria.active_date_bucket() {
        pipeline = pipeline.add_filter(DateRangeFilter::new(bucket, classifier));
    }

    if let Some(title) = criteria.active_job_title() {
        pipeline = pipeline.add_filter(JobTitleFilter::new(title));
    }

    tracing::debug!(
        "Compiled predicate with {} filters: {:?}",
        pipeline.len(),
        pipeline.filter_names()
    );
    pipeline
}
