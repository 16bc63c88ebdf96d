//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that lets each criterion be
//! compiled into an independent, composable check.

use ats_records::Record;

/// One criterion's check over a record.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows a compiled pipeline to be shared across threads
/// - `matches` borrows the record and must not depend on anything but the
///   record and the filter's own configuration, so a pipeline can be run on
///   every keystroke and always give the same answer
pub trait Filter<R: Record>: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `record` passes this criterion.
    fn matches(&self, record: &R) -> bool;
}
