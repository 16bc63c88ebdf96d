//! Errors for parsing engine vocabulary (facets, date buckets, dimensions)
//! from user-supplied strings.
//!
//! The engine itself never fails; these only surface at the edges where a
//! caller turns text into a typed option.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown facet: {0}")]
    UnknownFacet(String),

    #[error("Unknown date range: {0}")]
    UnknownDateBucket(String),

    #[error("Unknown analytics dimension: {0}")]
    UnknownDimension(String),
}
