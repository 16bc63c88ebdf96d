//! Category counts and percentages for dashboard and analytics breakdowns.

use ats_records::ActivityEvent;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParseError;

/// Category used for events with a blank dimension value.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// One row of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
    /// count / total * 100, or 0 when the total is 0
    pub percentage: f64,
}

/// Ordered category counts with a running total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountBreakdown {
    counts: IndexMap<String, usize>,
    total: usize,
}

impl CountBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed categories so they appear (with count 0) even when no item
    /// falls into them.
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let counts = categories.into_iter().map(|c| (c.into(), 0)).collect();
        Self { counts, total: 0 }
    }

    pub fn record(&mut self, category: impl Into<String>) {
        *self.counts.entry(category.into()).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, category: &str) -> usize {
        self.counts.get(category).copied().unwrap_or(0)
    }

    pub fn percentage(&self, category: &str) -> f64 {
        percentage_of(self.count(category), self.total)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Rows in first-seen (or seeded) category order.
    pub fn rows(&self) -> Vec<CategoryCount> {
        self.counts
            .iter()
            .map(|(category, &count)| CategoryCount {
                category: category.clone(),
                count,
                percentage: percentage_of(count, self.total),
            })
            .collect()
    }
}

fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Count items per category.
pub fn compute_counts<'a, T: 'a, F>(items: impl IntoIterator<Item = &'a T>, classify: F) -> CountBreakdown
where
    F: Fn(&T) -> String,
{
    compute_counts_seeded(items, std::iter::empty::<String>(), classify)
}

/// Count items per category, starting from a fixed category list.
pub fn compute_counts_seeded<'a, T: 'a, F, I, S>(
    items: impl IntoIterator<Item = &'a T>,
    seed: I,
    classify: F,
) -> CountBreakdown
where
    F: Fn(&T) -> String,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut breakdown = CountBreakdown::with_categories(seed);
    for item in items {
        breakdown.record(classify(item));
    }
    breakdown
}

/// Activity-event dimensions available to analytics views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventDimension {
    Device,
    Location,
    Action,
}

impl EventDimension {
    pub fn value_of<'e>(&self, event: &'e ActivityEvent) -> &'e str {
        match self {
            EventDimension::Device => &event.device,
            EventDimension::Location => &event.location,
            EventDimension::Action => &event.action,
        }
    }
}

impl FromStr for EventDimension {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "device" => Ok(EventDimension::Device),
            "location" => Ok(EventDimension::Location),
            "action" => Ok(EventDimension::Action),
            other => Err(ParseError::UnknownDimension(other.to_string())),
        }
    }
}

pub fn breakdown_events<'a>(
    events: impl IntoIterator<Item = &'a ActivityEvent>,
    dimension: EventDimension,
) -> CountBreakdown {
    compute_counts(events, |event| {
        let value = dimension.value_of(event).trim();
        if value.is_empty() {
            UNKNOWN_CATEGORY.to_string()
        } else {
            value.to_string()
        }
    })
}

pub fn breakdown_by_device<'a>(events: impl IntoIterator<Item = &'a ActivityEvent>) -> CountBreakdown {
    breakdown_events(events, EventDimension::Device)
}

pub fn breakdown_by_location<'a>(events: impl IntoIterator<Item = &'a ActivityEvent>) -> CountBreakdown {
    breakdown_events(events, EventDimension::Location)
}

pub fn breakdown_by_action<'a>(events: impl IntoIterator<Item = &'a ActivityEvent>) -> CountBreakdown {
    breakdown_events(events, EventDimension::Action)
}
