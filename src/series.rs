//! Chart-ready series of score buckets.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::EntityCount;
use crate::window::Granularity;

/// One point of a series: a single day or one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Chart label (`Jun 3`, or `Jun 3, 2024` for long windows)
    pub label: String,
    /// First calendar day covered by the bucket
    pub start: NaiveDate,
    /// Quality score, passed through without clamping
    pub qs: f64,
    /// Child entity count
    pub secondary_count: EntityCount,
}

/// Ordered, gap-free buckets covering a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub granularity: Granularity,
    pub buckets: Vec<Bucket>,
}

impl Series {
    /// Wrap aggregated buckets as a series. Buckets are kept exactly as given.
    #[must_use]
    pub const fn assemble(granularity: Granularity, buckets: Vec<Bucket>) -> Self {
        Self {
            granularity,
            buckets,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bucket> {
        self.buckets.iter()
    }

    /// Scores in chronological order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.buckets.iter().map(|b| b.qs)
    }

    /// Most recent bucket.
    #[must_use]
    pub fn latest(&self) -> Option<&Bucket> {
        self.buckets.last()
    }

    /// Most recent non-zero secondary count, for table rows.
    #[must_use]
    pub fn latest_secondary_count(&self) -> EntityCount {
        self.buckets
            .iter()
            .rev()
            .map(|b| b.secondary_count)
            .find(|c| !c.is_zero())
            .unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Bucket;
    type IntoIter = std::slice::Iter<'a, Bucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
