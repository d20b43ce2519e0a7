//! Date-keyed lookup of raw score records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::codec;
use crate::types::{DailyScore, NormalizedPoint, RawScoreRecord};

/// Scores keyed by canonical `YYYY-MM-DD` date key.
///
/// Built once per computation so that every window day resolves with a single
/// map lookup. Records whose date does not parse are dropped with a warning;
/// when two records land on the same day the later one wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreIndex {
    scores: BTreeMap<String, DailyScore>,
    dropped: usize,
}

impl ScoreIndex {
    /// Build an index from raw records, in input order.
    #[must_use]
    pub fn build(records: &[RawScoreRecord]) -> Self {
        let mut index = Self::default();

        for record in records {
            match codec::parse(&record.date) {
                Ok(date) => {
                    index
                        .scores
                        .insert(codec::to_key(date), DailyScore::from(record));
                }
                Err(e) => {
                    warn!("Skipping score record: {}", e);
                    index.dropped += 1;
                }
            }
        }

        debug!(
            "Indexed {} score days from {} records ({} dropped)",
            index.scores.len(),
            records.len(),
            index.dropped
        );

        index
    }

    /// Score recorded for `date`, if any.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<DailyScore> {
        self.scores.get(&codec::to_key(date)).copied()
    }

    /// Score for `date`, or zero when no record exists.
    #[must_use]
    pub fn resolve(&self, date: NaiveDate) -> DailyScore {
        self.get(date).unwrap_or(DailyScore::ZERO)
    }

    /// Number of distinct days with a score.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no record survived parsing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Number of records discarded for an invalid date.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Normalized points in chronological order.
    #[must_use]
    pub fn points(&self) -> Vec<NormalizedPoint> {
        self.scores
            .iter()
            .map(|(key, score)| NormalizedPoint {
                date_key: key.clone(),
                qs: score.qs,
                secondary_count: score.secondary_count,
            })
            .collect()
    }
}
