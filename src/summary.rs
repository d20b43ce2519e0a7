//! Average and trend of a series.
//!
//! Zero-valued buckets mean "no data" rather than a real score of zero, so
//! both figures only look at buckets with a positive score.

use std::fmt;

use serde::Serialize;

use crate::series::Series;

/// Headline figures for a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Mean of the positive scores, or 0
    pub average: f64,
    /// Percent change from the first to the last positive score, or 0
    pub trend_percent: f64,
}

impl Summary {
    /// Compute both figures for `series`.
    #[must_use]
    pub fn from_series(series: &Series) -> Self {
        Self {
            average: average(series),
            trend_percent: trend(series),
        }
    }

    /// Direction of the trend.
    #[must_use]
    pub fn direction(&self) -> TrendDirection {
        TrendDirection::from_percent(self.trend_percent)
    }
}

/// Sign of a trend, for badges and arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if percent > 0.0 {
            Self::Up
        } else if percent < 0.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }

    /// Arrow glyph for terminal output.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Flat => "■",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Flat => write!(f, "flat"),
        }
    }
}

fn positive_scores(series: &Series) -> Vec<f64> {
    series.values().filter(|qs| *qs > 0.0).collect()
}

/// Mean of the positive scores in `series`; 0 when there are none.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average(series: &Series) -> f64 {
    let scores = positive_scores(series);
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Percent change between the first and last positive scores of `series`.
///
/// Zero buckets are skipped, so a lone score between gaps still counts as an
/// endpoint. Returns 0 when fewer than two positive scores exist.
#[must_use]
pub fn trend(series: &Series) -> f64 {
    let scores = positive_scores(series);
    let (Some(&first), Some(&last)) = (scores.first(), scores.last()) else {
        return 0.0;
    };
    if scores.len() < 2 || first == 0.0 {
        return 0.0;
    }
    ((last - first) / first) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Bucket;
    use crate::types::EntityCount;
    use crate::window::Granularity;
    use chrono::{Duration, NaiveDate};

    fn series(scores: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let buckets = scores
            .iter()
            .enumerate()
            .map(|(i, &qs)| Bucket {
                label: format!("day {i}"),
                start: start + Duration::days(i as i64),
                qs,
                secondary_count: EntityCount::default(),
            })
            .collect();
        Series::assemble(Granularity::Daily, buckets)
    }

    #[test]
    fn test_average_excludes_zeros() {
        assert!((average(&series(&[0.0, 0.0, 6.0, 8.0])) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_empty_and_all_zero() {
        assert!(average(&series(&[])).abs() < f64::EPSILON);
        assert!(average(&series(&[0.0, 0.0])).abs() < f64::EPSILON);
    }

    #[test]
    fn test_trend_doubling() {
        assert!((trend(&series(&[0.0, 4.0, 0.0, 0.0, 8.0, 0.0])) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_decline() {
        assert!((trend(&series(&[8.0, 6.0, 4.0])) + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_uses_first_and_last_only() {
        assert!((trend(&series(&[5.0, 1.0, 9.0, 5.0]))).abs() < 1e-9);
    }

    #[test]
    fn test_trend_single_point() {
        assert!(trend(&series(&[0.0, 7.0, 0.0])).abs() < f64::EPSILON);
        assert!(trend(&series(&[])).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_scores_ignored() {
        let s = series(&[-2.0, 4.0, 6.0]);
        assert!((average(&s) - 5.0).abs() < 1e-9);
        assert!((trend(&s) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_direction() {
        assert_eq!(
            Summary::from_series(&series(&[4.0, 8.0])).direction(),
            TrendDirection::Up
        );
        assert_eq!(
            Summary::from_series(&series(&[8.0, 4.0])).direction(),
            TrendDirection::Down
        );
        assert_eq!(Summary::default().direction(), TrendDirection::Flat);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(TrendDirection::Up.to_string(), "up");
        assert_eq!(TrendDirection::Down.arrow(), "▼");
    }
}
