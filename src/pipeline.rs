//! End-to-end computation: raw records in, series and summary out.
//!
//! Every function here is pure. The reference date is always passed in, so
//! the same inputs give the same output on every call and from any thread.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::aggregate;
use crate::error::Result;
use crate::index::ScoreIndex;
use crate::input::EntityRecords;
use crate::series::Series;
use crate::summary::Summary;
use crate::types::{EntityCount, EntityLevel, RawScoreRecord};
use crate::window::Window;

/// Series and summary for one entity over one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityTrend {
    pub series: Series,
    pub summary: Summary,
}

/// Run the pipeline for a window of `window_days` ending at `reference_now`.
///
/// Fails only for an invalid window. Empty or fully malformed input yields a
/// zero-filled series with a zero summary.
pub fn compute(
    records: &[RawScoreRecord],
    window_days: u32,
    reference_now: NaiveDate,
) -> Result<QualityTrend> {
    let window = Window::new(reference_now, window_days)?;
    Ok(compute_window(records, &window))
}

/// Run the pipeline over an already validated window.
#[must_use]
pub fn compute_window(records: &[RawScoreRecord], window: &Window) -> QualityTrend {
    let index = ScoreIndex::build(records);
    let series = Series::assemble(window.granularity(), aggregate::aggregate(&index, window));
    let summary = Summary::from_series(&series);

    debug!(
        "Computed {} {} buckets for {}",
        series.len(),
        series.granularity,
        window
    );

    QualityTrend { series, summary }
}

/// One table row: an entity and its trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityReport {
    pub name: String,
    pub level: EntityLevel,
    #[serde(flatten)]
    pub trend: QualityTrend,
}

impl EntityReport {
    /// Compute the report for one entity.
    #[must_use]
    pub fn build(entity: &EntityRecords, window: &Window) -> Self {
        Self {
            name: entity.name.clone(),
            level: entity.level,
            trend: compute_window(&entity.records, window),
        }
    }

    /// Latest known child count for the row.
    #[must_use]
    pub fn secondary_count(&self) -> EntityCount {
        self.trend.series.latest_secondary_count()
    }
}

/// Compute reports for every entity, preserving input order.
#[must_use]
pub fn build_reports(entities: &[EntityRecords], window: &Window) -> Vec<EntityReport> {
    entities
        .iter()
        .map(|entity| EntityReport::build(entity, window))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::Granularity;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn june_records() -> Vec<RawScoreRecord> {
        vec![
            RawScoreRecord::new("01.06.2024", 6.0, 2),
            RawScoreRecord::new("03.06.2024", 8.0, 3),
        ]
    }

    #[test]
    fn test_end_to_end_week() {
        let trend = compute(&june_records(), 7, date(2024, 6, 7)).unwrap();
        let series = &trend.series;

        assert_eq!(series.granularity, Granularity::Daily);
        assert_eq!(series.len(), 7);
        assert_eq!(series.buckets[0].start, date(2024, 6, 1));
        assert_eq!(series.buckets[0].label, "Jun 1");
        assert!((series.buckets[0].qs - 6.0).abs() < f64::EPSILON);
        assert_eq!(series.buckets[0].secondary_count, EntityCount::new(2));
        assert!((series.buckets[2].qs - 8.0).abs() < f64::EPSILON);
        assert_eq!(series.buckets[2].secondary_count, EntityCount::new(3));

        let zero_filled = series.iter().filter(|b| b.qs == 0.0).count();
        assert_eq!(zero_filled, 5);

        assert!((trend.summary.average - 7.0).abs() < 1e-9);
        assert!((trend.summary.trend_percent - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let records = june_records();
        for days in [7, 30, 90, 365] {
            let first = compute(&records, days, date(2024, 6, 7)).unwrap();
            let second = compute(&records, days, date(2024, 6, 7)).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_malformed_date_zero_filled() {
        let records = vec![
            RawScoreRecord::new("31.13.2024", 9.0, 4),
            RawScoreRecord::new("02.06.2024", 5.0, 1),
        ];
        let trend = compute(&records, 7, date(2024, 6, 7)).unwrap();

        assert_eq!(trend.series.len(), 7);
        assert_eq!(trend.series.iter().filter(|b| b.qs > 0.0).count(), 1);
        assert!((trend.summary.average - 5.0).abs() < 1e-9);
        assert!(trend.summary.trend_percent.abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_input() {
        let trend = compute(&[], 30, date(2024, 6, 7)).unwrap();
        assert_eq!(trend.series.len(), 30);
        assert!(trend.series.values().all(|qs| qs == 0.0));
        assert_eq!(trend.summary, Summary::default());
    }

    #[test]
    fn test_records_outside_window_ignored() {
        let records = vec![
            RawScoreRecord::new("01.01.2024", 9.0, 1),
            RawScoreRecord::new("08.06.2024", 9.0, 1),
        ];
        let trend = compute(&records, 7, date(2024, 6, 7)).unwrap();
        assert_eq!(trend.summary, Summary::default());
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(compute(&june_records(), 0, date(2024, 6, 7)).is_err());
    }

    #[test]
    fn test_weekly_window() {
        let trend = compute(&june_records(), 90, date(2024, 6, 7)).unwrap();
        assert_eq!(trend.series.granularity, Granularity::Weekly);
        assert_eq!(trend.series.len(), 13);
    }

    #[test]
    fn test_reports_across_threads() {
        let window = Window::new(date(2024, 6, 7), 30).unwrap();
        let entities: Vec<EntityRecords> = (0..8)
            .map(|i| EntityRecords {
                name: format!("Campaign {i}"),
                level: EntityLevel::Campaign,
                records: vec![
                    RawScoreRecord::new("01.06.2024", f64::from(i) + 1.0, i64::from(i)),
                    RawScoreRecord::new("05.06.2024", 5.0, 2),
                ],
            })
            .collect();

        let sequential = build_reports(&entities, &window);
        let threaded: Vec<EntityReport> = std::thread::scope(|scope| {
            let handles: Vec<_> = entities
                .iter()
                .map(|entity| scope.spawn(move || EntityReport::build(entity, &window)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(sequential, threaded);
        assert_eq!(sequential[3].name, "Campaign 3");
        assert_eq!(sequential[3].secondary_count(), EntityCount::new(2));
    }
}
