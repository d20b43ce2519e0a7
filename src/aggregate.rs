//! Bucketing of indexed scores over a window.
//!
//! Windows of up to [`WEEKLY_THRESHOLD_DAYS`](crate::window::WEEKLY_THRESHOLD_DAYS)
//! days produce one bucket per day. Longer windows fold each run of seven days
//! into one bucket:
//!
//! - `qs` is the mean over every day of the run, zero-filled days included.
//! - `secondary_count` is the count of the run's last day.
//! - The label is the Monday of the week the run starts in.
//!
//! Runs begin at the window's first day, so a window that is not a multiple
//! of seven ends with one shorter run averaged over its own length.

use chrono::NaiveDate;

use crate::codec;
use crate::index::ScoreIndex;
use crate::series::Bucket;
use crate::types::DailyScore;
use crate::window::{Granularity, Window};

/// Aggregate `index` over `window` at the window's granularity.
#[must_use]
pub fn aggregate(index: &ScoreIndex, window: &Window) -> Vec<Bucket> {
    match window.granularity() {
        Granularity::Daily => daily(index, window),
        Granularity::Weekly => weekly(index, window),
    }
}

/// One bucket per window day.
#[must_use]
pub fn daily(index: &ScoreIndex, window: &Window) -> Vec<Bucket> {
    window
        .dates()
        .map(|date| {
            let score = index.resolve(date);
            Bucket {
                label: codec::to_display(date, Granularity::Daily, window.days()),
                start: date,
                qs: score.qs,
                secondary_count: score.secondary_count,
            }
        })
        .collect()
}

/// One bucket per seven-day run of the window.
#[must_use]
pub fn weekly(index: &ScoreIndex, window: &Window) -> Vec<Bucket> {
    window
        .weeks()
        .iter()
        .filter_map(|days| fold_week(index, days, window.days()))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn fold_week(index: &ScoreIndex, days: &[NaiveDate], window_days: u32) -> Option<Bucket> {
    let first = *days.first()?;

    let mut sum = 0.0;
    let mut last = DailyScore::ZERO;
    for &date in days {
        last = index.resolve(date);
        sum += last.qs;
    }

    Some(Bucket {
        label: codec::to_display(first, Granularity::Weekly, window_days),
        start: first,
        qs: sum / days.len() as f64,
        secondary_count: last.secondary_count,
    })
}
