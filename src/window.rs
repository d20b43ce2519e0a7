//! Reporting windows.
//!
//! A [`Window`] is the contiguous run of calendar days a chart covers, anchored
//! at a reference date and reaching backward. It is the backbone of every
//! series: each day in the window produces a value whether or not a score
//! record exists for it.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Windows longer than this many days are bucketed by week.
pub const WEEKLY_THRESHOLD_DAYS: u32 = 30;

/// Days folded into one weekly bucket.
pub const DAYS_PER_WEEK: usize = 7;

/// Bucket size of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar day
    Daily,
    /// One bucket per seven days
    Weekly,
}

impl Granularity {
    /// Pick the bucket size for a window length.
    #[must_use]
    pub const fn for_window(days: u32) -> Self {
        if days > WEEKLY_THRESHOLD_DAYS {
            Self::Weekly
        } else {
            Self::Daily
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
        }
    }
}

/// A window of consecutive days ending at a reference date (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    start: NaiveDate,
    end: NaiveDate,
    days: u32,
}

impl Window {
    /// Create a window of `days` days ending at `end`.
    ///
    /// Fails with [`Error::InvalidWindow`] for an empty window or one that
    /// would start before the earliest representable date.
    pub fn new(end: NaiveDate, days: u32) -> Result<Self> {
        if days == 0 {
            return Err(Error::InvalidWindow(days));
        }
        let start = end
            .checked_sub_signed(Duration::days(i64::from(days) - 1))
            .ok_or(Error::InvalidWindow(days))?;
        Ok(Self { start, end, days })
    }

    /// Create a window ending today, according to the host clock.
    pub fn ending_today(days: u32) -> Result<Self> {
        Self::new(Local::now().date_naive(), days)
    }

    /// First day of the window.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window (the reference date).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered.
    #[must_use]
    pub const fn days(&self) -> u32 {
        self.days
    }

    /// Bucket size used when aggregating over this window.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        Granularity::for_window(self.days)
    }

    /// Every day of the window, oldest first.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.days).map(move |offset| start + Duration::days(i64::from(offset)))
    }

    /// The window's days split into runs of seven, oldest first.
    ///
    /// Runs start at the window's first day, so only the last run can be
    /// shorter than a full week.
    #[must_use]
    pub fn weeks(&self) -> Vec<Vec<NaiveDate>> {
        let dates: Vec<NaiveDate> = self.dates().collect();
        dates.chunks(DAYS_PER_WEEK).map(<[_]>::to_vec).collect()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {} ({} days)", self.start, self.end, self.days)
    }
}

/// The consecutive dates of a `window_days` window ending at `reference_now`.
pub fn window_dates(reference_now: NaiveDate, window_days: u32) -> Result<Vec<NaiveDate>> {
    Ok(Window::new(reference_now, window_days)?.dates().collect())
}

/// Window lengths offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowPreset {
    /// Last 7 days
    Week,
    /// Last 30 days
    #[default]
    Month,
    /// Last 90 days
    Quarter,
    /// Last 365 days
    Year,
}

impl WindowPreset {
    /// Number of days in the preset.
    #[must_use]
    pub const fn days(self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    /// Get display name for the preset.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Week => "Last 7 Days",
            Self::Month => "Last 30 Days",
            Self::Quarter => "Last 90 Days",
            Self::Year => "Last 365 Days",
        }
    }

    /// Get all presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Week, Self::Month, Self::Quarter, Self::Year]
    }

    /// Find the preset with exactly `days` days.
    #[must_use]
    pub fn from_days(days: u32) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.days() == days)
    }

    /// Build the window for this preset ending at `end`.
    pub fn window(self, end: NaiveDate) -> Result<Window> {
        Window::new(end, self.days())
    }
}

impl FromStr for WindowPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        let preset = match normalized.as_str() {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "quarter" => Some(Self::Quarter),
            "year" => Some(Self::Year),
            other => other
                .strip_suffix('d')
                .unwrap_or(other)
                .parse()
                .ok()
                .and_then(Self::from_days),
        };
        preset.ok_or_else(|| {
            Error::other(format!(
                "unknown window '{s}' (expected 7, 30, 90, 365, week, month, quarter or year)"
            ))
        })
    }
}

impl From<WindowPreset> for u32 {
    fn from(preset: WindowPreset) -> Self {
        preset.days()
    }
}

impl fmt::Display for WindowPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
