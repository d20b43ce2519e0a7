//! # qs-trends
//!
//! Quality score trends for advertising account hierarchies.
//!
//! This crate provides:
//! - Strict parsing of `DD.MM.YYYY` record dates
//! - Gap-free daily or weekly series over a fixed window
//! - Average and first-to-last trend of the non-zero scores
//! - JSON loading of per-entity records and terminal rendering
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use qs_trends::{pipeline, RawScoreRecord};
//!
//! let records = vec![
//!     RawScoreRecord::new("01.06.2024", 6.0, 2),
//!     RawScoreRecord::new("03.06.2024", 8.0, 3),
//! ];
//! let now = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
//! let trend = pipeline::compute(&records, 7, now).unwrap();
//!
//! assert_eq!(trend.series.len(), 7);
//! assert!((trend.summary.average - 7.0).abs() < 1e-9);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod codec;
pub mod config;
pub mod display;
pub mod error;
pub mod index;
pub mod input;
pub mod pipeline;
pub mod series;
pub mod summary;
pub mod types;
pub mod window;

pub use config::Config;
pub use error::{Error, Result};
pub use index::ScoreIndex;
pub use pipeline::{EntityReport, QualityTrend};
pub use series::{Bucket, Series};
pub use summary::{Summary, TrendDirection};
pub use types::{EntityCount, EntityLevel, RawScoreRecord};
pub use window::{Granularity, Window, WindowPreset};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "qs-trends";
