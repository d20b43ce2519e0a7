//! Domain types shared across the pipeline.
//!
//! Raw score records as received from the data source, the normalized values
//! the index stores, the entity hierarchy, and the [`EntityCount`] newtype for
//! the per-entity child count that travels next to each score.

use std::fmt;

use derive_more::{Add as DeriveAdd, From, Into};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Macros for reducing boilerplate
// ============================================================================

/// Generates common methods for numeric newtypes.
macro_rules! impl_newtype_common {
    ($type:ty) => {
        impl $type {
            /// Create a new instance.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the inner value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Check if the value is zero.
            #[must_use]
            pub const fn is_zero(self) -> bool {
                self.0 == 0
            }
        }
    };
}

// ============================================================================
// EntityCount
// ============================================================================

/// Number of child entities reported alongside a score.
///
/// What is being counted depends on the [`EntityLevel`] of the scored entity:
/// campaigns for an account, ad groups for a campaign, keywords for an ad
/// group.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    DeriveAdd,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct EntityCount(pub i64);

impl_newtype_common!(EntityCount);

impl fmt::Display for EntityCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for EntityCount {
    fn from(value: i32) -> Self {
        Self(i64::from(value))
    }
}

// ============================================================================
// Entity hierarchy
// ============================================================================

/// Level of a scored entity in the account hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLevel {
    /// Advertising account (counts campaigns)
    #[default]
    Account,
    /// Campaign (counts ad groups)
    Campaign,
    /// Ad group (counts keywords)
    AdGroup,
}

impl EntityLevel {
    /// What the secondary count of this level counts, in plural form.
    #[must_use]
    pub const fn secondary_label(self) -> &'static str {
        match self {
            Self::Account => "campaigns",
            Self::Campaign => "ad groups",
            Self::AdGroup => "keywords",
        }
    }

    /// Get display name for the level.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Account => "Account",
            Self::Campaign => "Campaign",
            Self::AdGroup => "Ad group",
        }
    }
}

impl fmt::Display for EntityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Records
// ============================================================================

/// One daily score measurement as delivered by the data source.
///
/// Decoding is lenient: a missing, null or non-numeric `qs` or
/// `secondaryCount` becomes zero instead of failing the whole batch. Dates are
/// kept verbatim and validated later by the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScoreRecord {
    /// Day of the measurement as `DD.MM.YYYY`
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,

    /// Quality score, 0-10 by convention
    #[serde(default, deserialize_with = "lenient_score")]
    pub qs: f64,

    /// Child entity count (campaigns, ad groups or keywords)
    #[serde(
        default,
        alias = "campaignCount",
        alias = "adGroupCount",
        alias = "keywordCount",
        deserialize_with = "lenient_count"
    )]
    pub secondary_count: EntityCount,
}

impl RawScoreRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(date: impl Into<String>, qs: f64, secondary_count: i64) -> Self {
        Self {
            date: date.into(),
            qs,
            secondary_count: EntityCount(secondary_count),
        }
    }
}

/// Score values resolved for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailyScore {
    pub qs: f64,
    pub secondary_count: EntityCount,
}

impl DailyScore {
    /// Value used for a day without a record.
    pub const ZERO: Self = Self {
        qs: 0.0,
        secondary_count: EntityCount(0),
    };
}

impl From<&RawScoreRecord> for DailyScore {
    fn from(record: &RawScoreRecord) -> Self {
        Self {
            qs: record.qs,
            secondary_count: record.secondary_count,
        }
    }
}

/// A record after date normalization, keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPoint {
    pub date_key: String,
    pub qs: f64,
    pub secondary_count: EntityCount,
}

// ============================================================================
// Lenient decoding
// ============================================================================

fn finite_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn lenient_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(finite_number(&value).unwrap_or(0.0))
}

#[allow(clippy::cast_possible_truncation)]
fn lenient_count<'de, D>(deserializer: D) -> Result<EntityCount, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = finite_number(&value)
        .filter(|n| *n >= 0.0)
        .map_or(0, |n| n.trunc() as i64);
    Ok(EntityCount(count))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================
