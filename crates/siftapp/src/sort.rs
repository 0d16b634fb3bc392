//! # Comparator Selector
//!
//! Maps a [`SortKey`] to a total order over records. Only one key is active at a time;
//! there is no secondary key, so ties keep their input order (sorting is stable).
//!
//! | Key | Field | Direction | Missing value |
//! |-----|-------|-----------|---------------|
//! | `Newest` | `created_at` | descending | epoch zero (oldest) |
//! | `NearestDeadline` | `deadline` | ascending | per [`MissingDeadline`] |
//! | `MostSignatures` | `signature_count` | descending | zero |
//! | `MostVotes` | `total_votes` | descending | zero |
//!
//! ## Missing Deadlines
//!
//! The listing pages historically treated a missing deadline as epoch zero, which puts
//! records without a deadline *first* under "nearest deadline". That is kept as the
//! default ([`MissingDeadline::AsEpoch`]); [`MissingDeadline::Last`] pushes them to the end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::attributes::Listable;
use crate::error::SiftError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "created_at")]
    Newest,
    #[serde(rename = "deadline")]
    NearestDeadline,
    #[serde(rename = "signature_count")]
    MostSignatures,
    #[serde(rename = "total_votes")]
    MostVotes,
}

impl SortKey {
    /// The wire name, matching the field it sorts on.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "created_at",
            SortKey::NearestDeadline => "deadline",
            SortKey::MostSignatures => "signature_count",
            SortKey::MostVotes => "total_votes",
        }
    }

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::NearestDeadline => "nearest deadline",
            SortKey::MostSignatures => "most signatures",
            SortKey::MostVotes => "most votes",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "created_at" | "newest" => Ok(SortKey::Newest),
            "deadline" | "nearest_deadline" => Ok(SortKey::NearestDeadline),
            "signature_count" | "signatures" | "most_signatures" => Ok(SortKey::MostSignatures),
            "total_votes" | "votes" | "most_votes" => Ok(SortKey::MostVotes),
            other => Err(SiftError::Api(format!("Unknown sort key: {}", other))),
        }
    }
}

/// Where records without a deadline land under [`SortKey::NearestDeadline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDeadline {
    /// Treat as epoch zero: sorts before every real deadline.
    #[default]
    AsEpoch,
    /// Sort after every real deadline.
    Last,
}

impl FromStr for MissingDeadline {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "as_epoch" | "epoch" | "first" => Ok(MissingDeadline::AsEpoch),
            "last" => Ok(MissingDeadline::Last),
            other => Err(SiftError::Config(format!(
                "Unknown missing_deadline policy: {}",
                other
            ))),
        }
    }
}

fn epoch_millis(ts: Option<DateTime<Utc>>) -> i64 {
    ts.map(|t| t.timestamp_millis()).unwrap_or(0)
}

fn compare_deadlines(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    policy: MissingDeadline,
) -> Ordering {
    match policy {
        MissingDeadline::AsEpoch => epoch_millis(a).cmp(&epoch_millis(b)),
        MissingDeadline::Last => match (a, b) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Returns the comparator for `key`.
pub fn comparator<T: Listable>(
    key: SortKey,
    missing_deadline: MissingDeadline,
) -> impl Fn(&T, &T) -> Ordering {
    move |a: &T, b: &T| match key {
        SortKey::Newest => epoch_millis(b.created_at()).cmp(&epoch_millis(a.created_at())),
        SortKey::NearestDeadline => compare_deadlines(a.deadline(), b.deadline(), missing_deadline),
        SortKey::MostSignatures => b
            .signature_count()
            .unwrap_or(0)
            .cmp(&a.signature_count().unwrap_or(0)),
        SortKey::MostVotes => b.total_votes().unwrap_or(0).cmp(&a.total_votes().unwrap_or(0)),
    }
}

/// Stable in-place sort of borrowed records.
pub fn sort_refs<T: Listable>(items: &mut [&T], key: SortKey, missing_deadline: MissingDeadline) {
    let cmp = comparator::<T>(key, missing_deadline);
    items.sort_by(|a, b| cmp(*a, *b));
}
