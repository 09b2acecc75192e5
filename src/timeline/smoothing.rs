// Smoothed rating timeline.
//
// Ratings are keyed by their creation timestamp, sorted ascending, and then
// smoothed so the dashboard chart is less jumpy. For value v[i] in a series
// of length L with smoothing factor γ:
//
//   target      = mean(v) * γ
//   prev        = v[i-1]                 (v[i] at the first index)
//   next        = v[i+1]                 (v[i] at the last index)
//   smoothed[i] = (target + (prev + v[i] + next) / 3) / 2
//
// A constant series is a fixed point when γ = 1.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::FeedbackRecord;
use crate::error::{AnalyticsError, Result};

pub const DEFAULT_SMOOTHING: f64 = 0.6;

/// What to do when two feedbacks share the exact same timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampGrouping {
    /// One point per timestamp; the later record in corpus order wins.
    /// Matches the dashboard's historical behaviour, but drops ratings.
    #[default]
    LastWriteWins,
    /// Keep every record, ordered by (timestamp, corpus position).
    KeepAll,
}

impl std::str::FromStr for TimestampGrouping {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "last-write-wins" => Ok(Self::LastWriteWins),
            "keep-all" => Ok(Self::KeepAll),
            other => Err(format!(
                "unknown timestamp grouping '{other}' (expected last-write-wins or keep-all)"
            )),
        }
    }
}

/// A point on the smoothed timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub timestamp: DateTime<Utc>,
    pub rating: f64,
}

/// Reject smoothing factors outside (0, 1] (NaN included).
pub fn validate_smoothing(gamma: f64) -> Result<()> {
    if gamma > 0.0 && gamma <= 1.0 {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidSmoothingFactor(gamma))
    }
}

/// Ratings keyed by timestamp, ascending.
pub fn rating_series(
    records: &[FeedbackRecord],
    grouping: TimestampGrouping,
) -> Vec<(DateTime<Utc>, f64)> {
    match grouping {
        TimestampGrouping::LastWriteWins => {
            let mut by_time: BTreeMap<DateTime<Utc>, f64> = BTreeMap::new();
            for record in records {
                by_time.insert(record.created_at, record.rating as f64);
            }
            by_time.into_iter().collect()
        }
        TimestampGrouping::KeepAll => {
            let mut points: Vec<(DateTime<Utc>, f64)> = records
                .iter()
                .map(|r| (r.created_at, r.rating as f64))
                .collect();
            // Stable, so equal timestamps keep corpus order
            points.sort_by_key(|(ts, _)| *ts);
            points
        }
    }
}

/// Smooth a chronologically ordered series. Same length as the input.
pub fn smooth(values: &[f64], gamma: f64) -> Result<Vec<f64>> {
    validate_smoothing(gamma)?;
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let target = mean * gamma;
    let last = values.len() - 1;

    Ok(values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let prev = if i > 0 { values[i - 1] } else { value };
            let next = if i < last { values[i + 1] } else { value };
            let window = (prev + value + next) / 3.0;
            (target + window) / 2.0
        })
        .collect())
}

/// Build the smoothed rating timeline for a corpus.
pub fn smoothed_series(
    records: &[FeedbackRecord],
    gamma: f64,
    grouping: TimestampGrouping,
) -> Result<Vec<TimePoint>> {
    validate_smoothing(gamma)?;
    let series = rating_series(records, grouping);
    let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
    let smoothed = smooth(&values, gamma)?;

    Ok(series
        .into_iter()
        .zip(smoothed)
        .map(|((timestamp, _), rating)| TimePoint { timestamp, rating })
        .collect())
}
