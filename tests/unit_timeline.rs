// Unit tests for rating timeline grouping and smoothing.

use chrono::{DateTime, TimeZone, Utc};

use feedlens::db::models::FeedbackRecord;
use feedlens::timeline::{rating_series, smooth, smoothed_series, TimestampGrouping};

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn record(id: i64, rating: i64, secs: i64) -> FeedbackRecord {
    FeedbackRecord {
        id,
        organization_id: "acme".to_string(),
        text: format!("feedback {id}"),
        rating,
        created_at: at(secs),
    }
}

// ============================================================
// smooth
// ============================================================

#[test]
fn constant_series_is_fixed_point_at_gamma_one() {
    for len in 1..6 {
        let values = vec![3.0; len];
        let out = smooth(&values, 1.0).unwrap();
        assert_eq!(out.len(), len);
        assert!(out.iter().all(|v| (v - 3.0).abs() < 1e-12));
    }
}

#[test]
fn constant_series_is_pulled_toward_scaled_mean() {
    // target = 5 * 0.6 = 3, window = 5 -> 4
    let out = smooth(&[5.0, 5.0, 5.0], 0.6).unwrap();
    assert!(out.iter().all(|v| (v - 4.0).abs() < 1e-12));
}

#[test]
fn endpoints_repeat_their_own_value() {
    // values 2, 8: mean 5, target 5 at gamma 1
    let out = smooth(&[2.0, 8.0], 1.0).unwrap();
    // i=0: (2 + 2 + 8)/3 = 4 -> (5 + 4)/2
    assert!((out[0] - 4.5).abs() < 1e-12);
    // i=1: (2 + 8 + 8)/3 = 6 -> (5 + 6)/2
    assert!((out[1] - 5.5).abs() < 1e-12);
}

#[test]
fn smoothing_reduces_spread() {
    let values = [1.0, 5.0, 1.0, 5.0, 1.0, 5.0];
    let out = smooth(&values, 1.0).unwrap();
    let spread = |v: &[f64]| {
        v.iter().cloned().fold(f64::MIN, f64::max) - v.iter().cloned().fold(f64::MAX, f64::min)
    };
    assert!(spread(&out) < spread(&values));
}

#[test]
fn gamma_bounds() {
    assert!(smooth(&[1.0, 2.0], 1.0).is_ok());
    assert!(smooth(&[1.0, 2.0], f64::MIN_POSITIVE).is_ok());
    assert!(smooth(&[1.0, 2.0], 0.0).is_err());
    assert!(smooth(&[1.0, 2.0], 1.0 + 1e-9).is_err());
    assert!(smooth(&[1.0, 2.0], f64::INFINITY).is_err());
}

// ============================================================
// Grouping by timestamp
// ============================================================

#[test]
fn series_sorted_by_timestamp_not_corpus_order() {
    let records = vec![record(1, 1, 30), record(2, 2, 10), record(3, 3, 20)];
    let series = rating_series(&records, TimestampGrouping::LastWriteWins);
    let times: Vec<DateTime<Utc>> = series.iter().map(|(t, _)| *t).collect();
    assert_eq!(times, vec![at(10), at(20), at(30)]);
}

#[test]
fn last_write_wins_keeps_later_record() {
    let records = vec![record(1, 1, 10), record(2, 5, 10), record(3, 3, 20)];
    let series = rating_series(&records, TimestampGrouping::LastWriteWins);
    assert_eq!(series, vec![(at(10), 5.0), (at(20), 3.0)]);
}

#[test]
fn keep_all_preserves_every_point() {
    let records = vec![record(1, 1, 10), record(2, 5, 10), record(3, 3, 20)];
    let series = rating_series(&records, TimestampGrouping::KeepAll);
    assert_eq!(series, vec![(at(10), 1.0), (at(10), 5.0), (at(20), 3.0)]);
}

#[test]
fn smoothed_series_pairs_timestamps_with_values() {
    let records = vec![record(1, 4, 20), record(2, 2, 10)];
    let points = smoothed_series(&records, 1.0, TimestampGrouping::LastWriteWins).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].timestamp, at(10));
    assert_eq!(points[1].timestamp, at(20));
    // series [2, 4], mean 3: i=0 window (2+2+4)/3
    assert!((points[0].rating - (3.0 + 8.0 / 3.0) / 2.0).abs() < 1e-12);
}

#[test]
fn empty_corpus_gives_empty_timeline() {
    let points = smoothed_series(&[], 0.6, TimestampGrouping::KeepAll).unwrap();
    assert!(points.is_empty());
}
