// Rating timeline: grouping ratings by timestamp and smoothing the series.

pub mod smoothing;

pub use smoothing::{rating_series, smooth, smoothed_series, TimePoint, TimestampGrouping};
