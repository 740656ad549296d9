// src/test_util.rs

use crate::{Period, Sample, Timestamp, Value};
use chrono::DateTime;

/// Asserts that two `f64` values agree to within `1e-9`, relative to the
/// larger of `|expected|` and one.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e): (f64, f64) = ($actual, $expected);
        assert!(
            (a - e).abs() <= 1e-9 * e.abs().max(1.0),
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

/// Timestamp `secs` seconds after the epoch.
pub fn ts(secs: i64) -> Timestamp {
    DateTime::from_timestamp(secs, 0).expect("timestamp in range")
}

/// Timestamp `millis` milliseconds after the epoch.
pub fn ts_ms(millis: i64) -> Timestamp {
    DateTime::from_timestamp_millis(millis).expect("timestamp in range")
}

/// Convenience: defined sample at `secs`.
pub fn s(secs: i64, value: Value) -> Sample {
    Sample::new(ts(secs), value)
}

pub fn p(secs: u32) -> Period {
    Period::seconds(secs)
}

pub fn values(samples: &[Sample]) -> Vec<Option<Value>> {
    samples.iter().map(Sample::value).collect()
}

/// Samples at the given second offsets.
pub fn series(points: &[(i64, Value)]) -> Vec<Sample> {
    points.iter().map(|&(t, v)| s(t, v)).collect()
}
