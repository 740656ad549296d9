#![allow(dead_code)]

use chrono::DateTime;
use serde::{Deserialize, de::DeserializeOwned};
use talive::{Sample, Timestamp};

/// Tick parsed from the fixture stream. An empty value is an undefined
/// sample.
#[derive(Debug, Clone, Deserialize)]
pub struct RefTick {
    pub time_ms: i64,
    pub value: Option<f64>,
}

impl RefTick {
    pub fn time(&self) -> Timestamp {
        DateTime::from_timestamp_millis(self.time_ms).expect("fixture time in range")
    }

    pub fn sample(&self) -> Sample {
        Sample::at(self.time(), self.value)
    }
}

/// Reference output with timestamp. An empty value means the indicator
/// must emit undefined.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub time_ms: i64,
    pub expected: Option<f64>,
}

const TICKS_PATH: &str = "tests/fixtures/data/ticks.csv";

/// Load the irregular tick stream: millisecond timestamps, repeated
/// timestamps and a few undefined values.
pub fn load_reference_ticks() -> Vec<RefTick> {
    load_records(TICKS_PATH, "invalid tick record")
}

pub fn load_reference_samples() -> Vec<Sample> {
    load_reference_ticks().iter().map(RefTick::sample).collect()
}

/// Load single-value reference data, one row per tick.
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

pub fn assert_values_match(
    tick_idx: usize,
    actual: Option<f64>,
    expected: Option<f64>,
    tolerance: f64,
    context: &str,
) {
    match (actual, expected) {
        (None, None) => {}
        (Some(a), Some(e)) => assert_near(a, e, tolerance, &format!("{context} at tick {tick_idx}")),
        (a, e) => {
            panic!("{context}: definedness mismatch at tick {tick_idx}: actual={a:?}, expected={e:?}");
        }
    }
}

/// Generate reference tests for a single-value indicator.
///
/// Usage: `reference_test!(ma_20s, Ma, WindowConfig::new(secs(20)), "tests/fixtures/data/ma-20s.csv", 1e-6);`
#[allow(unused_macros)]
macro_rules! reference_test {
    ($name:ident, $ind:ty, $config:expr, $ref_path:expr, $tolerance:expr) => {
        mod $name {
            use super::fixtures::*;
            use talive::*;

            fn secs(n: u32) -> Period {
                Period::seconds(n)
            }

            #[test]
            fn matches_reference() {
                let ticks = load_reference_ticks();
                let reference = load_ref_values($ref_path);
                assert_eq!(ticks.len(), reference.len(), "one reference row per tick");

                let mut ind = <$ind>::new($config);

                for (i, (tick, expected)) in ticks.iter().zip(&reference).enumerate() {
                    assert_eq!(tick.time_ms, expected.time_ms, "fixture rows out of step");

                    let out = ind.insert(tick.sample());
                    assert_eq!(out.time(), tick.time());
                    assert_values_match(
                        i,
                        out.value(),
                        expected.expected,
                        $tolerance,
                        stringify!($name),
                    );
                }

                assert_eq!(ind.last().map(|out| out.time()), ticks.last().map(RefTick::time));
            }

            #[test]
            fn batch_matches_streaming() {
                let samples = load_reference_samples();
                let mut streamed = <$ind>::new($config);
                let mut batched = <$ind>::new($config);

                let expected: Vec<Sample> = samples.iter().map(|&s| streamed.insert(s)).collect();
                assert_eq!(batched.batch_insert(&samples), expected);
            }

            #[test]
            fn undefined_ticks_leave_state_untouched() {
                let samples = load_reference_samples();
                let mut with_gaps = <$ind>::new($config);
                let mut filtered = <$ind>::new($config);

                for (i, &sample) in samples.iter().enumerate() {
                    let out = with_gaps.insert(sample);
                    if sample.is_defined() {
                        let reference = filtered.insert(sample);
                        assert_eq!(out, reference, "diverged at tick {i}");
                    } else {
                        assert!(!out.is_defined(), "defined output for undefined tick {i}");
                    }
                }
            }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use reference_test;

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
