use std::{collections::VecDeque, fmt::Display};

use crate::{Indicator, Sample, Timestamp, Value, WindowConfig, indicator::assert_ordered};

/// Trailing-window extremum tracker.
///
/// Keeps a monotonic deque of `(time, value)` pairs: oldest first, values
/// descending for [`High`] and ascending for [`Low`]. Each sample is pushed
/// once and popped at most once, so updates are amortized O(1).
///
/// On insert, entries whose value is dominated by the new one are popped from
/// the back (ties included, so an older equal value never shadows a newer
/// one), the new sample is pushed, and entries at least `period` older than
/// the new sample are evicted from the front. The front is the window
/// extremum.
///
/// The window is the half-open interval `(now - period, now]`.
///
/// # Example
///
/// ```
/// use talive::{High, Period, Sample, WindowConfig};
/// use chrono::DateTime;
///
/// let t = |secs| DateTime::from_timestamp(secs, 0).unwrap();
/// let mut high = High::new(WindowConfig::new(Period::seconds(10)));
///
/// assert_eq!(high.insert(Sample::new(t(0), 5.0)).value(), Some(5.0));
/// assert_eq!(high.insert(Sample::new(t(3), 9.0)).value(), Some(9.0));
/// assert_eq!(high.insert(Sample::new(t(5), 3.0)).value(), Some(9.0));
///
/// // window is (1s, 11s]: 9.0 at t=3 is still inside
/// assert_eq!(high.insert(Sample::new(t(11), 4.0)).value(), Some(9.0));
/// assert_eq!(high.extremum(), Some(Sample::new(t(3), 9.0)));
/// ```
#[derive(Clone, Debug)]
pub struct Extremum<const MAX: bool> {
    config: WindowConfig,
    queue: VecDeque<(Timestamp, Value)>,
    current: Option<Sample>,
}

/// Trailing-window maximum.
pub type High = Extremum<true>;

/// Trailing-window minimum.
pub type Low = Extremum<false>;

impl<const MAX: bool> Extremum<MAX> {
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            queue: VecDeque::new(),
            current: None,
        }
    }

    /// The current extremum with its own original timestamp, or `None` if
    /// no defined sample has been seen.
    #[inline]
    #[must_use]
    pub fn extremum(&self) -> Option<Sample> {
        self.queue.front().map(|&(time, value)| Sample::new(time, value))
    }

    #[inline]
    fn dominated(old: Value, new: Value) -> bool {
        if MAX { old <= new } else { old >= new }
    }
}

impl<const MAX: bool> Indicator for Extremum<MAX> {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let time = sample.time();
        let output = match sample.value() {
            Some(value) => {
                while self
                    .queue
                    .back()
                    .is_some_and(|&(_, back)| Self::dominated(back, value))
                {
                    self.queue.pop_back();
                }

                self.queue.push_back((time, value));

                let period = self.config.period().as_delta();
                while self
                    .queue
                    .front()
                    .is_some_and(|&(front, _)| time - front >= period)
                {
                    self.queue.pop_front();
                }

                Sample::at(time, self.queue.front().map(|&(_, extreme)| extreme))
            }
            None => Sample::undefined(time),
        };

        self.current = Some(output);
        output
    }

    #[inline]
    fn last(&self) -> Option<Sample> {
        self.current
    }
}

impl<const MAX: bool> Display for Extremum<MAX> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = if MAX { "HIGH" } else { "LOW" };
        write!(f, "{name}({})", self.config.period())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{p, s, series, ts, ts_ms, values};

    fn high(secs: u32) -> High {
        High::new(WindowConfig::new(p(secs)))
    }

    fn low(secs: u32) -> Low {
        Low::new(WindowConfig::new(p(secs)))
    }

    mod high {
        use super::*;

        #[test]
        fn tracks_max_within_window() {
            let mut h = high(10);
            let out = h.batch_insert(&series(&[(0, 5.0), (3, 9.0), (5, 3.0), (11, 4.0)]));
            assert_eq!(values(&out), [Some(5.0), Some(9.0), Some(9.0), Some(9.0)]);
        }

        #[test]
        fn max_expires_after_period() {
            let mut h = high(10);
            h.batch_insert(&series(&[(0, 5.0), (3, 9.0), (5, 3.0), (11, 4.0)]));
            // t=13: window (3, 13], the 9.0 at t=3 is exactly 10s old
            assert_eq!(h.insert(s(13, 1.0)).value(), Some(4.0));
        }

        #[test]
        fn output_time_is_input_time() {
            let mut h = high(10);
            h.insert(s(0, 9.0));
            assert_eq!(h.insert(s(4, 1.0)).time(), ts(4));
        }

        #[test]
        fn extremum_keeps_original_timestamp() {
            let mut h = high(10);
            h.insert(s(0, 9.0));
            h.insert(s(4, 1.0));
            assert_eq!(h.extremum(), Some(s(0, 9.0)));
        }

        #[test]
        fn newer_tie_replaces_older() {
            let mut h = high(10);
            h.insert(s(0, 7.0));
            h.insert(s(2, 7.0));
            assert_eq!(h.extremum(), Some(s(2, 7.0)));
            assert_eq!(h.queue.len(), 1);
        }

        #[test]
        fn same_timestamp_samples() {
            let mut h = high(1);
            h.insert(s(5, 1.0));
            assert_eq!(h.insert(s(5, 3.0)).value(), Some(3.0));
            assert_eq!(h.insert(s(5, 2.0)).value(), Some(3.0));
        }

        #[test]
        fn sub_second_period() {
            let mut h = High::new(WindowConfig::new(crate::Period::millis(500)));
            h.insert(Sample::new(ts_ms(0), 10.0));
            assert_eq!(h.insert(Sample::new(ts_ms(499), 1.0)).value(), Some(10.0));
            assert_eq!(h.insert(Sample::new(ts_ms(500), 2.0)).value(), Some(2.0));
        }
    }

    mod low {
        use super::*;

        #[test]
        fn tracks_min_within_window() {
            let mut l = low(10);
            let out = l.batch_insert(&series(&[(0, 5.0), (3, 2.0), (5, 8.0), (13, 6.0)]));
            assert_eq!(values(&out), [Some(5.0), Some(2.0), Some(2.0), Some(6.0)]);
        }

        #[test]
        fn newer_tie_replaces_older() {
            let mut l = low(10);
            l.insert(s(0, 1.0));
            l.insert(s(3, 1.0));
            assert_eq!(l.extremum(), Some(s(3, 1.0)));
        }
    }

    mod undefined_input {
        use super::*;

        #[test]
        fn emits_undefined_and_keeps_state() {
            let mut h = high(10);
            h.insert(s(0, 4.0));
            assert!(!h.insert(Sample::undefined(ts(1))).is_defined());
            assert_eq!(h.insert(s(2, 1.0)).value(), Some(4.0));
        }

        #[test]
        fn extremum_is_none_before_defined_input() {
            let mut h = high(10);
            h.insert(Sample::undefined(ts(0)));
            assert_eq!(h.extremum(), None);
        }
    }

    mod display {
        use super::*;

        #[test]
        fn formats_correctly() {
            assert_eq!(high(10).to_string(), "HIGH(10s)");
            assert_eq!(low(5).to_string(), "LOW(5s)");
        }
    }

    mod clone {
        use super::*;

        #[test]
        fn produces_independent_state() {
            let mut h = high(10);
            h.insert(s(0, 5.0));
            let mut cloned = h.clone();

            assert_eq!(h.insert(s(1, 8.0)).value(), Some(8.0));
            assert_eq!(cloned.insert(s(1, 2.0)).value(), Some(5.0));
        }
    }

    mod invariants {
        use super::*;
        use proptest::prelude::*;

        fn stream() -> impl Strategy<Value = Vec<(i64, f64)>> {
            prop::collection::vec((0i64..4_000, -1_000.0f64..1_000.0), 1..200)
        }

        fn to_samples(steps: &[(i64, f64)]) -> Vec<Sample> {
            let mut now = 0;
            steps
                .iter()
                .map(|&(gap, value)| {
                    now += gap;
                    Sample::new(ts_ms(now), value)
                })
                .collect()
        }

        fn check<const MAX: bool>(samples: &[Sample], period_ms: u32) {
            let period = crate::Period::millis(period_ms);
            let mut ext = Extremum::<MAX>::new(WindowConfig::new(period));

            for (i, sample) in samples.iter().enumerate() {
                let out = ext.insert(*sample);
                let now = sample.time();

                // monotonic in time (strictly) and value (non-strictly)
                for pair in ext.queue.iter().collect::<Vec<_>>().windows(2) {
                    let (t0, v0) = *pair[0];
                    let (t1, v1) = *pair[1];
                    assert!(t0 <= t1);
                    if MAX {
                        assert!(v0 > v1);
                    } else {
                        assert!(v0 < v1);
                    }
                }

                // brute-force extremum over the window (now - period, now]
                let in_window = samples[..=i]
                    .iter()
                    .filter(|x| now - x.time() < period.as_delta())
                    .filter_map(Sample::value);
                let expected = if MAX {
                    in_window.fold(f64::NEG_INFINITY, f64::max)
                } else {
                    in_window.fold(f64::INFINITY, f64::min)
                };

                assert_eq!(out.value(), Some(expected));
                assert_eq!(out.time(), now);
            }
        }

        proptest! {
            #[test]
            fn high_matches_brute_force(steps in stream(), period_ms in 1u32..10_000) {
                check::<true>(&to_samples(&steps), period_ms);
            }

            #[test]
            fn low_matches_brute_force(steps in stream(), period_ms in 1u32..10_000) {
                check::<false>(&to_samples(&steps), period_ms);
            }
        }
    }
}
