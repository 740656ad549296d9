use std::fmt::Display;

use crate::{
    Indicator, Sample, Value, WindowConfig,
    indicator::assert_ordered,
    window::{SummingWindow, TimeWindow},
};

/// Trailing-window sum.
///
/// Keeps the in-window samples and a running total: each insert appends the
/// new value and subtracts every value that aged out of
/// `(now - period, now]`. Amortized O(1) per update.
///
/// # Example
///
/// ```
/// use talive::{Period, Sample, Sum, WindowConfig};
/// use chrono::DateTime;
///
/// let t = |secs| DateTime::from_timestamp(secs, 0).unwrap();
/// let mut sum = Sum::new(WindowConfig::new(Period::seconds(2)));
///
/// assert_eq!(sum.insert(Sample::new(t(0), 10.0)).value(), Some(10.0));
/// assert_eq!(sum.insert(Sample::new(t(1), 20.0)).value(), Some(30.0));
/// assert_eq!(sum.insert(Sample::new(t(2), 30.0)).value(), Some(50.0));
/// ```
#[derive(Clone, Debug)]
pub struct Sum {
    config: WindowConfig,
    window: SummingWindow,
    current: Option<Sample>,
}

impl Sum {
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            window: TimeWindow::with_running_sum(config.period().as_delta()),
            current: None,
        }
    }

    /// Running total of the in-window values.
    #[inline]
    #[must_use]
    pub fn total(&self) -> Value {
        self.window.sum()
    }
}

impl Indicator for Sum {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let output = match sample.value() {
            Some(value) => {
                self.window.push(sample.time(), value);
                Sample::new(sample.time(), self.window.sum())
            }
            None => Sample::undefined(sample.time()),
        };

        self.current = Some(output);
        output
    }

    #[inline]
    fn last(&self) -> Option<Sample> {
        self.current
    }
}

impl Display for Sum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SUM({})", self.config.period())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{p, s, series, ts, ts_ms, values};

    fn sum(secs: u32) -> Sum {
        Sum::new(WindowConfig::new(p(secs)))
    }

    #[test]
    fn accumulates_until_samples_age_out() {
        let mut sum = sum(3);
        let out = sum.batch_insert(&series(&[(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0), (10, 5.0)]));
        assert_eq!(
            values(&out),
            [Some(1.0), Some(3.0), Some(6.0), Some(9.0), Some(5.0)]
        );
    }

    #[test]
    fn total_matches_last_output() {
        let mut sum = sum(3);
        sum.insert(s(0, 1.5));
        sum.insert(s(1, 2.5));
        assert_eq!(sum.total(), 4.0);
    }

    #[test]
    fn undefined_input_does_not_touch_total() {
        let mut sum = sum(3);
        sum.insert(s(0, 1.0));
        assert!(!sum.insert(Sample::undefined(ts(1))).is_defined());
        assert_eq!(sum.total(), 1.0);
        assert_eq!(sum.insert(s(2, 2.0)).value(), Some(3.0));
    }

    #[test]
    fn display() {
        assert_eq!(sum(60).to_string(), "SUM(60s)");
    }

    mod invariants {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn total_equals_window_sum(
                steps in prop::collection::vec((0i64..3_000, -100.0f64..100.0), 1..200),
                period_ms in 1u32..10_000,
            ) {
                let mut sum = Sum::new(WindowConfig::new(crate::Period::millis(period_ms)));
                let mut now = 0;
                let mut seen = Vec::new();

                for (gap, value) in steps {
                    now += gap;
                    seen.push(ts_ms(now));
                    let out = sum.insert(Sample::new(ts_ms(now), value));

                    let recomputed: f64 = sum.window.iter().map(|&(_, v)| v).sum();
                    prop_assert!((sum.total() - recomputed).abs() < 1e-6);
                    prop_assert_eq!(out.value(), Some(sum.total()));

                    // exactly the samples younger than one period are retained
                    let period = sum.config.period().as_delta();
                    let younger = seen.iter().filter(|&&t| ts_ms(now) - t < period).count();
                    prop_assert_eq!(sum.window.len(), younger);
                    prop_assert!(sum.window.iter().all(|&(t, _)| ts_ms(now) - t < period));
                }
            }
        }
    }
}
