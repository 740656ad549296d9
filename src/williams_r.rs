use std::fmt::Display;

use crate::{High, Indicator, Low, Sample, WindowConfig, indicator::assert_ordered};

/// Williams %R.
///
/// Distance of the latest value below the trailing high, scaled to
/// `[-100, 0]`:
///
/// ```text
/// %R = −100 × (high − value) / (high − low)
/// ```
///
/// A value sitting on the trailing low reads `-100` even when the range is
/// empty, so the first sample yields `-100`. Otherwise an empty range
/// (`high == low`) is undefined.
#[derive(Clone, Debug)]
pub struct WilliamsR {
    config: WindowConfig,
    high: High,
    low: Low,
    current: Option<Sample>,
}

impl WilliamsR {
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            high: High::new(config),
            low: Low::new(config),
            current: None,
        }
    }
}

impl Indicator for WilliamsR {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let time = sample.time();
        let high = self.high.insert(sample).value();
        let low = self.low.insert(sample).value();

        let percent = sample
            .value()
            .zip(high.zip(low))
            .and_then(|(value, (high, low))| {
                if value == low {
                    Some(-100.0)
                } else if high == low {
                    tracing::trace!(%time, "williams %r undefined: empty range");
                    None
                } else {
                    Some(-100.0 * (high - value) / (high - low))
                }
            });

        let output = Sample::at(time, percent);
        self.current = Some(output);
        output
    }

    #[inline]
    fn last(&self) -> Option<Sample> {
        self.current
    }
}

impl Display for WilliamsR {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WILLR({})", self.config.period())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{p, s, series, ts, values};

    fn willr(secs: u32) -> WilliamsR {
        WilliamsR::new(WindowConfig::new(p(secs)))
    }

    #[test]
    fn first_sample_sits_on_low() {
        assert_eq!(willr(14).insert(s(0, 10.0)).value(), Some(-100.0));
    }

    #[test]
    fn scales_between_low_and_high() {
        let mut willr = willr(10);
        let out = willr.batch_insert(&series(&[(0, 10.0), (1, 20.0), (2, 15.0), (3, 10.0)]));
        assert_eq!(values(&out), [Some(-100.0), Some(0.0), Some(-50.0), Some(-100.0)]);
    }

    #[test]
    fn value_on_low_wins_over_empty_range() {
        let mut willr = willr(10);
        willr.insert(s(0, 5.0));
        assert_eq!(willr.insert(s(1, 5.0)).value(), Some(-100.0));
    }

    #[test]
    fn collapsed_window_reads_minus_100() {
        // the window holds just the new sample, both high and low
        let mut willr = willr(1);
        willr.insert(s(0, 1.0));
        assert_eq!(willr.insert(s(5, 9.0)).value(), Some(-100.0));
    }

    #[test]
    fn undefined_input_propagates() {
        let mut willr = willr(10);
        willr.insert(s(0, 1.0));
        assert!(!willr.insert(Sample::undefined(ts(1))).is_defined());
        assert_eq!(willr.insert(s(2, 3.0)).value(), Some(0.0));
    }

    #[test]
    fn display() {
        assert_eq!(willr(14).to_string(), "WILLR(14s)");
    }
}
