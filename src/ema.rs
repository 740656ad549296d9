use std::fmt::Display;

use crate::{Indicator, Sample, Timestamp, Value, WindowConfig, indicator::assert_ordered};

/// Continuous-time Exponential Moving Average (EMA).
///
/// The configured period is the e-folding time constant `τ`: the weight of
/// past values decays to `1/e` after `τ` has elapsed. For a new sample at
/// `t` and the previous output `v₀` at `t₀`:
///
/// ```text
/// factor = exp(−(t − t₀) / τ)
/// EMA    = factor × v₀ + (1 − factor) × value
/// ```
///
/// This is the exact solution of exponential decay for irregular sampling
/// intervals, not the fixed-α bar EMA. Samples at the same timestamp leave
/// the output unchanged (`factor = 1`).
///
/// The first defined sample is returned unchanged. The previous output is
/// the entire state: O(1) memory and time per update.
///
/// # Example
///
/// ```
/// use talive::{Ema, Period, Sample, WindowConfig};
/// use chrono::DateTime;
///
/// let t = |secs| DateTime::from_timestamp(secs, 0).unwrap();
/// let mut ema = Ema::new(WindowConfig::new(Period::seconds(1)));
///
/// assert_eq!(ema.insert(Sample::new(t(0), 10.0)).value(), Some(10.0));
///
/// // after one time constant, 1/e of the old value remains
/// let e = std::f64::consts::E;
/// let v = ema.insert(Sample::new(t(1), 20.0)).value().unwrap();
/// assert!((v - (10.0 / e + 20.0 * (1.0 - 1.0 / e))).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    config: WindowConfig,
    previous: Option<(Timestamp, Value)>,
    current: Option<Sample>,
}

impl Ema {
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            previous: None,
            current: None,
        }
    }
}

impl Indicator for Ema {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let time = sample.time();
        let output = match (sample.value(), self.previous) {
            (Some(value), None) => {
                self.previous = Some((time, value));
                Sample::new(time, value)
            }
            (Some(value), Some((prev_time, prev_value))) => {
                let factor = (-self.config.period().ratio(time - prev_time)).exp();
                let smoothed = factor.mul_add(prev_value - value, value);

                self.previous = Some((time, smoothed));
                Sample::new(time, smoothed)
            }
            (None, _) => Sample::undefined(time),
        };

        self.current = Some(output);
        output
    }

    #[inline]
    fn last(&self) -> Option<Sample> {
        self.current
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({})", self.config.period())
    }
}
