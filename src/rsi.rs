use std::fmt::Display;

use crate::{Ema, Indicator, Sample, Value, WindowConfig, indicator::assert_ordered};

/// Relative Strength Index (RSI) with continuous-time smoothing.
///
/// Measures the balance of recent gains and losses on a 0–100 scale.
/// Each change against the previous sample is split into a gain and a
/// loss (one of them zero), and each side is smoothed by its own [`Ema`]
/// with the configured time constant:
///
/// ```text
/// RSI = 100 − 100 / (1 + up / down)
/// ```
///
/// When the smoothed loss is exactly zero the RSI is `100`. The first
/// sample only seeds the previous value and yields undefined.
///
/// # Example
///
/// ```
/// use talive::{Period, Rsi, Sample, WindowConfig};
/// use chrono::DateTime;
///
/// let t = |secs| DateTime::from_timestamp(secs, 0).unwrap();
/// let mut rsi = Rsi::new(WindowConfig::new(Period::seconds(14)));
///
/// assert!(!rsi.insert(Sample::new(t(0), 10.0)).is_defined());
/// assert_eq!(rsi.insert(Sample::new(t(1), 11.0)).value(), Some(100.0));
/// ```
#[derive(Clone, Debug)]
pub struct Rsi {
    config: WindowConfig,
    up: Ema,
    down: Ema,
    previous: Option<Value>,
    current: Option<Sample>,
}

impl Rsi {
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            up: Ema::new(config),
            down: Ema::new(config),
            previous: None,
            current: None,
        }
    }

    #[inline]
    fn rsi_from_averages(up: Value, down: Value) -> Value {
        if down == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + up / down)
        }
    }
}

impl Indicator for Rsi {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let time = sample.time();
        let output = match (sample.value(), self.previous) {
            (Some(value), Some(prev)) => {
                self.previous = Some(value);

                let change = value - prev;
                let (gain, loss) = if change > 0.0 {
                    (change, 0.0)
                } else {
                    (0.0, -change)
                };

                let up = self.up.insert(Sample::new(time, gain)).value();
                let down = self.down.insert(Sample::new(time, loss)).value();

                Sample::at(
                    time,
                    up.zip(down)
                        .map(|(up, down)| Self::rsi_from_averages(up, down)),
                )
            }
            (Some(value), None) => {
                self.previous = Some(value);
                Sample::undefined(time)
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

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({})", self.config.period())
    }
}
