use std::fmt::Display;

use crate::{High, Indicator, Low, Sample, WindowConfig, indicator::assert_ordered};

/// Stochastic oscillator (%K as a fraction).
///
/// Position of the latest value inside the trailing high/low range:
///
/// ```text
/// Stoch = (value − low) / (high − low)
/// ```
///
/// Ranges over `[0, 1]`. Undefined while the range is empty (`high == low`),
/// which includes the first sample.
///
/// # Example
///
/// ```
/// use talive::{Period, Sample, Stoch, WindowConfig};
/// use chrono::DateTime;
///
/// let t = |secs| DateTime::from_timestamp(secs, 0).unwrap();
/// let mut stoch = Stoch::new(WindowConfig::new(Period::seconds(10)));
///
/// assert!(!stoch.insert(Sample::new(t(0), 10.0)).is_defined());
/// stoch.insert(Sample::new(t(1), 20.0));
/// assert_eq!(stoch.insert(Sample::new(t(2), 15.0)).value(), Some(0.5));
/// ```
#[derive(Clone, Debug)]
pub struct Stoch {
    config: WindowConfig,
    high: High,
    low: Low,
    current: Option<Sample>,
}

impl Stoch {
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

impl Indicator for Stoch {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let time = sample.time();
        let high = self.high.insert(sample).value();
        let low = self.low.insert(sample).value();

        let position = sample
            .value()
            .zip(high.zip(low))
            .and_then(|(value, (high, low))| {
                let range = high - low;
                if range == 0.0 {
                    tracing::trace!(%time, "stoch undefined: empty range");
                    None
                } else {
                    Some((value - low) / range)
                }
            });

        let output = Sample::at(time, position);
        self.current = Some(output);
        output
    }

    #[inline]
    fn last(&self) -> Option<Sample> {
        self.current
    }
}

impl Display for Stoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "STOCH({})", self.config.period())
    }
}
