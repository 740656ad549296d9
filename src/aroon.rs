use std::fmt::Display;

use crate::{
    High, Indicator, Low, Sample, Timestamp, Value, WindowConfig, indicator::assert_ordered,
};

/// Aroon oscillator.
///
/// Measures how recently the trailing high and low were set. Each side
/// scores `100` when its extremum is the current sample and falls linearly
/// towards `0` as the extremum ages across the window:
///
/// ```text
/// up   = 100 × (1 − (now − time_of_high) / period)
/// down = 100 × (1 − (now − time_of_low)  / period)
/// Aroon = up − down
/// ```
///
/// Ages use the original timestamps of the retained extremes, so irregular
/// sampling is measured in real time rather than sample counts. The two
/// components of the last output are available through [`up`](Self::up)
/// and [`down`](Self::down).
///
/// # Example
///
/// ```
/// use talive::{Aroon, Period, Sample, WindowConfig};
/// use chrono::DateTime;
///
/// let t = |secs| DateTime::from_timestamp(secs, 0).unwrap();
/// let mut aroon = Aroon::new(WindowConfig::new(Period::seconds(10)));
///
/// aroon.insert(Sample::new(t(0), 5.0));
/// // new high now, low set 5s ago: 100 − 50
/// assert_eq!(aroon.insert(Sample::new(t(5), 8.0)).value(), Some(50.0));
/// assert_eq!(aroon.up(), Some(100.0));
/// assert_eq!(aroon.down(), Some(50.0));
/// ```
#[derive(Clone, Debug)]
pub struct Aroon {
    config: WindowConfig,
    high: High,
    low: Low,
    components: Option<(Value, Value)>,
    current: Option<Sample>,
}

impl Aroon {
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            high: High::new(config),
            low: Low::new(config),
            components: None,
            current: None,
        }
    }

    /// Aroon Up of the last output, or `None` if it was undefined.
    #[inline]
    #[must_use]
    pub fn up(&self) -> Option<Value> {
        self.components.map(|(up, _)| up)
    }

    /// Aroon Down of the last output, or `None` if it was undefined.
    #[inline]
    #[must_use]
    pub fn down(&self) -> Option<Value> {
        self.components.map(|(_, down)| down)
    }

    #[inline]
    fn recency(&self, now: Timestamp, extreme: Sample) -> Value {
        100.0 * (1.0 - self.config.period().ratio(now - extreme.time()))
    }
}

impl Indicator for Aroon {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let time = sample.time();
        self.high.insert(sample);
        self.low.insert(sample);

        self.components = if sample.is_defined() {
            self.high
                .extremum()
                .zip(self.low.extremum())
                .map(|(high, low)| (self.recency(time, high), self.recency(time, low)))
        } else {
            None
        };

        let output = Sample::at(time, self.components.map(|(up, down)| up - down));
        self.current = Some(output);
        output
    }

    #[inline]
    fn last(&self) -> Option<Sample> {
        self.current
    }
}

impl Display for Aroon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AROON({})", self.config.period())
    }
}
