use std::fmt::Display;

use crate::{
    Indicator, Sample, WindowConfig,
    indicator::assert_ordered,
    window::{SummingWindow, TimeWindow},
};

/// Trailing-window arithmetic mean (MA).
///
/// Mean of the samples inside `(now - period, now]`, weighting every sample
/// equally regardless of spacing. Uses a running sum for O(1) amortized
/// updates; the window always holds the sample just inserted, so the mean
/// is defined from the first defined input on.
///
/// # Example
///
/// ```
/// use talive::{Ma, Period, Sample, WindowConfig};
/// use chrono::DateTime;
///
/// let t = |secs| DateTime::from_timestamp(secs, 0).unwrap();
/// let mut ma = Ma::new(WindowConfig::new(Period::seconds(2)));
///
/// assert_eq!(ma.insert(Sample::new(t(0), 10.0)).value(), Some(10.0));
/// assert_eq!(ma.insert(Sample::new(t(1), 20.0)).value(), Some(15.0));
/// // t=0 aged out: window is (0s, 2s]
/// assert_eq!(ma.insert(Sample::new(t(2), 30.0)).value(), Some(25.0));
/// ```
#[derive(Clone, Debug)]
pub struct Ma {
    config: WindowConfig,
    window: SummingWindow,
    current: Option<Sample>,
}

impl Ma {
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            window: TimeWindow::with_running_sum(config.period().as_delta()),
            current: None,
        }
    }

    /// Number of samples currently inside the window.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.len() == 0
    }
}

impl Indicator for Ma {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let output = match sample.value() {
            Some(value) => {
                self.window.push(sample.time(), value);

                #[allow(clippy::cast_precision_loss)]
                let mean = self.window.sum() / self.window.len() as f64;
                Sample::new(sample.time(), mean)
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

impl Display for Ma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MA({})", self.config.period())
    }
}
