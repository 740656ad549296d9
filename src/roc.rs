use std::fmt::Display;

use crate::{
    Indicator, Sample, WindowConfig,
    indicator::assert_ordered,
    window::{Boundary, TimeWindow},
};

/// Rate of Change (ROC) in percent.
///
/// Change of the latest value relative to the oldest sample still inside
/// the trailing window `(now - period, now]`:
///
/// ```text
/// ROC = (value − oldest) / oldest × 100
/// ```
///
/// The first sample compares against itself and reads `0`. Undefined when
/// the oldest retained value is zero.
///
/// # Example
///
/// ```
/// use talive::{Period, Roc, Sample, WindowConfig};
/// use chrono::DateTime;
///
/// let t = |secs| DateTime::from_timestamp(secs, 0).unwrap();
/// let mut roc = Roc::new(WindowConfig::new(Period::seconds(10)));
///
/// roc.insert(Sample::new(t(0), 50.0));
/// assert_eq!(roc.insert(Sample::new(t(5), 55.0)).value(), Some(10.0));
/// ```
#[derive(Clone, Debug)]
pub struct Roc {
    config: WindowConfig,
    window: TimeWindow,
    current: Option<Sample>,
}

impl Roc {
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            window: TimeWindow::new(config.period().as_delta(), Boundary::Open),
            current: None,
        }
    }
}

impl Indicator for Roc {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let time = sample.time();
        let output = match sample.value() {
            Some(value) => {
                self.window.push(time, value);

                let change = self.window.oldest().and_then(|(_, oldest)| {
                    if oldest == 0.0 {
                        tracing::trace!(%time, "roc undefined: zero reference value");
                        None
                    } else {
                        Some((value - oldest) / oldest * 100.0)
                    }
                });

                Sample::at(time, change)
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

impl Display for Roc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ROC({})", self.config.period())
    }
}
