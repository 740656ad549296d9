use std::fmt::Display;

use crate::{High, Indicator, Ma, Sample, WindowConfig, indicator::assert_ordered};

/// Ulcer Index.
///
/// Root-mean-square of the percent drawdown from the trailing high, so deep
/// and lasting drawdowns weigh more than brief dips:
///
/// ```text
/// drawdown = (value − high) / high × 100
/// Ulcer    = √MA(drawdown²)
/// ```
///
/// Rounding can leave the running mean of squares at or slightly below
/// zero; such a mean reads as `0`. Undefined when the trailing high is zero.
#[derive(Clone, Debug)]
pub struct Ulcer {
    config: WindowConfig,
    high: High,
    mean_square: Ma,
    current: Option<Sample>,
}

impl Ulcer {
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            high: High::new(config),
            mean_square: Ma::new(config),
            current: None,
        }
    }
}

impl Indicator for Ulcer {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let time = sample.time();
        let high = self.high.insert(sample).value();

        let drawdown = sample.value().zip(high).and_then(|(value, high)| {
            if high == 0.0 {
                tracing::trace!(%time, "ulcer undefined: zero high");
                None
            } else {
                Some((value - high) / high * 100.0)
            }
        });

        let output = match drawdown {
            Some(drawdown) => {
                let squared = Sample::new(time, drawdown * drawdown);
                let index = self.mean_square.insert(squared).value().map(|mean| {
                    if mean <= 0.0 {
                        tracing::trace!(%time, mean, "ulcer clamped non-positive mean square");
                        0.0
                    } else {
                        mean.sqrt()
                    }
                });

                Sample::at(time, index)
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

impl Display for Ulcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ULCER({})", self.config.period())
    }
}
