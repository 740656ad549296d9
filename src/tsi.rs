use std::fmt::Display;

use crate::{
    Ema, FastSlowConfig, Indicator, Piped, Sample, Value, WindowConfig,
    indicator::assert_ordered,
};

/// True Strength Index (TSI).
///
/// Double-smoothed momentum: the change against the previous sample and its
/// absolute value are each smoothed by a slow [`Ema`] and then by a fast
/// one:
///
/// ```text
/// TSI = 100 × EMA_fast(EMA_slow(Δ)) / EMA_fast(EMA_slow(|Δ|))
/// ```
///
/// Undefined on the first sample and whenever the smoothed absolute change
/// is zero (a perfectly flat history).
#[derive(Clone, Debug)]
pub struct Tsi {
    config: FastSlowConfig,
    momentum: Piped<Ema, Ema>,
    magnitude: Piped<Ema, Ema>,
    previous: Option<Value>,
    current: Option<Sample>,
}

impl Tsi {
    #[must_use]
    pub fn new(config: FastSlowConfig) -> Self {
        let chain = || {
            Piped::new(
                Ema::new(WindowConfig::new(config.slow())),
                Ema::new(WindowConfig::new(config.fast())),
            )
        };

        Self {
            config,
            momentum: chain(),
            magnitude: chain(),
            previous: None,
            current: None,
        }
    }
}

impl Indicator for Tsi {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let time = sample.time();
        let output = match (sample.value(), self.previous) {
            (Some(value), Some(prev)) => {
                self.previous = Some(value);

                let change = value - prev;
                let momentum = self.momentum.insert(Sample::new(time, change)).value();
                let magnitude = self
                    .magnitude
                    .insert(Sample::new(time, change.abs()))
                    .value();

                let index = momentum.zip(magnitude).and_then(|(momentum, magnitude)| {
                    if magnitude == 0.0 {
                        tracing::trace!(%time, "tsi undefined: zero smoothed magnitude");
                        None
                    } else {
                        Some(100.0 * momentum / magnitude)
                    }
                });

                Sample::at(time, index)
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

impl Display for Tsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TSI({}, {})", self.config.fast(), self.config.slow())
    }
}
