use std::fmt::Display;

use crate::{Ema, FastSlowConfig, Indicator, Sample, WindowConfig, indicator::assert_ordered};

/// Percentage Price Oscillator (PPO).
///
/// Spread between a fast and a slow [`Ema`] relative to the slow one:
///
/// ```text
/// PPO = (EMA_fast − EMA_slow) / EMA_slow × 100
/// ```
///
/// Undefined when the slow EMA is zero.
#[derive(Clone, Debug)]
pub struct Ppo {
    config: FastSlowConfig,
    fast: Ema,
    slow: Ema,
    current: Option<Sample>,
}

impl Ppo {
    #[must_use]
    pub fn new(config: FastSlowConfig) -> Self {
        Self {
            config,
            fast: Ema::new(WindowConfig::new(config.fast())),
            slow: Ema::new(WindowConfig::new(config.slow())),
            current: None,
        }
    }
}

impl Indicator for Ppo {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let time = sample.time();
        let fast = self.fast.insert(sample).value();
        let slow = self.slow.insert(sample).value();

        let spread = fast.zip(slow).and_then(|(fast, slow)| {
            if slow == 0.0 {
                tracing::trace!(%time, "ppo undefined: zero slow average");
                None
            } else {
                Some((fast - slow) / slow * 100.0)
            }
        });

        let output = Sample::at(time, spread);
        self.current = Some(output);
        output
    }

    #[inline]
    fn last(&self) -> Option<Sample> {
        self.current
    }
}

impl Display for Ppo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PPO({}, {})", self.config.fast(), self.config.slow())
    }
}
