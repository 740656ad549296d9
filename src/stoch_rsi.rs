use std::fmt::Display;

use crate::{Indicator, Piped, Rsi, Sample, Stoch, WindowConfig};

/// Stochastic RSI.
///
/// [`Rsi`] piped into a [`Stoch`] with the same period: where the current
/// RSI sits inside its own trailing range, as a fraction in `[0, 1]`.
///
/// Undefined whenever the RSI is undefined (the RSI sample is then not fed
/// to the stochastic stage) or the RSI range is empty.
#[derive(Clone, Debug)]
pub struct StochRsi {
    config: WindowConfig,
    pipe: Piped<Rsi, Stoch>,
}

impl StochRsi {
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            pipe: Piped::new(Rsi::new(config), Stoch::new(config)),
        }
    }

    /// The underlying RSI stage.
    #[inline]
    #[must_use]
    pub fn rsi(&self) -> &Rsi {
        self.pipe.first()
    }
}

impl Indicator for StochRsi {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        self.pipe.insert(sample)
    }

    #[inline]
    fn last(&self) -> Option<Sample> {
        self.pipe.last()
    }
}

impl Display for StochRsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "STOCHRSI({})", self.config.period())
    }
}
