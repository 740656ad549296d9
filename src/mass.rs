use std::fmt::Display;

use crate::{
    Ema, High, Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorError, Low, Period,
    Sample, Sum, WindowConfig, indicator::assert_ordered,
};

/// Configuration for the Mass Index ([`Mass`]) indicator.
///
/// - `fast`: time constant of both range smoothers.
/// - `slow`: window of the final sum.
/// - `bar`: window defining the high/low range.
///
/// # Example
///
/// ```
/// use talive::{IndicatorConfig, IndicatorConfigBuilder, MassConfig, Period};
///
/// let config = MassConfig::builder()
///     .fast(Period::seconds(9))
///     .slow(Period::seconds(25))
///     .bar(Period::minutes(1))
///     .build();
///
/// assert_eq!(config.to_string(), "MassConfig(9s, 25s, 60s)");
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MassConfig {
    fast: Period,
    slow: Period,
    bar: Period,
}

impl MassConfig {
    #[must_use]
    pub fn new(fast: Period, slow: Period, bar: Period) -> Self {
        Self { fast, slow, bar }
    }

    #[inline]
    #[must_use]
    pub fn fast(&self) -> Period {
        self.fast
    }

    #[inline]
    #[must_use]
    pub fn slow(&self) -> Period {
        self.slow
    }

    #[inline]
    #[must_use]
    pub fn bar(&self) -> Period {
        self.bar
    }
}

impl IndicatorConfig for MassConfig {
    type Builder = MassConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MassConfigBuilder {
            fast: None,
            slow: None,
            bar: None,
        }
    }
}

impl Display for MassConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MassConfig({}, {}, {})", self.fast, self.slow, self.bar)
    }
}

/// Builder for [`MassConfig`].
///
/// All three periods must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct MassConfigBuilder {
    fast: Option<Period>,
    slow: Option<Period>,
    bar: Option<Period>,
}

impl MassConfigBuilder {
    #[inline]
    #[must_use]
    pub fn fast(mut self, fast: Period) -> Self {
        self.fast.replace(fast);
        self
    }

    #[inline]
    #[must_use]
    pub fn slow(mut self, slow: Period) -> Self {
        self.slow.replace(slow);
        self
    }

    #[inline]
    #[must_use]
    pub fn bar(mut self, bar: Period) -> Self {
        self.bar.replace(bar);
        self
    }
}

impl IndicatorConfigBuilder<MassConfig> for MassConfigBuilder {
    #[inline]
    fn try_build(self) -> Result<MassConfig, IndicatorError> {
        Ok(MassConfig {
            fast: self.fast.ok_or(IndicatorError::MissingParameter("fast period"))?,
            slow: self.slow.ok_or(IndicatorError::MissingParameter("slow period"))?,
            bar: self.bar.ok_or(IndicatorError::MissingParameter("bar period"))?,
        })
    }
}

/// Normalized Mass Index.
///
/// Tracks range expansion: the bar range `high − low` is smoothed once and
/// again, and the gap between the two smoothers, normalized by the bar
/// midpoint scale `high + low`, is summed over the slow window:
///
/// ```text
/// e₁   = EMA_fast(high − low)
/// e₂   = EMA_fast(e₁)
/// Mass = SUM_slow((e₁ − e₂) / (high + low))
/// ```
///
/// Undefined when `high + low` is zero; that step is left out of the sum.
#[derive(Clone, Debug)]
pub struct Mass {
    config: MassConfig,
    high: High,
    low: Low,
    single: Ema,
    double: Ema,
    sum: Sum,
    current: Option<Sample>,
}

impl Mass {
    #[must_use]
    pub fn new(config: MassConfig) -> Self {
        let bar = WindowConfig::new(config.bar());
        let fast = WindowConfig::new(config.fast());

        Self {
            config,
            high: High::new(bar),
            low: Low::new(bar),
            single: Ema::new(fast),
            double: Ema::new(fast),
            sum: Sum::new(WindowConfig::new(config.slow())),
            current: None,
        }
    }
}

impl Indicator for Mass {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let time = sample.time();
        let output = match self.high.insert(sample).value().zip(self.low.insert(sample).value()) {
            Some((high, low)) => {
                let single = self.single.insert(Sample::new(time, high - low));
                let double = self.double.insert(single);

                let scale = high + low;
                if scale == 0.0 {
                    tracing::trace!(%time, "mass undefined: zero range scale");
                    Sample::undefined(time)
                } else {
                    let gap = single.value().zip(double.value());
                    match gap {
                        Some((single, double)) => self
                            .sum
                            .insert(Sample::new(time, (single - double) / scale)),
                        None => Sample::undefined(time),
                    }
                }
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

impl Display for Mass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MASS({}, {}, {})",
            self.config.fast(),
            self.config.slow(),
            self.config.bar()
        )
    }
}
