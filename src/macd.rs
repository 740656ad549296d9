use std::fmt::Display;

use crate::{
    Ema, Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorError, Period, Sample,
    WindowConfig, indicator::assert_ordered,
};

/// Configuration for the MACD ([`Macd`]) indicator.
///
/// # Example
///
/// ```
/// use talive::{IndicatorConfig, IndicatorConfigBuilder, MacdConfig, Period};
///
/// let config = MacdConfig::builder()
///     .fast(Period::seconds(12))
///     .slow(Period::seconds(26))
///     .build();
///
/// assert!(!config.is_normalized());
/// assert_eq!(config, MacdConfig::plain(Period::seconds(12), Period::seconds(26)));
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdConfig {
    fast: Period,
    slow: Period,
    normalized: bool,
}

impl MacdConfig {
    /// `EMA_fast − EMA_slow`.
    #[must_use]
    pub fn plain(fast: Period, slow: Period) -> Self {
        Self {
            fast,
            slow,
            normalized: false,
        }
    }

    /// `(EMA_fast − EMA_slow) / EMA_slow`.
    #[must_use]
    pub fn normalized(fast: Period, slow: Period) -> Self {
        Self {
            fast,
            slow,
            normalized: true,
        }
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

    /// Whether the spread is divided by the slow EMA.
    #[inline]
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }
}

impl IndicatorConfig for MacdConfig {
    type Builder = MacdConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MacdConfigBuilder::new()
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MacdConfig({}, {}", self.fast, self.slow)?;
        if self.normalized {
            write!(f, ", normalized")?;
        }
        write!(f, ")")
    }
}

/// Builder for [`MacdConfig`].
///
/// Defaults: not normalized.
/// Fast and slow periods must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct MacdConfigBuilder {
    fast: Option<Period>,
    slow: Option<Period>,
    normalized: bool,
}

impl MacdConfigBuilder {
    fn new() -> Self {
        Self {
            fast: None,
            slow: None,
            normalized: false,
        }
    }

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
    pub fn normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }
}

impl IndicatorConfigBuilder<MacdConfig> for MacdConfigBuilder {
    #[inline]
    fn try_build(self) -> Result<MacdConfig, IndicatorError> {
        Ok(MacdConfig {
            fast: self.fast.ok_or(IndicatorError::MissingParameter("fast period"))?,
            slow: self.slow.ok_or(IndicatorError::MissingParameter("slow period"))?,
            normalized: self.normalized,
        })
    }
}

/// Moving Average Convergence/Divergence (MACD) line.
///
/// Difference between a fast and a slow [`Ema`]. The normalized variant
/// divides by the slow EMA, making the line comparable across price scales:
///
/// ```text
/// MACD            = EMA_fast − EMA_slow
/// normalized MACD = (EMA_fast − EMA_slow) / EMA_slow
/// ```
///
/// The normalized line is undefined when the slow EMA is zero.
///
/// # Example
///
/// ```
/// use talive::{Macd, MacdConfig, Period, Sample};
/// use chrono::DateTime;
///
/// let t = |secs| DateTime::from_timestamp(secs, 0).unwrap();
/// let mut macd = Macd::new(MacdConfig::plain(Period::seconds(12), Period::seconds(26)));
///
/// assert_eq!(macd.insert(Sample::new(t(0), 100.0)).value(), Some(0.0));
/// assert!(macd.insert(Sample::new(t(5), 110.0)).value().unwrap() > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
    fast: Ema,
    slow: Ema,
    current: Option<Sample>,
}

impl Macd {
    #[must_use]
    pub fn new(config: MacdConfig) -> Self {
        Self {
            config,
            fast: Ema::new(WindowConfig::new(config.fast())),
            slow: Ema::new(WindowConfig::new(config.slow())),
            current: None,
        }
    }
}

impl Indicator for Macd {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let time = sample.time();
        let fast = self.fast.insert(sample).value();
        let slow = self.slow.insert(sample).value();

        let line = fast.zip(slow).and_then(|(fast, slow)| {
            if !self.config.is_normalized() {
                Some(fast - slow)
            } else if slow == 0.0 {
                tracing::trace!(%time, "macd undefined: zero slow average");
                None
            } else {
                Some((fast - slow) / slow)
            }
        });

        let output = Sample::at(time, line);
        self.current = Some(output);
        output
    }

    #[inline]
    fn last(&self) -> Option<Sample> {
        self.current
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = if self.config.is_normalized() { "NMACD" } else { "MACD" };
        write!(f, "{name}({}, {})", self.config.fast(), self.config.slow())
    }
}
