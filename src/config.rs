use std::fmt::Display;

use crate::{IndicatorConfig, IndicatorConfigBuilder, IndicatorError, Period};

/// Configuration for indicators parameterised by a single trailing
/// window or time constant.
///
/// Used by [`High`](crate::High), [`Low`](crate::Low), [`Sum`](crate::Sum),
/// [`Ma`](crate::Ma), [`Ema`](crate::Ema), [`Mad`](crate::Mad),
/// [`TrueRange`](crate::TrueRange), [`Rsi`](crate::Rsi),
/// [`Stoch`](crate::Stoch), [`Roc`](crate::Roc),
/// [`WilliamsR`](crate::WilliamsR), [`StochRsi`](crate::StochRsi),
/// [`Aroon`](crate::Aroon) and [`Ulcer`](crate::Ulcer).
///
/// # Example
///
/// ```
/// use talive::{IndicatorConfig, IndicatorConfigBuilder, Period, WindowConfig};
///
/// let config = WindowConfig::builder().period(Period::seconds(30)).build();
/// assert_eq!(config, WindowConfig::new(Period::seconds(30)));
/// assert_eq!(config.to_string(), "WindowConfig(30s)");
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct WindowConfig {
    period: Period,
}

impl WindowConfig {
    #[must_use]
    pub fn new(period: Period) -> Self {
        Self { period }
    }

    /// Window length, or decay time constant for smoothers.
    #[inline]
    #[must_use]
    pub fn period(&self) -> Period {
        self.period
    }
}

impl IndicatorConfig for WindowConfig {
    type Builder = WindowConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        WindowConfigBuilder { period: None }
    }
}

impl Display for WindowConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WindowConfig({})", self.period)
    }
}

/// Builder for [`WindowConfig`].
///
/// Period must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct WindowConfigBuilder {
    period: Option<Period>,
}

impl WindowConfigBuilder {
    /// Sets the window length.
    #[inline]
    #[must_use]
    pub fn period(mut self, period: Period) -> Self {
        self.period.replace(period);
        self
    }
}

impl IndicatorConfigBuilder<WindowConfig> for WindowConfigBuilder {
    #[inline]
    fn try_build(self) -> Result<WindowConfig, IndicatorError> {
        Ok(WindowConfig {
            period: self.period.ok_or(IndicatorError::MissingParameter("period"))?,
        })
    }
}

/// Configuration for indicators built from a fast and a slow smoother:
/// [`Tsi`](crate::Tsi) and [`Ppo`](crate::Ppo).
///
/// The two periods are not required to be ordered.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct FastSlowConfig {
    fast: Period,
    slow: Period,
}

impl FastSlowConfig {
    #[must_use]
    pub fn new(fast: Period, slow: Period) -> Self {
        Self { fast, slow }
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
}

impl IndicatorConfig for FastSlowConfig {
    type Builder = FastSlowConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        FastSlowConfigBuilder {
            fast: None,
            slow: None,
        }
    }
}

impl Display for FastSlowConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FastSlowConfig({}, {})", self.fast, self.slow)
    }
}

/// Builder for [`FastSlowConfig`].
///
/// Both periods must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct FastSlowConfigBuilder {
    fast: Option<Period>,
    slow: Option<Period>,
}

impl FastSlowConfigBuilder {
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
}

impl IndicatorConfigBuilder<FastSlowConfig> for FastSlowConfigBuilder {
    #[inline]
    fn try_build(self) -> Result<FastSlowConfig, IndicatorError> {
        Ok(FastSlowConfig {
            fast: self.fast.ok_or(IndicatorError::MissingParameter("fast period"))?,
            slow: self.slow.ok_or(IndicatorError::MissingParameter("slow period"))?,
        })
    }
}
