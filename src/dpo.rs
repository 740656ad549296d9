use std::fmt::Display;

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorError, Ma, Period, Sample,
    WindowConfig,
    indicator::assert_ordered,
    window::{Boundary, TimeWindow},
};

/// Configuration for the Detrended Price Oscillator ([`Dpo`]).
///
/// # Example
///
/// ```
/// use talive::{DpoConfig, IndicatorConfig, IndicatorConfigBuilder, Period};
///
/// let config = DpoConfig::builder()
///     .period(Period::seconds(20))
///     .normalized(true)
///     .build();
///
/// assert_eq!(config, DpoConfig::normalized(Period::seconds(20)));
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct DpoConfig {
    period: Period,
    normalized: bool,
}

impl DpoConfig {
    /// `midpoint − MA`.
    #[must_use]
    pub fn plain(period: Period) -> Self {
        Self {
            period,
            normalized: false,
        }
    }

    /// `(midpoint − MA) / MA`.
    #[must_use]
    pub fn normalized(period: Period) -> Self {
        Self {
            period,
            normalized: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn period(&self) -> Period {
        self.period
    }

    #[inline]
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }
}

impl IndicatorConfig for DpoConfig {
    type Builder = DpoConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        DpoConfigBuilder {
            period: None,
            normalized: false,
        }
    }
}

impl Display for DpoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DpoConfig({}", self.period)?;
        if self.normalized {
            write!(f, ", normalized")?;
        }
        write!(f, ")")
    }
}

/// Builder for [`DpoConfig`].
///
/// Defaults: not normalized.
/// Period must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct DpoConfigBuilder {
    period: Option<Period>,
    normalized: bool,
}

impl DpoConfigBuilder {
    #[inline]
    #[must_use]
    pub fn period(mut self, period: Period) -> Self {
        self.period.replace(period);
        self
    }

    #[inline]
    #[must_use]
    pub fn normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }
}

impl IndicatorConfigBuilder<DpoConfig> for DpoConfigBuilder {
    #[inline]
    fn try_build(self) -> Result<DpoConfig, IndicatorError> {
        Ok(DpoConfig {
            period: self.period.ok_or(IndicatorError::MissingParameter("period"))?,
            normalized: self.normalized,
        })
    }
}

/// Detrended Price Oscillator (DPO).
///
/// Compares the sample from half a period ago with the trailing mean over
/// the full period, removing the trend to expose cycles:
///
/// ```text
/// DPO            = midpoint − MA
/// normalized DPO = (midpoint − MA) / MA
/// ```
///
/// The midpoint is the oldest sample inside `[now − period/2, now]`; a
/// sample exactly half a period old still qualifies. Before half a period
/// of history exists the midpoint is simply the oldest sample seen.
///
/// The normalized variant is undefined when the mean is zero.
///
/// # Example
///
/// ```
/// use talive::{Dpo, DpoConfig, Period, Sample};
/// use chrono::DateTime;
///
/// let t = |secs| DateTime::from_timestamp(secs, 0).unwrap();
/// let mut dpo = Dpo::new(DpoConfig::plain(Period::seconds(4)));
///
/// dpo.insert(Sample::new(t(0), 10.0));
/// dpo.insert(Sample::new(t(1), 12.0));
/// // midpoint is t=0 (2s back), mean of {10, 12, 20} is 14
/// assert_eq!(dpo.insert(Sample::new(t(2), 20.0)).value(), Some(-4.0));
/// ```
#[derive(Clone, Debug)]
pub struct Dpo {
    config: DpoConfig,
    midpoint: TimeWindow,
    mean: Ma,
    current: Option<Sample>,
}

impl Dpo {
    #[must_use]
    pub fn new(config: DpoConfig) -> Self {
        Self {
            config,
            midpoint: TimeWindow::new(config.period().as_delta() / 2, Boundary::Closed),
            mean: Ma::new(WindowConfig::new(config.period())),
            current: None,
        }
    }
}

impl Indicator for Dpo {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let time = sample.time();
        let output = match sample.value() {
            Some(value) => {
                self.midpoint.push(time, value);
                let mean = self.mean.insert(sample).value();

                let detrended = self
                    .midpoint
                    .oldest()
                    .map(|(_, mid)| mid)
                    .zip(mean)
                    .and_then(|(mid, mean)| {
                        if !self.config.is_normalized() {
                            Some(mid - mean)
                        } else if mean == 0.0 {
                            tracing::trace!(%time, "dpo undefined: zero mean");
                            None
                        } else {
                            Some((mid - mean) / mean)
                        }
                    });

                Sample::at(time, detrended)
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

impl Display for Dpo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = if self.config.is_normalized() { "NDPO" } else { "DPO" };
        write!(f, "{name}({})", self.config.period())
    }
}
