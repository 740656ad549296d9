use std::fmt::Display;

use crate::{
    Ema, Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorError, Period, Piped, Sample,
    Timestamp, Value, WindowConfig, indicator::assert_ordered,
};

/// Configuration for the TRIX ([`Trix`]) indicator.
///
/// With a time unit set, the percent change is further divided by the
/// elapsed time measured in that unit, giving a rate that does not depend
/// on the sampling interval (normalized TRIX).
///
/// # Example
///
/// ```
/// use talive::{IndicatorConfig, IndicatorConfigBuilder, Period, TrixConfig};
///
/// let config = TrixConfig::builder()
///     .period(Period::seconds(15))
///     .time_unit(Period::seconds(1))
///     .build();
///
/// assert_eq!(config, TrixConfig::per_unit(Period::seconds(15), Period::seconds(1)));
/// assert_eq!(config.to_string(), "TrixConfig(15s, per 1s)");
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct TrixConfig {
    period: Period,
    time_unit: Option<Period>,
}

impl TrixConfig {
    /// Plain TRIX: percent change between consecutive outputs.
    #[must_use]
    pub fn new(period: Period) -> Self {
        Self {
            period,
            time_unit: None,
        }
    }

    /// Normalized TRIX: percent change per `time_unit` elapsed.
    #[must_use]
    pub fn per_unit(period: Period, time_unit: Period) -> Self {
        Self {
            period,
            time_unit: Some(time_unit),
        }
    }

    /// Time constant shared by the three smoothing stages.
    #[inline]
    #[must_use]
    pub fn period(&self) -> Period {
        self.period
    }

    #[inline]
    #[must_use]
    pub fn time_unit(&self) -> Option<Period> {
        self.time_unit
    }
}

impl IndicatorConfig for TrixConfig {
    type Builder = TrixConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        TrixConfigBuilder {
            period: None,
            time_unit: None,
        }
    }
}

impl Display for TrixConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.time_unit {
            Some(unit) => write!(f, "TrixConfig({}, per {unit})", self.period),
            None => write!(f, "TrixConfig({})", self.period),
        }
    }
}

/// Builder for [`TrixConfig`].
///
/// Defaults: no time unit (plain TRIX).
/// Period must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct TrixConfigBuilder {
    period: Option<Period>,
    time_unit: Option<Period>,
}

impl TrixConfigBuilder {
    #[inline]
    #[must_use]
    pub fn period(mut self, period: Period) -> Self {
        self.period.replace(period);
        self
    }

    #[inline]
    #[must_use]
    pub fn time_unit(mut self, time_unit: Period) -> Self {
        self.time_unit.replace(time_unit);
        self
    }
}

impl IndicatorConfigBuilder<TrixConfig> for TrixConfigBuilder {
    #[inline]
    fn try_build(self) -> Result<TrixConfig, IndicatorError> {
        Ok(TrixConfig {
            period: self.period.ok_or(IndicatorError::MissingParameter("period"))?,
            time_unit: self.time_unit,
        })
    }
}

type TripleEma = Piped<Piped<Ema, Ema>, Ema>;

/// Triple-smoothed rate of change (TRIX).
///
/// Three chained [`Ema`]s with the same time constant, followed by the
/// percent change between consecutive outputs of the third stage:
///
/// ```text
/// TRIX            = (e₃ − e₃_prev) / e₃_prev × 100
/// normalized TRIX = TRIX / ((t − t_prev) / time_unit)
/// ```
///
/// Needs a previous output at an earlier timestamp: the first sample, and
/// any further samples sharing its timestamp, yield undefined while
/// refreshing the reference. Undefined when the reference is zero.
///
/// # Example
///
/// ```
/// use talive::{Period, Sample, Trix, TrixConfig};
/// use chrono::DateTime;
///
/// let t = |secs| DateTime::from_timestamp(secs, 0).unwrap();
/// let mut trix = Trix::new(TrixConfig::new(Period::seconds(15)));
///
/// assert!(!trix.insert(Sample::new(t(0), 100.0)).is_defined());
/// assert!(trix.insert(Sample::new(t(1), 101.0)).value().unwrap() > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Trix {
    config: TrixConfig,
    smoother: TripleEma,
    previous: Option<(Timestamp, Value)>,
    current: Option<Sample>,
}

impl Trix {
    #[must_use]
    pub fn new(config: TrixConfig) -> Self {
        let stage = || Ema::new(WindowConfig::new(config.period()));

        Self {
            config,
            smoother: Piped::new(Piped::new(stage(), stage()), stage()),
            previous: None,
            current: None,
        }
    }
}

impl Indicator for Trix {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let time = sample.time();
        let smoothed = self.smoother.insert(sample).value();

        let output = match (smoothed, self.previous) {
            (Some(value), Some((prev_time, prev_value))) if prev_time < time => {
                self.previous = Some((time, value));

                let rate = if prev_value == 0.0 {
                    tracing::trace!(%time, "trix undefined: zero reference value");
                    None
                } else {
                    let percent = (value - prev_value) / prev_value * 100.0;
                    Some(match self.config.time_unit() {
                        Some(unit) => percent / unit.ratio(time - prev_time),
                        None => percent,
                    })
                };

                Sample::at(time, rate)
            }
            (Some(value), _) => {
                self.previous = Some((time, value));
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

impl Display for Trix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.config.time_unit() {
            Some(unit) => write!(f, "NTRIX({}, {unit})", self.config.period()),
            None => write!(f, "TRIX({})", self.config.period()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, p, s, ts, ts_ms};

    fn trix(secs: u32) -> Trix {
        Trix::new(TrixConfig::new(p(secs)))
    }

    fn ntrix(secs: u32, unit: Period) -> Trix {
        Trix::new(TrixConfig::per_unit(p(secs), unit))
    }

    fn triple(secs: u32) -> TripleEma {
        let stage = || Ema::new(WindowConfig::new(p(secs)));
        Piped::new(Piped::new(stage(), stage()), stage())
    }

    mod config {
        use super::*;

        #[test]
        fn builder_defaults_to_plain() {
            let config = TrixConfig::builder().period(p(15)).build();
            assert_eq!(config, TrixConfig::new(p(15)));
            assert_eq!(config.time_unit(), None);
            assert_eq!(config.to_string(), "TrixConfig(15s)");
        }

        #[test]
        fn try_build_reports_missing_period() {
            assert_eq!(
                TrixConfig::builder().time_unit(p(1)).try_build(),
                Err(IndicatorError::MissingParameter("period"))
            );
        }
    }

    mod warming {
        use super::*;

        #[test]
        fn first_sample_is_undefined() {
            assert!(!trix(15).insert(s(0, 100.0)).is_defined());
        }

        #[test]
        fn same_timestamp_stays_undefined() {
            let mut trix = trix(15);
            trix.insert(s(0, 100.0));
            assert!(!trix.insert(s(0, 105.0)).is_defined());
            assert!(trix.insert(s(1, 101.0)).is_defined());
        }

        #[test]
        fn repeated_timestamp_after_warm_refreshes_reference() {
            let mut trix = trix(1);
            trix.insert(s(0, 100.0));
            trix.insert(s(1, 110.0));
            assert!(!trix.insert(s(1, 120.0)).is_defined());
            assert!(trix.insert(s(2, 120.0)).is_defined());
        }
    }

    mod rate {
        use super::*;

        #[test]
        fn percent_change_of_third_stage() {
            let mut trix = trix(2);
            let mut reference = triple(2);

            let prices = [(0, 100.0), (1, 104.0), (3, 98.0), (4, 101.0)];
            let mut prev = reference.insert(s(0, 100.0)).value().unwrap();
            trix.insert(s(0, 100.0));

            for &(t, v) in &prices[1..] {
                let e3 = reference.insert(s(t, v)).value().unwrap();
                assert_approx!(trix.insert(s(t, v)).value().unwrap(), (e3 - prev) / prev * 100.0);
                prev = e3;
            }
        }

        #[test]
        fn constant_input_has_zero_rate() {
            let mut trix = trix(5);
            trix.insert(s(0, 42.0));
            for t in 1..10 {
                assert_eq!(trix.insert(s(t, 42.0)).value(), Some(0.0));
            }
        }

        #[test]
        fn zero_reference_is_undefined() {
            let mut trix = trix(5);
            trix.insert(s(0, 0.0));
            assert!(!trix.insert(s(1, 1.0)).is_defined());
            assert!(trix.insert(s(2, 1.0)).is_defined());
        }
    }

    mod normalized {
        use super::*;

        #[test]
        fn divides_by_elapsed_units() {
            let mut plain = trix(3);
            let mut per_second = ntrix(3, p(1));
            for sample in [s(0, 100.0), s(2, 102.0)] {
                plain.insert(sample);
                per_second.insert(sample);
            }
            // 4s elapsed since the t=2 reference
            let rate = plain.insert(s(6, 90.0)).value().unwrap();
            assert_approx!(per_second.insert(s(6, 90.0)).value().unwrap(), rate / 4.0);
        }

        #[test]
        fn sub_unit_gap_scales_up() {
            let mut plain = trix(3);
            let mut per_second = ntrix(3, p(1));
            plain.insert(Sample::new(ts_ms(0), 100.0));
            per_second.insert(Sample::new(ts_ms(0), 100.0));

            let rate = plain.insert(Sample::new(ts_ms(250), 103.0)).value().unwrap();
            let scaled = per_second.insert(Sample::new(ts_ms(250), 103.0)).value().unwrap();
            assert_approx!(scaled, rate * 4.0);
        }
    }

    #[test]
    fn undefined_input_keeps_reference() {
        let mut trix = trix(2);
        let mut reference = triple(2);
        let prev = reference.insert(s(0, 10.0)).value().unwrap();
        trix.insert(s(0, 10.0));

        assert!(!trix.insert(Sample::undefined(ts(1))).is_defined());

        let e3 = reference.insert(s(2, 12.0)).value().unwrap();
        assert_approx!(trix.insert(s(2, 12.0)).value().unwrap(), (e3 - prev) / prev * 100.0);
    }

    #[test]
    fn display() {
        assert_eq!(trix(15).to_string(), "TRIX(15s)");
        assert_eq!(ntrix(15, p(1)).to_string(), "NTRIX(15s, 1s)");
    }
}
