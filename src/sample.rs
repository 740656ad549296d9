use std::fmt::{self, Display};

use chrono::{DateTime, TimeDelta, Utc};

use crate::IndicatorError;

/// A sample value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Value = f64;

/// Sample timestamp.
///
/// Must be non-decreasing between consecutive calls to
/// [`Indicator::insert`](crate::Indicator::insert).
pub type Timestamp = DateTime<Utc>;

/// A strictly positive duration.
///
/// Used as the trailing window length of windowed indicators and as the
/// e-folding time constant of [`Ema`](crate::Ema). Plays the role
/// [`NonZero`](std::num::NonZero) plays for bar counts: a zero or negative
/// window cannot be expressed.
///
/// # Example
///
/// ```
/// use talive::Period;
/// use chrono::TimeDelta;
///
/// let period = Period::seconds(10);
/// assert_eq!(period.ratio(TimeDelta::seconds(5)), 0.5);
/// assert!(Period::new(TimeDelta::zero()).is_none());
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Period(TimeDelta);

impl Period {
    /// Returns `None` unless `delta` is strictly positive.
    #[must_use]
    pub fn new(delta: TimeDelta) -> Option<Self> {
        (delta > TimeDelta::zero()).then_some(Self(delta))
    }

    /// Period of whole seconds.
    ///
    /// # Panics
    ///
    /// Panics if `secs` is zero.
    #[must_use]
    pub fn seconds(secs: u32) -> Self {
        Self::new(TimeDelta::seconds(i64::from(secs))).expect("period must be positive")
    }

    /// Period of whole milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if `millis` is zero.
    #[must_use]
    pub fn millis(millis: u32) -> Self {
        Self::new(TimeDelta::milliseconds(i64::from(millis))).expect("period must be positive")
    }

    /// Period of whole minutes.
    ///
    /// # Panics
    ///
    /// Panics if `minutes` is zero.
    #[must_use]
    pub fn minutes(minutes: u32) -> Self {
        Self::new(TimeDelta::minutes(i64::from(minutes))).expect("period must be positive")
    }

    /// The underlying duration.
    #[inline]
    #[must_use]
    pub fn as_delta(&self) -> TimeDelta {
        self.0
    }

    /// Dimensionless ratio `delta / period`.
    #[inline]
    #[must_use]
    pub fn ratio(&self, delta: TimeDelta) -> f64 {
        seconds_f64(delta) / seconds_f64(self.0)
    }
}

impl TryFrom<TimeDelta> for Period {
    type Error = IndicatorError;

    fn try_from(delta: TimeDelta) -> Result<Self, Self::Error> {
        Self::new(delta).ok_or(IndicatorError::NonPositivePeriod { delta })
    }
}

impl From<Period> for TimeDelta {
    fn from(period: Period) -> Self {
        period.0
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delta = self.0;

        if delta.subsec_nanos() == 0 {
            write!(f, "{}s", delta.num_seconds())
        } else if delta.subsec_nanos() % 1_000_000 == 0 {
            write!(f, "{}ms", delta.num_milliseconds())
        } else {
            write!(f, "{}s", seconds_f64(delta))
        }
    }
}

#[allow(clippy::cast_precision_loss)]
#[inline]
fn seconds_f64(delta: TimeDelta) -> f64 {
    // num_seconds and subsec_nanos share the sign of the delta
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9
}

/// A timestamped value, the unit of data flowing through indicators.
///
/// The value is `None` when undefined: an indicator that has not seen
/// enough history yet, or whose formula hit a degenerate denominator,
/// emits an undefined sample at the input's timestamp.
///
/// # Example
///
/// ```
/// use talive::Sample;
/// use chrono::DateTime;
///
/// let t = DateTime::from_timestamp(0, 0).unwrap();
///
/// assert_eq!(Sample::new(t, 1.5).value(), Some(1.5));
/// assert!(!Sample::new(t, f64::NAN).is_defined());
/// assert!(!Sample::undefined(t).is_defined());
/// ```
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Sample {
    time: Timestamp,
    value: Option<Value>,
}

impl Sample {
    /// A sample at `time`. NaN values are treated as undefined.
    #[inline]
    #[must_use]
    pub fn new(time: Timestamp, value: Value) -> Self {
        Self {
            time,
            value: (!value.is_nan()).then_some(value),
        }
    }

    /// An undefined sample at `time`.
    #[inline]
    #[must_use]
    pub fn undefined(time: Timestamp) -> Self {
        Self { time, value: None }
    }

    /// A sample at `time` carrying an optional value.
    #[inline]
    #[must_use]
    pub fn at(time: Timestamp, value: Option<Value>) -> Self {
        value.map_or_else(|| Self::undefined(time), |value| Self::new(time, value))
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> Timestamp {
        self.time
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<Value> {
        self.value
    }

    #[inline]
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.value.is_some()
    }
}

impl Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}: {value}", self.time),
            None => write!(f, "{}: undefined", self.time),
        }
    }
}
