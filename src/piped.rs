use std::fmt::Display;

use crate::{Indicator, Sample};

/// Chains two indicators, feeding the output of the first into the second.
///
/// When the first stage emits undefined the second stage is not fed, so it
/// never sees a gap in its input, and the pipe emits undefined at that
/// timestamp.
///
/// # Example
///
/// ```
/// use talive::{Ema, Indicator, Ma, Period, Piped, Sample, WindowConfig};
/// use chrono::DateTime;
///
/// let t = |secs| DateTime::from_timestamp(secs, 0).unwrap();
/// let config = WindowConfig::new(Period::seconds(5));
/// let mut smoothed_mean = Piped::new(Ma::new(config), Ema::new(config));
///
/// assert_eq!(smoothed_mean.insert(Sample::new(t(0), 4.0)).value(), Some(4.0));
/// assert_eq!(smoothed_mean.to_string(), "MA(5s) -> EMA(5s)");
/// ```
#[derive(Clone, Debug)]
pub struct Piped<First, Second> {
    first: First,
    second: Second,
    current: Option<Sample>,
}

impl<First, Second> Piped<First, Second>
where
    First: Indicator,
    Second: Indicator,
{
    #[must_use]
    pub fn new(first: First, second: Second) -> Self {
        Self {
            first,
            second,
            current: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn first(&self) -> &First {
        &self.first
    }

    #[inline]
    #[must_use]
    pub fn second(&self) -> &Second {
        &self.second
    }
}

impl<First, Second> Indicator for Piped<First, Second>
where
    First: Indicator,
    Second: Indicator,
{
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        let intermediate = self.first.insert(sample);

        let output = if intermediate.is_defined() {
            self.second.insert(intermediate)
        } else {
            Sample::undefined(sample.time())
        };

        self.current = Some(output);
        output
    }

    #[inline]
    fn last(&self) -> Option<Sample> {
        self.current
    }
}

impl<First, Second> Display for Piped<First, Second>
where
    First: Display,
    Second: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.first, self.second)
    }
}
