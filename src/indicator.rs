use crate::{IndicatorError, Sample};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Configuration for an [`Indicator`].
///
/// Every indicator has a config type holding its periods. Configs are value
/// types: cheap to copy, compare, and hash. They are fixed at construction;
/// an indicator never changes its configuration.
pub trait IndicatorConfig: Sized + Copy + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>: Sized
where
    Config: IndicatorConfig,
{
    /// Builds the config, or reports the first missing parameter.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::MissingParameter`] when a required period
    /// was never set.
    fn try_build(self) -> Result<Config, IndicatorError>;

    /// Builds the config. Panics if required fields are missing.
    #[must_use]
    fn build(self) -> Config {
        match self.try_build() {
            Ok(config) => config,
            Err(err) => panic!("{err}"),
        }
    }
}

/// A streaming indicator over timestamped samples.
///
/// Indicators keep internal state and update incrementally on each call to
/// [`insert`](Indicator::insert), in amortized constant time. Each input
/// sample produces exactly one output sample at the same timestamp; the
/// output is undefined until enough history has been seen.
///
/// The trait is object safe, so heterogeneous stages can be held as
/// `Box<dyn Indicator>`.
///
/// # Example
///
/// ```
/// use talive::{Indicator, Ma, Period, Sample, WindowConfig};
/// use chrono::DateTime;
///
/// let t = |secs| DateTime::from_timestamp(secs, 0).unwrap();
/// let mut ma: Box<dyn Indicator> = Box::new(Ma::new(WindowConfig::new(Period::seconds(2))));
///
/// let out = ma.batch_insert(&[
///     Sample::new(t(0), 10.0),
///     Sample::new(t(1), 20.0),
///     Sample::new(t(2), 30.0),
/// ]);
///
/// let values: Vec<_> = out.iter().map(Sample::value).collect();
/// assert_eq!(values, [Some(10.0), Some(15.0), Some(25.0)]);
/// ```
pub trait Indicator: Display + Debug {
    /// Feeds a sample and returns the output at the same timestamp.
    ///
    /// # Panics
    ///
    /// Panics if `sample` is older than the previous one. Use
    /// [`try_insert`](Indicator::try_insert) to reject such samples instead.
    fn insert(&mut self, sample: Sample) -> Sample;

    /// Returns the last emitted sample without advancing state, or `None`
    /// before the first insert.
    ///
    /// This is a cached field read, O(1) with no computation.
    fn last(&self) -> Option<Sample>;

    /// Feeds every sample in order and collects the outputs.
    ///
    /// Behaves exactly like calling [`insert`](Indicator::insert) for each
    /// sample in turn.
    fn batch_insert(&mut self, samples: &[Sample]) -> Vec<Sample> {
        samples.iter().map(|&sample| self.insert(sample)).collect()
    }

    /// Like [`insert`](Indicator::insert), but rejects out-of-order samples
    /// without touching state.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::OutOfOrder`] if `sample` is older than the
    /// last inserted sample.
    fn try_insert(&mut self, sample: Sample) -> Result<Sample, IndicatorError> {
        match self.last() {
            Some(last) if sample.time() < last.time() => {
                tracing::warn!(
                    indicator = %self,
                    last = %last.time(),
                    got = %sample.time(),
                    "rejecting out-of-order sample"
                );
                Err(IndicatorError::OutOfOrder {
                    last: last.time(),
                    got: sample.time(),
                })
            }
            _ => Ok(self.insert(sample)),
        }
    }
}

impl<I> Indicator for Box<I>
where
    I: Indicator + ?Sized,
{
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        (**self).insert(sample)
    }

    #[inline]
    fn last(&self) -> Option<Sample> {
        (**self).last()
    }
}

/// Fails fast when the non-decreasing time precondition is violated.
#[inline]
pub(crate) fn assert_ordered(last: Option<&Sample>, sample: &Sample) {
    if let Some(last) = last {
        assert!(
            last.time() <= sample.time(),
            "sample time must be non-decreasing: last={}, got={}",
            last.time(),
            sample.time(),
        );
    }
}
