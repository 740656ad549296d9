//! Streaming technical analysis indicators over irregular time series.
//!
//! Indicators consume timestamped [`Sample`]s one at a time and return one
//! output [`Sample`] per input, at the same timestamp. All windows and
//! smoothing constants are measured in wall-clock time ([`Period`]), not in
//! sample counts, so ticks may arrive at any spacing. Outputs are undefined
//! (`value() == None`) until an indicator has enough history, and wherever a
//! denominator degenerates.
//!
//! Each indicator type ([`High`], [`Ma`], [`Ema`], [`Rsi`], ...) exposes
//! [`insert`](Ema::insert), [`batch_insert`](Ema::batch_insert),
//! [`try_insert`](Ema::try_insert) and [`last`](Ema::last) as inherent
//! methods, no trait import needed. Import [`Indicator`] only for generic
//! code or trait objects.
//!
//! ```
//! use talive::{Ema, Period, Sample, WindowConfig};
//! use chrono::DateTime;
//!
//! let t = |secs| DateTime::from_timestamp(secs, 0).unwrap();
//! let mut ema = Ema::new(WindowConfig::new(Period::seconds(30)));
//!
//! for (secs, price) in [(0, 100.0), (2, 101.0), (7, 99.5)] {
//!     let out = ema.insert(Sample::new(t(secs), price));
//!     assert!(out.is_defined());
//! }
//! ```

mod aroon;
mod config;
mod dpo;
mod ema;
mod error;
mod extremum;
mod indicator;
mod ma;
mod macd;
mod mad;
mod mass;
mod piped;
mod ppo;
mod roc;
mod rsi;
mod sample;
mod stoch;
mod stoch_rsi;
mod sum;
mod trix;
mod true_range;
mod tsi;
mod ulcer;
mod williams_r;
mod window;

pub use crate::config::{FastSlowConfig, FastSlowConfigBuilder, WindowConfig, WindowConfigBuilder};
pub use crate::error::IndicatorError;
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::piped::Piped;
pub use crate::sample::{Period, Sample, Timestamp, Value};

pub use crate::aroon::Aroon;
pub use crate::dpo::{Dpo, DpoConfig, DpoConfigBuilder};
pub use crate::ema::Ema;
pub use crate::extremum::{Extremum, High, Low};
pub use crate::ma::Ma;
pub use crate::macd::{Macd, MacdConfig, MacdConfigBuilder};
pub use crate::mad::Mad;
pub use crate::mass::{Mass, MassConfig, MassConfigBuilder};
pub use crate::ppo::Ppo;
pub use crate::roc::Roc;
pub use crate::rsi::Rsi;
pub use crate::stoch::Stoch;
pub use crate::stoch_rsi::StochRsi;
pub use crate::sum::Sum;
pub use crate::trix::{Trix, TrixConfig, TrixConfigBuilder};
pub use crate::true_range::TrueRange;
pub use crate::tsi::Tsi;
pub use crate::ulcer::Ulcer;
pub use crate::williams_r::WilliamsR;

macro_rules! impl_indicator_methods {
    ($($type:ty),+ $(,)?) => {
        $(
            impl $type {
                /// See [`Indicator::insert`].
                #[inline]
                pub fn insert(&mut self, sample: Sample) -> Sample {
                    <Self as Indicator>::insert(self, sample)
                }

                /// See [`Indicator::batch_insert`].
                pub fn batch_insert(&mut self, samples: &[Sample]) -> Vec<Sample> {
                    <Self as Indicator>::batch_insert(self, samples)
                }

                /// See [`Indicator::try_insert`].
                ///
                /// # Errors
                ///
                /// Returns [`IndicatorError::OutOfOrder`] if `sample` is older
                /// than the last inserted sample.
                #[inline]
                pub fn try_insert(&mut self, sample: Sample) -> Result<Sample, IndicatorError> {
                    <Self as Indicator>::try_insert(self, sample)
                }

                /// See [`Indicator::last`].
                #[must_use]
                #[inline]
                pub fn last(&self) -> Option<Sample> {
                    <Self as Indicator>::last(self)
                }
            }
        )+
    };
}

impl_indicator_methods!(
    High, Low, Sum, Ma, Ema, Mad, TrueRange, Rsi, Tsi, Stoch, Roc, WilliamsR, StochRsi, Ppo,
    Aroon, Macd, Trix, Mass, Dpo, Ulcer,
);

#[cfg(test)]
mod test_util;
