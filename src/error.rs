use chrono::TimeDelta;
use thiserror::Error;

use crate::Timestamp;

/// Errors raised at the edges of the indicator contract.
///
/// Numeric degeneracies (flat ranges, zero denominators, short history) are
/// never errors: they surface as undefined [`Sample`](crate::Sample)s.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    /// A window length or time constant that is zero or negative.
    #[error("period must be positive, got {delta}")]
    NonPositivePeriod {
        /// The rejected duration.
        delta: TimeDelta,
    },

    /// A required config parameter was never set on a builder.
    #[error("{0} is required")]
    MissingParameter(&'static str),

    /// A sample older than the last one accepted.
    #[error("sample time must be non-decreasing: last={last}, got={got}")]
    OutOfOrder {
        /// Timestamp of the last accepted sample.
        last: Timestamp,
        /// Timestamp of the rejected sample.
        got: Timestamp,
    },
}
