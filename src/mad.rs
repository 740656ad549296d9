use std::fmt::Display;

use crate::{Indicator, Ma, Sample, WindowConfig, indicator::assert_ordered};

/// Mean Absolute Deviation (MAD).
///
/// Trailing mean of `|value − MA(value)|`, where both averages share the
/// same window:
///
/// ```text
/// MAD = MA(|value − MA(value)|)
/// ```
#[derive(Clone, Debug)]
pub struct Mad {
    config: WindowConfig,
    mean: Ma,
    deviation: Ma,
    current: Option<Sample>,
}

impl Mad {
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            mean: Ma::new(config),
            deviation: Ma::new(config),
            current: None,
        }
    }
}

impl Indicator for Mad {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let mean = self.mean.insert(sample);
        let distance = sample
            .value()
            .zip(mean.value())
            .map(|(value, mean)| (value - mean).abs());

        let output = self.deviation.insert(Sample::at(sample.time(), distance));

        self.current = Some(output);
        output
    }

    #[inline]
    fn last(&self) -> Option<Sample> {
        self.current
    }
}

impl Display for Mad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MAD({})", self.config.period())
    }
}
