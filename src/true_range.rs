use std::fmt::Display;

use crate::{High, Indicator, Low, Sample, Value, WindowConfig, indicator::assert_ordered};

/// True Range over a tick stream.
///
/// The bar high and low are the trailing extremes over the configured bar
/// period; the reference "previous close" is the previous raw sample:
///
/// ```text
/// TR = max(high − low, |high − prev|, |low − prev|)
/// ```
///
/// On the first sample (no previous), falls back to `high − low`.
#[derive(Clone, Debug)]
pub struct TrueRange {
    config: WindowConfig,
    high: High,
    low: Low,
    previous: Option<Value>,
    current: Option<Sample>,
}

impl TrueRange {
    #[must_use]
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            high: High::new(config),
            low: Low::new(config),
            previous: None,
            current: None,
        }
    }
}

impl Indicator for TrueRange {
    #[inline]
    fn insert(&mut self, sample: Sample) -> Sample {
        assert_ordered(self.current.as_ref(), &sample);

        let high = self.high.insert(sample).value();
        let low = self.low.insert(sample).value();

        let range = high.zip(low).map(|(high, low)| {
            let hl = high - low;

            match self.previous {
                Some(prev) => hl.max((high - prev).abs()).max((low - prev).abs()),
                None => hl,
            }
        });

        if let Some(value) = sample.value() {
            self.previous = Some(value);
        }

        let output = Sample::at(sample.time(), range);
        self.current = Some(output);
        output
    }

    #[inline]
    fn last(&self) -> Option<Sample> {
        self.current
    }
}

impl Display for TrueRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TR({})", self.config.period())
    }
}
