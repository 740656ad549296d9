use crate::{Timestamp, Value};
use chrono::TimeDelta;
use std::collections::VecDeque;

/// Which edge of `now - span` a window keeps.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Boundary {
    /// Keeps `(now - span, now]`: a sample exactly `span` old is evicted.
    Open,
    /// Keeps `[now - span, now]`: a sample exactly `span` old is retained.
    Closed,
}

/// Time-ordered queue of the samples inside a trailing window.
#[derive(Clone, Debug)]
pub(crate) struct TimeWindow<const RUNNING_SUM: bool = false> {
    span: TimeDelta,
    boundary: Boundary,
    window: VecDeque<(Timestamp, Value)>,
    /// Running sum of values in the window. Maintained incrementally via
    /// add/subtract, may accumulate FP rounding drift over very long runs.
    sum: Value,
}

pub(crate) type SummingWindow = TimeWindow<true>;

impl TimeWindow {
    pub fn new(span: TimeDelta, boundary: Boundary) -> Self {
        Self {
            span,
            boundary,
            window: VecDeque::new(),
            sum: 0.0,
        }
    }
}

impl TimeWindow<true> {
    pub fn with_running_sum(span: TimeDelta) -> Self {
        Self {
            span,
            boundary: Boundary::Open,
            window: VecDeque::new(),
            sum: 0.0,
        }
    }
}

impl<const RUNNING_SUM: bool> TimeWindow<RUNNING_SUM> {
    /// Appends a sample, then drops everything that aged out relative to it.
    #[inline]
    pub fn push(&mut self, time: Timestamp, value: Value) {
        debug_assert!(
            self.window.back().is_none_or(|&(t, _)| t <= time),
            "window time must be non-decreasing"
        );

        self.window.push_back((time, value));
        if RUNNING_SUM {
            self.sum += value;
        }

        while self
            .window
            .front()
            .is_some_and(|&(t, _)| self.is_expired(time, t))
        {
            if let Some((_, old)) = self.window.pop_front()
                && RUNNING_SUM
            {
                self.sum -= old;
            }
        }
    }

    #[inline]
    pub fn oldest(&self) -> Option<(Timestamp, Value)> {
        self.window.front().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    #[inline]
    pub fn sum(&self) -> Value {
        assert!(RUNNING_SUM, "sum requires TimeWindow<true>");
        self.sum
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &(Timestamp, Value)> {
        self.window.iter()
    }

    #[inline]
    fn is_expired(&self, now: Timestamp, time: Timestamp) -> bool {
        let age = now - time;
        match self.boundary {
            Boundary::Open => age >= self.span,
            Boundary::Closed => age > self.span,
        }
    }
}
