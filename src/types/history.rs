//! Bounded frame history for smoothing, and the sampled session timeline
//!
//! - History = last N frames, FIFO eviction (N = SMOOTHING_WINDOW)
//! - Timeline = every Nth reading, capped at TIMELINE_CAPACITY

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::{Expression, ExpressionFrame, SmoothedExpression, EXPRESSION_COUNT};
use crate::{SMOOTHING_WINDOW, TIMELINE_CAPACITY};

/// Sliding window of the most recent expression frames
#[derive(Debug, Clone)]
pub struct ExpressionHistory {
    frames: VecDeque<ExpressionFrame>,
    capacity: usize,
}

impl Default for ExpressionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionHistory {
    /// Create history with the default window (12 frames)
    pub fn new() -> Self {
        Self::with_capacity(SMOOTHING_WINDOW)
    }

    /// Create history with a custom window; a zero window is treated as 1
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            frames: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a frame, evicting the oldest when over capacity
    pub fn push(&mut self, frame: ExpressionFrame) {
        self.frames.push_back(frame);
        while self.frames.len() > self.capacity {
            self.frames.pop_front();
        }
    }

    /// Per-label arithmetic mean of the retained frames (zeros when empty)
    pub fn mean(&self) -> SmoothedExpression {
        let mut sums = [0.0; EXPRESSION_COUNT];
        if self.frames.is_empty() {
            return SmoothedExpression::from_values(sums);
        }
        for frame in &self.frames {
            for expr in Expression::ALL {
                sums[expr.index()] += frame.get(expr);
            }
        }
        let n = self.frames.len() as f64;
        for v in sums.iter_mut() {
            *v /= n;
        }
        SmoothedExpression::from_values(sums)
    }

    /// Frames, oldest first
    pub fn frames(&self) -> impl Iterator<Item = &ExpressionFrame> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

/// A sub-sampled snapshot of the smoothed state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSample {
    pub timestamp: DateTime<Utc>,
    pub stress: u8,
    pub dominant: Expression,
    pub expressions: SmoothedExpression,
}

/// Bounded log of timeline samples for one session
#[derive(Debug, Clone, Serialize)]
pub struct SessionTimeline {
    samples: VecDeque<TimelineSample>,
    #[serde(skip)]
    capacity: usize,
}

impl Default for SessionTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTimeline {
    pub fn new() -> Self {
        Self::with_capacity(TIMELINE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, sample: TimelineSample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Up to `n` most recent samples, oldest first
    pub fn recent(&self, n: usize) -> Vec<TimelineSample> {
        let skip = self.samples.len().saturating_sub(n);
        self.samples.iter().skip(skip).cloned().collect()
    }

    pub fn samples(&self) -> impl Iterator<Item = &TimelineSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Mean stress across retained samples
    pub fn average_stress(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.samples.iter().map(|s| s.stress as f64).sum();
        sum / self.samples.len() as f64
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn happy(v: f64) -> ExpressionFrame {
        ExpressionFrame::zero().with(Expression::Happy, v)
    }

    fn sample(stress: u8) -> TimelineSample {
        TimelineSample {
            timestamp: Utc::now(),
            stress,
            dominant: Expression::Neutral,
            expressions: SmoothedExpression::default(),
        }
    }

    #[test]
    fn test_empty_mean_is_zero() {
        let history = ExpressionHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.mean(), SmoothedExpression::default());
    }

    #[test]
    fn test_mean_of_partial_window() {
        let mut history = ExpressionHistory::new();
        history.push(happy(0.2));
        history.push(happy(0.4));
        assert!((history.mean().get(Expression::Happy) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_fifo_eviction() {
        let mut history = ExpressionHistory::with_capacity(3);
        history.push(happy(0.1));
        history.push(happy(0.2));
        history.push(happy(0.3));
        assert_eq!(history.len(), history.capacity());
        history.push(happy(0.4));

        assert_eq!(history.len(), 3);
        let kept: Vec<f64> = history.frames().map(|f| f.get(Expression::Happy)).collect();
        assert_eq!(kept, vec![0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_zero_capacity_treated_as_one() {
        let mut history = ExpressionHistory::with_capacity(0);
        history.push(happy(0.1));
        history.push(happy(0.9));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.mean().get(Expression::Happy), 0.9);
    }

    #[test]
    fn test_timeline_capped() {
        let mut timeline = SessionTimeline::with_capacity(2);
        timeline.push(sample(10));
        timeline.push(sample(20));
        timeline.push(sample(30));
        let stress: Vec<u8> = timeline.samples().map(|s| s.stress).collect();
        assert_eq!(stress, vec![20, 30]);
    }

    #[test]
    fn test_timeline_recent() {
        let mut timeline = SessionTimeline::new();
        for s in 0..5 {
            timeline.push(sample(s));
        }
        let recent: Vec<u8> = timeline.recent(2).iter().map(|s| s.stress).collect();
        assert_eq!(recent, vec![3, 4]);
        assert_eq!(timeline.recent(100).len(), 5);
        assert!((timeline.average_stress() - 2.0).abs() < 1e-12);
    }
}
