//! Expression processor: moving-average smoothing and face stress scoring
//!
//! Per frame:
//! - push into a 12-frame FIFO history, mean per label
//! - stress = Σ value·w over w > 0, calm = Σ value·|w| over w < 0
//! - score = min(100, round(max(0, stress·120 − calm·40)))
//! - label by inclusive upper bounds 15/30/45/60/75/100

use chrono::Utc;
use tracing::debug;

use crate::types::{
    Expression, ExpressionFrame, ExpressionHistory, FaceInsightRequest, FaceReading,
    SessionTimeline, SmoothedExpression, StressLabel, TimelineSample,
};
use crate::{
    CALM_SCALE, FACE_SCORE_MAX, INSIGHT_HISTORY_SAMPLES, LABEL_CALM_MAX, LABEL_HIGH_MAX,
    LABEL_MILDLY_TENSE_MAX, LABEL_MODERATE_MAX, LABEL_VERY_RELAXED_MAX, STRESS_SCALE,
    TIMELINE_SAMPLE_EVERY,
};

/// Stress score (0-100) of a smoothed expression vector
pub fn stress_score(smoothed: &SmoothedExpression) -> u8 {
    let mut stress = 0.0;
    let mut calm = 0.0;
    for (expr, value) in smoothed.iter() {
        let weight = expr.stress_weight();
        if weight > 0.0 {
            stress += value * weight;
        } else {
            calm += value * weight.abs();
        }
    }
    let raw = (stress * STRESS_SCALE - calm * CALM_SCALE).max(0.0);
    raw.round().min(FACE_SCORE_MAX as f64) as u8
}

/// Qualitative label of a stress score
pub fn stress_label(score: u8) -> StressLabel {
    if score <= LABEL_VERY_RELAXED_MAX {
        StressLabel::VeryRelaxed
    } else if score <= LABEL_CALM_MAX {
        StressLabel::Calm
    } else if score <= LABEL_MILDLY_TENSE_MAX {
        StressLabel::MildlyTense
    } else if score <= LABEL_MODERATE_MAX {
        StressLabel::ModerateStress
    } else if score <= LABEL_HIGH_MAX {
        StressLabel::HighStress
    } else {
        StressLabel::VeryHighStress
    }
}

/// Label with the strictly greatest value, scanning in canonical order from (neutral, 0)
pub fn dominant(smoothed: &SmoothedExpression) -> Expression {
    smoothed
        .iter()
        .fold((Expression::Neutral, 0.0), |best, (expr, value)| {
            if value > best.1 {
                (expr, value)
            } else {
                best
            }
        })
        .0
}

/// Display color band for a stress score
pub fn stress_color(score: u8) -> &'static str {
    match score {
        0..=20 => "#10b981",
        21..=40 => "#06b6d4",
        41..=60 => "#f59e0b",
        61..=80 => "#f97316",
        _ => "#ef4444",
    }
}

/// Per-session processor owning its frame history and timeline
#[derive(Debug, Clone, Default)]
pub struct ExpressionProcessor {
    history: ExpressionHistory,
    timeline: SessionTimeline,
    frame_count: u64,
    last: Option<FaceReading>,
}

impl ExpressionProcessor {
    /// Create processor with the default 12-frame window
    pub fn new() -> Self {
        Self::default()
    }

    /// Create processor with a custom smoothing window
    pub fn with_window(window: usize) -> Self {
        Self {
            history: ExpressionHistory::with_capacity(window),
            ..Self::default()
        }
    }

    /// Push a frame and return the smoothed expression over the window
    pub fn ingest(&mut self, frame: ExpressionFrame) -> SmoothedExpression {
        self.history.push(frame);
        self.frame_count += 1;
        self.history.mean()
    }

    /// Ingest a frame and derive the full reading
    pub fn update(&mut self, frame: ExpressionFrame) -> FaceReading {
        let smoothed = self.ingest(frame);
        let score = stress_score(&smoothed);
        let reading = FaceReading {
            timestamp: Utc::now(),
            smoothed,
            stress_score: score,
            stress_label: stress_label(score),
            dominant: dominant(&smoothed),
            color: stress_color(score).to_string(),
            frame_count: self.frame_count,
        };

        if self.frame_count % TIMELINE_SAMPLE_EVERY == 0 {
            self.timeline.push(TimelineSample {
                timestamp: reading.timestamp,
                stress: reading.stress_score,
                dominant: reading.dominant,
                expressions: reading.smoothed,
            });
        }

        debug!(
            frame = self.frame_count,
            score,
            label = reading.stress_label.as_str(),
            "frame ingested"
        );

        self.last = Some(reading.clone());
        reading
    }

    /// Build the request sent to the insight provider
    pub fn insight_request(&self, session_duration_secs: u64) -> FaceInsightRequest {
        let smoothed = self.history.mean();
        let score = stress_score(&smoothed);
        FaceInsightRequest {
            expressions: smoothed,
            stress_score: score,
            dominant_emotion: dominant(&smoothed),
            session_duration_secs,
            session_history: self.timeline.recent(INSIGHT_HISTORY_SAMPLES),
        }
    }

    /// Current smoothed expression without ingesting
    pub fn smoothed(&self) -> SmoothedExpression {
        self.history.mean()
    }

    /// Most recent reading
    pub fn last_reading(&self) -> Option<&FaceReading> {
        self.last.as_ref()
    }

    /// Frames ingested since creation or reset
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames currently in the smoothing window
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &ExpressionHistory {
        &self.history
    }

    pub fn timeline(&self) -> &SessionTimeline {
        &self.timeline
    }

    /// Reset to an empty session, keeping the window size
    pub fn reset(&mut self) {
        self.history.clear();
        self.timeline.clear();
        self.frame_count = 0;
        self.last = None;
    }
}

// =============================================================================
// TESTS
// =============================================================================
