//! Face insight: seam for the external model, plus the fixed fallback
//!
//! The model itself lives outside this crate. Whatever sits behind
//! `InsightProvider` may fail; callers go through `analyze_or_fallback`,
//! which always produces an insight.

use tracing::warn;

use crate::error::Result;
use crate::types::{FaceInsight, FaceInsightRequest};
use crate::FALLBACK_STRESS_THRESHOLD;

/// External face-insight model
pub trait InsightProvider: Send + Sync {
    fn analyze(&self, request: &FaceInsightRequest) -> Result<FaceInsight>;
}

/// Fixed insight used when no provider is configured or the provider fails
pub fn fallback_insight(stress_score: u8) -> FaceInsight {
    let state = if stress_score > FALLBACK_STRESS_THRESHOLD {
        "experiencing some stress"
    } else {
        "relatively calm"
    };
    FaceInsight {
        overall_assessment: format!(
            "Unable to perform AI analysis at this time. Your facial expression data shows you are {state}. Consider taking a few deep breaths."
        ),
        emotional_state: "Analysis temporarily unavailable.".to_string(),
        stress_indicators: "Please try again in a moment.".to_string(),
        recommendations: vec![
            "Take a 4-7-8 breathing break to reset your nervous system".to_string(),
            "Step away from the screen for 2 minutes and look at something distant".to_string(),
            "Do a quick body scan — notice where you are holding tension".to_string(),
        ],
        confidence_note: "This is a fallback response. AI analysis was temporarily unavailable."
            .to_string(),
    }
}

/// Ask the provider; fall back on absence or error. Returns (insight, used_fallback).
pub fn analyze_or_fallback(
    provider: Option<&dyn InsightProvider>,
    request: &FaceInsightRequest,
) -> (FaceInsight, bool) {
    let Some(provider) = provider else {
        return (fallback_insight(request.stress_score), true);
    };
    match provider.analyze(request) {
        Ok(insight) => (insight, false),
        Err(e) => {
            warn!(error = %e, "insight provider failed, using fallback");
            (fallback_insight(request.stress_score), true)
        }
    }
}
