//! Contract with the external face-insight model

use serde::{Deserialize, Serialize};

use crate::types::{Expression, SmoothedExpression, TimelineSample};

/// Fields sent to the insight provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceInsightRequest {
    pub expressions: SmoothedExpression,
    pub stress_score: u8,
    pub dominant_emotion: Expression,
    pub session_duration_secs: u64,
    /// Most recent timeline samples, oldest first
    pub session_history: Vec<TimelineSample>,
}

/// Free-form assessment shaped by the provider (or the fallback)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceInsight {
    pub overall_assessment: String,
    pub emotional_state: String,
    pub stress_indicators: String,
    pub recommendations: Vec<String>,
    pub confidence_note: String,
}
