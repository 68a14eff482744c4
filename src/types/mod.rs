//! Core types for MindWatch

mod assessment;
mod expression;
mod history;
mod insight;
mod reading;
mod severity;
mod wellness;

pub use assessment::{CrisisAssessment, Hotline, ResourceBundle, TextEvaluation};
pub use expression::{Expression, ExpressionFrame, SmoothedExpression, EXPRESSION_COUNT};
pub use history::{ExpressionHistory, SessionTimeline, TimelineSample};
pub use insight::{FaceInsight, FaceInsightRequest};
pub use reading::{FaceReading, StressLabel};
pub use severity::Severity;
pub use wellness::{
    BreathPattern, BreathingSession, BreathingStats, BreathingTechnique, DailyMood, Difficulty,
    MoodEmotion, MoodEntry, MoodStats, StressReport, StressTimelinePoint, TechniqueInfo, Trigger,
    TriggerCount, WellnessOverview, MOOD_SCORE_MAX, MOOD_SCORE_MIN,
};
