//! MindWatch core: crisis keyword classifier and facial-expression stress scoring
//!
//! Text path: text → CrisisClassifier → CrisisAssessment + stress level (0-10)
//! Face path: ExpressionFrame → ExpressionProcessor → smoothed stress score (0-100)

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use error::{MindwatchError, Result};

// =============================================================================
// CRISIS / STRESS TEXT POLICY
// =============================================================================

/// Crisis matches needed for CRITICAL severity
pub const CRITICAL_CRISIS_MATCHES: usize = 3;

/// Stress matches needed for MODERATE severity (when no crisis match)
pub const MODERATE_STRESS_MATCHES: usize = 3;

/// Points per matched stress keyword in the 0-10 stress level
pub const STRESS_KEYWORD_POINTS: f64 = 1.5;

/// Points per matched crisis keyword in the 0-10 stress level
pub const CRISIS_KEYWORD_POINTS: f64 = 3.0;

/// Ceiling of the text stress level
pub const STRESS_LEVEL_MAX: f64 = 10.0;

// =============================================================================
// FACIAL EXPRESSION POLICY
// =============================================================================

/// Frames averaged by the moving-average smoother
pub const SMOOTHING_WINDOW: usize = 12;

/// Per-label stress weights (positive = stress, negative = calm)
pub const WEIGHT_HAPPY: f64 = -0.30;
pub const WEIGHT_SAD: f64 = 0.20;
pub const WEIGHT_ANGRY: f64 = 0.25;
pub const WEIGHT_FEARFUL: f64 = 0.25;
pub const WEIGHT_DISGUSTED: f64 = 0.15;
pub const WEIGHT_SURPRISED: f64 = 0.05;
pub const WEIGHT_NEUTRAL: f64 = -0.20;

/// Amplification of the stress sum
pub const STRESS_SCALE: f64 = 120.0;

/// Amplification of the calm sum
pub const CALM_SCALE: f64 = 40.0;

/// Ceiling of the face stress score
pub const FACE_SCORE_MAX: u8 = 100;

/// Inclusive upper bounds of the stress label buckets
pub const LABEL_VERY_RELAXED_MAX: u8 = 15;
pub const LABEL_CALM_MAX: u8 = 30;
pub const LABEL_MILDLY_TENSE_MAX: u8 = 45;
pub const LABEL_MODERATE_MAX: u8 = 60;
pub const LABEL_HIGH_MAX: u8 = 75;

// =============================================================================
// SESSION TIMELINE
// =============================================================================

/// A timeline sample is taken every N ingested frames
pub const TIMELINE_SAMPLE_EVERY: u64 = 3;

/// Samples retained per session
pub const TIMELINE_CAPACITY: usize = 40;

/// Most recent samples forwarded to the insight provider
pub const INSIGHT_HISTORY_SAMPLES: usize = 10;

/// Score above which the fallback insight reports stress
pub const FALLBACK_STRESS_THRESHOLD: u8 = 50;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
