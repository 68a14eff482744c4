//! Core modules for MindWatch

pub mod api;
pub mod classifier;
pub mod expression;
pub mod insight;
pub mod keywords;
pub mod techniques;
pub mod wellness;

pub use api::{create_router, create_router_with_provider, run_server, AppState};
pub use classifier::{severity_for, stress_level_for, CrisisClassifier};
pub use expression::{dominant, stress_color, stress_label, stress_score, ExpressionProcessor};
pub use insight::{analyze_or_fallback, fallback_insight, InsightProvider};
pub use keywords::{KeywordMatches, CRISIS_KEYWORDS, CRISIS_RESOURCES, STRESS_KEYWORDS};
pub use techniques::TECHNIQUES;
pub use wellness::{breathing_stats, mood_stats, overview, stress_report, wellness_score};
