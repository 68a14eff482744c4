//! Severity tiers for text assessments

use colored::Color;
use serde::{Deserialize, Serialize};

/// Severity of a text assessment, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No crisis or stress keywords
    None,
    /// One or two stress keywords
    Low,
    /// Three or more stress keywords, no crisis keyword
    Moderate,
    /// One or two crisis keywords
    High,
    /// Three or more crisis keywords
    Critical,
}

impl Severity {
    /// Terminal color for this tier
    pub fn color(&self) -> Color {
        match self {
            Severity::None => Color::BrightBlack,
            Severity::Low => Color::Cyan,
            Severity::Moderate => Color::Yellow,
            Severity::High => Color::Red,
            Severity::Critical => Color::BrightRed,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::None => "🟢",
            Severity::Low => "🔵",
            Severity::Moderate => "🟡",
            Severity::High => "🟠",
            Severity::Critical => "🔴",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// High and critical tiers carry crisis resources
    pub fn is_crisis_tier(&self) -> bool {
        *self >= Severity::High
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}
