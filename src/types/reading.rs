//! Face stress readings and their qualitative labels

use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};

use crate::types::{Expression, SmoothedExpression};

/// Qualitative bucket of a 0-100 face stress score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressLabel {
    #[serde(rename = "Very Relaxed")]
    VeryRelaxed,
    #[serde(rename = "Calm")]
    Calm,
    #[serde(rename = "Mildly Tense")]
    MildlyTense,
    #[serde(rename = "Moderate Stress")]
    ModerateStress,
    #[serde(rename = "High Stress")]
    HighStress,
    #[serde(rename = "Very High Stress")]
    VeryHighStress,
}

impl StressLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StressLabel::VeryRelaxed => "Very Relaxed",
            StressLabel::Calm => "Calm",
            StressLabel::MildlyTense => "Mildly Tense",
            StressLabel::ModerateStress => "Moderate Stress",
            StressLabel::HighStress => "High Stress",
            StressLabel::VeryHighStress => "Very High Stress",
        }
    }

    /// Terminal color for this bucket
    pub fn color(&self) -> Color {
        match self {
            StressLabel::VeryRelaxed => Color::Green,
            StressLabel::Calm => Color::Cyan,
            StressLabel::MildlyTense => Color::Yellow,
            StressLabel::ModerateStress => Color::Yellow,
            StressLabel::HighStress => Color::Red,
            StressLabel::VeryHighStress => Color::BrightRed,
        }
    }
}

impl std::fmt::Display for StressLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output for each ingested frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceReading {
    pub timestamp: DateTime<Utc>,
    /// Moving average over the current window
    pub smoothed: SmoothedExpression,
    /// 0-100
    pub stress_score: u8,
    pub stress_label: StressLabel,
    pub dominant: Expression,
    /// Display color band (hex)
    pub color: String,
    /// Frames ingested since the session started
    pub frame_count: u64,
}

impl FaceReading {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let line = format!(
            "{} stress={:>3}/100 | {} | dominant={} | frames={}",
            self.dominant.emoji(),
            self.stress_score,
            self.stress_label,
            self.dominant,
            self.frame_count,
        );
        line.color(self.stress_label.color()).to_string()
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "stress={} | label={} | dominant={} | frames={}",
            self.stress_score, self.stress_label, self.dominant, self.frame_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_wire_format() {
        let json = serde_json::to_string(&StressLabel::MildlyTense).unwrap();
        assert_eq!(json, "\"Mildly Tense\"");
        let back: StressLabel = serde_json::from_str("\"Very High Stress\"").unwrap();
        assert_eq!(back, StressLabel::VeryHighStress);
    }

    #[test]
    fn test_labels_ordered_by_stress() {
        assert!(StressLabel::VeryRelaxed < StressLabel::Calm);
        assert!(StressLabel::HighStress < StressLabel::VeryHighStress);
    }
}
