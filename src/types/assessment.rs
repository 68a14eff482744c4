//! Text assessment structures

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::Severity;

/// One crisis support line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotline {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<String>,
}

impl Hotline {
    /// Best way to reach this line: number, then contact, then url
    pub fn reach(&self) -> &str {
        self.number
            .as_deref()
            .or(self.contact.as_deref())
            .or(self.url.as_deref())
            .unwrap_or("")
    }
}

/// Hotlines plus a supportive message, attached to every crisis assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBundle {
    pub hotlines: Vec<Hotline>,
    pub message: String,
}

/// Result of scanning one text for crisis and stress keywords
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisAssessment {
    /// At least one crisis keyword matched
    pub is_crisis: bool,
    /// At least one stress keyword matched
    pub is_stress: bool,
    pub severity: Severity,
    /// Crisis matches followed by stress matches, in list order
    pub detected_keywords: Vec<String>,
    /// Present only when `is_crisis`
    pub resources: Option<ResourceBundle>,
}

impl CrisisAssessment {
    /// Assessment for text with no signals at all
    pub fn clear() -> Self {
        Self {
            is_crisis: false,
            is_stress: false,
            severity: Severity::None,
            detected_keywords: Vec::new(),
            resources: None,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let line = format!(
            "{} severity={} | crisis={} | stress={} | keywords=[{}]",
            self.severity.emoji(),
            self.severity,
            self.is_crisis,
            self.is_stress,
            self.detected_keywords.join(", "),
        );
        line.color(self.severity.color()).to_string()
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "severity={} | crisis={} | stress={} | keywords={}",
            self.severity.as_str(),
            self.is_crisis,
            self.is_stress,
            self.detected_keywords.join(","),
        )
    }
}

/// Everything computed for one incoming message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEvaluation {
    pub assessment: CrisisAssessment,
    /// 0-10
    pub stress_level: u8,
}

impl TextEvaluation {
    pub fn to_parseable_string(&self) -> String {
        format!(
            "{} | stress_level={}",
            self.assessment.to_parseable_string(),
            self.stress_level
        )
    }

    pub fn to_terminal_string(&self) -> String {
        format!(
            "{} {}",
            self.assessment.to_terminal_string(),
            format!("| stress_level={}/10", self.stress_level).bold()
        )
    }
}
