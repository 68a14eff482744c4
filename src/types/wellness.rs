//! Mood log records and the aggregates computed over them

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{MindwatchError, Result};

/// Emotion tag on a mood log
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodEmotion {
    Happy,
    Sad,
    Anxious,
    Calm,
    Angry,
    Excited,
    Stressed,
    Neutral,
    Overwhelmed,
    Hopeful,
}

impl MoodEmotion {
    /// Counted in the overview stress percentage
    pub fn is_stress_marker(self) -> bool {
        matches!(
            self,
            MoodEmotion::Stressed | MoodEmotion::Anxious | MoodEmotion::Overwhelmed
        )
    }

    /// Counted as a stress event in the stress report (adds anger)
    pub fn is_stressful(self) -> bool {
        self.is_stress_marker() || self == MoodEmotion::Angry
    }
}

/// What the user tagged as the cause of a mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Work,
    Family,
    Health,
    Finances,
    Relationships,
    Sleep,
    Exercise,
    Diet,
    Social,
    Personal,
    Other,
}

/// Lowest accepted mood score
pub const MOOD_SCORE_MIN: u8 = 1;
/// Highest accepted mood score
pub const MOOD_SCORE_MAX: u8 = 10;

/// One mood log as loaded from storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// 1-10
    pub score: u8,
    pub emotion: MoodEmotion,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    pub recorded_at: DateTime<Utc>,
}

impl MoodEntry {
    pub fn new(score: u8, emotion: MoodEmotion, recorded_at: DateTime<Utc>) -> Self {
        Self {
            score,
            emotion,
            triggers: Vec::new(),
            recorded_at,
        }
    }

    pub fn with_triggers(mut self, triggers: impl IntoIterator<Item = Trigger>) -> Self {
        self.triggers = triggers.into_iter().collect();
        self
    }

    /// Reject scores outside 1-10
    pub fn validate(&self) -> Result<()> {
        if !(MOOD_SCORE_MIN..=MOOD_SCORE_MAX).contains(&self.score) {
            return Err(MindwatchError::Validation(format!(
                "mood score {} outside {}-{}",
                self.score, MOOD_SCORE_MIN, MOOD_SCORE_MAX
            )));
        }
        Ok(())
    }
}

/// Breathing exercise identifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreathingTechnique {
    #[default]
    BoxBreathing,
    #[serde(rename = "4-7-8")]
    FourSevenEight,
    DeepBreathing,
    Diaphragmatic,
    Coherent,
    PursedLip,
}

/// A completed breathing exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingSession {
    #[serde(default)]
    pub technique: BreathingTechnique,
    pub duration_secs: u64,
    /// 1-10, self-reported before the exercise
    #[serde(default)]
    pub mood_before: Option<u8>,
    /// 1-10, self-reported after the exercise
    #[serde(default)]
    pub mood_after: Option<u8>,
}

impl BreathingSession {
    pub fn new(duration_secs: u64) -> Self {
        Self {
            technique: BreathingTechnique::default(),
            duration_secs,
            mood_before: None,
            mood_after: None,
        }
    }

    pub fn with_technique(mut self, technique: BreathingTechnique) -> Self {
        self.technique = technique;
        self
    }

    pub fn with_moods(mut self, before: u8, after: u8) -> Self {
        self.mood_before = Some(before);
        self.mood_after = Some(after);
        self
    }

    /// Reject mood ratings outside 1-10
    pub fn validate(&self) -> Result<()> {
        for mood in [self.mood_before, self.mood_after].into_iter().flatten() {
            if !(MOOD_SCORE_MIN..=MOOD_SCORE_MAX).contains(&mood) {
                return Err(MindwatchError::Validation(format!(
                    "breathing mood {} outside {}-{}",
                    mood, MOOD_SCORE_MIN, MOOD_SCORE_MAX
                )));
            }
        }
        Ok(())
    }

    /// After minus before, when both were recorded
    pub fn mood_change(&self) -> Option<i16> {
        match (self.mood_before, self.mood_after) {
            (Some(before), Some(after)) => Some(after as i16 - before as i16),
            _ => None,
        }
    }
}

/// Seconds per phase of one breath cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreathPattern {
    pub inhale: u8,
    pub hold1: u8,
    pub exhale: u8,
    pub hold2: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
}

/// Catalog entry for a guided breathing exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechniqueInfo {
    pub id: BreathingTechnique,
    pub name: &'static str,
    pub description: &'static str,
    pub pattern: BreathPattern,
    pub benefits: &'static [&'static str],
    pub difficulty: Difficulty,
    /// Suggested session length
    pub duration_secs: u64,
}

/// Average mood for one UTC calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMood {
    pub date: NaiveDate,
    /// One decimal
    pub average: f64,
}

/// Mood log statistics: averages, daily trend and frequencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodStats {
    /// One decimal; 0 with no logs
    pub average_mood: f64,
    pub total_logs: usize,
    /// Oldest day first
    pub trend: Vec<DailyMood>,
    pub emotion_frequency: BTreeMap<MoodEmotion, usize>,
    pub trigger_frequency: BTreeMap<Trigger, usize>,
    pub latest_mood: Option<MoodEntry>,
}

/// Breathing practice statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingStats {
    pub total_sessions: usize,
    pub total_minutes: u64,
    /// Mean after-before change over sessions rating both; one decimal
    pub avg_mood_improvement: f64,
}

/// Period overview across mood, journal, chat and breathing activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessOverview {
    /// One decimal
    pub average_mood: f64,
    pub total_mood_logs: usize,
    pub total_journal_entries: usize,
    pub total_chat_sessions: usize,
    pub total_breathing_sessions: usize,
    pub mindful_minutes: u64,
    pub emotion_distribution: BTreeMap<MoodEmotion, usize>,
    /// 0-100, one decimal
    pub stress_percentage: f64,
    /// 0-100
    pub wellness_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerCount {
    pub trigger: Trigger,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressTimelinePoint {
    pub date: DateTime<Utc>,
    pub score: u8,
    pub emotion: MoodEmotion,
    pub is_stressful: bool,
}

/// Stress events and their most common triggers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressReport {
    pub total_stress_events: usize,
    /// 0-100, one decimal
    pub stress_rate: f64,
    pub top_triggers: Vec<TriggerCount>,
    pub timeline: Vec<StressTimelinePoint>,
}
