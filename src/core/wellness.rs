//! Wellness analytics over already-loaded mood logs and breathing sessions
//!
//! wellness = mood/10·40 + (1 − stress_rate)·30 + min(mindful/60, 1)·20 + min(logs/30, 1)·10
//!
//! Mindful minutes count whole minutes per session (floor), then sum.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::types::{
    BreathingSession, BreathingStats, DailyMood, MoodEntry, MoodStats, StressReport,
    StressTimelinePoint, Trigger, TriggerCount, WellnessOverview,
};

/// Triggers listed in a stress report
pub const TOP_TRIGGERS: usize = 5;

const MOOD_WEIGHT: f64 = 40.0;
const LOW_STRESS_WEIGHT: f64 = 30.0;
const MINDFUL_WEIGHT: f64 = 20.0;
const CONSISTENCY_WEIGHT: f64 = 10.0;
/// Mindful minutes for full credit
const MINDFUL_TARGET_MINUTES: f64 = 60.0;
/// Logs per period for full credit
const CONSISTENCY_TARGET_LOGS: f64 = 30.0;

/// 0-100 composite wellness score
pub fn wellness_score(avg_mood: f64, stress_rate: f64, mindful_minutes: u64, log_count: usize) -> u8 {
    let mood = (avg_mood / 10.0) * MOOD_WEIGHT;
    let stress = (1.0 - stress_rate) * LOW_STRESS_WEIGHT;
    let mindful = (mindful_minutes as f64 / MINDFUL_TARGET_MINUTES).min(1.0) * MINDFUL_WEIGHT;
    let consistency = (log_count as f64 / CONSISTENCY_TARGET_LOGS).min(1.0) * CONSISTENCY_WEIGHT;
    (mood + stress + mindful + consistency).round().clamp(0.0, 100.0) as u8
}

/// Period overview; fails only when a mood score or breathing rating is out of range
pub fn overview(
    mood_logs: &[MoodEntry],
    journal_entries: usize,
    chat_sessions: usize,
    breathing: &[BreathingSession],
) -> Result<WellnessOverview> {
    for entry in mood_logs {
        entry.validate()?;
    }
    for session in breathing {
        session.validate()?;
    }

    let average_mood = mean_score(mood_logs);

    let mut emotion_distribution = BTreeMap::new();
    for entry in mood_logs {
        *emotion_distribution.entry(entry.emotion).or_insert(0) += 1;
    }

    let stress_rate = ratio(
        mood_logs.iter().filter(|e| e.emotion.is_stress_marker()).count(),
        mood_logs.len(),
    );
    let mindful_minutes = mindful_minutes(breathing);

    Ok(WellnessOverview {
        average_mood: round1(average_mood),
        total_mood_logs: mood_logs.len(),
        total_journal_entries: journal_entries,
        total_chat_sessions: chat_sessions,
        total_breathing_sessions: breathing.len(),
        mindful_minutes,
        emotion_distribution,
        stress_percentage: round1(stress_rate * 100.0),
        wellness_score: wellness_score(average_mood, stress_rate, mindful_minutes, mood_logs.len()),
    })
}

/// Stress events, top triggers and a per-entry timeline
pub fn stress_report(mood_logs: &[MoodEntry]) -> Result<StressReport> {
    for entry in mood_logs {
        entry.validate()?;
    }

    let stressful: Vec<&MoodEntry> = mood_logs.iter().filter(|e| e.emotion.is_stressful()).collect();

    // First-seen order, so the stable sort below keeps it for ties
    let mut counts: Vec<(Trigger, usize)> = Vec::new();
    for trigger in stressful.iter().flat_map(|e| e.triggers.iter()) {
        match counts.iter_mut().find(|(t, _)| t == trigger) {
            Some((_, n)) => *n += 1,
            None => counts.push((*trigger, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let top_triggers = counts
        .into_iter()
        .take(TOP_TRIGGERS)
        .map(|(trigger, count)| TriggerCount { trigger, count })
        .collect();

    let timeline = mood_logs
        .iter()
        .map(|e| StressTimelinePoint {
            date: e.recorded_at,
            score: e.score,
            emotion: e.emotion,
            is_stressful: e.emotion.is_stressful(),
        })
        .collect();

    Ok(StressReport {
        total_stress_events: stressful.len(),
        stress_rate: round1(ratio(stressful.len(), mood_logs.len()) * 100.0),
        top_triggers,
        timeline,
    })
}

/// Average, daily trend, emotion and trigger frequencies, latest entry
pub fn mood_stats(mood_logs: &[MoodEntry]) -> Result<MoodStats> {
    for entry in mood_logs {
        entry.validate()?;
    }

    // Stable, so entries sharing a timestamp keep input order
    let mut ordered: Vec<&MoodEntry> = mood_logs.iter().collect();
    ordered.sort_by_key(|e| e.recorded_at);

    let mut days: Vec<(NaiveDate, u32, u32)> = Vec::new();
    for entry in &ordered {
        let date = entry.recorded_at.date_naive();
        match days.last_mut() {
            Some((day, total, count)) if *day == date => {
                *total += entry.score as u32;
                *count += 1;
            }
            _ => days.push((date, entry.score as u32, 1)),
        }
    }
    let trend = days
        .into_iter()
        .map(|(date, total, count)| DailyMood {
            date,
            average: round1(total as f64 / count as f64),
        })
        .collect();

    let mut emotion_frequency = BTreeMap::new();
    let mut trigger_frequency = BTreeMap::new();
    for entry in mood_logs {
        *emotion_frequency.entry(entry.emotion).or_insert(0) += 1;
        for trigger in &entry.triggers {
            *trigger_frequency.entry(*trigger).or_insert(0) += 1;
        }
    }

    Ok(MoodStats {
        average_mood: round1(mean_score(mood_logs)),
        total_logs: mood_logs.len(),
        trend,
        emotion_frequency,
        trigger_frequency,
        latest_mood: ordered.last().map(|e| (*e).clone()),
    })
}

/// Session count, whole mindful minutes and average mood change
pub fn breathing_stats(sessions: &[BreathingSession]) -> Result<BreathingStats> {
    for session in sessions {
        session.validate()?;
    }

    let changes: Vec<i16> = sessions.iter().filter_map(|s| s.mood_change()).collect();
    let improvement =
        changes.iter().map(|&c| c as f64).sum::<f64>() / changes.len().max(1) as f64;

    Ok(BreathingStats {
        total_sessions: sessions.len(),
        total_minutes: mindful_minutes(sessions),
        avg_mood_improvement: round1(improvement),
    })
}

fn mindful_minutes(sessions: &[BreathingSession]) -> u64 {
    sessions.iter().map(|s| s.duration_secs / 60).sum()
}

fn mean_score(mood_logs: &[MoodEntry]) -> f64 {
    if mood_logs.is_empty() {
        0.0
    } else {
        mood_logs.iter().map(|e| e.score as f64).sum::<f64>() / mood_logs.len() as f64
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MoodEmotion;
    use chrono::Utc;

    #[test]
    fn test_perfect_month() {
        assert_eq!(wellness_score(10.0, 0.0, 60, 30), 100);
        assert_eq!(wellness_score(10.0, 0.0, 600, 300), 100);
    }

    #[test]
    fn test_empty_period() {
        // Only the (1 - 0) * 30 term contributes
        assert_eq!(wellness_score(0.0, 0.0, 0, 0), 30);
        let o = overview(&[], 0, 0, &[]).unwrap();
        assert_eq!(o.average_mood, 0.0);
        assert_eq!(o.stress_percentage, 0.0);
        assert_eq!(o.wellness_score, 30);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(6.66666), 6.7);
        assert_eq!(round1(33.333), 33.3);
    }

    #[test]
    fn test_mindful_minutes_floor_per_session() {
        let now = Utc::now();
        let logs = [MoodEntry::new(5, MoodEmotion::Calm, now)];
        let breathing = [
            BreathingSession::new(119),
            BreathingSession::new(60),
        ];
        let o = overview(&logs, 2, 3, &breathing).unwrap();
        assert_eq!(o.mindful_minutes, 2);
        assert_eq!(o.total_breathing_sessions, 2);
        assert_eq!(o.total_journal_entries, 2);
        assert_eq!(o.total_chat_sessions, 3);
    }

    #[test]
    fn test_mood_stats_empty() {
        let stats = mood_stats(&[]).unwrap();
        assert_eq!(stats.average_mood, 0.0);
        assert_eq!(stats.total_logs, 0);
        assert!(stats.trend.is_empty());
        assert!(stats.emotion_frequency.is_empty());
        assert!(stats.latest_mood.is_none());
    }

    #[test]
    fn test_breathing_stats_only_rated_sessions() {
        let sessions = [
            BreathingSession::new(300).with_moods(4, 7),
            BreathingSession::new(90).with_moods(6, 5),
            BreathingSession::new(59),
        ];
        let stats = breathing_stats(&sessions).unwrap();
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.total_minutes, 6);
        // (3 + -1) / 2
        assert_eq!(stats.avg_mood_improvement, 1.0);
    }

    #[test]
    fn test_breathing_stats_unrated() {
        let stats = breathing_stats(&[BreathingSession::new(120)]).unwrap();
        assert_eq!(stats.avg_mood_improvement, 0.0);
        assert_eq!(breathing_stats(&[]).unwrap().total_minutes, 0);
    }
}
