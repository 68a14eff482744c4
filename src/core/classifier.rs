//! Crisis classifier: keyword-based severity tiers and a 0-10 stress level
//!
//! Severity (first rule wins):
//! - crisis matches >= 3 → CRITICAL
//! - crisis matches >= 1 → HIGH
//! - stress matches >= 3 → MODERATE
//! - stress matches >= 1 → LOW
//! - otherwise → NONE
//!
//! Stress level: round(min(10, stress * 1.5 + crisis * 3))

use tracing::{debug, warn};

use crate::core::keywords::{KeywordMatches, CRISIS_RESOURCES};
use crate::types::{CrisisAssessment, Severity, TextEvaluation};
use crate::{
    CRISIS_KEYWORD_POINTS, CRITICAL_CRISIS_MATCHES, MODERATE_STRESS_MATCHES,
    STRESS_KEYWORD_POINTS, STRESS_LEVEL_MAX,
};

/// Crisis/stress classifier. Stateless; total over any input string.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrisisClassifier;

impl CrisisClassifier {
    /// Create new classifier
    pub fn new() -> Self {
        Self
    }

    /// Assess text for crisis and stress language
    pub fn detect(&self, text: &str) -> CrisisAssessment {
        assessment_from(&KeywordMatches::scan(text))
    }

    /// 0-10 stress level of text
    pub fn stress_level(&self, text: &str) -> u8 {
        stress_level_from(&KeywordMatches::scan(text))
    }

    /// Assessment and stress level from a single keyword pass
    pub fn evaluate(&self, text: &str) -> TextEvaluation {
        let matches = KeywordMatches::scan(text);
        let evaluation = TextEvaluation {
            assessment: assessment_from(&matches),
            stress_level: stress_level_from(&matches),
        };

        debug!(
            crisis = matches.crisis_count(),
            stress = matches.stress_count(),
            severity = evaluation.assessment.severity.as_str(),
            stress_level = evaluation.stress_level,
            "text evaluated"
        );
        if evaluation.assessment.severity.is_crisis_tier() {
            warn!(
                severity = evaluation.assessment.severity.as_str(),
                "crisis language detected"
            );
        }

        evaluation
    }
}

/// Severity tier for the given match counts
pub fn severity_for(crisis: usize, stress: usize) -> Severity {
    if crisis >= CRITICAL_CRISIS_MATCHES {
        Severity::Critical
    } else if crisis >= 1 {
        Severity::High
    } else if stress >= MODERATE_STRESS_MATCHES {
        Severity::Moderate
    } else if stress >= 1 {
        Severity::Low
    } else {
        Severity::None
    }
}

/// Stress level for the given match counts, rounded half up
pub fn stress_level_for(crisis: usize, stress: usize) -> u8 {
    let raw = (stress as f64 * STRESS_KEYWORD_POINTS + crisis as f64 * CRISIS_KEYWORD_POINTS)
        .min(STRESS_LEVEL_MAX);
    // Non-negative, so round() (half away from zero) is round-half-up
    raw.round() as u8
}

fn assessment_from(matches: &KeywordMatches) -> CrisisAssessment {
    if matches.is_empty() {
        return CrisisAssessment::clear();
    }
    let is_crisis = matches.crisis_count() > 0;
    CrisisAssessment {
        is_crisis,
        is_stress: matches.stress_count() > 0,
        severity: severity_for(matches.crisis_count(), matches.stress_count()),
        detected_keywords: matches.all(),
        resources: is_crisis.then(|| CRISIS_RESOURCES.clone()),
    }
}

fn stress_level_from(matches: &KeywordMatches) -> u8 {
    stress_level_for(matches.crisis_count(), matches.stress_count())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        let classifier = CrisisClassifier::new();
        for text in ["", "   ", "\n\t"] {
            let result = classifier.detect(text);
            assert_eq!(result, CrisisAssessment::clear());
            assert_eq!(classifier.stress_level(text), 0);
        }
    }

    #[test]
    fn test_no_keywords() {
        let classifier = CrisisClassifier::new();
        let result = classifier.detect("The garden looked lovely this morning.");
        assert!(!result.is_crisis);
        assert!(!result.is_stress);
        assert_eq!(result.severity, Severity::None);
        assert!(result.resources.is_none());
    }

    #[test]
    fn test_single_crisis_keyword_is_high() {
        let classifier = CrisisClassifier::new();
        let result = classifier.detect("I keep thinking about suicide");
        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.detected_keywords, vec!["suicide".to_string()]);
        assert!(result.resources.is_some());
    }

    #[test]
    fn test_three_crisis_keywords_is_critical() {
        let classifier = CrisisClassifier::new();
        let result = classifier.detect("suicide, overdose, end it all");
        assert_eq!(result.severity, Severity::Critical);
        assert_eq!(
            result.detected_keywords,
            vec!["suicide", "overdose", "end it all"]
        );
    }

    #[test]
    fn test_stress_tiers() {
        let classifier = CrisisClassifier::new();
        assert_eq!(classifier.detect("a lot of pressure").severity, Severity::Low);
        assert_eq!(
            classifier.detect("stress, anxiety and panic").severity,
            Severity::Moderate
        );
    }

    #[test]
    fn test_crisis_outranks_stress() {
        let classifier = CrisisClassifier::new();
        let result = classifier.detect("stress anxiety panic burnout and an overdose");
        assert_eq!(result.severity, Severity::High);
        assert!(result.is_crisis && result.is_stress);
        assert_eq!(result.detected_keywords[0], "overdose");
    }

    #[test]
    fn test_substring_match_inside_words() {
        // "diet" contains "die"; containment is deliberate policy
        let result = CrisisClassifier::new().detect("Started a new diet");
        assert!(result.is_crisis);
        assert_eq!(result.detected_keywords, vec!["die"]);
    }

    #[test]
    fn test_stress_level_rounding() {
        assert_eq!(stress_level_for(0, 1), 2); // 1.5 → 2
        assert_eq!(stress_level_for(0, 3), 5); // 4.5 → 5
        assert_eq!(stress_level_for(1, 1), 5); // 4.5 → 5
        assert_eq!(stress_level_for(2, 0), 6);
    }

    #[test]
    fn test_stress_level_capped() {
        assert_eq!(stress_level_for(3, 1), 10);
        assert_eq!(stress_level_for(18, 16), 10);
    }

    #[test]
    fn test_severity_table() {
        assert_eq!(severity_for(0, 0), Severity::None);
        assert_eq!(severity_for(0, 2), Severity::Low);
        assert_eq!(severity_for(0, 3), Severity::Moderate);
        assert_eq!(severity_for(2, 9), Severity::High);
        assert_eq!(severity_for(3, 0), Severity::Critical);
    }

    #[test]
    fn test_evaluate_matches_separate_calls() {
        let classifier = CrisisClassifier::new();
        let text = "I feel trapped and hopeless, like there's no way out";
        let evaluation = classifier.evaluate(text);
        assert_eq!(evaluation.assessment, classifier.detect(text));
        assert_eq!(evaluation.stress_level, classifier.stress_level(text));
    }

    #[test]
    fn test_determinism() {
        let classifier = CrisisClassifier::new();
        let text = "Panic attacks and burnout at work";
        assert_eq!(classifier.evaluate(text), classifier.evaluate(text));
    }
}
