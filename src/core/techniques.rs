//! Guided breathing catalog
//!
//! Fixed table served as-is; list order is display order.

use crate::types::{BreathPattern, BreathingTechnique, Difficulty, TechniqueInfo};

pub const TECHNIQUES: &[TechniqueInfo] = &[
    TechniqueInfo {
        id: BreathingTechnique::BoxBreathing,
        name: "Box Breathing",
        description: "Equal breathing pattern used by US Navy SEALs to reduce stress",
        pattern: BreathPattern { inhale: 4, hold1: 4, exhale: 4, hold2: 4 },
        benefits: &["Reduces stress", "Improves focus", "Calms nervous system"],
        difficulty: Difficulty::Beginner,
        duration_secs: 300,
    },
    TechniqueInfo {
        id: BreathingTechnique::FourSevenEight,
        name: "4-7-8 Breathing",
        description: "Dr. Andrew Weil's technique for anxiety and sleep",
        pattern: BreathPattern { inhale: 4, hold1: 7, exhale: 8, hold2: 0 },
        benefits: &["Reduces anxiety", "Promotes sleep", "Lowers heart rate"],
        difficulty: Difficulty::Intermediate,
        duration_secs: 240,
    },
    TechniqueInfo {
        id: BreathingTechnique::DeepBreathing,
        name: "Deep Belly Breathing",
        description: "Simple diaphragmatic breathing for instant calm",
        pattern: BreathPattern { inhale: 5, hold1: 0, exhale: 5, hold2: 0 },
        benefits: &["Immediate stress relief", "Increases oxygen", "Easy to learn"],
        difficulty: Difficulty::Beginner,
        duration_secs: 180,
    },
    TechniqueInfo {
        id: BreathingTechnique::Coherent,
        name: "Coherent Breathing",
        description: "5 breaths per minute for heart-brain coherence",
        pattern: BreathPattern { inhale: 6, hold1: 0, exhale: 6, hold2: 0 },
        benefits: &["HRV improvement", "Deep calm", "Mental clarity"],
        difficulty: Difficulty::Intermediate,
        duration_secs: 360,
    },
    TechniqueInfo {
        id: BreathingTechnique::PursedLip,
        name: "Pursed Lip Breathing",
        description: "Slows breathing and improves ventilation",
        pattern: BreathPattern { inhale: 2, hold1: 0, exhale: 4, hold2: 0 },
        benefits: &["Reduces breathlessness", "Relaxes muscles", "Controls pace"],
        difficulty: Difficulty::Beginner,
        duration_secs: 240,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        for (i, a) in TECHNIQUES.iter().enumerate() {
            for b in &TECHNIQUES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
        assert_eq!(TECHNIQUES.len(), 5);
    }

    #[test]
    fn test_catalog_entries() {
        let find = |id: BreathingTechnique| TECHNIQUES.iter().find(|t| t.id == id);
        let info = find(BreathingTechnique::FourSevenEight).unwrap();
        assert_eq!(info.pattern.hold1, 7);
        assert_eq!(info.pattern.exhale, 8);
        // Accepted on sessions but not offered as a guided exercise
        assert!(find(BreathingTechnique::Diaphragmatic).is_none());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(TECHNIQUES[1]).unwrap();
        assert_eq!(json["id"], "4-7-8");
        assert_eq!(json["difficulty"], "Intermediate");
        assert_eq!(json["durationSecs"], 240);
        assert_eq!(json["pattern"]["hold2"], 0);
    }
}
