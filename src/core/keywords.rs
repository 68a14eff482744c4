//! Fixed keyword tables and the crisis resource bundle
//!
//! List order is output order for `detected_keywords`. Matching is plain
//! substring containment on lower-cased text, so "stress" also hits
//! "stressed" and "die" also hits "want to die".

use lazy_static::lazy_static;

use crate::types::{Hotline, ResourceBundle};

/// Phrases indicating acute self-harm risk
pub const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "die",
    "not worth living",
    "self-harm",
    "cut myself",
    "hurt myself",
    "no reason to live",
    "want to die",
    "goodbye forever",
    "can't go on",
    "no way out",
    "better off dead",
    "overdose",
    "pills",
    "method",
    "end it all",
];

/// Phrases indicating general psychological stress
pub const STRESS_KEYWORDS: &[&str] = &[
    "stress",
    "anxiety",
    "worried",
    "panic",
    "overwhelmed",
    "nervous",
    "tense",
    "pressure",
    "burnout",
    "exhausted",
    "hopeless",
    "helpless",
    "trapped",
    "can't breathe",
    "heart racing",
    "breaking down",
];

const CRISIS_MESSAGE: &str = "You're not alone. Please reach out to a crisis support line immediately. Your life has value and there are people trained to help you right now.";

lazy_static! {
    /// Hotlines and message returned with every crisis assessment
    pub static ref CRISIS_RESOURCES: ResourceBundle = ResourceBundle {
        hotlines: vec![
            Hotline {
                name: "National Suicide Prevention Lifeline".to_string(),
                number: Some("988".to_string()),
                contact: None,
                url: None,
                available: Some("24/7".to_string()),
            },
            Hotline {
                name: "Crisis Text Line".to_string(),
                number: None,
                contact: Some("Text HOME to 741741".to_string()),
                url: None,
                available: Some("24/7".to_string()),
            },
            Hotline {
                name: "SAMHSA Helpline".to_string(),
                number: Some("1-800-662-4357".to_string()),
                contact: None,
                url: None,
                available: Some("24/7".to_string()),
            },
            Hotline {
                name: "International Association for Suicide Prevention".to_string(),
                number: None,
                contact: None,
                url: Some("https://www.iasp.info/resources/Crisis_Centres/".to_string()),
                available: None,
            },
        ],
        message: CRISIS_MESSAGE.to_string(),
    };
}

/// Keywords found in one text, split by list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordMatches {
    pub crisis: Vec<&'static str>,
    pub stress: Vec<&'static str>,
}

impl KeywordMatches {
    /// Scan `text` against both lists; each keyword counts at most once
    pub fn scan(text: &str) -> Self {
        let lower = text.to_lowercase();
        Self {
            crisis: matches_in(CRISIS_KEYWORDS, &lower),
            stress: matches_in(STRESS_KEYWORDS, &lower),
        }
    }

    pub fn crisis_count(&self) -> usize {
        self.crisis.len()
    }

    pub fn stress_count(&self) -> usize {
        self.stress.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crisis.is_empty() && self.stress.is_empty()
    }

    /// Crisis matches followed by stress matches
    pub fn all(&self) -> Vec<String> {
        self.crisis
            .iter()
            .chain(self.stress.iter())
            .map(|k| k.to_string())
            .collect()
    }
}

fn matches_in(list: &'static [&'static str], lower: &str) -> Vec<&'static str> {
    list.iter().copied().filter(|k| lower.contains(k)).collect()
}
