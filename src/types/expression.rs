//! Expression labels and per-frame probability vectors
//!
//! The label set is closed. Detector output arrives as a string-keyed object;
//! unknown keys are dropped and missing labels read as 0.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::{
    WEIGHT_ANGRY, WEIGHT_DISGUSTED, WEIGHT_FEARFUL, WEIGHT_HAPPY, WEIGHT_NEUTRAL, WEIGHT_SAD,
    WEIGHT_SURPRISED,
};

/// Number of expression labels
pub const EXPRESSION_COUNT: usize = 7;

/// Facial expression labels, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    Happy,
    Sad,
    Angry,
    Fearful,
    Disgusted,
    Surprised,
    Neutral,
}

impl Expression {
    /// All labels in canonical order
    pub const ALL: [Expression; EXPRESSION_COUNT] = [
        Expression::Happy,
        Expression::Sad,
        Expression::Angry,
        Expression::Fearful,
        Expression::Disgusted,
        Expression::Surprised,
        Expression::Neutral,
    ];

    /// Position in `ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire key
    pub fn key(self) -> &'static str {
        match self {
            Expression::Happy => "happy",
            Expression::Sad => "sad",
            Expression::Angry => "angry",
            Expression::Fearful => "fearful",
            Expression::Disgusted => "disgusted",
            Expression::Surprised => "surprised",
            Expression::Neutral => "neutral",
        }
    }

    /// Parse a wire key (ASCII case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Signed stress weight
    pub fn stress_weight(self) -> f64 {
        match self {
            Expression::Happy => WEIGHT_HAPPY,
            Expression::Sad => WEIGHT_SAD,
            Expression::Angry => WEIGHT_ANGRY,
            Expression::Fearful => WEIGHT_FEARFUL,
            Expression::Disgusted => WEIGHT_DISGUSTED,
            Expression::Surprised => WEIGHT_SURPRISED,
            Expression::Neutral => WEIGHT_NEUTRAL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Expression::Happy => "Happy",
            Expression::Sad => "Sad",
            Expression::Angry => "Angry",
            Expression::Fearful => "Fearful",
            Expression::Disgusted => "Disgusted",
            Expression::Surprised => "Surprised",
            Expression::Neutral => "Neutral",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Expression::Happy => "😊",
            Expression::Sad => "😢",
            Expression::Angry => "😠",
            Expression::Fearful => "😨",
            Expression::Disgusted => "🤢",
            Expression::Surprised => "😲",
            Expression::Neutral => "😐",
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Clamp a detector value into [0, 1]; NaN and infinities read as 0
fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Serialize a label vector as a `{label: value}` object in canonical order
fn serialize_labels<S: Serializer>(
    values: &[f64; EXPRESSION_COUNT],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(EXPRESSION_COUNT))?;
    for expr in Expression::ALL {
        map.serialize_entry(expr.key(), &values[expr.index()])?;
    }
    map.end()
}

/// Read a `{label: value}` object; anything unrecognized or non-numeric is ignored
fn deserialize_labels<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<[f64; EXPRESSION_COUNT], D::Error> {
    let raw = HashMap::<String, Value>::deserialize(deserializer)?;
    let mut values = [0.0; EXPRESSION_COUNT];
    for (key, value) in raw {
        if let (Some(expr), Some(v)) = (Expression::from_key(&key), value.as_f64()) {
            values[expr.index()] = sanitize(v);
        }
    }
    Ok(values)
}

/// One detector sample: a probability per expression label
///
/// Values are not assumed to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExpressionFrame {
    values: [f64; EXPRESSION_COUNT],
}

impl ExpressionFrame {
    /// All-zero frame
    pub fn zero() -> Self {
        Self::default()
    }

    /// Frame with every label set to `value`
    pub fn uniform(value: f64) -> Self {
        Self {
            values: [sanitize(value); EXPRESSION_COUNT],
        }
    }

    /// Build from (label, value) pairs; labels not listed stay 0
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Expression, f64)>,
    {
        let mut frame = Self::zero();
        for (expr, value) in pairs {
            frame.set(expr, value);
        }
        frame
    }

    /// Builder-style setter
    pub fn with(mut self, expr: Expression, value: f64) -> Self {
        self.set(expr, value);
        self
    }

    pub fn set(&mut self, expr: Expression, value: f64) {
        self.values[expr.index()] = sanitize(value);
    }

    pub fn get(&self, expr: Expression) -> f64 {
        self.values[expr.index()]
    }

    pub fn values(&self) -> &[f64; EXPRESSION_COUNT] {
        &self.values
    }
}

impl Serialize for ExpressionFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_labels(&self.values, serializer)
    }
}

impl<'de> Deserialize<'de> for ExpressionFrame {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self {
            values: deserialize_labels(deserializer)?,
        })
    }
}

/// Per-label mean over the frames in the smoothing window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SmoothedExpression {
    values: [f64; EXPRESSION_COUNT],
}

impl SmoothedExpression {
    pub fn from_values(values: [f64; EXPRESSION_COUNT]) -> Self {
        Self { values }
    }

    pub fn get(&self, expr: Expression) -> f64 {
        self.values[expr.index()]
    }

    pub fn values(&self) -> &[f64; EXPRESSION_COUNT] {
        &self.values
    }

    /// (label, value) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Expression, f64)> + '_ {
        Expression::ALL.into_iter().map(|e| (e, self.values[e.index()]))
    }
}

impl From<ExpressionFrame> for SmoothedExpression {
    fn from(frame: ExpressionFrame) -> Self {
        Self {
            values: frame.values,
        }
    }
}

impl Serialize for SmoothedExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_labels(&self.values, serializer)
    }
}

impl<'de> Deserialize<'de> for SmoothedExpression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self {
            values: deserialize_labels(deserializer)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_index() {
        for (i, expr) in Expression::ALL.iter().enumerate() {
            assert_eq!(expr.index(), i);
        }
    }

    #[test]
    fn test_from_key_case_insensitive() {
        assert_eq!(Expression::from_key("Happy"), Some(Expression::Happy));
        assert_eq!(Expression::from_key(" neutral "), Some(Expression::Neutral));
        assert_eq!(Expression::from_key("contempt"), None);
    }

    #[test]
    fn test_missing_labels_read_as_zero() {
        let frame: ExpressionFrame = serde_json::from_str(r#"{"sad": 0.4}"#).unwrap();
        assert_eq!(frame.get(Expression::Sad), 0.4);
        assert_eq!(frame.get(Expression::Happy), 0.0);
        assert_eq!(frame.get(Expression::Neutral), 0.0);
    }

    #[test]
    fn test_unknown_and_non_numeric_keys_ignored() {
        let frame: ExpressionFrame = serde_json::from_str(
            r#"{"hapy": 0.9, "angry": null, "fearful": "high", "neutral": 0.5}"#,
        )
        .unwrap();
        assert_eq!(frame.get(Expression::Happy), 0.0);
        assert_eq!(frame.get(Expression::Angry), 0.0);
        assert_eq!(frame.get(Expression::Fearful), 0.0);
        assert_eq!(frame.get(Expression::Neutral), 0.5);
    }

    #[test]
    fn test_values_are_clamped() {
        let frame = ExpressionFrame::zero()
            .with(Expression::Angry, 1.7)
            .with(Expression::Sad, -0.2)
            .with(Expression::Fearful, f64::NAN);
        assert_eq!(frame.get(Expression::Angry), 1.0);
        assert_eq!(frame.get(Expression::Sad), 0.0);
        assert_eq!(frame.get(Expression::Fearful), 0.0);
    }

    #[test]
    fn test_serializes_every_label() {
        let frame = ExpressionFrame::from_pairs([(Expression::Happy, 0.5)]);
        let json = serde_json::to_value(frame).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), EXPRESSION_COUNT);
        assert_eq!(obj["happy"], 0.5);
        assert_eq!(obj["disgusted"], 0.0);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(serde_json::from_str::<ExpressionFrame>("[0.1, 0.2]").is_err());
    }
}
