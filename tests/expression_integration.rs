//! Integration tests for the expression processor
//!
//! Tests the full path: detector JSON → frame → smoothing → score/label/dominant

use mindwatch::core::{stress_score, ExpressionProcessor};
use mindwatch::types::{Expression, ExpressionFrame, SmoothedExpression, StressLabel};
use mindwatch::{SMOOTHING_WINDOW, TIMELINE_CAPACITY};
use pretty_assertions::assert_eq;

fn frame(json: &str) -> ExpressionFrame {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_detector_json_to_reading() {
    let mut processor = ExpressionProcessor::new();
    let reading = processor.update(frame(r#"{"angry": 1.0}"#));
    // 1.0 * 0.25 * 120 = 30
    assert_eq!(reading.stress_score, 30);
    assert_eq!(reading.stress_label, StressLabel::Calm);
    assert_eq!(reading.dominant, Expression::Angry);
    assert_eq!(reading.color, "#06b6d4");
    assert_eq!(reading.frame_count, 1);
}

#[test]
fn test_out_of_range_and_unknown_keys() {
    let parsed = frame(r#"{"angry": 2.5, "sad": -1, "contempt": 0.4, "happy": "lots"}"#);
    assert_eq!(parsed.get(Expression::Angry), 1.0);
    assert_eq!(parsed.get(Expression::Sad), 0.0);
    assert_eq!(parsed.get(Expression::Happy), 0.0);
    assert_eq!(parsed, ExpressionFrame::zero().with(Expression::Angry, 1.0));
}

#[test]
fn test_two_frame_average() {
    let mut processor = ExpressionProcessor::new();
    processor.update(frame(r#"{"sad": 1.0}"#));
    let reading = processor.update(frame(r#"{"happy": 1.0}"#));
    // stress 0.5*0.2*120 = 12, calm 0.5*0.3*40 = 6
    assert_eq!(reading.stress_score, 6);
    assert_eq!(reading.stress_label, StressLabel::VeryRelaxed);
    // happy and sad tie at 0.5; happy comes first
    assert_eq!(reading.dominant, Expression::Happy);
}

#[test]
fn test_window_recovers_after_full_turnover() {
    let mut processor = ExpressionProcessor::new();
    for _ in 0..SMOOTHING_WINDOW {
        processor.update(frame(r#"{"angry": 1.0, "fearful": 1.0, "sad": 1.0}"#));
    }
    let tense = processor.last_reading().unwrap().stress_score;
    assert_eq!(tense, 84);
    assert_eq!(
        processor.last_reading().unwrap().stress_label,
        StressLabel::VeryHighStress
    );

    for _ in 0..SMOOTHING_WINDOW {
        processor.update(frame(r#"{"neutral": 1.0}"#));
    }
    let reading = processor.last_reading().unwrap();
    assert_eq!(reading.stress_score, 0);
    assert_eq!(reading.stress_label, StressLabel::VeryRelaxed);
    assert_eq!(reading.dominant, Expression::Neutral);
    assert_eq!(processor.history_len(), SMOOTHING_WINDOW);
}

#[test]
fn test_score_monotone_while_stress_builds() {
    let mut processor = ExpressionProcessor::new();
    let mut previous = 0;
    for _ in 0..SMOOTHING_WINDOW {
        let score = processor.update(frame(r#"{"fearful": 1.0}"#)).stress_score;
        assert!(score >= previous);
        previous = score;
    }
}

#[test]
fn test_timeline_capped() {
    let mut processor = ExpressionProcessor::new();
    for _ in 0..200 {
        processor.update(frame(r#"{"surprised": 0.5}"#));
    }
    assert_eq!(processor.frame_count(), 200);
    assert_eq!(processor.timeline().len(), TIMELINE_CAPACITY);
}

#[test]
fn test_reading_json_shape() {
    let mut processor = ExpressionProcessor::new();
    let reading = processor.update(frame(r#"{"fearful": 0.8}"#));
    let json = serde_json::to_value(&reading).unwrap();
    assert_eq!(json["stressScore"], 24);
    assert_eq!(json["stressLabel"], "Calm");
    assert_eq!(json["dominant"], "fearful");
    assert_eq!(json["frameCount"], 1);
    assert_eq!(json["smoothed"]["fearful"], 0.8);
    assert_eq!(json["smoothed"]["happy"], 0.0);
}

#[test]
fn test_score_bounded_for_any_uniform_frame() {
    for step in 0..=10 {
        let value = step as f64 / 10.0;
        let score = stress_score(&SmoothedExpression::from(ExpressionFrame::uniform(value)));
        assert!(score <= 100);
    }
}

#[test]
fn test_parseable_output_format() {
    let mut processor = ExpressionProcessor::new();
    let reading = processor.update(ExpressionFrame::zero());
    assert_eq!(
        reading.to_parseable_string(),
        "stress=0 | label=Very Relaxed | dominant=neutral | frames=1"
    );
}
