// crates/coursekit-config/tests/exercise_validation.rs
// ============================================================================
// Module: Exercise Validation Tests
// Description: Validation rules and defaults for every exercise family.
// ============================================================================
//! ## Overview
//! Pins the hard-error rules for ungradable configurations and the warning
//! list for suspicious-but-usable ones.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::float_cmp,
    reason = "Test-only output, panic-based assertions, and exact score comparisons are permitted."
)]

use std::collections::BTreeMap;

use coursekit_config::ConfigError;
use coursekit_config::ExerciseConfig;
use coursekit_config::ExerciseKind;
use coursekit_core::AttemptLimit;
use coursekit_core::runtime::ExerciseFamily;

fn ordering_config() -> ExerciseConfig {
    ExerciseConfig {
        display_name: "Country Sizes".to_string(),
        question: "Arrange the countries from largest to smallest.".to_string(),
        weight: 1.0,
        graded: true,
        max_attempts: AttemptLimit::from_raw(3),
        kind: ExerciseKind::Ordering {
            items: ["Brazil", "France", "Japan", "Canada"].map(String::from).to_vec(),
            item_background_color: "#f2f2f2".to_string(),
            item_text_color: "#000000".to_string(),
        },
    }
}

fn choice_config() -> ExerciseConfig {
    ExerciseConfig {
        kind: ExerciseKind::Choice {
            choices: ["Yes", "No"].map(String::from).to_vec(),
            correct_index: 0,
            hint: None,
        },
        ..ordering_config()
    }
}

/// Asserts that validation fails with a message containing the fragment.
fn assert_invalid(config: &ExerciseConfig, fragment: &str) {
    match config.validate() {
        Err(ConfigError::Invalid(message)) => {
            assert!(message.contains(fragment), "unexpected message: {message}");
        }
        other => panic!("expected Invalid containing {fragment:?}, got {other:?}"),
    }
}

#[test]
fn valid_ordering_config_passes_without_warnings() {
    assert_eq!(ordering_config().validate().expect("valid"), Vec::new());
}

#[test]
fn empty_question_is_rejected() {
    let config = ExerciseConfig { question: "   ".to_string(), ..ordering_config() };
    assert_invalid(&config, "question must not be empty");
}

#[test]
fn non_positive_weight_is_rejected() {
    let config = ExerciseConfig { weight: 0.0, ..ordering_config() };
    assert_invalid(&config, "weight must be greater than zero");
    let config = ExerciseConfig { weight: -2.0, ..ordering_config() };
    assert_invalid(&config, "weight must be greater than zero");
}

#[test]
fn ungraded_nonunit_weight_warns() {
    let config = ExerciseConfig { graded: false, weight: 2.0, ..ordering_config() };
    let warnings = config.validate().expect("usable");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "weight");
}

#[test]
fn choice_config_requires_two_choices() {
    let config = ExerciseConfig {
        kind: ExerciseKind::Choice {
            choices: vec!["Only".to_string()],
            correct_index: 0,
            hint: None,
        },
        ..ordering_config()
    };
    assert_invalid(&config, "at least two choices");
}

#[test]
fn choice_config_rejects_out_of_range_correct_index() {
    let config = ExerciseConfig {
        kind: ExerciseKind::Choice {
            choices: ["Yes", "No"].map(String::from).to_vec(),
            correct_index: 2,
            hint: None,
        },
        ..ordering_config()
    };
    assert_invalid(&config, "correct_index must be less than the number of choices");
}

#[test]
fn ordering_config_rejects_empty_items() {
    let config = ExerciseConfig {
        kind: ExerciseKind::Ordering {
            items: Vec::new(),
            item_background_color: "#f2f2f2".to_string(),
            item_text_color: "#000000".to_string(),
        },
        ..ordering_config()
    };
    assert_invalid(&config, "ordering items must not be empty");
}

#[test]
fn duplicate_ordering_items_warn() {
    let config = ExerciseConfig {
        kind: ExerciseKind::Ordering {
            items: ["Brazil", "Brazil", "Japan"].map(String::from).to_vec(),
            item_background_color: "#f2f2f2".to_string(),
            item_text_color: "#000000".to_string(),
        },
        ..ordering_config()
    };
    let warnings = config.validate().expect("usable");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "items");
}

#[test]
fn formula_config_requires_expressions_and_positive_points() {
    let config = ExerciseConfig {
        kind: ExerciseKind::Formula { expressions: BTreeMap::new(), max_points: 1.0 },
        ..ordering_config()
    };
    assert_invalid(&config, "at least one expression");

    let config = ExerciseConfig {
        kind: ExerciseKind::Formula {
            expressions: BTreeMap::from([("slope".to_string(), "2*x".to_string())]),
            max_points: 0.0,
        },
        ..ordering_config()
    };
    assert_invalid(&config, "max_points must be greater than zero");
}

#[test]
fn diagram_config_rejects_margins_consuming_the_canvas() {
    let mut config = ExerciseConfig {
        kind: ExerciseKind::Diagram {
            canvas: coursekit_core::Canvas::new(100.0, 400.0),
            scale_factors: coursekit_core::ScaleFactors::from([10.0, 20.0, 75.0, 84.0, 25.0, 35.0]),
            initial_diagram: None,
            visible_modes: vec!["line".to_string()],
            hide_labels: false,
        },
        ..ordering_config()
    };
    assert_invalid(&config, "canvas width must exceed horizontal margins");

    if let ExerciseKind::Diagram { canvas, .. } = &mut config.kind {
        *canvas = coursekit_core::Canvas::new(500.0, 100.0);
    }
    assert_invalid(&config, "canvas height must exceed vertical margins");
}

#[test]
fn default_diagram_config_is_valid() {
    let config: ExerciseConfig = serde_json::from_value(serde_json::json!({
        "display_name": "Draw",
        "question": "Draw the supply curve.",
        "kind": {"type": "diagram"}
    }))
    .expect("parseable");
    assert_eq!(config.validate().expect("valid"), Vec::new());
    assert_eq!(config.kind.family(), ExerciseFamily::Diagram);
    let ExerciseKind::Diagram { canvas, scale_factors, visible_modes, .. } = config.kind else {
        panic!("expected diagram kind");
    };
    assert_eq!(canvas.width, 500.0);
    assert_eq!(canvas.height, 400.0);
    assert_eq!(<[f64; 6]>::from(scale_factors), [10.0, 20.0, 75.0, 84.0, 25.0, 35.0]);
    assert_eq!(visible_modes.len(), 17);
    assert!(visible_modes.iter().any(|mode| mode == "strokeWidth"));
}

#[test]
fn shared_defaults_apply_when_fields_are_omitted() {
    let config: ExerciseConfig = serde_json::from_value(serde_json::json!({
        "display_name": "Pick",
        "question": "Pick the right answer.",
        "kind": {"type": "choice", "choices": ["Yes", "No"], "correct_index": 1}
    }))
    .expect("parseable");
    assert_eq!(config.weight, 1.0);
    assert!(config.graded);
    assert_eq!(config.max_attempts, AttemptLimit::from_raw(3));
}

#[test]
fn choice_config_is_valid_with_hint() {
    let config = ExerciseConfig {
        kind: ExerciseKind::Choice {
            choices: ["Yes", "No"].map(String::from).to_vec(),
            correct_index: 1,
            hint: Some("Think about it.".to_string()),
        },
        ..choice_config()
    };
    assert_eq!(config.validate().expect("valid"), Vec::new());
}
