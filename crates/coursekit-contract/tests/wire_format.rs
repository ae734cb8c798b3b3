// crates/coursekit-contract/tests/wire_format.rs
// ============================================================================
// Module: Wire Format Tests
// Description: Field-name stability and status mapping for the transport
// surface.
// ============================================================================
//! ## Overview
//! Pins the snake_case wire form of every request and response shape and the
//! status code assigned to each core failure. These are compatibility tests;
//! a change here is a wire-format break.

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
use coursekit_contract::DescribeDiagramRequest;
use coursekit_contract::ErrorBody;
use coursekit_contract::SaveDiagramResponse;
use coursekit_contract::SubmitAnswerRequest;
use coursekit_contract::SubmitFormulaRequest;
use coursekit_contract::SubmitOrderingRequest;
use coursekit_contract::SubmitResponse;
use coursekit_core::DiagramSource;
use coursekit_core::MessageTier;
use coursekit_core::ValidationError;
use coursekit_core::runtime::CorrectnessSignal;
use coursekit_core::runtime::HandlerError;
use coursekit_core::runtime::SubmitError;
use serde_json::json;

#[test]
fn answer_request_round_trips() {
    let request: SubmitAnswerRequest =
        serde_json::from_value(json!({"selected": 1})).expect("parseable");
    assert_eq!(request.selected, 1);
    assert_eq!(serde_json::to_value(request).expect("serializable"), json!({"selected": 1}));
}

#[test]
fn ordering_request_round_trips() {
    let wire = json!({"submitted": ["Brazil", "Canada", "Japan", "France"]});
    let request: SubmitOrderingRequest =
        serde_json::from_value(wire.clone()).expect("parseable");
    assert_eq!(request.submitted.len(), 4);
    assert_eq!(serde_json::to_value(request).expect("serializable"), wire);
}

#[test]
fn formula_request_keeps_expression_names() {
    let request: SubmitFormulaRequest =
        serde_json::from_value(json!({"results": {"slope": true, "intercept": false}}))
            .expect("parseable");
    assert_eq!(request.results.get("slope"), Some(&true));
    assert_eq!(request.results.get("intercept"), Some(&false));
}

#[test]
fn describe_request_defaults_to_unscaled() {
    let request: DescribeDiagramRequest =
        serde_json::from_value(json!({"diagram": []})).expect("parseable");
    assert!(!request.scaled);
}

#[test]
fn answer_request_converts_to_a_choice_signal() {
    let signal = SubmitAnswerRequest { selected: 2 }.into_signal(2);
    assert!(matches!(signal, CorrectnessSignal::Choice { selected: 2, correct: 2 }));
}

#[test]
fn ordering_request_converts_to_an_ordering_signal() {
    let submitted = vec!["France".to_string(), "Brazil".to_string()];
    let canonical = vec!["Brazil".to_string(), "France".to_string()];
    let signal =
        SubmitOrderingRequest { submitted: submitted.clone() }.into_signal(canonical.clone());
    let CorrectnessSignal::Ordering { candidate, canonical: expected } = signal else {
        panic!("expected ordering signal");
    };
    assert_eq!(candidate, submitted);
    assert_eq!(expected, canonical);
}

#[test]
fn submit_response_pins_its_field_names() {
    let response = SubmitResponse {
        correct: false,
        attempts_used: 2,
        remaining_attempts: Some(1),
        raw_grade: 0.5,
        max_grade: 1.0,
        tier: MessageTier::PartiallyCorrect,
        message: "Partially Correct (0.5/1) - Getting closer!".to_string(),
        expression_results: None,
    };
    let wire = serde_json::to_value(&response).expect("serializable");
    assert_eq!(
        wire,
        json!({
            "correct": false,
            "attempts_used": 2,
            "remaining_attempts": 1,
            "raw_grade": 0.5,
            "max_grade": 1.0,
            "tier": "partially_correct",
            "message": "Partially Correct (0.5/1) - Getting closer!"
        })
    );
    let reparsed: SubmitResponse = serde_json::from_value(wire).expect("parseable");
    assert_eq!(reparsed, response);
}

#[test]
fn formula_response_includes_the_expression_map() {
    let response = SubmitResponse {
        correct: true,
        attempts_used: 1,
        remaining_attempts: None,
        raw_grade: 2.0,
        max_grade: 2.0,
        tier: MessageTier::Correct,
        message: "Correct (2/2) - Great job!".to_string(),
        expression_results: Some(BTreeMap::from([("slope".to_string(), true)])),
    };
    let wire = serde_json::to_value(&response).expect("serializable");
    assert_eq!(wire["expression_results"], json!({"slope": true}));
    assert_eq!(wire["remaining_attempts"], json!(null));
}

#[test]
fn save_diagram_response_serializes_url_sources_as_strings() {
    let response =
        SaveDiagramResponse { source: DiagramSource::Url("https://example.org/a.json".to_string()) };
    let wire = serde_json::to_value(&response).expect("serializable");
    assert_eq!(wire, json!({"source": "https://example.org/a.json"}));
}

#[test]
fn attempt_gate_rejection_maps_to_conflict() {
    let body = ErrorBody::from(&HandlerError::Submit(SubmitError::AttemptsExceeded));
    assert_eq!(body.status, 409);
    assert_eq!(body.message, "Max number of attempts reached");
}

#[test]
fn validation_failures_map_to_bad_request() {
    let body = ErrorBody::from(&HandlerError::Validation(ValidationError::NotASequence));
    assert_eq!(body.status, 400);
    assert!(body.message.contains("diagram must be a list"));
}

#[test]
fn unknown_diagram_maps_to_not_found() {
    let body = ErrorBody::from(&HandlerError::UnknownDiagram("axes".to_string()));
    assert_eq!(body.status, 404);
    assert!(body.message.contains("axes"));
}

#[test]
fn config_errors_map_to_bad_request() {
    let body = ErrorBody::from(&ConfigError::Invalid("weight must be greater than zero".to_string()));
    assert_eq!(body.status, 400);
    assert!(body.message.contains("weight"));
}

#[test]
fn error_body_serializes_status_and_message() {
    let body = ErrorBody::new(409, "Max number of attempts reached");
    assert_eq!(
        serde_json::to_value(&body).expect("serializable"),
        json!({"status": 409, "message": "Max number of attempts reached"})
    );
}
