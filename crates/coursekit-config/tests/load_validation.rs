// crates/coursekit-config/tests/load_validation.rs
// ============================================================================
// Module: Config Loading Tests
// Description: TOML parsing, file loading, and round-trip stability.
// ============================================================================
//! ## Overview
//! Verifies the TOML wire form for each exercise family and the error paths
//! for unreadable or malformed files.

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

use std::io::Write as _;
use std::path::Path;

use coursekit_config::ConfigError;
use coursekit_config::ExerciseConfig;
use coursekit_config::ExerciseKind;
use coursekit_core::AttemptLimit;

const ORDERING_TOML: &str = r#"
display_name = "Country Sizes"
question = "Arrange the countries from largest to smallest."
weight = 2.0
max_attempts = 5

[kind]
type = "ordering"
items = ["Brazil", "France", "Japan", "Canada"]
"#;

#[test]
fn ordering_config_parses_from_toml() {
    let config = ExerciseConfig::from_toml_str(ORDERING_TOML).expect("parseable");
    assert_eq!(config.display_name, "Country Sizes");
    assert_eq!(config.weight, 2.0);
    assert_eq!(config.max_attempts, AttemptLimit::from_raw(5));
    let ExerciseKind::Ordering { items, item_background_color, .. } = &config.kind else {
        panic!("expected ordering kind");
    };
    assert_eq!(items.len(), 4);
    assert_eq!(item_background_color, "#f2f2f2");
    assert_eq!(config.validate().expect("valid"), Vec::new());
}

#[test]
fn formula_config_parses_from_toml() {
    let config = ExerciseConfig::from_toml_str(
        r#"
display_name = "Linear"
question = "Give the line through (0, -4) with slope 2."
max_attempts = 0

[kind]
type = "formula"
max_points = 2.0

[kind.expressions]
slope = "2*x"
intercept = "x - 4"
"#,
    )
    .expect("parseable");
    assert_eq!(config.max_attempts, AttemptLimit::Unlimited);
    let ExerciseKind::Formula { expressions, max_points } = &config.kind else {
        panic!("expected formula kind");
    };
    assert_eq!(expressions.len(), 2);
    assert_eq!(*max_points, 2.0);
}

#[test]
fn toml_round_trip_preserves_the_config() {
    let config = ExerciseConfig::from_toml_str(ORDERING_TOML).expect("parseable");
    let text = toml::to_string(&config).expect("serializable");
    let reparsed = ExerciseConfig::from_toml_str(&text).expect("reparseable");
    assert_eq!(config, reparsed);
}

#[test]
fn load_reads_a_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("exercise.toml");
    let mut file = std::fs::File::create(&path).expect("create");
    file.write_all(ORDERING_TOML.as_bytes()).expect("write");
    drop(file);

    let config = ExerciseConfig::load(&path).expect("loadable");
    assert_eq!(config.display_name, "Country Sizes");
}

#[test]
fn load_reports_missing_files_as_io_errors() {
    let err = ExerciseConfig::load(Path::new("/nonexistent/exercise.toml"))
        .expect_err("must fail");
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = ExerciseConfig::from_toml_str("display_name = ").expect_err("must fail");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_kind_is_a_parse_error() {
    let err = ExerciseConfig::from_toml_str(
        r#"
display_name = "Broken"
question = "No kind table."
"#,
    )
    .expect_err("must fail");
    let ConfigError::Parse(message) = err else {
        panic!("expected parse error");
    };
    assert!(message.contains("kind"), "unexpected message: {message}");
}
