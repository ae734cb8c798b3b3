// crates/coursekit-core/tests/proptest_sanitizer.rs
// ============================================================================
// Module: Sanitizer Property-Based Tests
// Description: Property tests for sanitizer idempotence and bounds.
// Purpose: Detect panics and invariant violations across wide input ranges.
// ============================================================================

//! Property-based tests for sanitizer invariants.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use coursekit_core::SanitizeLimits;
use coursekit_core::sanitize_diagram;
use proptest::prelude::*;
use serde_json::Value;

fn json_value_strategy(max_depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|v| Value::Number(v.into())),
        any::<f64>()
            .prop_filter("finite", |v| v.is_finite())
            .prop_map(|v| { serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number) }),
        "[a-zA-Z0-9#. ]{0,12}".prop_map(Value::String),
    ];

    leaf.prop_recursive(max_depth, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0 .. 4).prop_map(|entries| {
                Value::Object(entries.into_iter().collect())
            }),
        ]
    })
}

fn shape_list_strategy() -> impl Strategy<Value = Value> {
    prop::collection::vec(
        prop::collection::btree_map("[a-z]{1,8}", json_value_strategy(2), 0 .. 6)
            .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        0 .. 16,
    )
    .prop_map(Value::Array)
}

proptest! {
    #[test]
    fn sanitize_never_panics(payload in json_value_strategy(3)) {
        let _ = sanitize_diagram(&payload, &SanitizeLimits::default());
    }

    #[test]
    fn sanitized_output_is_idempotent(payload in shape_list_strategy()) {
        let limits = SanitizeLimits::default();
        if let Ok(first) = sanitize_diagram(&payload, &limits) {
            let reencoded = serde_json::to_value(&first).expect("serializable");
            let second = sanitize_diagram(&reencoded, &limits).expect("fixed point stays valid");
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn truncation_bounds_output_length(
        payload in shape_list_strategy(),
        max_items in 0_usize .. 8,
    ) {
        let limits = SanitizeLimits::new(max_items, usize::MAX);
        if let Ok(records) = sanitize_diagram(&payload, &limits) {
            prop_assert!(records.len() <= max_items);
        }
    }

    #[test]
    fn truncation_preserves_leading_records_in_order(payload in shape_list_strategy()) {
        let unbounded = SanitizeLimits::new(usize::MAX, usize::MAX);
        let bounded = SanitizeLimits::new(4, usize::MAX);
        if let Ok(full) = sanitize_diagram(&payload, &unbounded) {
            let truncated = sanitize_diagram(&payload, &bounded).expect("count bound never errors");
            let expected: Vec<_> = full.into_iter().take(4).collect();
            prop_assert_eq!(truncated, expected);
        }
    }

    #[test]
    fn serialized_result_respects_byte_bound(
        payload in shape_list_strategy(),
        max_bytes in 2_usize .. 512,
    ) {
        let limits = SanitizeLimits::new(1000, max_bytes);
        if let Ok(records) = sanitize_diagram(&payload, &limits) {
            let serialized = serde_json::to_vec(&records).expect("serializable");
            prop_assert!(serialized.len() <= max_bytes);
        }
    }
}
