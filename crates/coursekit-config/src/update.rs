// crates/coursekit-config/src/update.rs
// ============================================================================
// Module: Fail-Soft Configuration Updates
// Description: Per-field coercion of untyped editor patches onto an existing
// configuration.
// Purpose: Accept everything an editing surface sends, keep prior values on
// bad input, and report every coercion failure as a structured warning.
// Dependencies: coursekit-core, serde_json
// ============================================================================

//! ## Overview
//! Editing surfaces submit settings as loosely typed JSON: numbers arrive as
//! strings, booleans as checkboxes, and stale fields from a previous exercise
//! family linger in the payload. [`ExerciseConfig::apply_update`] walks the
//! patch field by field; each field that coerces cleanly is applied, each
//! field that does not keeps its previous value and produces one
//! [`ConfigWarning`]. The save as a whole never fails, so a single bad field
//! cannot discard an author's remaining edits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use coursekit_core::AttemptLimit;
use coursekit_core::Canvas;
use coursekit_core::DiagramSource;
use coursekit_core::SanitizeLimits;
use coursekit_core::ScaleFactors;
use serde_json::Value;

use crate::exercise::ConfigWarning;
use crate::exercise::ExerciseConfig;
use crate::exercise::ExerciseKind;

// ============================================================================
// SECTION: Field Coercion Helpers
// ============================================================================

/// Coerces a patch value to a string.
fn coerce_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Coerces a patch value to a float, accepting numbers and numeric strings.
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|parsed| parsed.is_finite()),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|parsed| parsed.is_finite()),
        _ => None,
    }
}

/// Coerces a patch value to an unsigned integer, accepting numbers and
/// numeric strings.
fn coerce_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|parsed| u32::try_from(parsed).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Coerces a patch value to a boolean, accepting booleans and the strings
/// `"true"` / `"false"`.
fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Coerces a patch value to a list of strings.
fn coerce_string_vec(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    items.iter().map(coerce_string).collect()
}

/// Coerces a patch value to a string-to-string map.
fn coerce_string_map(value: &Value) -> Option<BTreeMap<String, String>> {
    let entries = value.as_object()?;
    entries
        .iter()
        .map(|(key, entry)| coerce_string(entry).map(|text| (key.clone(), text)))
        .collect()
}

// ============================================================================
// SECTION: Patch Application
// ============================================================================

impl ExerciseConfig {
    /// Applies an untyped editor patch onto this configuration.
    ///
    /// Every recognized field is coerced independently; a field that fails
    /// coercion keeps its previous value and contributes one warning. Fields
    /// belonging to a different exercise family are reported and ignored;
    /// unrecognized keys are ignored silently. The exercise family itself is
    /// never changed by a patch.
    ///
    /// Returns the warnings produced by the patch, which may be empty.
    pub fn apply_update(&mut self, patch: &Value, limits: &SanitizeLimits) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let Value::Object(fields) = patch else {
            warnings.push(ConfigWarning::new("patch", "update payload must be a JSON object"));
            return warnings;
        };

        for (key, value) in fields {
            match key.as_str() {
                "display_name" => {
                    apply_field(&mut self.display_name, value, coerce_string, "a string", &mut warnings, key);
                }
                "question" => {
                    apply_field(&mut self.question, value, coerce_string, "a string", &mut warnings, key);
                }
                "weight" => match coerce_f64(value).filter(|parsed| *parsed > 0.0) {
                    Some(weight) => self.weight = weight,
                    None => warnings.push(ConfigWarning::kept_previous(key, "a positive number")),
                },
                "graded" => {
                    apply_field(&mut self.graded, value, coerce_bool, "a boolean", &mut warnings, key);
                }
                "max_attempts" => match coerce_u32(value) {
                    Some(raw) => self.max_attempts = AttemptLimit::from_raw(raw),
                    None => warnings.push(ConfigWarning::kept_previous(
                        key,
                        "a non-negative integer (0 means unlimited)",
                    )),
                },
                _ => self.apply_kind_field(key, value, limits, &mut warnings),
            }
        }
        warnings
    }

    /// Applies one family-specific patch field.
    ///
    /// Fields from another family produce a warning; truly unknown keys are
    /// ignored so editor surfaces can carry extra presentation state.
    fn apply_kind_field(
        &mut self,
        key: &str,
        value: &Value,
        limits: &SanitizeLimits,
        warnings: &mut Vec<ConfigWarning>,
    ) {
        let family = self.kind.family();
        match (&mut self.kind, key) {
            (ExerciseKind::Choice { choices, .. }, "choices") => {
                apply_field(choices, value, coerce_string_vec, "a list of strings", warnings, key);
            }
            (ExerciseKind::Choice { correct_index, .. }, "correct_index") => {
                match coerce_u32(value).and_then(|index| usize::try_from(index).ok()) {
                    Some(index) => *correct_index = index,
                    None => {
                        warnings.push(ConfigWarning::kept_previous(key, "a non-negative integer"));
                    }
                }
            }
            (ExerciseKind::Choice { hint, .. }, "hint") => {
                if value.is_null() {
                    *hint = None;
                } else {
                    match coerce_string(value) {
                        Some(text) => *hint = Some(text),
                        None => warnings
                            .push(ConfigWarning::kept_previous(key, "a string or null")),
                    }
                }
            }
            (ExerciseKind::Ordering { items, .. }, "items") => {
                apply_field(items, value, coerce_string_vec, "a list of strings", warnings, key);
            }
            (ExerciseKind::Ordering { item_background_color, .. }, "item_background_color") => {
                apply_field(item_background_color, value, coerce_string, "a string", warnings, key);
            }
            (ExerciseKind::Ordering { item_text_color, .. }, "item_text_color") => {
                apply_field(item_text_color, value, coerce_string, "a string", warnings, key);
            }
            (ExerciseKind::Formula { expressions, .. }, "expressions") => {
                apply_field(
                    expressions,
                    value,
                    coerce_string_map,
                    "a map of expression names to templates",
                    warnings,
                    key,
                );
            }
            (ExerciseKind::Formula { max_points, .. }, "max_points") => {
                match coerce_f64(value).filter(|parsed| *parsed > 0.0) {
                    Some(points) => *max_points = points,
                    None => warnings.push(ConfigWarning::kept_previous(key, "a positive number")),
                }
            }
            (ExerciseKind::Diagram { canvas, .. }, "canvas") => {
                match serde_json::from_value::<Canvas>(value.clone()) {
                    Ok(parsed) => *canvas = parsed,
                    Err(_) => warnings.push(ConfigWarning::kept_previous(
                        key,
                        "an object with width and height",
                    )),
                }
            }
            (ExerciseKind::Diagram { scale_factors, .. }, "scale_factors") => {
                match serde_json::from_value::<ScaleFactors>(value.clone()) {
                    Ok(parsed) => *scale_factors = parsed,
                    Err(_) => warnings
                        .push(ConfigWarning::kept_previous(key, "a list of six numbers")),
                }
            }
            (ExerciseKind::Diagram { initial_diagram, .. }, "initial_diagram") => {
                if value.is_null() {
                    *initial_diagram = None;
                } else {
                    match DiagramSource::resolve(value, limits) {
                        Ok(source) => *initial_diagram = Some(source),
                        Err(err) => warnings.push(ConfigWarning::new(
                            key,
                            format!("kept previous value; {err}"),
                        )),
                    }
                }
            }
            (ExerciseKind::Diagram { visible_modes, .. }, "visible_modes") => {
                apply_field(
                    visible_modes,
                    value,
                    coerce_string_vec,
                    "a list of mode names",
                    warnings,
                    key,
                );
            }
            (ExerciseKind::Diagram { hide_labels, .. }, "hide_labels") => {
                apply_field(hide_labels, value, coerce_bool, "a boolean", warnings, key);
            }
            (_, other) if FAMILY_FIELDS.contains(&other) => {
                warnings.push(ConfigWarning::new(
                    other,
                    format!("field does not apply to {} exercises", family.as_str()),
                ));
            }
            _ => {}
        }
    }
}

/// Every family-specific field name, used to distinguish cross-family fields
/// from unknown keys.
const FAMILY_FIELDS: [&str; 13] = [
    "choices",
    "correct_index",
    "hint",
    "items",
    "item_background_color",
    "item_text_color",
    "expressions",
    "max_points",
    "canvas",
    "scale_factors",
    "initial_diagram",
    "visible_modes",
    "hide_labels",
];

/// Applies one coercible field, keeping the previous value and warning when
/// coercion fails.
fn apply_field<T>(
    slot: &mut T,
    value: &Value,
    coerce: impl Fn(&Value) -> Option<T>,
    expected: &str,
    warnings: &mut Vec<ConfigWarning>,
    key: &str,
) {
    match coerce(value) {
        Some(parsed) => *slot = parsed,
        None => warnings.push(ConfigWarning::kept_previous(key, expected)),
    }
}
