// crates/coursekit-core/src/core/shapes.rs
// ============================================================================
// Module: Shape Records and Payload Sanitization
// Description: Normalized drawable objects and the diagram payload sanitizer.
// Purpose: Convert untrusted diagram JSON into a bounded, numerically
// normalized sequence of shape records.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Diagram payloads arrive from an authoring surface or a learner canvas as
//! arbitrary JSON. The sanitizer collapses either form of payload (a canvas
//! object with an `objects` list, or a bare list) into an ordered sequence of
//! [`ShapeRecord`] values with every numeric-looking attribute coerced to a
//! float, truncated to `max_items` entries and bounded to `max_bytes` of
//! serialized weight.
//!
//! Security posture: payloads are untrusted; the count bound is enforced by
//! silent truncation and the byte bound by hard rejection, so a pathological
//! payload can never bloat persisted state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Sanitization Limits
// ============================================================================

/// Default maximum number of shape records kept after truncation.
pub const DEFAULT_MAX_ITEMS: usize = 1000;

/// Default maximum serialized size of a sanitized diagram, in bytes.
pub const DEFAULT_MAX_BYTES: usize = 100_000;

/// Resource bounds applied by [`sanitize_diagram`].
///
/// # Invariants
/// - `max_items` bounds the record count (enforced by silent truncation).
/// - `max_bytes` bounds the serialized size of the truncated, normalized
///   result (enforced by rejection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizeLimits {
    /// Maximum number of shape records retained.
    pub max_items: usize,
    /// Maximum serialized byte length of the sanitized sequence.
    pub max_bytes: usize,
}

impl SanitizeLimits {
    /// Creates limits with explicit bounds.
    #[must_use]
    pub const fn new(max_items: usize, max_bytes: usize) -> Self {
        Self { max_items, max_bytes }
    }
}

impl Default for SanitizeLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITEMS, DEFAULT_MAX_BYTES)
    }
}

// ============================================================================
// SECTION: Validation Errors
// ============================================================================

/// Sanitizer failures for malformed or oversized payloads.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages are human-readable; the host maps them to transport errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Payload was neither a list nor a canvas object with an `objects` list.
    #[error("diagram must be a list or a canvas object with an \"objects\" list")]
    NotASequence,
    /// Serialized size of the truncated, normalized result exceeded the bound.
    #[error("diagram exceeds maximum allowed size ({actual} > {limit} bytes)")]
    TooLarge {
        /// Serialized byte length of the sanitized sequence.
        actual: usize,
        /// Configured byte limit.
        limit: usize,
    },
    /// Inline diagram text was not valid JSON.
    #[error("diagram is not valid JSON: {0}")]
    InvalidJson(String),
    /// Sanitized sequence could not be serialized.
    #[error("diagram could not be serialized: {0}")]
    Serialize(String),
}

// ============================================================================
// SECTION: Shape Records
// ============================================================================

/// One normalized drawable object in a diagram payload.
///
/// # Invariants
/// - Only mapping-typed payload entries become records; other entries are
///   dropped during sanitization.
/// - Every numeric-looking attribute value has been coerced to a JSON float.
/// - Serializes transparently as its attribute map, so a sequence of records
///   round-trips as `{"objects": [...]}` content or a bare JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeRecord {
    /// Attribute map copied from the raw object, values normalized.
    pub attributes: Map<String, Value>,
}

impl ShapeRecord {
    /// Creates a record from an already-normalized attribute map.
    #[must_use]
    pub const fn new(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    /// Returns the shape tag, checking the `type`, `objectType`, and `shape`
    /// attributes in that order, or `"unknown"` when none is present.
    #[must_use]
    pub fn kind(&self) -> &str {
        ["type", "objectType", "shape"]
            .iter()
            .find_map(|key| self.attributes.get(*key).and_then(Value::as_str))
            .unwrap_or("unknown")
    }

    /// Returns a numeric attribute as a float, or `None` when absent or
    /// non-numeric.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).and_then(Value::as_f64)
    }
}

// ============================================================================
// SECTION: Sanitizer
// ============================================================================

/// Normalizes and validates a diagram payload.
///
/// Accepts either a full canvas-like object (with an `objects` list) or a
/// plain list of object maps. Non-map entries are dropped, the sequence is
/// truncated to `limits.max_items`, and every numeric-looking attribute is
/// coerced to a float.
///
/// # Errors
///
/// Returns [`ValidationError::NotASequence`] when the payload does not
/// collapse to a list, [`ValidationError::TooLarge`] when the truncated,
/// normalized result serializes to more than `limits.max_bytes` bytes, and
/// [`ValidationError::Serialize`] when serialization itself fails.
pub fn sanitize_diagram(
    data: &Value,
    limits: &SanitizeLimits,
) -> Result<Vec<ShapeRecord>, ValidationError> {
    let items = match data {
        Value::Object(map) if map.contains_key("objects") => {
            map.get("objects").unwrap_or(&Value::Null)
        }
        other => other,
    };
    let Value::Array(items) = items else {
        return Err(ValidationError::NotASequence);
    };

    let mut sanitized = Vec::with_capacity(items.len().min(limits.max_items));
    for item in items.iter().take(limits.max_items) {
        let Value::Object(fields) = item else {
            continue;
        };
        let mut clean = Map::with_capacity(fields.len());
        for (key, value) in fields {
            clean.insert(key.clone(), coerce_numeric(value));
        }
        sanitized.push(ShapeRecord::new(clean));
    }

    let serialized = serde_json::to_vec(&sanitized)
        .map_err(|err| ValidationError::Serialize(err.to_string()))?;
    if serialized.len() > limits.max_bytes {
        return Err(ValidationError::TooLarge {
            actual: serialized.len(),
            limit: limits.max_bytes,
        });
    }

    Ok(sanitized)
}

/// Coerces numeric-looking values to JSON floats.
///
/// Numbers always become floats. Strings are parsed as floats when they carry
/// a decimal point or exponent marker, and as integers otherwise; on success
/// the parsed value is stored as a float, on failure the original string is
/// kept. Booleans, nulls, and nested collections pass through unchanged.
fn coerce_numeric(value: &Value) -> Value {
    match value {
        Value::Number(number) => number
            .as_f64()
            .and_then(Number::from_f64)
            .map_or_else(|| value.clone(), Value::Number),
        Value::String(text) => parse_numeric_string(text).map_or_else(|| value.clone(), float_value),
        other => other.clone(),
    }
}

/// Parses a string as a number using the decimal-or-exponent heuristic.
/// Surrounding whitespace is ignored, matching lenient editor input.
fn parse_numeric_string(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.contains(['.', 'e', 'E']) {
        text.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
    } else {
        #[allow(
            clippy::cast_precision_loss,
            reason = "coordinate-scale integers are far below f64 precision limits"
        )]
        text.parse::<i64>().ok().map(|parsed| parsed as f64)
    }
}

/// Wraps a finite float as a JSON number value.
fn float_value(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

// ============================================================================
// SECTION: Diagram Sources
// ============================================================================

/// Stored source for an exercise's initial diagram.
///
/// # Invariants
/// - `Url` values are trimmed `http://` or `https://` strings stored as-is.
/// - `Inline` values have passed [`sanitize_diagram`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiagramSource {
    /// Remote JSON document fetched by the frontend when needed.
    Url(String),
    /// Inline sanitized diagram content.
    Inline(Vec<ShapeRecord>),
}

impl DiagramSource {
    /// Resolves a raw initial-diagram value from an editing surface.
    ///
    /// URL strings are stored as-is (trimmed); anything else is treated as
    /// inline diagram content, parsed when given as a JSON string, and
    /// sanitized.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidJson`] for unparseable inline text
    /// and propagates sanitizer failures. Callers keep the previously stored
    /// value on error.
    pub fn resolve(raw: &Value, limits: &SanitizeLimits) -> Result<Self, ValidationError> {
        if let Value::String(text) = raw {
            let trimmed = text.trim();
            let lowered = trimmed.to_ascii_lowercase();
            if lowered.starts_with("http://") || lowered.starts_with("https://") {
                return Ok(Self::Url(trimmed.to_string()));
            }
            let parsed: Value = serde_json::from_str(trimmed)
                .map_err(|err| ValidationError::InvalidJson(err.to_string()))?;
            return Ok(Self::Inline(sanitize_diagram(&parsed, limits)?));
        }
        Ok(Self::Inline(sanitize_diagram(raw, limits)?))
    }
}
