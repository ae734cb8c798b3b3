// crates/coursekit-config/src/lib.rs
// ============================================================================
// Module: Coursekit Config
// Description: Typed exercise configuration, validation, and fail-soft
// updates.
// Purpose: Replace per-variant block settings with one configurable record
// per exercise family.
// Dependencies: coursekit-core, serde, serde_json, thiserror, toml
// ============================================================================

//! ## Overview
//! Exercise variants are represented as data, not as distinct types: one
//! [`ExerciseConfig`] record carries the shared settings and an
//! [`ExerciseKind`] payload with the family-specific fields. Validation
//! reports hard errors for impossible configurations and a structured list
//! of warnings for suspicious-but-usable ones; the fail-soft update path
//! keeps prior values on coercion failure but reports every failure instead
//! of swallowing it.

pub mod exercise;
pub mod update;

pub use exercise::ConfigError;
pub use exercise::ConfigWarning;
pub use exercise::ExerciseConfig;
pub use exercise::ExerciseKind;
