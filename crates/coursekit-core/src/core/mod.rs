// crates/coursekit-core/src/core/mod.rs
// ============================================================================
// Module: Core Data Model
// Description: Shape records, geometry, attempt state, and score types.
// Purpose: Define the persistent and wire-facing data model for the grading
// core.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The core data model is independent of any exercise family: shape records
//! and sanitization bounds for diagram payloads, the attempt state machine
//! fields, and raw/weighted score types. All types serialize with stable
//! wire forms.

pub mod attempts;
pub mod geometry;
pub mod identifiers;
pub mod score;
pub mod shapes;

pub use attempts::AttemptLimit;
pub use attempts::AttemptPhase;
pub use attempts::AttemptState;
pub use geometry::Canvas;
pub use geometry::GeometryError;
pub use geometry::ScaleFactors;
pub use identifiers::ExerciseId;
pub use identifiers::LearnerId;
pub use score::MessageTier;
pub use score::RawScore;
pub use shapes::DiagramSource;
pub use shapes::SanitizeLimits;
pub use shapes::ShapeRecord;
pub use shapes::ValidationError;
