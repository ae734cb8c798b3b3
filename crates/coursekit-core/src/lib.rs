// crates/coursekit-core/src/lib.rs
// ============================================================================
// Module: Coursekit Core
// Description: Submission sanitization and deterministic attempt scoring.
// Purpose: Provide the host-independent grading core shared by all exercise
// families.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Coursekit Core implements the two host-independent components shared by
//! courseware exercise blocks: the diagram payload sanitizer and the attempt
//! and scoring engine. Both are pure, synchronous computations over bounded
//! in-memory values; everything host-specific (rendering, persistence,
//! transport) stays behind the collaborator traits in [`interfaces`].
//!
//! Security posture: submission payloads are untrusted author/learner input
//! and must be bounded and normalized before persistence.

pub mod core;
pub mod interfaces;
pub mod runtime;

pub use crate::core::attempts::AttemptLimit;
pub use crate::core::attempts::AttemptPhase;
pub use crate::core::attempts::AttemptState;
pub use crate::core::geometry::Canvas;
pub use crate::core::geometry::GeometryError;
pub use crate::core::geometry::ScaleFactors;
pub use crate::core::geometry::describe_diagram;
pub use crate::core::geometry::pixel_to_scaled;
pub use crate::core::identifiers::ExerciseId;
pub use crate::core::identifiers::LearnerId;
pub use crate::core::score::MessageTier;
pub use crate::core::score::RawScore;
pub use crate::core::score::feedback_message;
pub use crate::core::shapes::DiagramSource;
pub use crate::core::shapes::SanitizeLimits;
pub use crate::core::shapes::ShapeRecord;
pub use crate::core::shapes::ValidationError;
pub use crate::core::shapes::sanitize_diagram;
pub use crate::interfaces::AttemptStore;
pub use crate::interfaces::DiagramRegistry;
pub use crate::interfaces::GRADE_EVENT;
pub use crate::interfaces::GradeEvent;
pub use crate::interfaces::GradePublisher;
pub use crate::interfaces::PublishError;
pub use crate::interfaces::StoreError;
