// crates/coursekit-core/src/runtime/mod.rs
// ============================================================================
// Module: Submission Runtime
// Description: Correctness evaluation, scoring engine, and submission handler.
// Purpose: Compose the core data model with the collaborator interfaces into
// the submit flow.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime turns a correctness signal into an accepted-or-rejected
//! submission: the attempt gate is checked strictly before any mutation,
//! state is updated atomically as a unit, the grade is published
//! best-effort, and a tiered result payload is returned for the transport
//! layer to serialize.

pub mod engine;
pub mod evaluator;
pub mod handler;
pub mod store;
pub mod telemetry;

pub use engine::ScoringEngine;
pub use engine::SubmissionResult;
pub use engine::SubmitError;
pub use evaluator::CorrectnessSignal;
pub use evaluator::evaluate_signal;
pub use handler::HandlerError;
pub use handler::SubmissionHandler;
pub use store::InMemoryAttemptStore;
pub use telemetry::ExerciseFamily;
pub use telemetry::NoopTelemetry;
pub use telemetry::SubmitOutcome;
pub use telemetry::TelemetrySink;
