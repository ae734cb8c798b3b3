// crates/coursekit-core/src/runtime/handler.rs
// ============================================================================
// Module: Submission Handler
// Description: Composition of scoring engine, stores, and registry behind
// the submission ingress boundary.
// Purpose: Route scored submissions and diagram payloads through the core
// with persistence and telemetry.
// Dependencies: crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! The handler is the seam between the host transport and the grading core.
//! It holds a scoring engine, an attempt store, a grade publisher, a diagram
//! registry, and a telemetry sink as explicit collaborators; nothing is
//! inherited. Scored submissions load state, run the engine, and persist
//! the mutated record only when the engine accepted the attempt. Diagram
//! payloads are sanitized and summarized without touching attempt state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::attempts::AttemptState;
use crate::core::geometry::Canvas;
use crate::core::geometry::GeometryError;
use crate::core::geometry::ScaleFactors;
use crate::core::geometry::describe_diagram;
use crate::core::identifiers::ExerciseId;
use crate::core::identifiers::LearnerId;
use crate::core::shapes::DiagramSource;
use crate::core::shapes::SanitizeLimits;
use crate::core::shapes::ShapeRecord;
use crate::core::shapes::ValidationError;
use crate::core::shapes::sanitize_diagram;
use crate::interfaces::AttemptStore;
use crate::interfaces::DiagramRegistry;
use crate::interfaces::GradePublisher;
use crate::interfaces::StoreError;
use crate::runtime::engine::ScoringEngine;
use crate::runtime::engine::SubmissionResult;
use crate::runtime::engine::SubmitError;
use crate::runtime::evaluator::CorrectnessSignal;
use crate::runtime::telemetry::SubmitOutcome;
use crate::runtime::telemetry::TelemetrySink;

// ============================================================================
// SECTION: Handler Errors
// ============================================================================

/// Failures surfaced to the transport layer.
///
/// # Invariants
/// - Variants are stable for programmatic handling; the transport maps them
///   to status codes.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Scored submission was rejected.
    #[error(transparent)]
    Submit(#[from] SubmitError),
    /// Diagram payload was malformed or oversized.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Coordinate transform failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// Attempt store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// No diagram is registered under the requested name.
    #[error("no diagram registered under \"{0}\"")]
    UnknownDiagram(String),
}

// ============================================================================
// SECTION: Submission Handler
// ============================================================================

/// Explicit composition of the grading core's collaborators.
///
/// # Invariants
/// - Attempt state is persisted only for accepted submissions; a rejected
///   or failed submission leaves the stored record untouched.
#[derive(Debug)]
pub struct SubmissionHandler<S, P, T> {
    /// Scoring configuration for this exercise.
    engine: ScoringEngine,
    /// Host-owned attempt persistence.
    store: S,
    /// Host-owned grade publication sink.
    publisher: P,
    /// Injected registry of named initial diagrams.
    registry: DiagramRegistry,
    /// Telemetry counters.
    telemetry: T,
    /// Sanitization bounds for diagram payloads.
    limits: SanitizeLimits,
}

impl<S, P, T> SubmissionHandler<S, P, T>
where
    S: AttemptStore,
    P: GradePublisher,
    T: TelemetrySink,
{
    /// Creates a handler from its collaborators.
    #[must_use]
    pub fn new(
        engine: ScoringEngine,
        store: S,
        publisher: P,
        registry: DiagramRegistry,
        telemetry: T,
    ) -> Self {
        Self {
            engine,
            store,
            publisher,
            registry,
            telemetry,
            limits: SanitizeLimits::default(),
        }
    }

    /// Overrides the sanitization bounds.
    #[must_use]
    pub const fn with_limits(mut self, limits: SanitizeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the scoring engine configuration.
    #[must_use]
    pub const fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Submits a correctness signal for one learner and exercise.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::AttemptsExceeded`] (wrapped) when the attempt
    /// gate rejects the submission, and [`StoreError`] (wrapped) when state
    /// cannot be loaded or persisted.
    pub fn submit(
        &mut self,
        learner: &LearnerId,
        exercise: &ExerciseId,
        signal: &CorrectnessSignal,
    ) -> Result<SubmissionResult, HandlerError> {
        let mut state = self.store.load(learner, exercise)?;
        let result = self.engine.submit(
            &mut state,
            signal,
            exercise,
            learner,
            &self.publisher,
            &self.telemetry,
        );
        match result {
            Ok(result) => {
                self.store.save(learner, exercise, &state)?;
                self.telemetry.record_submission(signal.family(), SubmitOutcome::Accepted);
                Ok(result)
            }
            Err(err) => {
                self.telemetry.record_submission(signal.family(), SubmitOutcome::Rejected);
                Err(err.into())
            }
        }
    }

    /// Returns the stored attempt record for one learner and exercise.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] (wrapped) when the record cannot be loaded.
    pub fn attempt_state(
        &self,
        learner: &LearnerId,
        exercise: &ExerciseId,
    ) -> Result<AttemptState, HandlerError> {
        Ok(self.store.load(learner, exercise)?)
    }

    /// Sanitizes a submitted diagram payload.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] (wrapped) for malformed or oversized
    /// payloads; the caller keeps any previously stored value.
    pub fn sanitize(&self, payload: &Value) -> Result<Vec<ShapeRecord>, HandlerError> {
        sanitize_diagram(payload, &self.limits).map_err(|err| {
            self.telemetry.record_sanitizer_rejection();
            err.into()
        })
    }

    /// Resolves an initial-diagram source (URL or inline content) from an
    /// editing surface.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] (wrapped) for malformed or oversized
    /// inline content; the caller keeps the previously stored source.
    pub fn save_initial_diagram(&self, raw: &Value) -> Result<DiagramSource, HandlerError> {
        DiagramSource::resolve(raw, &self.limits).map_err(|err| {
            self.telemetry.record_sanitizer_rejection();
            err.into()
        })
    }

    /// Sanitizes and summarizes a submitted diagram scene.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] (wrapped) for malformed payloads and
    /// [`GeometryError`] (wrapped) for a degenerate canvas.
    pub fn describe(
        &self,
        payload: &Value,
        scale: Option<(&ScaleFactors, Canvas)>,
    ) -> Result<String, HandlerError> {
        let objects = self.sanitize(payload)?;
        Ok(describe_diagram(&objects, scale)?)
    }

    /// Returns the diagram registered under a name.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::UnknownDiagram`] when the name has no entry.
    pub fn initial_diagram(&self, name: &str) -> Result<&[ShapeRecord], HandlerError> {
        self.registry
            .get(name)
            .ok_or_else(|| HandlerError::UnknownDiagram(name.to_string()))
    }
}
