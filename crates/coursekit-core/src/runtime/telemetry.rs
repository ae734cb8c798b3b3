// crates/coursekit-core/src/runtime/telemetry.rs
// ============================================================================
// Module: Runtime Telemetry
// Description: Observability hooks for the submission runtime.
// Purpose: Provide counter events without hard dependencies.
// Dependencies: none
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for submission counters. It
//! is intentionally dependency-light so downstream deployments can plug in
//! Prometheus or OpenTelemetry without redesign. Swallowed grade-publication
//! failures are surfaced here and nowhere else.
//! Security posture: labels are fixed enums; no payload data reaches the
//! sink.

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// Exercise family classification for submission counters.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ExerciseFamily {
    /// Binary-choice exercise.
    Choice,
    /// Ordering exercise.
    Ordering,
    /// Formula/expression exercise.
    Formula,
    /// Diagram/drawing exercise.
    Diagram,
}

impl ExerciseFamily {
    /// Returns a stable label for the family.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Choice => "choice",
            Self::Ordering => "ordering",
            Self::Formula => "formula",
            Self::Diagram => "diagram",
        }
    }
}

/// Submission outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SubmitOutcome {
    /// Submission accepted and scored.
    Accepted,
    /// Submission rejected by the attempt gate.
    Rejected,
}

impl SubmitOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

// ============================================================================
// SECTION: Telemetry Sink
// ============================================================================

/// Counter hooks invoked by the submission runtime.
///
/// All methods default to no-ops so hosts opt into only the counters they
/// export.
pub trait TelemetrySink {
    /// Records one submission with its family and outcome.
    fn record_submission(&self, family: ExerciseFamily, outcome: SubmitOutcome) {
        let _ = (family, outcome);
    }

    /// Records one sanitizer rejection.
    fn record_sanitizer_rejection(&self) {}

    /// Records one swallowed grade-publication failure.
    fn record_publish_failure(&self) {}
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for &T {
    fn record_submission(&self, family: ExerciseFamily, outcome: SubmitOutcome) {
        (**self).record_submission(family, outcome);
    }

    fn record_sanitizer_rejection(&self) {
        (**self).record_sanitizer_rejection();
    }

    fn record_publish_failure(&self) {
        (**self).record_publish_failure();
    }
}

/// Telemetry sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {}
