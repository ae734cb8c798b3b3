// crates/coursekit-core/src/runtime/engine.rs
// ============================================================================
// Module: Scoring Engine
// Description: Attempt gating, score application, and grade publication.
// Purpose: Enforce the max-attempts gate and update attempt state atomically
// per accepted submission.
// Dependencies: crate::core, crate::interfaces, crate::runtime::evaluator
// ============================================================================

//! ## Overview
//! The scoring engine applies one correctness signal to one attempt record:
//! the attempt gate is checked strictly before any mutation, then attempts,
//! score, and completion are updated as a unit, the grade event is published
//! best-effort, and the tiered result payload is assembled.
//!
//! Completion is evaluated after the attempt increment, so a final
//! unsuccessful attempt still completes the exercise by exhaustion.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::attempts::AttemptLimit;
use crate::core::attempts::AttemptState;
use crate::core::identifiers::ExerciseId;
use crate::core::identifiers::LearnerId;
use crate::core::score::MessageTier;
use crate::core::score::feedback_message;
use crate::interfaces::GRADE_EVENT;
use crate::interfaces::GradeEvent;
use crate::interfaces::GradePublisher;
use crate::runtime::evaluator::CorrectnessSignal;
use crate::runtime::evaluator::evaluate_signal;
use crate::runtime::telemetry::TelemetrySink;

// ============================================================================
// SECTION: Submit Errors
// ============================================================================

/// Scored-submission failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `AttemptsExceeded` is raised strictly before any state mutation.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// No attempts remain for this learner and exercise.
    #[error("Max number of attempts reached")]
    AttemptsExceeded,
}

// ============================================================================
// SECTION: Submission Results
// ============================================================================

/// Result payload returned to the transport layer after an accepted
/// submission.
///
/// # Invariants
/// - `raw_grade` and `max_grade` are the weighted projections; storage stays
///   unweighted.
/// - `expression_results` is present only for formula exercises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// True when the submission earned full credit.
    pub correct: bool,
    /// Attempts used after this submission.
    pub attempts_used: u32,
    /// Remaining attempts, or `None` when unlimited.
    pub remaining_attempts: Option<u32>,
    /// Weighted earned grade.
    pub raw_grade: f64,
    /// Weighted maximum grade.
    pub max_grade: f64,
    /// Tier selected for the feedback message.
    pub tier: MessageTier,
    /// Tiered feedback message with grade interpolation.
    pub message: String,
    /// Per-expression pass/fail map for formula exercises.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_results: Option<BTreeMap<String, bool>>,
}

// ============================================================================
// SECTION: Scoring Engine
// ============================================================================

/// Attempt-gated scoring for one exercise configuration.
///
/// The engine holds only configuration (weight and attempt limit); attempt
/// state is owned by the caller and mutated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringEngine {
    /// Grade multiplier applied when reporting to the host.
    weight: f64,
    /// Configured attempt ceiling.
    limit: AttemptLimit,
}

impl ScoringEngine {
    /// Creates an engine with the configured weight and attempt limit.
    #[must_use]
    pub const fn new(weight: f64, limit: AttemptLimit) -> Self {
        Self { weight, limit }
    }

    /// Returns the configured attempt limit.
    #[must_use]
    pub const fn limit(&self) -> AttemptLimit {
        self.limit
    }

    /// Returns the configured weight.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Applies one correctness signal to the attempt record.
    ///
    /// On success the record's attempt count, score, and completion flag are
    /// updated as a unit, the grade event is published best-effort, and the
    /// result payload is returned.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::AttemptsExceeded`] when no attempts remain;
    /// the record is not mutated in that case.
    pub fn submit(
        &self,
        state: &mut AttemptState,
        signal: &CorrectnessSignal,
        exercise: &ExerciseId,
        learner: &LearnerId,
        publisher: &dyn GradePublisher,
        telemetry: &dyn TelemetrySink,
    ) -> Result<SubmissionResult, SubmitError> {
        if !state.can_submit(self.limit) {
            return Err(SubmitError::AttemptsExceeded);
        }

        let score = evaluate_signal(signal);
        state.attempts_used += 1;
        state.raw_earned = score.earned;
        state.raw_possible = score.possible;
        let remaining = state.remaining_attempts(self.limit);
        let tier = MessageTier::for_fraction(score.fraction());
        state.completed = tier == MessageTier::Correct || remaining == Some(0);

        let event = GradeEvent { value: score.earned, max_value: score.possible };
        if publisher.publish(GRADE_EVENT, exercise, learner, &event).is_err() {
            // Best-effort delivery: local state is already updated and stays.
            telemetry.record_publish_failure();
        }

        let (raw_grade, max_grade) = score.weighted(self.weight);
        let expression_results = match signal {
            CorrectnessSignal::Formula { results, .. } => Some(results.clone()),
            CorrectnessSignal::Choice { .. } | CorrectnessSignal::Ordering { .. } => None,
        };

        Ok(SubmissionResult {
            correct: tier == MessageTier::Correct,
            attempts_used: state.attempts_used,
            remaining_attempts: remaining,
            raw_grade,
            max_grade,
            tier,
            message: feedback_message(tier, raw_grade, max_grade),
            expression_results,
        })
    }
}
