// crates/coursekit-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Correctness Evaluation
// Description: Exercise-specific correctness signals and score computation.
// Purpose: Convert a correctness signal into a deterministic raw score.
// Dependencies: crate::core::score, crate::runtime::telemetry, serde
// ============================================================================

//! ## Overview
//! Each exercise family produces its own correctness signal: an index
//! compared for equality, a candidate ordering compared position by
//! position, or a per-expression pass/fail map from an external evaluator.
//! Evaluation is a pure function from signal to [`RawScore`]; the engine
//! applies the result to attempt state.
//!
//! Formula scoring is all-or-nothing at the top level even though the
//! evaluator reports partial per-expression results; the partial map is
//! still surfaced to the caller unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::score::RawScore;
use crate::runtime::telemetry::ExerciseFamily;

// ============================================================================
// SECTION: Correctness Signals
// ============================================================================

/// Exercise-specific correctness signal consumed by the scoring engine.
///
/// # Invariants
/// - Signals carry everything needed to score deterministically; no field
///   lookup happens during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectnessSignal {
    /// Binary-choice answer: selected index against the correct index.
    Choice {
        /// Index selected by the learner.
        selected: usize,
        /// Stored correct index.
        correct: usize,
    },
    /// Ordering answer: candidate sequence against the canonical sequence.
    Ordering {
        /// Sequence submitted by the learner.
        candidate: Vec<String>,
        /// Canonical sequence from the exercise data.
        canonical: Vec<String>,
    },
    /// Formula answer: per-expression pass/fail map from the external
    /// evaluator.
    Formula {
        /// Pass/fail result per expression name.
        results: BTreeMap<String, bool>,
        /// Points awarded when every expression passes.
        max_points: f64,
    },
}

impl CorrectnessSignal {
    /// Returns the telemetry family for the signal.
    #[must_use]
    pub const fn family(&self) -> ExerciseFamily {
        match self {
            Self::Choice { .. } => ExerciseFamily::Choice,
            Self::Ordering { .. } => ExerciseFamily::Ordering,
            Self::Formula { .. } => ExerciseFamily::Formula,
        }
    }
}

// ============================================================================
// SECTION: Score Computation
// ============================================================================

/// Computes the raw score for a correctness signal.
#[must_use]
pub fn evaluate_signal(signal: &CorrectnessSignal) -> RawScore {
    match signal {
        CorrectnessSignal::Choice { selected, correct } => {
            let earned = if selected == correct { 1.0 } else { 0.0 };
            RawScore::new(earned, 1.0)
        }
        CorrectnessSignal::Ordering { candidate, canonical } => {
            RawScore::new(ordering_fraction(candidate, canonical), 1.0)
        }
        CorrectnessSignal::Formula { results, max_points } => {
            // All-or-nothing: one failing expression zeroes the whole score.
            let earned = if results.values().all(|passed| *passed) { *max_points } else { 0.0 };
            RawScore::new(earned, *max_points)
        }
    }
}

/// Returns the fraction of canonical positions matched by the candidate.
///
/// Missing or extra candidate positions count as incorrect; an empty
/// canonical sequence scores zero.
fn ordering_fraction(candidate: &[String], canonical: &[String]) -> f64 {
    if canonical.is_empty() {
        return 0.0;
    }
    let matched = canonical
        .iter()
        .zip(candidate.iter())
        .filter(|(expected, placed)| expected == placed)
        .count();
    #[allow(
        clippy::cast_precision_loss,
        reason = "position counts are far below f64 precision limits"
    )]
    {
        matched as f64 / canonical.len() as f64
    }
}
