// crates/coursekit-core/src/core/attempts.rs
// ============================================================================
// Module: Attempt State
// Description: Per-learner attempt counting, score storage, and completion.
// Purpose: Model the attempt state machine shared by all scored exercise
// families.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Attempt state is the per-learner, per-exercise record the scoring engine
//! mutates: attempts used, the last raw score, and the completion flag. The
//! attempt ceiling is configuration, not state, so it is passed into the
//! derived accessors rather than stored here.
//!
//! Convention: a configured ceiling of zero means unlimited attempts. The
//! [`AttemptLimit`] type makes the unlimited case explicit so the ambiguous
//! zero never reaches subtraction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::num::NonZeroU32;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Attempt Limits
// ============================================================================

/// Configured ceiling on scored submissions.
///
/// # Invariants
/// - Serializes as a plain integer with `0` meaning unlimited, the wire
///   convention used by exercise settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum AttemptLimit {
    /// No ceiling; submissions are never gated.
    Unlimited,
    /// At most this many scored submissions.
    Limited(NonZeroU32),
}

impl AttemptLimit {
    /// Creates a limit from the raw settings value (`0` means unlimited).
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        match NonZeroU32::new(raw) {
            Some(ceiling) => Self::Limited(ceiling),
            None => Self::Unlimited,
        }
    }

    /// Returns the ceiling, or `None` when unlimited.
    #[must_use]
    pub const fn ceiling(self) -> Option<u32> {
        match self {
            Self::Unlimited => None,
            Self::Limited(ceiling) => Some(ceiling.get()),
        }
    }
}

impl From<u32> for AttemptLimit {
    fn from(raw: u32) -> Self {
        Self::from_raw(raw)
    }
}

impl From<AttemptLimit> for u32 {
    fn from(limit: AttemptLimit) -> Self {
        limit.ceiling().unwrap_or(0)
    }
}

impl Default for AttemptLimit {
    fn default() -> Self {
        Self::Unlimited
    }
}

// ============================================================================
// SECTION: Attempt Phases
// ============================================================================

/// Lifecycle phase of an attempt record.
///
/// # Invariants
/// - `Completed` and `Exhausted` both forbid further scored submissions.
/// - `Exhausted` additionally implies full credit was never achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptPhase {
    /// No submission accepted yet.
    Fresh,
    /// At least one submission accepted; attempts and credit remain open.
    InProgress,
    /// Full credit achieved, or attempts exhausted after earning credit.
    Completed,
    /// Attempts exhausted without full credit.
    Exhausted,
}

// ============================================================================
// SECTION: Attempt State
// ============================================================================

/// Per-learner, per-exercise mutable scoring record.
///
/// # Invariants
/// - `attempts_used` is monotonically non-decreasing and increments exactly
///   once per accepted submission.
/// - `raw_earned` stays within `[0, raw_possible]`.
/// - All fields are mutated atomically as a unit by the submit operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptState {
    /// Number of accepted submissions.
    pub attempts_used: u32,
    /// Last-computed unweighted score.
    pub raw_earned: f64,
    /// Maximum unweighted score for the exercise.
    pub raw_possible: f64,
    /// True once full credit was achieved or attempts were exhausted.
    pub completed: bool,
}

impl Default for AttemptState {
    fn default() -> Self {
        Self {
            attempts_used: 0,
            raw_earned: 0.0,
            raw_possible: 1.0,
            completed: false,
        }
    }
}

impl AttemptState {
    /// Returns the remaining attempts under the given limit, floored at
    /// zero, or `None` when attempts are unlimited.
    #[must_use]
    pub fn remaining_attempts(&self, limit: AttemptLimit) -> Option<u32> {
        limit.ceiling().map(|ceiling| ceiling.saturating_sub(self.attempts_used))
    }

    /// Returns true when a scored submission may still be accepted.
    ///
    /// Both terminal phases forbid further submissions: a completed
    /// exercise takes no more credit-bearing attempts even when the
    /// attempt budget is not exhausted.
    #[must_use]
    pub fn can_submit(&self, limit: AttemptLimit) -> bool {
        !self.completed && self.remaining_attempts(limit) != Some(0)
    }

    /// Returns true when the stored score is full credit.
    #[must_use]
    pub fn is_full_credit(&self) -> bool {
        self.raw_possible > 0.0 && self.raw_earned >= self.raw_possible
    }

    /// Derives the lifecycle phase under the given limit.
    #[must_use]
    pub fn phase(&self, limit: AttemptLimit) -> AttemptPhase {
        if !self.completed {
            if self.attempts_used == 0 {
                return AttemptPhase::Fresh;
            }
            return AttemptPhase::InProgress;
        }
        if self.is_full_credit() {
            return AttemptPhase::Completed;
        }
        if self.remaining_attempts(limit) == Some(0) {
            return AttemptPhase::Exhausted;
        }
        AttemptPhase::Completed
    }
}
