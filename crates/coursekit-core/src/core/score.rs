// crates/coursekit-core/src/core/score.rs
// ============================================================================
// Module: Scores and Feedback Tiers
// Description: Raw score values, weighted projection, and feedback messages.
// Purpose: Compute score fractions, weighted grades, and the three-tier
// feedback message for submission results.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Scores are stored unweighted: `earned` in `[0, possible]` with `possible`
//! normally `1.0`. The configured weight applies only when projecting a
//! grade for the host, never to storage. Feedback is selected by score
//! fraction into three tiers: exactly zero, strictly between zero and full,
//! and exactly full. Binary exercises can only reach the outer tiers, but
//! the partial tier is implemented generically for positional scoring.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Raw Scores
// ============================================================================

/// Unweighted score for one submission.
///
/// # Invariants
/// - `earned` stays within `[0, possible]`.
/// - `possible` is positive for scored exercises.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawScore {
    /// Credit earned by the submission.
    pub earned: f64,
    /// Maximum credit available.
    pub possible: f64,
}

impl RawScore {
    /// Creates a raw score.
    #[must_use]
    pub const fn new(earned: f64, possible: f64) -> Self {
        Self { earned, possible }
    }

    /// Returns the score fraction in `[0, 1]`, or zero when nothing is
    /// possible.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.possible > 0.0 {
            self.earned / self.possible
        } else {
            0.0
        }
    }

    /// Projects the weighted grade pair `(grade, max_grade)` reported to the
    /// host.
    #[must_use]
    pub fn weighted(&self, weight: f64) -> (f64, f64) {
        (self.earned * weight, self.possible * weight)
    }
}

// ============================================================================
// SECTION: Feedback Tiers
// ============================================================================

/// Feedback tier selected by score fraction.
///
/// # Invariants
/// - A fraction of exactly `1.0` is `Correct`, exactly `0.0` is
///   `Incorrect`, and anything strictly between is `PartiallyCorrect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageTier {
    /// No credit earned.
    Incorrect,
    /// Some but not all credit earned.
    PartiallyCorrect,
    /// Full credit earned.
    Correct,
}

impl MessageTier {
    /// Selects the tier for a score fraction.
    #[must_use]
    pub fn for_fraction(fraction: f64) -> Self {
        if fraction >= 1.0 {
            Self::Correct
        } else if fraction > 0.0 {
            Self::PartiallyCorrect
        } else {
            Self::Incorrect
        }
    }
}

/// Renders the tiered feedback message with earned/total interpolation.
#[must_use]
pub fn feedback_message(tier: MessageTier, earned: f64, total: f64) -> String {
    match tier {
        MessageTier::Incorrect => format!("Incorrect ({earned}/{total}) - Keep trying!"),
        MessageTier::PartiallyCorrect => {
            format!("Partially Correct ({earned}/{total}) - Getting closer!")
        }
        MessageTier::Correct => format!("Correct ({earned}/{total}) - Great job!"),
    }
}
