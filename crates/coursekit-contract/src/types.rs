// crates/coursekit-contract/src/types.rs
// ============================================================================
// Module: Contract Types
// Description: Shared wire shapes for submissions, diagram payloads, and
// transport errors.
// Purpose: Provide the canonical JSON surface between hosts and the grading
// core.
// Dependencies: coursekit-config, coursekit-core, serde, serde_json
// ============================================================================

//! ## Overview
//! One request shape per exercise family, the response payload mirroring the
//! scoring engine's result, and [`ErrorBody`] with the status mapping for
//! every core failure. Requests carry only the learner's input; the
//! authoritative answer comes from the host's configuration when the request
//! is turned into a correctness signal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use coursekit_config::ConfigError;
use coursekit_core::DiagramSource;
use coursekit_core::MessageTier;
use coursekit_core::runtime::CorrectnessSignal;
use coursekit_core::runtime::HandlerError;
use coursekit_core::runtime::SubmissionResult;
use coursekit_core::runtime::SubmitError;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Status Codes
// ============================================================================

/// Client sent a malformed or rejected payload.
const STATUS_BAD_REQUEST: u16 = 400;

/// Requested resource does not exist.
const STATUS_NOT_FOUND: u16 = 404;

/// Request conflicts with current attempt state.
const STATUS_CONFLICT: u16 = 409;

/// Host-side collaborator failed.
const STATUS_INTERNAL: u16 = 500;

// ============================================================================
// SECTION: Request Shapes
// ============================================================================

/// Scored submission for a choice exercise.
///
/// # Invariants
/// - Carries only the learner's selection; the correct index stays
///   server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    /// Zero-based index of the selected choice.
    pub selected: usize,
}

impl SubmitAnswerRequest {
    /// Pairs the selection with the configured correct index.
    #[must_use]
    pub const fn into_signal(self, correct: usize) -> CorrectnessSignal {
        CorrectnessSignal::Choice { selected: self.selected, correct }
    }
}

/// Scored submission for an ordering exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOrderingRequest {
    /// Items in the order the learner arranged them.
    pub submitted: Vec<String>,
}

impl SubmitOrderingRequest {
    /// Pairs the submitted order with the configured canonical order.
    #[must_use]
    pub fn into_signal(self, canonical: Vec<String>) -> CorrectnessSignal {
        CorrectnessSignal::Ordering { candidate: self.submitted, canonical }
    }
}

/// Scored submission for a formula exercise.
///
/// The host's expression checker runs before submission; this shape carries
/// its per-expression verdicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitFormulaRequest {
    /// Pass/fail verdict per expression name.
    pub results: BTreeMap<String, bool>,
}

impl SubmitFormulaRequest {
    /// Pairs the verdicts with the configured points for the exercise.
    #[must_use]
    pub fn into_signal(self, max_points: f64) -> CorrectnessSignal {
        CorrectnessSignal::Formula { results: self.results, max_points }
    }
}

/// Authoring-surface save of an exercise's initial diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveDiagramRequest {
    /// Raw initial-diagram value: a URL string, a JSON string, or inline
    /// diagram content.
    pub initial_diagram: Value,
}

/// Request for a human-readable summary of a submitted scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeDiagramRequest {
    /// Raw diagram payload from the learner's canvas.
    pub diagram: Value,
    /// Whether to include transformed logical coordinates in the summary.
    #[serde(default)]
    pub scaled: bool,
}

// ============================================================================
// SECTION: Response Shapes
// ============================================================================

/// Response payload for an accepted scored submission.
///
/// # Invariants
/// - Mirrors [`SubmissionResult`] field for field; grades are the weighted
///   projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// True when the submission earned full credit.
    pub correct: bool,
    /// Attempts used after this submission.
    pub attempts_used: u32,
    /// Remaining attempts, or `null` when unlimited.
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
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expression_results: Option<BTreeMap<String, bool>>,
}

impl From<SubmissionResult> for SubmitResponse {
    fn from(result: SubmissionResult) -> Self {
        Self {
            correct: result.correct,
            attempts_used: result.attempts_used,
            remaining_attempts: result.remaining_attempts,
            raw_grade: result.raw_grade,
            max_grade: result.max_grade,
            tier: result.tier,
            message: result.message,
            expression_results: result.expression_results,
        }
    }
}

/// Response payload for a stored initial-diagram source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveDiagramResponse {
    /// The resolved source as it was persisted.
    pub source: DiagramSource,
}

/// Response payload for a scene summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeDiagramResponse {
    /// Human-readable, newline-separated summary of the scene.
    pub message: String,
}

// ============================================================================
// SECTION: Error Mapping
// ============================================================================

/// Transport error payload with its HTTP-style status code.
///
/// # Invariants
/// - `status` follows the fixed mapping: attempt-gate rejections are 409,
///   payload and geometry failures are 400, unknown names are 404, and
///   collaborator failures are 500.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// HTTP-style status code.
    pub status: u16,
    /// Human-readable failure description.
    pub message: String,
}

impl ErrorBody {
    /// Creates an error body with an explicit status.
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl From<&HandlerError> for ErrorBody {
    fn from(err: &HandlerError) -> Self {
        let status = match err {
            HandlerError::Submit(SubmitError::AttemptsExceeded) => STATUS_CONFLICT,
            HandlerError::Validation(_) | HandlerError::Geometry(_) => STATUS_BAD_REQUEST,
            HandlerError::UnknownDiagram(_) => STATUS_NOT_FOUND,
            HandlerError::Store(_) => STATUS_INTERNAL,
        };
        Self::new(status, err.to_string())
    }
}

impl From<&ConfigError> for ErrorBody {
    fn from(err: &ConfigError) -> Self {
        let status = match err {
            ConfigError::Invalid(_) | ConfigError::Parse(_) => STATUS_BAD_REQUEST,
            ConfigError::Io(_) => STATUS_INTERNAL,
        };
        Self::new(status, err.to_string())
    }
}
