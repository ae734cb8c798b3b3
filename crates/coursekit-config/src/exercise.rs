// crates/coursekit-config/src/exercise.rs
// ============================================================================
// Module: Exercise Configuration
// Description: Exercise settings records, validation, and TOML loading.
// Purpose: Define the configurable shape of each exercise family and the
// rules that make a configuration usable.
// Dependencies: coursekit-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! One configuration record covers all exercise families; the family payload
//! is selected by a `type` tag on the wire. Defaults match the settings the
//! original courseware blocks shipped with. [`ExerciseConfig::validate`]
//! returns hard errors for configurations that cannot be graded at all and
//! warnings for ones that will behave surprisingly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use coursekit_core::AttemptLimit;
use coursekit_core::Canvas;
use coursekit_core::DiagramSource;
use coursekit_core::ScaleFactors;
use coursekit_core::runtime::ExerciseFamily;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors and Warnings
// ============================================================================

/// Configuration failures.
///
/// # Invariants
/// - `Invalid` messages are specific enough for substring assertions and
///   editor display.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration cannot produce a gradable exercise.
    #[error("invalid exercise config: {0}")]
    Invalid(String),
    /// Configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration text could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// One structured validation or coercion warning.
///
/// Warnings never fail a save; they are surfaced to the caller so the
/// fail-soft policy stops hiding diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigWarning {
    /// Name of the field the warning applies to.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl ConfigWarning {
    /// Creates a warning for a field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }

    /// Creates the standard kept-previous-value coercion warning.
    #[must_use]
    pub fn kept_previous(field: impl Into<String>, expected: &str) -> Self {
        Self::new(field, format!("kept previous value; expected {expected}"))
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default problem weight.
const fn default_weight() -> f64 {
    1.0
}

/// Default graded flag.
const fn default_graded() -> bool {
    true
}

/// Default attempt ceiling.
const fn default_max_attempts() -> AttemptLimit {
    AttemptLimit::from_raw(3)
}

/// Default ordering item background color.
fn default_item_background_color() -> String {
    "#f2f2f2".to_string()
}

/// Default ordering item text color.
fn default_item_text_color() -> String {
    "#000000".to_string()
}

/// Default formula points.
const fn default_max_points() -> f64 {
    1.0
}

/// Default drawing canvas dimensions in pixels.
const fn default_canvas() -> Canvas {
    Canvas::new(500.0, 400.0)
}

/// Default pixel-to-logical scale configuration.
const fn default_scale_factors() -> ScaleFactors {
    ScaleFactors {
        xlim: 10.0,
        ylim: 20.0,
        bottom_margin: 75.0,
        left_margin: 84.0,
        top_margin: 25.0,
        right_margin: 35.0,
    }
}

/// Default whitelist of drawing toolbar modes.
fn default_visible_modes() -> Vec<String> {
    [
        "point",
        "line",
        "triangle",
        "singlearrowhead",
        "doublearrowhead",
        "polygon",
        "rect",
        "circle",
        "freedraw",
        "coordinate",
        "curve",
        "curve4pts",
        "text",
        "transform",
        "color",
        "strokeWidth",
        "download",
    ]
    .map(String::from)
    .to_vec()
}

// ============================================================================
// SECTION: Exercise Kinds
// ============================================================================

/// Family-specific configuration payload.
///
/// # Invariants
/// - Serializes with a `type` tag; variant field names are stable wire
///   forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Binary-choice question.
    Choice {
        /// Answer choices shown to the learner.
        choices: Vec<String>,
        /// Zero-based index of the correct choice.
        correct_index: usize,
        /// Optional hint shown on request.
        #[serde(default)]
        hint: Option<String>,
    },
    /// Sortable-list exercise.
    Ordering {
        /// Canonical item order; presentation order is shuffled by the host.
        items: Vec<String>,
        /// Item background color.
        #[serde(default = "default_item_background_color")]
        item_background_color: String,
        /// Item text color.
        #[serde(default = "default_item_text_color")]
        item_text_color: String,
    },
    /// Formula/expression exercise checked by an external evaluator.
    Formula {
        /// Expression templates keyed by name.
        expressions: BTreeMap<String, String>,
        /// Points awarded when every expression passes.
        #[serde(default = "default_max_points")]
        max_points: f64,
    },
    /// Diagram/drawing exercise.
    Diagram {
        /// Drawing canvas dimensions in pixels.
        #[serde(default = "default_canvas")]
        canvas: Canvas,
        /// Pixel-to-logical scale configuration.
        #[serde(default = "default_scale_factors")]
        scale_factors: ScaleFactors,
        /// Initial diagram shown on the canvas.
        #[serde(default)]
        initial_diagram: Option<DiagramSource>,
        /// Whitelisted toolbar modes.
        #[serde(default = "default_visible_modes")]
        visible_modes: Vec<String>,
        /// Whether axis labels start hidden.
        #[serde(default)]
        hide_labels: bool,
    },
}

impl ExerciseKind {
    /// Returns the telemetry family for the kind.
    #[must_use]
    pub const fn family(&self) -> ExerciseFamily {
        match self {
            Self::Choice { .. } => ExerciseFamily::Choice,
            Self::Ordering { .. } => ExerciseFamily::Ordering,
            Self::Formula { .. } => ExerciseFamily::Formula,
            Self::Diagram { .. } => ExerciseFamily::Diagram,
        }
    }
}

// ============================================================================
// SECTION: Exercise Configuration
// ============================================================================

/// Complete configuration for one exercise instance.
///
/// # Invariants
/// - `weight` applies only to grade projection, never to stored raw scores.
/// - `max_attempts` of zero on the wire means unlimited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseConfig {
    /// Title displayed to learners.
    pub display_name: String,
    /// Problem statement or instructions.
    pub question: String,
    /// Grade multiplier reported to the host.
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Whether the exercise reports a grade at all.
    #[serde(default = "default_graded")]
    pub graded: bool,
    /// Configured attempt ceiling.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: AttemptLimit,
    /// Family-specific payload.
    pub kind: ExerciseKind,
}

impl ExerciseConfig {
    /// Validates the configuration.
    ///
    /// Returns the (possibly empty) warning list on success.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for configurations that cannot be
    /// graded: empty question, non-positive weight, too few choices, an
    /// out-of-range correct index, empty ordering items, empty expression
    /// sets, non-positive points, or a degenerate canvas.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        let mut warnings = Vec::new();

        if self.question.trim().is_empty() {
            return Err(ConfigError::Invalid("question must not be empty".to_string()));
        }
        if !(self.weight > 0.0 && self.weight.is_finite()) {
            return Err(ConfigError::Invalid("weight must be greater than zero".to_string()));
        }
        if !self.graded && (self.weight - 1.0).abs() > f64::EPSILON {
            warnings
                .push(ConfigWarning::new("weight", "weight has no effect on ungraded exercises"));
        }

        match &self.kind {
            ExerciseKind::Choice { choices, correct_index, .. } => {
                if choices.len() < 2 {
                    return Err(ConfigError::Invalid(
                        "at least two choices are required".to_string(),
                    ));
                }
                if *correct_index >= choices.len() {
                    return Err(ConfigError::Invalid(format!(
                        "correct_index must be less than the number of choices ({})",
                        choices.len()
                    )));
                }
            }
            ExerciseKind::Ordering { items, .. } => {
                if items.is_empty() {
                    return Err(ConfigError::Invalid(
                        "ordering items must not be empty".to_string(),
                    ));
                }
                let mut seen = items.clone();
                seen.sort();
                seen.dedup();
                if seen.len() != items.len() {
                    warnings.push(ConfigWarning::new(
                        "items",
                        "duplicate items make full credit depend on the placement of identical values",
                    ));
                }
            }
            ExerciseKind::Formula { expressions, max_points } => {
                if expressions.is_empty() {
                    return Err(ConfigError::Invalid(
                        "at least one expression is required".to_string(),
                    ));
                }
                if !(*max_points > 0.0 && max_points.is_finite()) {
                    return Err(ConfigError::Invalid(
                        "max_points must be greater than zero".to_string(),
                    ));
                }
            }
            ExerciseKind::Diagram { canvas, scale_factors, .. } => {
                let x_span =
                    canvas.width - scale_factors.left_margin - scale_factors.right_margin;
                let y_span =
                    canvas.height - scale_factors.top_margin - scale_factors.bottom_margin;
                if x_span <= 0.0 || !x_span.is_finite() {
                    return Err(ConfigError::Invalid(
                        "canvas width must exceed horizontal margins".to_string(),
                    ));
                }
                if y_span <= 0.0 || !y_span.is_finite() {
                    return Err(ConfigError::Invalid(
                        "canvas height must exceed vertical margins".to_string(),
                    ));
                }
                if scale_factors.xlim <= 0.0 || scale_factors.ylim <= 0.0 {
                    return Err(ConfigError::Invalid("axis extents must be positive".to_string()));
                }
            }
        }

        Ok(warnings)
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or shapes.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when its contents are malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
