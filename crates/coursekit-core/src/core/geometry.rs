// crates/coursekit-core/src/core/geometry.rs
// ============================================================================
// Module: Diagram Geometry
// Description: Pixel-to-logical coordinate transforms and scene summaries.
// Purpose: Map canvas pixel coordinates onto the configured axis system and
// describe submitted scenes in human-readable form.
// Dependencies: crate::core::shapes, serde, thiserror
// ============================================================================

//! ## Overview
//! Drawing canvases report coordinates in pixel space with the origin at the
//! top-left and the y axis pointing down. Grading feedback and downstream
//! geometry work in a logical axis system with a configurable extent and the
//! y axis pointing up. [`pixel_to_scaled`] performs the affine remap;
//! [`describe_diagram`] walks a sanitized scene and reports each object,
//! including raw and transformed endpoints for line segments.
//!
//! A degenerate canvas (margins consuming the full width or height) has no
//! drawing area to scale against and is rejected rather than divided by.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::shapes::ShapeRecord;

// ============================================================================
// SECTION: Scale Configuration
// ============================================================================

/// Axis extents and canvas margins for the pixel-to-logical transform.
///
/// # Invariants
/// - Serializes as the six-element list
///   `[xlim, ylim, bottom_margin, left_margin, top_margin, right_margin]`,
///   the positional wire form used by authoring tools.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct ScaleFactors {
    /// Logical extent of the x axis.
    pub xlim: f64,
    /// Logical extent of the y axis.
    pub ylim: f64,
    /// Bottom margin in pixels.
    pub bottom_margin: f64,
    /// Left margin in pixels.
    pub left_margin: f64,
    /// Top margin in pixels.
    pub top_margin: f64,
    /// Right margin in pixels.
    pub right_margin: f64,
}

impl From<[f64; 6]> for ScaleFactors {
    fn from(raw: [f64; 6]) -> Self {
        Self {
            xlim: raw[0],
            ylim: raw[1],
            bottom_margin: raw[2],
            left_margin: raw[3],
            top_margin: raw[4],
            right_margin: raw[5],
        }
    }
}

impl From<ScaleFactors> for [f64; 6] {
    fn from(factors: ScaleFactors) -> Self {
        [
            factors.xlim,
            factors.ylim,
            factors.bottom_margin,
            factors.left_margin,
            factors.top_margin,
            factors.right_margin,
        ]
    }
}

/// Canvas dimensions in pixels.
///
/// # Invariants
/// - Dimensions are finite; degenerate drawing areas are rejected at
///   transform time, not at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
}

impl Canvas {
    /// Creates a canvas with explicit dimensions.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// SECTION: Geometry Errors
// ============================================================================

/// Coordinate transform failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// Margins consume the full canvas width or height.
    #[error("canvas drawing area is degenerate (zero width or height after margins)")]
    DegenerateCanvas,
}

// ============================================================================
// SECTION: Coordinate Transform
// ============================================================================

/// Converts pixel coordinates to the configured logical axis system.
///
/// The x axis maps the drawing area (canvas minus left/right margins) onto
/// `[0, xlim]`; the y axis maps the drawing area (canvas minus top/bottom
/// margins) onto `[0, ylim]` with the direction flipped so logical y points
/// up.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateCanvas`] when either drawing-area
/// denominator is zero or non-finite.
pub fn pixel_to_scaled(
    x: f64,
    y: f64,
    factors: &ScaleFactors,
    canvas: Canvas,
) -> Result<(f64, f64), GeometryError> {
    let x_span = canvas.width - factors.left_margin - factors.right_margin;
    let y_span = canvas.height - factors.top_margin - factors.bottom_margin;
    if x_span == 0.0 || y_span == 0.0 || !x_span.is_finite() || !y_span.is_finite() {
        return Err(GeometryError::DegenerateCanvas);
    }
    let xx = (x - factors.left_margin) / x_span * factors.xlim;
    let yy = factors.ylim - (y - factors.top_margin) / y_span * factors.ylim;
    Ok((xx, yy))
}

// ============================================================================
// SECTION: Scene Summaries
// ============================================================================

/// Summary shown when a submitted scene contains no drawable objects.
const EMPTY_SCENE_SUMMARY: &str = "No drawable objects found.";

/// Returns a human-readable summary of a sanitized scene.
///
/// Line segments report their raw endpoint coordinates and, when scaling
/// context is provided, the transformed logical coordinates. Other objects
/// report only their shape tag.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateCanvas`] when scaling context is
/// provided but the canvas has no drawing area.
pub fn describe_diagram(
    objects: &[ShapeRecord],
    scale: Option<(&ScaleFactors, Canvas)>,
) -> Result<String, GeometryError> {
    let mut messages = Vec::with_capacity(objects.len());
    for object in objects {
        if object.kind() == "line" {
            messages.push(describe_line(object, scale)?);
        } else {
            messages.push(format!("You drew: {}", object.kind()));
        }
    }
    if messages.is_empty() {
        return Ok(EMPTY_SCENE_SUMMARY.to_string());
    }
    Ok(messages.join("\n"))
}

/// Describes one line segment, with transformed endpoints when scaling
/// context is available.
fn describe_line(
    object: &ShapeRecord,
    scale: Option<(&ScaleFactors, Canvas)>,
) -> Result<String, GeometryError> {
    // Canvas line endpoints are relative to the object's left/top anchor.
    let left = object.number("left").unwrap_or(0.0);
    let top = object.number("top").unwrap_or(0.0);
    let x1 = object.number("x1").unwrap_or(0.0) + left;
    let y1 = object.number("y1").unwrap_or(0.0) + top;
    let x2 = object.number("x2").unwrap_or(0.0) + left;
    let y2 = object.number("y2").unwrap_or(0.0) + top;

    let Some((factors, canvas)) = scale else {
        return Ok(format!("You drew a line from ({x1}, {y1}) to ({x2}, {y2})"));
    };

    let (xx1, yy1) = pixel_to_scaled(x1, y1, factors, canvas)?;
    let (xx2, yy2) = pixel_to_scaled(x2, y2, factors, canvas)?;
    Ok(format!(
        "You drew a line with raw coordinates ({x1:.0}, {y1:.0}) to ({x2:.0}, {y2:.0}) \
         and transformed coordinates ({xx1:.0}, {yy1:.0}) to ({xx2:.0}, {yy2:.0})"
    ))
}
