//! Geometry helpers shared by hit-testing, interaction, and rendering.
//!
//! This module provides:
//! - Axis-aligned rectangle type with containment checks
//! - Point-to-segment distance
//! - Arrowhead geometry
//! - Drag rectangle normalization

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Angle between the shaft and each back corner of the arrowhead, in radians.
pub const ARROWHEAD_ANGLE: f64 = 0.4;

/// Returns the arrowhead length for a given stroke width.
///
/// Heads grow with the stroke but never fall below 15 pixels.
pub fn arrowhead_length(stroke_width: f64) -> f64 {
    (stroke_width * 5.0).max(15.0)
}

/// Calculates the two back corners of a filled arrowhead at (x2, y2).
///
/// The shaft runs from the tail (x1, y1) to the head (x2, y2). Each corner
/// sits `length` pixels back from the head, rotated ±[`ARROWHEAD_ANGLE`] from
/// the shaft direction.
///
/// # Returns
/// `[(left_x, left_y), (right_x, right_y)]`
pub fn arrowhead_points(x1: f64, y1: f64, x2: f64, y2: f64, length: f64) -> [(f64, f64); 2] {
    let angle = (y2 - y1).atan2(x2 - x1);

    let left = (
        x2 - length * (angle - ARROWHEAD_ANGLE).cos(),
        y2 - length * (angle - ARROWHEAD_ANGLE).sin(),
    );
    let right = (
        x2 - length * (angle + ARROWHEAD_ANGLE).cos(),
        y2 - length * (angle + ARROWHEAD_ANGLE).sin(),
    );

    [left, right]
}

// ============================================================================
// Distance
// ============================================================================

/// Euclidean distance from point (px, py) to the segment (x1, y1)-(x2, y2).
///
/// The projection parameter is clamped to [0, 1]; a zero-length segment
/// degenerates to the distance to its single point.
pub fn distance_to_segment(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return (px - x1).hypot(py - y1);
    }

    let t = (((px - x1) * dx + (py - y1) * dy) / len2).clamp(0.0, 1.0);
    (px - (x1 + t * dx)).hypot(py - (y1 + t * dy))
}

// ============================================================================
// Rectangles
// ============================================================================

/// Axis-aligned rectangle in canvas-native pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from min/max bounds.
    pub fn from_min_max(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Returns the rectangle grown by `amount` on every side.
    pub fn inflate(self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// Converts a corner-to-corner drag into `(x, y, w, h)` with a top-left
/// origin and non-negative size.
pub fn normalize_rect(x1: f64, y1: f64, x2: f64, y2: f64) -> (f64, f64, f64, f64) {
    (x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs())
}
