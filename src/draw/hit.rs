//! Geometric hit-testing for annotations.
//!
//! Callers scan the document top-most first so the first positive match wins
//! when shapes overlap.

use super::font::TextMetrics;
use super::shape::Annotation;
use crate::util::{self, Rect};

/// Padding around rectangles so thin or empty ones remain selectable.
pub const RECT_HIT_PADDING: f64 = 5.0;

/// Maximum distance from an arrow's shaft that still counts as a hit.
pub const ARROW_HIT_DISTANCE: f64 = 15.0;

/// Returns true when (x, y) selects the annotation.
pub fn hit_test(shape: &Annotation, x: f64, y: f64, metrics: &dyn TextMetrics) -> bool {
    match shape {
        Annotation::Rect { x: rx, y: ry, w, h, .. } => Rect::new(*rx, *ry, *w, *h)
            .inflate(RECT_HIT_PADDING)
            .contains(x, y),
        Annotation::Arrow { x1, y1, x2, y2, .. } => {
            util::distance_to_segment(x, y, *x1, *y1, *x2, *y2) < ARROW_HIT_DISTANCE
        }
        Annotation::Text {
            x: tx,
            y: ty,
            text,
            font_size,
            ..
        } => Annotation::text_bounds(*tx, *ty, text, *font_size, metrics).contains(x, y),
    }
}

/// Index of the top-most annotation under (x, y), if any.
pub fn topmost_hit(
    shapes: &[Annotation],
    x: f64,
    y: f64,
    metrics: &dyn TextMetrics,
) -> Option<usize> {
    topmost_hit_where(shapes, x, y, metrics, |_| true)
}

/// Like [`topmost_hit`], but only considers annotations accepted by `filter`.
pub fn topmost_hit_where<F>(
    shapes: &[Annotation],
    x: f64,
    y: f64,
    metrics: &dyn TextMetrics,
    filter: F,
) -> Option<usize>
where
    F: Fn(&Annotation) -> bool,
{
    shapes
        .iter()
        .enumerate()
        .rev()
        .find(|(_, shape)| filter(shape) && hit_test(shape, x, y, metrics))
        .map(|(index, _)| index)
}
