//! Annotation shape definitions.

use super::color::Color;
use super::font::TextMetrics;
use crate::util::{self, Rect};

/// Default font size (pixels) for new text labels.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// A single annotation on the canvas.
///
/// All coordinates are stored in canvas-native pixel space. Each variant carries
/// its own color and size so it renders independently of the current tool style.
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    /// Rectangle outline
    Rect {
        /// Top-left X coordinate
        x: f64,
        /// Top-left Y coordinate
        y: f64,
        /// Width in pixels (never negative)
        w: f64,
        /// Height in pixels (never negative)
        h: f64,
        /// Border color
        color: Color,
        /// Border thickness in pixels
        stroke_width: u32,
    },
    /// Directed segment with a filled head at (x2, y2)
    Arrow {
        /// Tail X coordinate
        x1: f64,
        /// Tail Y coordinate
        y1: f64,
        /// Head X coordinate
        x2: f64,
        /// Head Y coordinate
        y2: f64,
        /// Arrow color
        color: Color,
        /// Shaft thickness in pixels
        stroke_width: u32,
    },
    /// Single-line text label
    Text {
        /// Left edge of the baseline
        x: f64,
        /// Baseline Y coordinate
        y: f64,
        /// Label content (never empty)
        text: String,
        /// Text color
        color: Color,
        /// Font size in pixels
        font_size: f64,
    },
}

impl Annotation {
    /// Short human-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Annotation::Rect { .. } => "rectangle",
            Annotation::Arrow { .. } => "arrow",
            Annotation::Text { .. } => "text",
        }
    }

    /// The point a drag is measured against: top-left for rectangles, the
    /// baseline origin for text, and the tail for arrows.
    pub fn anchor(&self) -> (f64, f64) {
        match self {
            Annotation::Rect { x, y, .. } | Annotation::Text { x, y, .. } => (*x, *y),
            Annotation::Arrow { x1, y1, .. } => (*x1, *y1),
        }
    }

    /// Moves the whole shape by (dx, dy) without changing its size.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Annotation::Rect { x, y, .. } | Annotation::Text { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            Annotation::Arrow { x1, y1, x2, y2, .. } => {
                *x1 += dx;
                *y1 += dy;
                *x2 += dx;
                *y2 += dy;
            }
        }
    }

    /// Moves the shape so its anchor lands on (x, y).
    pub fn move_anchor_to(&mut self, x: f64, y: f64) {
        let (ax, ay) = self.anchor();
        self.translate(x - ax, y - ay);
    }

    /// Returns the selection box for a text label.
    ///
    /// The box is a coarse approximation: measured advance width plus fixed
    /// vertical padding rather than true font ascent/descent.
    pub fn text_bounds(x: f64, y: f64, text: &str, font_size: f64, metrics: &dyn TextMetrics) -> Rect {
        let width = metrics.text_width(text, font_size);
        Rect::from_min_max(x - 5.0, y - 20.0, x + width + 5.0, y + 10.0)
    }

    /// Builds a rectangle from a corner-to-corner drag.
    pub fn rect_from_drag(
        start: (f64, f64),
        end: (f64, f64),
        color: Color,
        stroke_width: u32,
    ) -> Self {
        let (x, y, w, h) = util::normalize_rect(start.0, start.1, end.0, end.1);
        Annotation::Rect {
            x,
            y,
            w,
            h,
            color,
            stroke_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, WHITE};
    use crate::draw::font::FixedAdvanceMetrics;

    #[test]
    fn translate_moves_rect_without_resizing() {
        let mut shape = Annotation::Rect {
            x: 10.0,
            y: 20.0,
            w: 30.0,
            h: 40.0,
            color: RED,
            stroke_width: 3,
        };
        shape.translate(5.0, -7.0);
        assert_eq!(
            shape,
            Annotation::Rect {
                x: 15.0,
                y: 13.0,
                w: 30.0,
                h: 40.0,
                color: RED,
                stroke_width: 3,
            }
        );
    }

    #[test]
    fn arrow_anchor_is_tail_and_moves_both_ends() {
        let mut shape = Annotation::Arrow {
            x1: 0.0,
            y1: 0.0,
            x2: 50.0,
            y2: 10.0,
            color: WHITE,
            stroke_width: 2,
        };
        assert_eq!(shape.anchor(), (0.0, 0.0));
        shape.move_anchor_to(5.0, 5.0);
        match shape {
            Annotation::Arrow { x1, y1, x2, y2, .. } => {
                assert_eq!((x1, y1, x2, y2), (5.0, 5.0, 55.0, 15.0));
            }
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn text_bounds_use_metrics_width() {
        let metrics = FixedAdvanceMetrics { ratio: 0.5 };
        let rect = Annotation::text_bounds(50.0, 50.0, "hello", 16.0, &metrics);
        assert_eq!(rect, Rect::from_min_max(45.0, 30.0, 95.0, 60.0));
    }

    #[test]
    fn rect_from_drag_normalizes() {
        let shape = Annotation::rect_from_drag((100.0, 80.0), (10.0, 10.0), RED, 3);
        assert_eq!(shape.anchor(), (10.0, 10.0));
        if let Annotation::Rect { w, h, .. } = shape {
            assert_eq!((w, h), (90.0, 70.0));
        }
    }
}
