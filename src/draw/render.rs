//! Cairo-based rendering: background layer, shape layer, selection decoration,
//! live preview, and the flattened export.

use std::rc::Rc;

use super::color::{Color, TEXT_SHADOW, WHITE};
use super::font::{self, FontDescriptor, TextMetrics};
use super::frame::Frame;
use super::shape::Annotation;
use crate::background::Raster;
use crate::util;

/// Transient content drawn after the committed shapes and never stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// In-progress rectangle or arrow
    Shape(Annotation),
    /// Text currently being typed, drawn with a trailing caret
    TextDraft {
        x: f64,
        y: f64,
        text: String,
        color: Color,
        font_size: f64,
    },
}

/// Everything the shape layer needs for one frame.
pub struct Scene<'a> {
    /// Committed annotations and selection
    pub frame: &'a Frame,
    /// Annotation skipped in the committed pass (a label under edit)
    pub hidden: Option<usize>,
    /// Live preview drawn on top
    pub preview: Option<Preview>,
}

impl<'a> Scene<'a> {
    pub fn new(frame: &'a Frame) -> Self {
        Self {
            frame,
            hidden: None,
            preview: None,
        }
    }
}

/// Two-layer renderer.
///
/// The background raster is painted once into its own surface at construction;
/// each redraw clears and repaints only the shape layer.
pub struct Renderer {
    width: i32,
    height: i32,
    background: cairo::ImageSurface,
    layer: cairo::ImageSurface,
    font: FontDescriptor,
    metrics: Rc<dyn TextMetrics>,
}

impl Renderer {
    /// Creates both layers and paints the background.
    pub fn new(
        raster: &Raster,
        font: FontDescriptor,
        metrics: Rc<dyn TextMetrics>,
    ) -> Result<Self, cairo::Error> {
        let width = raster.width() as i32;
        let height = raster.height() as i32;

        let source = raster.to_surface()?;
        let background = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        {
            let ctx = cairo::Context::new(&background)?;
            ctx.set_source_surface(&source, 0.0, 0.0)?;
            ctx.paint()?;
        }
        background.flush();

        let layer = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;

        log::debug!("Renderer ready ({}x{})", width, height);

        Ok(Self {
            width,
            height,
            background,
            layer,
            font,
            metrics,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn background(&self) -> &cairo::ImageSurface {
        &self.background
    }

    pub fn layer(&self) -> &cairo::ImageSurface {
        &self.layer
    }

    /// Clears the shape layer and repaints annotations, selection, and preview.
    pub fn redraw(&self, scene: &Scene<'_>) -> Result<(), cairo::Error> {
        let ctx = cairo::Context::new(&self.layer)?;

        ctx.save()?;
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint()?;
        ctx.restore()?;

        render_annotations(
            &ctx,
            scene.frame.shapes(),
            scene.frame.selected(),
            scene.hidden,
            &self.font,
            self.metrics.as_ref(),
        );

        if let Some(preview) = &scene.preview {
            render_preview(&ctx, preview, &self.font);
        }

        drop(ctx);
        self.layer.flush();
        Ok(())
    }

    /// Paints background then shape layer onto `ctx` (the on-screen view).
    pub fn compose(&self, ctx: &cairo::Context) -> Result<(), cairo::Error> {
        ctx.set_source_surface(&self.background, 0.0, 0.0)?;
        ctx.paint()?;
        ctx.set_source_surface(&self.layer, 0.0, 0.0)?;
        ctx.paint()?;
        Ok(())
    }

    /// Produces the export raster: background plus committed annotations,
    /// without selection decoration or preview.
    pub fn flatten(&self, frame: &Frame) -> Result<cairo::ImageSurface, cairo::Error> {
        let output = cairo::ImageSurface::create(cairo::Format::ARgb32, self.width, self.height)?;
        {
            let ctx = cairo::Context::new(&output)?;
            ctx.set_source_surface(&self.background, 0.0, 0.0)?;
            ctx.paint()?;
            render_annotations(
                &ctx,
                frame.shapes(),
                None,
                None,
                &self.font,
                self.metrics.as_ref(),
            );
        }
        output.flush();
        Ok(output)
    }
}

/// Encodes a surface as PNG bytes.
pub fn encode_png(surface: &cairo::ImageSurface) -> Result<Vec<u8>, cairo::IoError> {
    let mut buffer = Vec::new();
    surface.write_to_png(&mut buffer)?;
    Ok(buffer)
}

/// Renders annotations in insertion order, decorating the selected one first.
pub fn render_annotations(
    ctx: &cairo::Context,
    shapes: &[Annotation],
    selected: Option<usize>,
    hidden: Option<usize>,
    font: &FontDescriptor,
    metrics: &dyn TextMetrics,
) {
    for (index, shape) in shapes.iter().enumerate() {
        if hidden == Some(index) {
            continue;
        }
        if selected == Some(index) {
            render_selection(ctx, shape, metrics);
        }
        render_annotation(ctx, shape, font);
    }
}

/// Renders a single annotation in its own color and width.
pub fn render_annotation(ctx: &cairo::Context, shape: &Annotation, font: &FontDescriptor) {
    match shape {
        Annotation::Rect {
            x,
            y,
            w,
            h,
            color,
            stroke_width,
        } => render_rect(ctx, *x, *y, *w, *h, *color, *stroke_width as f64),
        Annotation::Arrow {
            x1,
            y1,
            x2,
            y2,
            color,
            stroke_width,
        } => render_arrow(ctx, *x1, *y1, *x2, *y2, *color, *stroke_width as f64),
        Annotation::Text {
            x,
            y,
            text,
            color,
            font_size,
        } => render_text(ctx, *x, *y, text, *color, *font_size, font),
    }
}

/// Dashed white highlight drawn underneath a selected annotation.
pub fn render_selection(ctx: &cairo::Context, shape: &Annotation, metrics: &dyn TextMetrics) {
    let _ = ctx.save();
    WHITE.apply(ctx);

    match shape {
        Annotation::Rect {
            x,
            y,
            w,
            h,
            stroke_width,
            ..
        } => {
            ctx.set_dash(&[5.0, 3.0], 0.0);
            ctx.set_line_width(*stroke_width as f64 + 2.0);
            ctx.rectangle(x - 1.0, y - 1.0, w + 2.0, h + 2.0);
            let _ = ctx.stroke();
        }
        Annotation::Arrow {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            ..
        } => {
            ctx.set_dash(&[5.0, 3.0], 0.0);
            render_arrow(ctx, *x1, *y1, *x2, *y2, WHITE, *stroke_width as f64 + 2.0);
        }
        Annotation::Text {
            x,
            y,
            text,
            font_size,
            ..
        } => {
            let bounds = Annotation::text_bounds(*x, *y, text, *font_size, metrics);
            ctx.set_dash(&[3.0, 2.0], 0.0);
            ctx.set_line_width(1.0);
            ctx.rectangle(bounds.x, bounds.y, bounds.width, bounds.height);
            let _ = ctx.stroke();
        }
    }

    let _ = ctx.restore();
}

/// Renders the live preview for the gesture in progress.
pub fn render_preview(ctx: &cairo::Context, preview: &Preview, font: &FontDescriptor) {
    match preview {
        Preview::Shape(shape) => render_annotation(ctx, shape, font),
        Preview::TextDraft {
            x,
            y,
            text,
            color,
            font_size,
        } => {
            let mut draft = text.clone();
            draft.push('_');
            render_text(ctx, *x, *y, &draft, *color, *font_size, font);
        }
    }
}

/// Render a rectangle (outline)
fn render_rect(ctx: &cairo::Context, x: f64, y: f64, w: f64, h: f64, color: Color, thick: f64) {
    let _ = ctx.save();
    color.apply(ctx);
    ctx.set_line_width(thick);
    ctx.set_line_join(cairo::LineJoin::Miter);
    ctx.rectangle(x, y, w, h);
    let _ = ctx.stroke();
    let _ = ctx.restore();
}

/// Render an arrow: round-capped shaft from tail to head, then a filled
/// triangular head at (x2, y2).
///
/// Any dash pattern already set on `ctx` applies to the shaft only.
pub fn render_arrow(
    ctx: &cairo::Context,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    thick: f64,
) {
    let _ = ctx.save();
    color.apply(ctx);

    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    let _ = ctx.stroke();

    let length = util::arrowhead_length(thick);
    let [(lx, ly), (rx, ry)] = util::arrowhead_points(x1, y1, x2, y2, length);
    ctx.move_to(x2, y2);
    ctx.line_to(lx, ly);
    ctx.line_to(rx, ry);
    ctx.close_path();
    let _ = ctx.fill();

    let _ = ctx.restore();
}

/// Renders a text label with its left baseline at (x, y).
///
/// The string is drawn twice: a semi-transparent black copy offset by (1, 1)
/// for contrast, then the label itself in `color`.
pub fn render_text(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    text: &str,
    color: Color,
    size: f64,
    font_descriptor: &FontDescriptor,
) {
    let _ = ctx.save();

    // Gray antialiasing avoids color fringes on transparent layers
    ctx.set_antialias(cairo::Antialias::Gray);

    let layout = font::create_layout(ctx, font_descriptor, text, size);

    // Pango positions from the top-left; labels are anchored at the baseline
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    let top = y - baseline;

    TEXT_SHADOW.apply(ctx);
    ctx.move_to(x + 1.0, top + 1.0);
    pangocairo::functions::show_layout(ctx, &layout);

    color.apply(ctx);
    ctx.move_to(x, top);
    pangocairo::functions::show_layout(ctx, &layout);

    let _ = ctx.restore();
}
