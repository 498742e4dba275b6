//! The editing session: one background image, its annotations, and the
//! interaction state that edits them.

use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use crate::background::{LoadError, LoadRequest, Raster, load_background};
use crate::config::{Action, ColorSpec, Config, KeyBinding};
use crate::delivery::Delivery;
use crate::draw::{Color, FontDescriptor, Frame, PangoTextMetrics, Renderer, TextMetrics, encode_png};
use crate::input::{InputEvent, InputState, Key};
use crate::viewport::Viewport;

/// Errors surfaced to the host by the editor.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Editor is still loading its background image")]
    NotReady,

    #[error("No image: {0}")]
    NoImage(String),

    #[error("Rendering failed: {0}")]
    Render(#[from] cairo::Error),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Whether the background is available for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Decode (and crop) still in progress; input is ignored
    Loading,
    /// Background ready; editing enabled
    Ready,
    /// Background could not be prepared; editing is impossible
    Failed(String),
}

/// Style and layout settings for a new editor.
#[derive(Debug, Clone)]
pub struct EditorSettings {
    pub color: Color,
    pub thickness: u32,
    pub font_size: f64,
    pub font: FontDescriptor,
    pub max_width: u32,
    pub max_height: u32,
    pub action_map: HashMap<KeyBinding, Action>,
}

impl EditorSettings {
    /// Builds settings from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, String> {
        Ok(Self {
            color: config.drawing.default_color.to_color(),
            thickness: config.drawing.default_thickness,
            font_size: config.drawing.default_font_size,
            font: config.font_descriptor(),
            max_width: config.viewport.max_width,
            max_height: config.viewport.max_height,
            action_map: config.keybindings.build_action_map()?,
        })
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self::from_config(&Config::default()).unwrap_or_else(|_| Self {
            color: crate::draw::color::SNAP_RED,
            thickness: 3,
            font_size: crate::draw::shape::DEFAULT_FONT_SIZE,
            font: FontDescriptor::default(),
            max_width: 1600,
            max_height: 1000,
            action_map: HashMap::new(),
        })
    }
}

/// Background-dependent parts, present once loading succeeded.
struct Canvas {
    viewport: Viewport,
    renderer: Renderer,
}

/// One annotation session over a single background image.
///
/// Events arrive in display coordinates and are mapped to the raster's
/// native pixel space before they reach the interaction state.
pub struct Editor {
    settings: EditorSettings,
    metrics: Rc<dyn TextMetrics>,
    input: InputState,
    load_state: LoadState,
    canvas: Option<Canvas>,
}

impl Editor {
    /// Creates an editor that measures text with Pango.
    pub fn new(settings: EditorSettings) -> Self {
        let metrics: Rc<dyn TextMetrics> = Rc::new(PangoTextMetrics::new(settings.font.clone()));
        Self::with_metrics(settings, metrics)
    }

    /// Creates an editor with a specific text measurement backend.
    pub fn with_metrics(settings: EditorSettings, metrics: Rc<dyn TextMetrics>) -> Self {
        let input = InputState::new(
            settings.color,
            settings.thickness,
            settings.font_size,
            Rc::clone(&metrics),
            settings.action_map.clone(),
        );
        Self {
            settings,
            metrics,
            input,
            load_state: LoadState::Loading,
            canvas: None,
        }
    }

    /// Runs the two-stage load and attaches the result.
    pub async fn load(&mut self, request: LoadRequest) -> Result<(), EditorError> {
        let result = load_background(request).await;
        self.attach_background(result)
    }

    /// Finishes loading with a decoded raster, or records the failure.
    pub fn attach_background(&mut self, result: Result<Raster, LoadError>) -> Result<(), EditorError> {
        let raster = match result {
            Ok(raster) => raster,
            Err(err) => {
                log::error!("Background failed to load: {}", err);
                self.load_state = LoadState::Failed(err.to_string());
                return Err(EditorError::NoImage(err.to_string()));
            }
        };

        let renderer = Renderer::new(&raster, self.settings.font.clone(), Rc::clone(&self.metrics))
            .map_err(|err| {
                self.load_state = LoadState::Failed(err.to_string());
                EditorError::Render(err)
            })?;
        let viewport = Viewport::fit(
            raster.width(),
            raster.height(),
            self.settings.max_width,
            self.settings.max_height,
        );

        log::info!(
            "Editing {}x{} image shown at {}x{} (scale {:.3})",
            viewport.native_width,
            viewport.native_height,
            viewport.display_width,
            viewport.display_height,
            viewport.scale
        );

        self.canvas = Some(Canvas { viewport, renderer });
        self.load_state = LoadState::Ready;
        self.input.needs_redraw = true;
        Ok(())
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_ready(&self) -> bool {
        self.load_state == LoadState::Ready
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.canvas.as_ref().map(|canvas| &canvas.viewport)
    }

    pub fn renderer(&self) -> Option<&Renderer> {
        self.canvas.as_ref().map(|canvas| &canvas.renderer)
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn frame(&self) -> &Frame {
        self.input.frame()
    }

    /// Applies one input event. Returns `false` if the event was ignored
    /// because no background is ready.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        let Some(viewport) = self.canvas.as_ref().map(|canvas| canvas.viewport) else {
            log::debug!("Ignoring {:?} before the background is ready", event);
            return false;
        };
        let map = |x: f64, y: f64| viewport.to_canvas_space(x, y);

        match event {
            InputEvent::PointerDown { x, y } => {
                let (cx, cy) = map(x, y);
                self.input.on_pointer_down(cx, cy);
            }
            InputEvent::PointerMove { x, y } => {
                let (cx, cy) = map(x, y);
                self.input.on_pointer_move(cx, cy);
            }
            InputEvent::PointerUp { x, y } => {
                let (cx, cy) = map(x, y);
                self.input.on_pointer_up(cx, cy);
            }
            InputEvent::DoubleClick { x, y } => {
                let (cx, cy) = map(x, y);
                self.input.on_double_click(cx, cy);
            }
            InputEvent::KeyPress { key } => self.input.on_key_press(key),
            InputEvent::KeyRelease { key } => self.input.on_key_release(key),
            InputEvent::Type { text } => {
                if self.input.text_session().is_none() {
                    log::debug!("Ignoring typed text {:?} with no open draft", text);
                } else {
                    for c in text.chars().filter(|c| !c.is_control()) {
                        let key = if c == ' ' { Key::Space } else { Key::Char(c) };
                        self.input.on_key_press(key);
                    }
                }
            }
            InputEvent::Commit => {
                self.input.commit_text();
            }
            InputEvent::Cancel => {
                self.input.cancel_text();
            }
            InputEvent::Blur => {
                self.input.on_blur();
            }
            InputEvent::SetTool { tool } => {
                self.input.set_tool(tool);
            }
            InputEvent::SetColor { color } => match ColorSpec::parse(&color) {
                Some(parsed) => self.input.set_color(parsed),
                None => log::warn!("Ignoring unknown color '{}'", color),
            },
            InputEvent::SetStrokeWidth { width } => self.input.set_thickness(width),
            InputEvent::SetFontSize { size } => self.input.set_font_size(size),
            InputEvent::Undo => {
                self.input.undo();
            }
            InputEvent::Clear => {
                self.input.clear();
            }
            InputEvent::Delete => {
                self.input.delete_selected();
            }
        }
        true
    }

    /// Repaints the shape layer if anything changed since the last call.
    pub fn redraw(&mut self) -> Result<bool, EditorError> {
        let Some(canvas) = &self.canvas else {
            return Err(EditorError::NotReady);
        };
        if !self.input.needs_redraw {
            return Ok(false);
        }
        canvas.renderer.redraw(&self.input.scene())?;
        self.input.needs_redraw = false;
        Ok(true)
    }

    /// Paints the on-screen view at display size: background, annotations,
    /// selection decoration, and live preview.
    pub fn paint(&mut self, ctx: &cairo::Context) -> Result<(), EditorError> {
        self.redraw()?;
        let Some(canvas) = &self.canvas else {
            return Err(EditorError::NotReady);
        };

        ctx.save()?;
        ctx.scale(1.0 / canvas.viewport.scale, 1.0 / canvas.viewport.scale);
        let painted = canvas.renderer.compose(ctx);
        ctx.restore()?;
        painted?;
        Ok(())
    }

    /// Commits any open text draft, then flattens the background and all
    /// annotations into a PNG for delivery together with `notes`.
    ///
    /// Selection decoration and previews are never part of the output.
    pub fn finalize(&mut self, notes: &str) -> Result<Delivery, EditorError> {
        match &self.load_state {
            LoadState::Ready => {}
            LoadState::Loading => return Err(EditorError::NotReady),
            LoadState::Failed(reason) => return Err(EditorError::NoImage(reason.clone())),
        }
        let Some(canvas) = &self.canvas else {
            return Err(EditorError::NotReady);
        };

        self.input.on_blur();

        let surface = canvas.renderer.flatten(self.input.frame())?;
        let png = encode_png(&surface).map_err(|e| EditorError::Encode(e.to_string()))?;

        log::info!(
            "Finalized {} annotation(s) into {} byte PNG",
            self.input.frame().len(),
            png.len()
        );

        Ok(Delivery::new(
            png,
            canvas.renderer.width() as u32,
            canvas.renderer.height() as u32,
            notes,
        ))
    }
}
