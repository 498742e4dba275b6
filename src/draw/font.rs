//! Font descriptor and the text measurement capability shared by hit-testing
//! and rendering.

/// Font configuration for text labels.
///
/// The same descriptor feeds [`PangoTextMetrics`] and the renderer so the
/// measured width of a label always matches what ends up on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "Inter")
    pub family: String,

    /// Font weight (e.g., "normal", "semibold", "bold" or numeric 100-900)
    pub weight: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "semibold".to_string(),
        }
    }
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: String, weight: String) -> Self {
        Self { family, weight }
    }

    /// Converts this descriptor to a size-less Pango font description string.
    ///
    /// Example: "Sans Semibold" or "Monospace". Numeric weights are mapped to
    /// the nearest Pango weight name.
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.family.clone()];

        let weight = match self.weight.trim().parse::<u32>() {
            Ok(w) => numeric_weight_name(w).to_string(),
            Err(_) => self.weight.clone(),
        };
        if !weight.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&weight));
        }

        parts.join(" ")
    }

    /// Builds a Pango description with an absolute pixel size.
    pub fn to_pango(&self, size: f64) -> pango::FontDescription {
        let mut desc = pango::FontDescription::from_string(&self.to_pango_string());
        desc.set_absolute_size(size * pango::SCALE as f64);
        desc
    }
}

fn numeric_weight_name(weight: u32) -> &'static str {
    match weight {
        0..=349 => "light",
        350..=449 => "normal",
        450..=549 => "medium",
        550..=649 => "semibold",
        650..=749 => "bold",
        _ => "heavy",
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Creates a Pango layout for `text` on the given context.
///
/// Both measurement and drawing go through here.
pub fn create_layout(
    ctx: &cairo::Context,
    font: &FontDescriptor,
    text: &str,
    size: f64,
) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&font.to_pango(size)));
    layout.set_text(text);
    layout
}

/// Measures the advance width of a single-line text label.
pub trait TextMetrics {
    /// Returns the rendered width of `text` at `size` pixels.
    fn text_width(&self, text: &str, size: f64) -> f64;
}

/// [`TextMetrics`] backed by Pango, using the renderer's font.
#[derive(Debug, Clone, Default)]
pub struct PangoTextMetrics {
    font: FontDescriptor,
}

impl PangoTextMetrics {
    pub fn new(font: FontDescriptor) -> Self {
        Self { font }
    }

    pub fn font(&self) -> &FontDescriptor {
        &self.font
    }
}

impl TextMetrics for PangoTextMetrics {
    fn text_width(&self, text: &str, size: f64) -> f64 {
        if text.is_empty() {
            return 0.0;
        }

        // A tiny image surface is enough; only the layout is needed.
        let measured = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1)
            .ok()
            .and_then(|surface| cairo::Context::new(&surface).ok())
            .map(|ctx| {
                let layout = create_layout(&ctx, &self.font, text, size);
                let (_ink, logical) = layout.extents();
                logical.width() as f64 / pango::SCALE as f64
            });

        measured.unwrap_or_else(|| {
            log::warn!("Text measurement unavailable, estimating width");
            FixedAdvanceMetrics::default().text_width(text, size)
        })
    }
}

/// Deterministic metrics: every character advances `ratio * size` pixels.
///
/// Used where real font metrics are unavailable or must be reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvanceMetrics {
    pub ratio: f64,
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self { ratio: 0.6 }
    }
}

impl TextMetrics for FixedAdvanceMetrics {
    fn text_width(&self, text: &str, size: f64) -> f64 {
        text.chars().count() as f64 * size * self.ratio
    }
}
