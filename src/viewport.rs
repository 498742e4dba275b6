//! Mapping between display space (what the user sees) and the raster's
//! native pixel space.

/// Fit of a native-size raster into an available display area.
///
/// `scale` is `native_width / display_width`; it is applied uniformly on both
/// axes because fitting preserves the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub native_width: u32,
    pub native_height: u32,
    pub display_width: u32,
    pub display_height: u32,
    pub scale: f64,
}

impl Viewport {
    /// Fits a `native_width` x `native_height` raster into `max_width` x
    /// `max_height` without ever enlarging it.
    pub fn fit(native_width: u32, native_height: u32, max_width: u32, max_height: u32) -> Self {
        let native_w = native_width.max(1) as f64;
        let native_h = native_height.max(1) as f64;

        let fit = 1.0_f64
            .min(max_width.max(1) as f64 / native_w)
            .min(max_height.max(1) as f64 / native_h);

        let display_width = ((native_w * fit).floor() as u32).max(1);
        let display_height = ((native_h * fit).floor() as u32).max(1);

        Self {
            native_width,
            native_height,
            display_width,
            display_height,
            scale: native_w / display_width as f64,
        }
    }

    pub fn to_canvas_space(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale, y * self.scale)
    }

    pub fn to_display_space(&self, x: f64, y: f64) -> (f64, f64) {
        (x / self.scale, y / self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_image_is_never_enlarged() {
        let viewport = Viewport::fit(400, 300, 1600, 1000);
        assert_eq!((viewport.display_width, viewport.display_height), (400, 300));
        assert_eq!(viewport.scale, 1.0);
    }

    #[test]
    fn wide_image_is_limited_by_width() {
        let viewport = Viewport::fit(3200, 1000, 1600, 1000);
        assert_eq!((viewport.display_width, viewport.display_height), (1600, 500));
        assert_eq!(viewport.scale, 2.0);
    }

    #[test]
    fn tall_image_is_limited_by_height() {
        let viewport = Viewport::fit(1000, 3000, 1600, 1000);
        assert_eq!(viewport.display_height, 1000);
        assert_eq!(viewport.display_width, 333);
        assert!((viewport.scale - 1000.0 / 333.0).abs() < 1e-12);
    }

    #[test]
    fn canvas_round_trip_recovers_point() {
        let viewport = Viewport::fit(2561, 1441, 1280, 720);
        for &(x, y) in &[(0.0, 0.0), (17.25, 93.5), (1279.0, 719.0)] {
            let (cx, cy) = viewport.to_canvas_space(x, y);
            let (dx, dy) = viewport.to_display_space(cx, cy);
            assert!((dx - x).abs() < 1e-9);
            assert!((dy - y).abs() < 1e-9);
        }
    }

    #[test]
    fn pointer_input_scales_to_native() {
        let viewport = Viewport::fit(2000, 1000, 1000, 1000);
        assert_eq!(viewport.to_canvas_space(10.0, 20.0), (20.0, 40.0));
    }
}
