/// Stage sizing configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StageConfig {
    /// Artboard width in scene units.
    pub width: f64,
    /// Artboard height in scene units.
    pub height: f64,
    /// Upper bound for the integer zoom before the pixel ratio is applied.
    pub max_zoom: f64,
    /// Vertical offset added to the centering translation.
    pub center_nudge_y: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self { width: 88.0, height: 88.0, max_zoom: 6.0, center_nudge_y: -4.0 }
    }
}

/// Artboard placed on a device surface with an integer zoom.
///
/// All surfaces of a scene share one stage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stage {
    config: StageConfig,
    zoom: f64,
    pixel_ratio: f64,
}

impl Stage {
    /// Fits the artboard into a window of `window_w` x `window_h` logical pixels.
    ///
    /// The zoom is `min(max_zoom, floor(min_side / width)) * pixel_ratio`, and
    /// never below `pixel_ratio` so tiny windows still show the artboard.
    pub fn fit(config: StageConfig, window_w: f64, window_h: f64, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        let min_side = window_w.min(window_h).max(0.0);
        let steps = (min_side / config.width).floor().min(config.max_zoom).max(1.0);
        Self { config, zoom: steps * pixel_ratio, pixel_ratio }
    }

    #[inline]
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Device pixels per scene unit.
    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[inline]
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Surface size in device pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        let w = (self.config.width * self.zoom).round().max(1.0);
        let h = (self.config.height * self.zoom).round().max(1.0);
        (w as u32, h as u32)
    }

    /// Surface width in device pixels, as used by the drag mapping.
    #[inline]
    pub fn canvas_width(&self) -> f64 {
        self.config.width * self.zoom
    }

    /// Translation applied after the zoom scale: artboard centre plus nudge.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.config.width / 2.0, self.config.height / 2.0 + self.config.center_nudge_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_floored_and_capped() {
        let c = StageConfig::default();
        assert_eq!(Stage::fit(c, 1280.0, 720.0, 1.0).zoom(), 6.0);
        assert_eq!(Stage::fit(c, 400.0, 300.0, 1.0).zoom(), 3.0);
        assert_eq!(Stage::fit(c, 400.0, 300.0, 2.0).zoom(), 6.0);
        assert_eq!(Stage::fit(c, 2000.0, 2000.0, 2.0).zoom(), 12.0);
    }

    #[test]
    fn small_window_keeps_unit_zoom() {
        let stage = Stage::fit(StageConfig::default(), 50.0, 50.0, 1.5);
        assert_eq!(stage.zoom(), 1.5);
        assert_eq!(stage.canvas_size(), (132, 132));
    }

    #[test]
    fn center_includes_nudge() {
        let stage = Stage::fit(StageConfig::default(), 528.0, 528.0, 1.0);
        assert_eq!(stage.center(), (44.0, 40.0));
        assert_eq!(stage.canvas_size(), (528, 528));
        assert_eq!(stage.canvas_width(), 528.0);
    }
}
