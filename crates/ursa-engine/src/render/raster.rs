use std::f64::consts::TAU;

use anyhow::{Context, Result};
use resvg::tiny_skia as sk;
use ursa_scene::{Canvas, Color, CompositeOp};

/// Quarter turn; arcs are split into cubic segments no longer than this.
const MAX_ARC_SEGMENT: f64 = TAU / 4.0;

#[derive(Debug, Copy, Clone)]
struct DrawState {
    transform: sk::Transform,
    fill: sk::Color,
    stroke: sk::Color,
    line_width: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: sk::Transform::identity(),
            fill: sk::Color::BLACK,
            stroke: sk::Color::BLACK,
            line_width: 1.0,
        }
    }
}

/// CPU canvas backed by a premultiplied RGBA8 `tiny_skia::Pixmap`.
///
/// Path points are mapped through the transform that is current when the
/// path is filled or stroked, so stroke widths scale with the zoom.
/// Fills use the nonzero rule; strokes use round caps and joins.
pub struct PixmapCanvas {
    pixmap: sk::Pixmap,
    state: DrawState,
    stack: Vec<DrawState>,
    path: sk::PathBuilder,
    current: Option<(f32, f32)>,
    subpath_start: Option<(f32, f32)>,
}

impl PixmapCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = sk::Pixmap::new(width, height)
            .with_context(|| format!("invalid canvas size {width}x{height}"))?;
        Ok(Self {
            pixmap,
            state: DrawState::default(),
            stack: Vec::new(),
            path: sk::PathBuilder::new(),
            current: None,
            subpath_start: None,
        })
    }

    /// Reallocates the pixels when the size changes. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if self.width() == width && self.height() == height {
            return Ok(());
        }
        self.pixmap = sk::Pixmap::new(width, height)
            .with_context(|| format!("invalid canvas size {width}x{height}"))?;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Premultiplied RGBA8 rows, top to bottom.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Premultiplied `[r, g, b, a]` at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let p = self.pixmap.pixel(x, y)?;
        Some([p.red(), p.green(), p.blue(), p.alpha()])
    }

    fn take_path(&self) -> Option<sk::Path> {
        self.path.clone().finish()
    }

    fn start_if_needed(&mut self, x: f32, y: f32) {
        if self.current.is_none() {
            self.path.move_to(x, y);
            self.subpath_start = Some((x, y));
            self.current = Some((x, y));
        }
    }
}

fn to_sk_color(color: Color) -> sk::Color {
    let (r, g, b, a) = color.to_straight();
    let c = |v: f32| v.clamp(0.0, 1.0);
    // NaN channels survive the clamp and are rejected here.
    sk::Color::from_rgba(c(r), c(g), c(b), c(a)).unwrap_or(sk::Color::TRANSPARENT)
}

fn solid_paint(color: sk::Color) -> sk::Paint<'static> {
    let mut paint = sk::Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

impl Canvas for PixmapCanvas {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.transform = self.state.transform.pre_scale(sx as f32, sy as f32);
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.state.transform = self.state.transform.pre_translate(tx as f32, ty as f32);
    }

    fn clear(&mut self) {
        self.pixmap.fill(sk::Color::TRANSPARENT);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = to_sk_color(color);
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = to_sk_color(color);
    }

    fn set_line_width(&mut self, width: f64) {
        // Non-positive and non-finite widths are ignored, as on an HTML canvas.
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width as f32;
        }
    }

    fn begin_path(&mut self) {
        self.path = sk::PathBuilder::new();
        self.current = None;
        self.subpath_start = None;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let (x, y) = (x as f32, y as f32);
        self.path.move_to(x, y);
        self.current = Some((x, y));
        self.subpath_start = Some((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let (x, y) = (x as f32, y as f32);
        if self.current.is_none() {
            self.start_if_needed(x, y);
            return;
        }
        self.path.line_to(x, y);
        self.current = Some((x, y));
    }

    fn bezier_curve_to(&mut self, cp0x: f64, cp0y: f64, cp1x: f64, cp1y: f64, x: f64, y: f64) {
        self.start_if_needed(cp0x as f32, cp0y as f32);
        self.path.cubic_to(
            cp0x as f32, cp0y as f32, cp1x as f32, cp1y as f32, x as f32, y as f32,
        );
        self.current = Some((x as f32, y as f32));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        let radius = radius.abs();
        let delta = end - start;
        let sweep = if delta >= TAU { TAU } else { delta.rem_euclid(TAU) };

        let point = |a: f64| (x + radius * a.cos(), y + radius * a.sin());
        let (sx, sy) = point(start);
        if self.current.is_some() {
            self.line_to(sx, sy);
        } else {
            self.move_to(sx, sy);
        }
        if sweep == 0.0 || radius == 0.0 {
            return;
        }

        let segments = (sweep / MAX_ARC_SEGMENT).ceil().max(1.0);
        let step = sweep / segments;
        let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;
        let mut a0 = start;
        for _ in 0..segments as usize {
            let a1 = a0 + step;
            let (x0, y0) = point(a0);
            let (x1, y1) = point(a1);
            self.bezier_curve_to(
                x0 - k * a0.sin(),
                y0 + k * a0.cos(),
                x1 + k * a1.sin(),
                y1 - k * a1.cos(),
                x1,
                y1,
            );
            a0 = a1;
        }
    }

    fn close_path(&mut self) {
        if self.current.is_some() {
            self.path.close();
            self.current = self.subpath_start;
        }
    }

    fn fill(&mut self) {
        let Some(path) = self.take_path() else { return };
        let paint = solid_paint(self.state.fill);
        self.pixmap
            .fill_path(&path, &paint, sk::FillRule::Winding, self.state.transform, None);
    }

    fn stroke(&mut self) {
        let Some(path) = self.take_path() else { return };
        let paint = solid_paint(self.state.stroke);
        let stroke = sk::Stroke {
            width: self.state.line_width,
            line_cap: sk::LineCap::Round,
            line_join: sk::LineJoin::Round,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.state.transform, None);
    }

    fn composite(&mut self, source: &Self, op: CompositeOp) {
        let blend_mode = match op {
            CompositeOp::SourceOver => sk::BlendMode::SourceOver,
            CompositeOp::DestinationIn => sk::BlendMode::DestinationIn,
        };
        let paint = sk::PixmapPaint {
            opacity: 1.0,
            blend_mode,
            quality: sk::FilterQuality::Nearest,
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.pixmap.as_ref(),
            &paint,
            sk::Transform::identity(),
            None,
        );
    }
}

impl std::fmt::Debug for PixmapCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapCanvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("saved", &self.stack.len())
            .finish()
    }
}
