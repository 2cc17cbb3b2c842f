use crate::paint::Color;

use super::{Canvas, CompositeOp};

/// A single recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCmd {
    Save,
    Restore,
    Scale { sx: f64, sy: f64 },
    Translate { tx: f64, ty: f64 },
    Clear,
    FillColor(Color),
    StrokeColor(Color),
    LineWidth(f64),
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    BezierTo { cp0: (f64, f64), cp1: (f64, f64), end: (f64, f64) },
    Arc { x: f64, y: f64, radius: f64, start: f64, end: f64 },
    ClosePath,
    Fill,
    Stroke,
    /// `source_len` is the number of commands the source canvas had recorded.
    Composite { op: CompositeOp, source_len: usize },
}

/// Canvas backend that records calls instead of rasterizing.
///
/// Performance characteristics:
/// - every call is an O(1) push
/// - [`reset`](Self::reset) keeps allocated capacity for reuse
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    commands: Vec<CanvasCmd>,
}

impl RecordingCanvas {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns recorded commands in call order.
    #[inline]
    pub fn commands(&self) -> &[CanvasCmd] {
        &self.commands
    }

    /// Forgets all recorded commands.
    #[inline]
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Number of recorded commands matching `pred`.
    pub fn count(&self, pred: impl Fn(&CanvasCmd) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    #[inline]
    fn push(&mut self, cmd: CanvasCmd) {
        self.commands.push(cmd);
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.push(CanvasCmd::Save);
    }

    fn restore(&mut self) {
        self.push(CanvasCmd::Restore);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.push(CanvasCmd::Scale { sx, sy });
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.push(CanvasCmd::Translate { tx, ty });
    }

    fn clear(&mut self) {
        self.push(CanvasCmd::Clear);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.push(CanvasCmd::FillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.push(CanvasCmd::StrokeColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(CanvasCmd::LineWidth(width));
    }

    fn begin_path(&mut self) {
        self.push(CanvasCmd::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(CanvasCmd::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(CanvasCmd::LineTo { x, y });
    }

    fn bezier_curve_to(&mut self, cp0x: f64, cp0y: f64, cp1x: f64, cp1y: f64, x: f64, y: f64) {
        self.push(CanvasCmd::BezierTo { cp0: (cp0x, cp0y), cp1: (cp1x, cp1y), end: (x, y) });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        self.push(CanvasCmd::Arc { x, y, radius, start, end });
    }

    fn close_path(&mut self) {
        self.push(CanvasCmd::ClosePath);
    }

    fn fill(&mut self) {
        self.push(CanvasCmd::Fill);
    }

    fn stroke(&mut self) {
        self.push(CanvasCmd::Stroke);
    }

    fn composite(&mut self, source: &Self, op: CompositeOp) {
        self.push(CanvasCmd::Composite { op, source_len: source.commands.len() });
    }
}
