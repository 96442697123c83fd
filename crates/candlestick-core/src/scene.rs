// File: crates/candlestick-core/src/scene.rs
// Summary: Backend-neutral render output: draw commands, candle/trend marks, selection opacity.

use crate::axis::{XAxisLayout, YAxisLayout};
use crate::candle::CandleMark;
use crate::geometry::{Point, Rect};
use crate::selection::Selection;
use crate::settings::VisionMode;
use crate::text::TextMeasurer;
use crate::trend::TrendMark;
use crate::types::{Color, Viewport, OUTER_MARGIN};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Possibly rotated, possibly multi-line label.
///
/// Backends translate to `(x, y)`, rotate by `rotation` degrees, then draw
/// line `i` with its baseline at `(dx, dy + i × line_height)` honouring `anchor`.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub rotation: f32,
    pub anchor: TextAnchor,
    pub lines: Vec<String>,
    pub font_size: f32,
    pub line_height: f32,
    pub color: Color,
}

impl TextMark {
    /// Axis-aligned bounds of the rendered text after rotation.
    pub fn bounds(&self, m: &dyn TextMeasurer) -> Rect {
        let mut corners = Vec::with_capacity(self.lines.len() * 4);
        for (i, line) in self.lines.iter().enumerate() {
            let w = m.measure_width(line, self.font_size);
            let left = match self.anchor {
                TextAnchor::Start => self.dx,
                TextAnchor::Middle => self.dx - w * 0.5,
                TextAnchor::End => self.dx - w,
            };
            let baseline = self.dy + i as f32 * self.line_height;
            let top = baseline - self.line_height * 0.75;
            let bottom = baseline + self.line_height * 0.25;
            corners.extend([
                Point::new(left, top),
                Point::new(left + w, top),
                Point::new(left, bottom),
                Point::new(left + w, bottom),
            ]);
        }
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let mut min = Point::new(f32::INFINITY, f32::INFINITY);
        let mut max = Point::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for c in corners {
            let x = self.x + c.x * cos - c.y * sin;
            let y = self.y + c.x * sin + c.y * cos;
            min = Point::new(min.x.min(x), min.y.min(y));
            max = Point::new(max.x.max(x), max.y.max(y));
        }
        if !min.x.is_finite() {
            return Rect::from_ltwh(self.x, self.y, 0.0, 0.0);
        }
        Rect::from_ltwh(min.x, min.y, max.x - min.x, max.y - min.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineCmd {
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub width: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
}

/// Unfilled stroked path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathCmd {
    pub commands: Vec<PathCommand>,
    pub stroke: Color,
    pub width: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line(LineCmd),
    Rect(RectCmd),
    Path(PathCmd),
    Text(TextMark),
}

/// One fully laid out frame. Coordinates are relative to the scrollable surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    /// Visible container (viewport minus outer margins); scrolls horizontally when `width` exceeds it.
    pub container: Rect,
    pub width: f32,
    pub height: f32,
    pub x_axis: Option<XAxisLayout>,
    pub y_axis: Option<YAxisLayout>,
    pub candles: Vec<CandleMark>,
    pub trends: Vec<TrendMark>,
    pub vision: VisionMode,
}

impl Scene {
    /// A frame with nothing to draw.
    pub fn empty(viewport: Viewport) -> Self {
        let container = Rect::from_ltwh(
            OUTER_MARGIN.left,
            OUTER_MARGIN.top,
            (viewport.width - OUTER_MARGIN.hsum()).max(0.0),
            (viewport.height - OUTER_MARGIN.vsum()).max(0.0),
        );
        Self {
            viewport,
            container,
            width: 0.0,
            height: 0.0,
            x_axis: None,
            y_axis: None,
            candles: Vec::new(),
            trends: Vec::new(),
            vision: VisionMode::Normal,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x_axis.is_none() && self.y_axis.is_none() && self.candles.is_empty() && self.trends.is_empty()
    }

    /// Draw list in z-order: x gridlines and axis, y axis, candles, trend lines.
    pub fn commands(&self) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        if let Some(x) = &self.x_axis {
            x.push_commands(&mut out);
        }
        if let Some(y) = &self.y_axis {
            y.push_commands(&mut out);
        }
        for c in &self.candles {
            c.push_commands(&mut out);
        }
        for t in &self.trends {
            out.push(DrawCommand::Path(t.path()));
        }
        out
    }

    /// Recompute every candle's opacity from the current selection.
    pub fn apply_selection(&mut self, selection: &Selection) {
        for c in &mut self.candles {
            c.opacity = selection.opacity_for(&c.point.selection_id);
        }
    }

    /// Topmost candle whose hit area contains `p` (surface coordinates).
    pub fn hit_test(&self, p: Point) -> Option<&CandleMark> {
        self.candles.iter().rev().find(|c| c.hit_area().contains(p))
    }
}
