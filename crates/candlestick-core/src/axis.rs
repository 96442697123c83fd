// File: crates/candlestick-core/src/axis.rs
// Summary: Axis layout: adaptive x tick labels (rotate/wrap/truncate) with measured height
//          reservation, and the value axis with full-width gridlines.

use crate::data::CategoryValue;
use crate::format::{date_axis_format, ValueFormatter, CATEGORICAL_DATE_FORMAT};
use crate::geometry::{Point, Rect};
use crate::scale::{PlotGeometry, ValueScale, XScale};
use crate::scene::{DrawCommand, LineCmd, TextAnchor, TextMark};
use crate::settings::{XAxisSettings, XAxisType};
use crate::text::{truncate_to_width, wrap_to_width, TextMeasurer};
use crate::types::{Color, AXIS_BOTTOM_GAP, AXIS_PADDING, LABEL_FONT_SIZE};

/// Length of the x axis tick marks.
pub const TICK_SIZE: f32 = 6.0;
/// Gap between an x tick mark and its label.
pub const TICK_PADDING: f32 = 3.0;
/// Rotated labels may take at most this share of the plot height.
pub const ROTATED_LABEL_SHARE: f32 = 0.3;
/// Ticks on a continuous date axis.
pub const DATE_AXIS_TICKS: usize = 4;
/// Vertical pixels per value axis tick.
pub const PX_PER_TICK: f32 = 80.0;
/// Below this width per tick labels stand vertical.
pub const VERTICAL_BELOW: f32 = 20.0;
/// Below this width per tick (and at or above [`VERTICAL_BELOW`]) labels go diagonal.
pub const DIAGONAL_BELOW: f32 = 45.0;
pub const DIAGONAL_ANGLE: f32 = -35.0;

const GRID_COLOR: Color = Color::rgb(0xE6, 0xE6, 0xE6);
const TICK_COLOR: Color = Color::rgb(0xC8, 0xC8, 0xC8);

/// How x labels are fitted into their slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelOrientation {
    /// Rotated −90°, end-anchored, truncated.
    Vertical,
    /// Rotated −35° with a compensating shift, end-anchored, truncated.
    Diagonal,
    /// Upright and word-wrapped to the tick width.
    Horizontal,
}

impl LabelOrientation {
    pub fn for_tick_width(width_per_tick: f32) -> Self {
        if width_per_tick < VERTICAL_BELOW {
            Self::Vertical
        } else if width_per_tick < DIAGONAL_BELOW {
            Self::Diagonal
        } else {
            Self::Horizontal
        }
    }

    pub fn rotation(&self) -> f32 {
        match self {
            Self::Vertical => -90.0,
            Self::Diagonal => DIAGONAL_ANGLE,
            Self::Horizontal => 0.0,
        }
    }
}

/// Number of x ticks to ask the scale for: every category on an ordinal
/// axis, a fixed handful on a continuous date axis.
pub fn x_tick_count(axis_type: XAxisType, category_is_date: bool, categories: usize) -> usize {
    match (axis_type, category_is_date) {
        (XAxisType::Categorical, _) | (_, false) => categories,
        (XAxisType::Continuous, true) => DATE_AXIS_TICKS,
    }
}

/// Final x axis placement.
#[derive(Clone, Debug, PartialEq)]
pub struct XAxisLayout {
    pub left_px: f32,
    pub right_px: f32,
    /// Top of the axis band; tick marks start here.
    pub axis_y: f32,
    /// Measured height of tick marks plus labels.
    pub height: f32,
    pub ticks: Vec<f32>,
    pub labels: Vec<TextMark>,
    pub orientation: LabelOrientation,
    pub width_per_tick: f32,
    /// Vertical extent of the gridlines, when enabled.
    pub grid: Option<(f32, f32)>,
}

impl XAxisLayout {
    /// Two-pass layout: produce labels for the tick set, pick an orientation
    /// from the width each tick gets, fit the labels, measure the label block
    /// and only then pin the axis above the reserved bottom margin.
    pub fn layout(
        scale: &XScale,
        settings: &XAxisSettings,
        category_is_date: bool,
        categories: usize,
        plot: &PlotGeometry,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let (left_px, right_px) = scale.range();
        let count = x_tick_count(settings.axis_type, category_is_date, categories);
        let raw = tick_labels(scale, count);

        // Provisional pass: density decides orientation.
        let rendered = raw.len().max(1);
        let width_per_tick = (right_px - left_px) / rendered as f32;
        let orientation = LabelOrientation::for_tick_width(width_per_tick);
        let font_size = LABEL_FONT_SIZE;
        let line_height = measurer.line_height(font_size);
        let max_rotated = plot.plot_height * ROTATED_LABEL_SHARE;

        let ticks: Vec<f32> = raw.iter().map(|(x, _)| *x).collect();
        let mut labels: Vec<TextMark> = raw
            .iter()
            .map(|(x, text)| {
                let (lines, anchor, dx, dy, shift) = match orientation {
                    LabelOrientation::Vertical => (
                        vec![truncate_to_width(measurer, text, max_rotated, font_size)],
                        TextAnchor::End,
                        0.0,
                        TICK_SIZE + TICK_PADDING - font_size * 0.5,
                        Point::new(0.0, 0.0),
                    ),
                    LabelOrientation::Diagonal => (
                        vec![truncate_to_width(measurer, text, max_rotated, font_size)],
                        TextAnchor::End,
                        font_size * 2.5,
                        TICK_SIZE + TICK_PADDING,
                        Point::new(-2.0 * line_height, line_height),
                    ),
                    LabelOrientation::Horizontal => (
                        wrap_to_width(measurer, text, width_per_tick, font_size),
                        TextAnchor::Middle,
                        0.0,
                        TICK_SIZE + TICK_PADDING + font_size * 0.71,
                        Point::new(0.0, 0.0),
                    ),
                };
                TextMark {
                    x: x + shift.x,
                    y: shift.y,
                    dx,
                    dy,
                    rotation: orientation.rotation(),
                    anchor,
                    lines,
                    font_size,
                    line_height,
                    color: settings.fill,
                }
            })
            .collect();

        // Measure the block relative to the axis line at y = 0.
        let mut block = Rect::from_ltwh(left_px, 0.0, right_px - left_px, TICK_SIZE);
        for label in &labels {
            block = block.union(&label.bounds(measurer));
        }
        let height = block.bottom().max(TICK_SIZE);

        // Final pass: pin the axis above the reserved bottom margin.
        let axis_y = plot.surface_height - AXIS_BOTTOM_GAP - height;
        for label in &mut labels {
            label.y += axis_y;
        }
        let grid = settings.gridline.then_some((0.0, (axis_y - AXIS_PADDING).max(0.0)));

        log::trace!(
            "x axis: {} ticks, {:.1}px each, {:?}, height {:.1}",
            ticks.len(),
            width_per_tick,
            orientation,
            height
        );

        Self { left_px, right_px, axis_y, height, ticks, labels, orientation, width_per_tick, grid }
    }

    pub fn push_commands(&self, out: &mut Vec<DrawCommand>) {
        if let Some((top, bottom)) = self.grid {
            for &x in &self.ticks {
                out.push(line(Point::new(x, top), Point::new(x, bottom), GRID_COLOR));
            }
        }
        for &x in &self.ticks {
            out.push(line(Point::new(x, self.axis_y), Point::new(x, self.axis_y + TICK_SIZE), TICK_COLOR));
        }
        out.extend(self.labels.iter().cloned().map(DrawCommand::Text));
    }
}

/// Tick positions and raw label text for the current x scale.
fn tick_labels(scale: &XScale, count: usize) -> Vec<(f32, String)> {
    match scale {
        XScale::Time(t) => {
            let fmt = date_axis_format(t.start, t.end);
            t.ticks(count).into_iter().map(|d| (t.to_px(d), d.format(fmt).to_string())).collect()
        }
        XScale::Point(p) => p
            .categories()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let text = match c {
                    CategoryValue::Date(d) => d.format(CATEGORICAL_DATE_FORMAT).to_string(),
                    other => other.readable(),
                };
                (p.position(i), text)
            })
            .collect(),
    }
}

/// Final y axis placement.
#[derive(Clone, Debug, PartialEq)]
pub struct YAxisLayout {
    /// Right edge of the labels (the reserved left margin).
    pub label_x: f32,
    /// Gridlines run from here to `grid_right`.
    pub grid_left: f32,
    pub grid_right: f32,
    pub ticks: Vec<(f64, f32)>,
    pub labels: Vec<TextMark>,
}

impl YAxisLayout {
    /// Width reserved left of the plot: the formatted end-of-domain label.
    pub fn reserved_width(formatter: &ValueFormatter, domain_end: f64, measurer: &dyn TextMeasurer) -> f32 {
        measurer.measure_width(&formatter.format(domain_end), LABEL_FONT_SIZE)
    }

    pub fn tick_count(plot_height: f32) -> usize {
        ((plot_height / PX_PER_TICK).floor() as usize).max(2)
    }

    pub fn layout(
        scale: &ValueScale,
        formatter: &ValueFormatter,
        plot: &PlotGeometry,
        reserved_width: f32,
        color: Color,
    ) -> Self {
        let grid_left = reserved_width + AXIS_PADDING;
        let grid_right = plot.plot_width;
        let ticks: Vec<(f64, f32)> = scale
            .ticks(Self::tick_count(plot.plot_height))
            .into_iter()
            .map(|v| (v, scale.to_px(v)))
            .collect();
        let labels = ticks
            .iter()
            .map(|&(v, y)| TextMark {
                x: reserved_width,
                y,
                dx: 0.0,
                dy: LABEL_FONT_SIZE * 0.32,
                rotation: 0.0,
                anchor: TextAnchor::End,
                lines: vec![formatter.format(v)],
                font_size: LABEL_FONT_SIZE,
                line_height: LABEL_FONT_SIZE,
                color,
            })
            .collect();
        Self { label_x: reserved_width, grid_left, grid_right, ticks, labels }
    }

    pub fn push_commands(&self, out: &mut Vec<DrawCommand>) {
        for &(_, y) in &self.ticks {
            out.push(line(Point::new(self.grid_left, y), Point::new(self.grid_right, y), GRID_COLOR));
        }
        out.extend(self.labels.iter().cloned().map(DrawCommand::Text));
    }
}

fn line(from: Point, to: Point, color: Color) -> DrawCommand {
    DrawCommand::Line(LineCmd { from, to, color, width: 1.0, opacity: 1.0 })
}
