// File: crates/candlestick-core/src/candle.rs
// Summary: Candle geometry and coloring: shadow, optional high/low caps and the open/close body.

use crate::domain::Domain;
use crate::geometry::{Point, Rect};
use crate::model::DataPoint;
use crate::scale::{ValueScale, XScale};
use crate::scene::{DrawCommand, LineCmd, RectCmd};
use crate::settings::DataPointSettings;
use crate::types::Color;

/// Horizontal line drawn at the high or the low.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cap {
    pub left: f32,
    pub right: f32,
    pub y: f32,
}

/// One laid out candle. The data point rides along as payload for tooltips and selection.
#[derive(Clone, Debug, PartialEq)]
pub struct CandleMark {
    pub point: DataPoint,
    pub x: f32,
    /// Shadow from `y(low)` (first) to `y(high)` (second).
    pub shadow: (f32, f32),
    /// High cap then low cap, when caps are enabled.
    pub caps: Option<(Cap, Cap)>,
    /// Missing when open or close is absent.
    pub body: Option<Rect>,
    pub color: Color,
    pub shadow_color: Color,
    pub opacity: f32,
}

impl CandleMark {
    /// Lay out one candle. Returns `None` when the point is not fully inside
    /// the domain or its category has no x position; such candles are skipped.
    pub fn layout(
        point: &DataPoint,
        x_scale: &XScale,
        y_scale: &ValueScale,
        domain: &Domain,
        ray: f32,
        style: &DataPointSettings,
    ) -> Option<Self> {
        if !point.within(domain) {
            return None;
        }
        let (low, high) = (point.low?, point.high?);
        let x = x_scale.to_px(&point.category)?;

        let color = if point.is_bearish() { style.bearish_fill } else { style.bullish_fill };
        let shadow_color = if style.show_shadows_color { style.shadows_fill } else { color };

        let y_low = y_scale.to_px(low);
        let y_high = y_scale.to_px(high);
        let caps = style.high_low_caps.then(|| {
            let cap = |y| Cap { left: x - ray, right: x + ray + 1.0, y };
            (cap(y_high), cap(y_low))
        });

        let body = match (point.open, point.close) {
            (Some(o), Some(c)) => {
                let top = y_scale.to_px(o.max(c));
                let bottom = y_scale.to_px(o.min(c));
                Some(Rect::from_ltwh(x - ray, top, ray * 2.0 + 1.0, (bottom - top).max(1.0)))
            }
            _ => None,
        };

        Some(Self {
            point: point.clone(),
            x,
            shadow: (y_low, y_high),
            caps,
            body,
            color,
            shadow_color,
            opacity: 1.0,
        })
    }

    /// Shadow, caps, then body.
    pub fn push_commands(&self, out: &mut Vec<DrawCommand>) {
        let stroke = |from: Point, to: Point| {
            DrawCommand::Line(LineCmd { from, to, color: self.shadow_color, width: 1.0, opacity: self.opacity })
        };
        out.push(stroke(Point::new(self.x, self.shadow.0), Point::new(self.x, self.shadow.1)));
        if let Some((high, low)) = &self.caps {
            for cap in [high, low] {
                out.push(stroke(Point::new(cap.left, cap.y), Point::new(cap.right, cap.y)));
            }
        }
        if let Some(rect) = self.body {
            out.push(DrawCommand::Rect(RectCmd {
                rect,
                fill: Some(self.color),
                stroke: Some(self.shadow_color),
                opacity: self.opacity,
            }));
        }
    }

    /// Region that reacts to clicks and hovers: the body, widened to cover the shadow.
    pub fn hit_area(&self) -> Rect {
        let top = self.shadow.0.min(self.shadow.1);
        let bottom = self.shadow.0.max(self.shadow.1);
        let shadow = Rect::from_ltwh(self.x - 1.0, top, 2.0, bottom - top);
        match self.body {
            Some(body) => body.union(&shadow),
            None => shadow,
        }
    }
}
