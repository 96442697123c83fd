// File: crates/candlestick-core/src/trend.rs
// Summary: Trend overlay polylines and the curve interpolators that shape them.

use crate::geometry::Point;
use crate::model::TrendSeries;
use crate::scale::{ValueScale, XScale};
use crate::scene::{PathCmd, PathCommand};
use crate::selection::SelectionId;
use crate::settings::{Interpolation, TrendLineSettings};
use crate::types::Color;

/// Tension used by the cardinal interpolator.
pub const CARDINAL_TENSION: f32 = 0.7;

const EPSILON: f32 = 1e-6;

/// One laid out trend series.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendMark {
    pub name: String,
    pub color: Color,
    pub weight: f32,
    pub selection_id: SelectionId,
    /// Mapped vertices in category order.
    pub points: Vec<Point>,
    pub commands: Vec<PathCommand>,
}

impl TrendMark {
    /// Map the series through the scales and interpolate it.
    /// Points whose category has no x position are left out.
    pub fn layout(series: &TrendSeries, x_scale: &XScale, y_scale: &ValueScale, style: &TrendLineSettings) -> Self {
        let points: Vec<Point> = series
            .points
            .iter()
            .filter_map(|p| x_scale.to_px(&p.x).map(|x| Point::new(x, y_scale.to_px(p.y))))
            .collect();
        if points.len() < series.points.len() {
            log::trace!(
                "trend {:?}: {} of {} points have no x position",
                series.name,
                series.points.len() - points.len(),
                series.points.len()
            );
        }
        Self {
            name: series.name.clone(),
            color: series.color,
            weight: style.weight,
            selection_id: series.selection_id.clone(),
            commands: interpolate(&points, style.interpolation),
            points,
        }
    }

    /// Stroked, unfilled path for the draw list.
    pub fn path(&self) -> PathCmd {
        PathCmd { commands: self.commands.clone(), stroke: self.color, width: self.weight }
    }
}

/// Path commands through `points` using the given curve.
pub fn interpolate(points: &[Point], mode: Interpolation) -> Vec<PathCommand> {
    let Some(&first) = points.first() else { return Vec::new() };
    let mut out = vec![PathCommand::MoveTo(first)];
    if points.len() == 1 {
        return out;
    }
    match mode {
        Interpolation::Linear => linear(points, &mut out),
        Interpolation::Step => step(points, &mut out),
        Interpolation::StepBefore => {
            for w in points.windows(2) {
                out.push(PathCommand::LineTo(Point::new(w[0].x, w[1].y)));
                out.push(PathCommand::LineTo(w[1]));
            }
        }
        Interpolation::StepAfter => {
            for w in points.windows(2) {
                out.push(PathCommand::LineTo(Point::new(w[1].x, w[0].y)));
                out.push(PathCommand::LineTo(w[1]));
            }
        }
        Interpolation::Basis if points.len() >= 3 => basis(points, &mut out),
        Interpolation::Cardinal if points.len() >= 3 => {
            hermite(points, &cardinal_tangents(points, CARDINAL_TENSION), &mut out)
        }
        Interpolation::Monotone if points.len() >= 3 => hermite(points, &monotone_tangents(points), &mut out),
        // Curves need three points; fewer fall back to straight segments.
        Interpolation::Basis | Interpolation::Cardinal | Interpolation::Monotone => linear(points, &mut out),
    }
    out
}

fn linear(points: &[Point], out: &mut Vec<PathCommand>) {
    out.extend(points[1..].iter().copied().map(PathCommand::LineTo));
}

/// Horizontal to the midpoint, vertical to the next value, horizontal to the next x.
fn step(points: &[Point], out: &mut Vec<PathCommand>) {
    let mut y = points[0].y;
    for w in points.windows(2) {
        let mid = (w[0].x + w[1].x) * 0.5;
        out.push(PathCommand::LineTo(Point::new(mid, y)));
        out.push(PathCommand::LineTo(Point::new(mid, w[1].y)));
        y = w[1].y;
    }
    if let Some(last) = points.last() {
        out.push(PathCommand::LineTo(*last));
    }
}

/// Uniform cubic B-spline, clamped at both ends by repeating the end points.
fn basis(points: &[Point], out: &mut Vec<PathCommand>) {
    const B1: [f32; 4] = [0.0, 2.0 / 3.0, 1.0 / 3.0, 0.0];
    const B2: [f32; 4] = [0.0, 1.0 / 3.0, 2.0 / 3.0, 0.0];
    const B3: [f32; 4] = [0.0, 1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0];
    let dot = |b: &[f32; 4], w: &[Point; 4]| {
        Point::new(
            b.iter().zip(w).map(|(k, p)| k * p.x).sum(),
            b.iter().zip(w).map(|(k, p)| k * p.y).sum(),
        )
    };

    let n = points.len();
    let last = points[n - 1];
    let mut window = [points[0], points[0], points[0], points[1]];
    out.push(PathCommand::LineTo(dot(&B3, &window)));
    for i in 2..=n {
        let next = if i < n { points[i] } else { last };
        window = [window[1], window[2], window[3], next];
        out.push(PathCommand::CubicTo(dot(&B1, &window), dot(&B2, &window), dot(&B3, &window)));
    }
    out.push(PathCommand::LineTo(last));
}

/// Tangents for the interior points of a cardinal spline.
fn cardinal_tangents(points: &[Point], tension: f32) -> Vec<Point> {
    let a = (1.0 - tension) / 2.0;
    points
        .windows(3)
        .map(|w| Point::new(a * (w[2].x - w[0].x), a * (w[2].y - w[0].y)))
        .collect()
}

/// Fritsch–Carlson tangents, one per point.
fn monotone_tangents(points: &[Point]) -> Vec<Point> {
    let slope = |p0: Point, p1: Point| (p1.y - p0.y) / (p1.x - p0.x);
    let n = points.len();

    // Finite differences: secant at the ends, mean of neighbouring secants inside.
    let secants: Vec<f32> = points.windows(2).map(|w| slope(w[0], w[1])).collect();
    let mut m = Vec::with_capacity(n);
    m.push(secants[0]);
    m.extend(secants.windows(2).map(|s| (s[0] + s[1]) / 2.0));
    m.push(secants[n - 2]);

    for (i, &d) in secants.iter().enumerate() {
        if d.abs() < EPSILON {
            m[i] = 0.0;
            m[i + 1] = 0.0;
            continue;
        }
        let a = m[i] / d;
        let b = m[i + 1] / d;
        let s = a * a + b * b;
        if s > 9.0 {
            let s = d * 3.0 / s.sqrt();
            m[i] = s * a;
            m[i + 1] = s * b;
        }
    }

    (0..n)
        .map(|i| {
            let dx = points[(i + 1).min(n - 1)].x - points[i.saturating_sub(1)].x;
            let s = dx / (6.0 * (1.0 + m[i] * m[i]));
            let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
            Point::new(finite(s), finite(m[i] * s))
        })
        .collect()
}

/// Hermite segments as cubic Béziers. With one tangent per point every
/// segment is cubic; with tangents for the interior points only, the first
/// and last segments are quadratics raised to cubics.
fn hermite(points: &[Point], tangents: &[Point], out: &mut Vec<PathCommand>) {
    let n = points.len();
    let quad = tangents.len() + 2 == n;
    if tangents.is_empty() || !(quad || tangents.len() == n) {
        linear(points, out);
        return;
    }

    // Tangent at point `i`, if one is defined.
    let tangent = |i: usize| if quad { i.checked_sub(1).and_then(|j| tangents.get(j)) } else { tangents.get(i) };
    let (first, last) = if quad { (1, n - 2) } else { (0, n - 1) };

    if quad {
        let t = tangents[0];
        let q = Point::new(points[1].x - t.x * 2.0 / 3.0, points[1].y - t.y * 2.0 / 3.0);
        out.push(quadratic(points[0], q, points[1]));
    }
    for i in first..last {
        let (Some(t0), Some(t1)) = (tangent(i), tangent(i + 1)) else { continue };
        let (p0, p1) = (points[i], points[i + 1]);
        out.push(PathCommand::CubicTo(
            Point::new(p0.x + t0.x, p0.y + t0.y),
            Point::new(p1.x - t1.x, p1.y - t1.y),
            p1,
        ));
    }
    if quad {
        let t = tangents[tangents.len() - 1];
        let p = points[n - 2];
        let q = Point::new(p.x + t.x * 2.0 / 3.0, p.y + t.y * 2.0 / 3.0);
        out.push(quadratic(p, q, points[n - 1]));
    }
}

/// Quadratic Bézier expressed as the equivalent cubic.
fn quadratic(p0: Point, q: Point, p1: Point) -> PathCommand {
    PathCommand::CubicTo(
        Point::new(p0.x + (q.x - p0.x) * 2.0 / 3.0, p0.y + (q.y - p0.y) * 2.0 / 3.0),
        Point::new(p1.x + (q.x - p1.x) * 2.0 / 3.0, p1.y + (q.y - p1.y) * 2.0 / 3.0),
        p1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(f32, f32)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn end_of(cmd: &PathCommand) -> Point {
        match *cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) | PathCommand::CubicTo(_, _, p) => p,
        }
    }

    #[test]
    fn linear_visits_every_point() {
        let p = pts(&[(0.0, 0.0), (10.0, 5.0), (20.0, 0.0)]);
        let cmds = interpolate(&p, Interpolation::Linear);
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds.iter().map(end_of).collect::<Vec<_>>(), p);
    }

    #[test]
    fn step_after_holds_value_until_next_x() {
        let p = pts(&[(0.0, 0.0), (10.0, 5.0)]);
        let cmds = interpolate(&p, Interpolation::StepAfter);
        assert_eq!(cmds[1], PathCommand::LineTo(Point::new(10.0, 0.0)));
        assert_eq!(cmds[2], PathCommand::LineTo(Point::new(10.0, 5.0)));
    }

    #[test]
    fn step_before_jumps_to_next_value_first() {
        let p = pts(&[(0.0, 0.0), (10.0, 5.0)]);
        let cmds = interpolate(&p, Interpolation::StepBefore);
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[1], PathCommand::LineTo(Point::new(0.0, 5.0)));
        assert_eq!(cmds[2], PathCommand::LineTo(Point::new(10.0, 5.0)));
    }

    #[test]
    fn step_changes_at_midpoint() {
        let p = pts(&[(0.0, 0.0), (10.0, 5.0)]);
        let cmds = interpolate(&p, Interpolation::Step);
        assert_eq!(cmds[1], PathCommand::LineTo(Point::new(5.0, 0.0)));
        assert_eq!(cmds[2], PathCommand::LineTo(Point::new(5.0, 5.0)));
        assert_eq!(end_of(cmds.last().unwrap()), Point::new(10.0, 5.0));
    }

    #[test]
    fn curves_end_on_last_point() {
        let p = pts(&[(0.0, 10.0), (10.0, 0.0), (20.0, 8.0), (30.0, 3.0)]);
        for mode in [Interpolation::Basis, Interpolation::Cardinal, Interpolation::Monotone] {
            let cmds = interpolate(&p, mode);
            assert_eq!(cmds[0], PathCommand::MoveTo(p[0]), "{mode:?}");
            let end = end_of(cmds.last().unwrap());
            assert!((end.x - 30.0).abs() < 1e-4 && (end.y - 3.0).abs() < 1e-4, "{mode:?}: {end:?}");
        }
    }

    #[test]
    fn cardinal_passes_through_every_point() {
        let p = pts(&[(0.0, 10.0), (10.0, 0.0), (20.0, 8.0), (30.0, 3.0)]);
        let cmds = interpolate(&p, Interpolation::Cardinal);
        let ends: Vec<Point> = cmds.iter().map(end_of).collect();
        assert_eq!(ends, p);
    }

    #[test]
    fn monotone_does_not_overshoot_flat_runs() {
        let p = pts(&[(0.0, 5.0), (10.0, 5.0), (20.0, 0.0)]);
        let cmds = interpolate(&p, Interpolation::Monotone);
        if let PathCommand::CubicTo(c1, c2, _) = cmds[1] {
            assert_eq!(c1.y, 5.0);
            assert_eq!(c2.y, 5.0);
        } else {
            panic!("expected a cubic segment");
        }
    }

    #[test]
    fn short_curves_fall_back_to_lines() {
        let p = pts(&[(0.0, 0.0), (10.0, 5.0)]);
        assert_eq!(interpolate(&p, Interpolation::Basis), interpolate(&p, Interpolation::Linear));
        assert_eq!(interpolate(&p[..1], Interpolation::Monotone), vec![PathCommand::MoveTo(p[0])]);
        assert!(interpolate(&[], Interpolation::Linear).is_empty());
    }
}
