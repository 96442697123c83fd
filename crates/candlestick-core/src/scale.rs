// File: crates/candlestick-core/src/scale.rs
// Summary: Plot geometry plus category (X) and value (Y) scales with nice rounding.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::data::{CategoryKey, CategoryValue};
use crate::domain::Domain;
use crate::geometry::clamp;
use crate::model::DataPoint;
use crate::settings::XAxisType;
use crate::types::{Viewport, MIN_CANDLE_WIDTH, MIN_PLOT_HEIGHT, OUTER_MARGIN, POINT_MARGIN, SCROLLBAR_MARGIN};

/// Target tick count used when rounding a value domain.
const NICE_TICKS: usize = 10;

/// Pixel budget derived from the viewport and the number of candles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotGeometry {
    /// Visible container size (viewport minus outer margins).
    pub container: Viewport,
    /// Scrollable content width; wider than the container when candles overcrowd it.
    pub plot_width: f32,
    pub plot_height: f32,
    /// Drawable surface height (plot height minus the scrollbar reserve).
    pub surface_height: f32,
    pub slot_width: f32,
    /// Half-width of a candle body.
    pub ray: f32,
    /// Horizontal breathing room at both ends of the x range.
    pub axis_margin: f32,
}

impl PlotGeometry {
    pub fn new(viewport: Viewport, count: usize) -> Self {
        let container = Viewport::new(
            (viewport.width - OUTER_MARGIN.hsum()).max(0.0),
            (viewport.height - OUTER_MARGIN.vsum()).max(0.0),
        );
        let n = count.max(1) as f32;
        let slot_width = (container.width / n).max(MIN_CANDLE_WIDTH + POINT_MARGIN * 2.0);
        let plot_width = (slot_width * n).max(container.width);
        let plot_height = container.height.max(MIN_PLOT_HEIGHT);
        Self {
            container,
            plot_width,
            plot_height,
            surface_height: plot_height - SCROLLBAR_MARGIN,
            slot_width,
            ray: clamp(container.width / n / 6.0, 1.5, 6.0),
            axis_margin: container.width * 0.05,
        }
    }

    /// Full body width of a candle.
    pub fn candle_width(&self) -> f32 {
        self.ray * 2.0 + 1.0
    }

    pub fn scrolls(&self) -> bool {
        self.plot_width > self.container.width
    }
}

/// Vertical value scale mapping a value domain onto `[top_px, bottom_px]`, larger values higher up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueScale {
    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: f64, vmax: f64) -> Self {
        Self { top_px, bottom_px, vmin, vmax }
    }

    /// Build from a finalized domain and round it twice to tick boundaries.
    pub fn for_domain(domain: &Domain, top_px: f32, bottom_px: f32) -> Self {
        Self::new_linear(top_px, bottom_px, domain.start, domain.end)
            .nice(NICE_TICKS)
            .nice(NICE_TICKS)
    }

    /// Extend the domain outward to multiples of the tick step for `count` ticks.
    pub fn nice(mut self, count: usize) -> Self {
        if let Some(step) = tick_step(self.vmin, self.vmax, count) {
            self.vmin = (self.vmin / step).floor() * step;
            self.vmax = (self.vmax / step).ceil() * step;
        }
        self
    }

    #[inline]
    pub fn to_px(&self, y: f64) -> f32 {
        let span = self.vmax - self.vmin;
        if span.abs() < 1e-12 {
            // Degenerate domain collapses onto the top of the range.
            return self.top_px;
        }
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }

    /// Round-numbered tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let Some(step) = tick_step(self.vmin, self.vmax, count) else {
            return vec![self.vmin];
        };
        let first = (self.vmin / step - 1e-9).ceil() as i64;
        let last = (self.vmax / step + 1e-9).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Step of roughly `count` round-numbered ticks over `[min, max]` (1, 2 or 5 × 10ⁿ).
/// `None` for an empty or non-finite span.
pub fn tick_step(min: f64, max: f64, count: usize) -> Option<f64> {
    let span = (max - min).abs();
    if !(span.is_finite() && span > 0.0) || count == 0 {
        return None;
    }
    let m = count as f64;
    let mut step = 10f64.powf((span / m).log10().floor());
    let err = m / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }
    Some(step)
}

/// Continuous time scale over `[start, end]` onto `[left_px, right_px]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub left_px: f32,
    pub right_px: f32,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeScale {
    pub fn new(left_px: f32, right_px: f32, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { left_px, right_px, start, end }
    }

    #[inline]
    pub fn to_px(&self, t: NaiveDateTime) -> f32 {
        let span = (self.end - self.start).num_milliseconds() as f64;
        if span <= 0.0 {
            return self.left_px;
        }
        let frac = (t - self.start).num_milliseconds() as f64 / span;
        self.left_px + frac as f32 * (self.right_px - self.left_px)
    }

    /// Calendar-aligned ticks, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<NaiveDateTime> {
        let span_ms = (self.end - self.start).num_milliseconds();
        if span_ms <= 0 || count == 0 {
            return vec![self.start];
        }
        TimeInterval::choose(span_ms as f64, count).ticks(self.start, self.end)
    }
}

/// Tick spacing for time axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeInterval {
    /// Fixed-length steps aligned to the epoch (sub-second up to twelve hours).
    Millis(i64),
    Days(u32),
    Week,
    Months(u32),
    Years(i32),
}

const SECOND: i64 = 1_000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

const INTERVALS: [(i64, TimeInterval); 17] = [
    (SECOND, TimeInterval::Millis(SECOND)),
    (5 * SECOND, TimeInterval::Millis(5 * SECOND)),
    (15 * SECOND, TimeInterval::Millis(15 * SECOND)),
    (30 * SECOND, TimeInterval::Millis(30 * SECOND)),
    (MINUTE, TimeInterval::Millis(MINUTE)),
    (5 * MINUTE, TimeInterval::Millis(5 * MINUTE)),
    (15 * MINUTE, TimeInterval::Millis(15 * MINUTE)),
    (30 * MINUTE, TimeInterval::Millis(30 * MINUTE)),
    (HOUR, TimeInterval::Millis(HOUR)),
    (3 * HOUR, TimeInterval::Millis(3 * HOUR)),
    (6 * HOUR, TimeInterval::Millis(6 * HOUR)),
    (12 * HOUR, TimeInterval::Millis(12 * HOUR)),
    (DAY, TimeInterval::Days(1)),
    (2 * DAY, TimeInterval::Days(2)),
    (7 * DAY, TimeInterval::Week),
    (30 * DAY, TimeInterval::Months(1)),
    (90 * DAY, TimeInterval::Months(3)),
];
const YEAR_MS: f64 = 365.0 * DAY as f64;

impl TimeInterval {
    /// Pick the ladder entry whose length is closest (by ratio) to `span / count`.
    pub fn choose(span_ms: f64, count: usize) -> Self {
        let target = span_ms / count.max(1) as f64;
        if target >= YEAR_MS {
            let years = tick_step(0.0, span_ms / YEAR_MS, count).unwrap_or(1.0);
            return Self::Years((years.round() as i32).max(1));
        }
        let i = INTERVALS.partition_point(|(d, _)| (*d as f64) < target);
        if i == 0 {
            let step = tick_step(0.0, span_ms, count).unwrap_or(1.0);
            return Self::Millis((step.round() as i64).max(1));
        }
        if i == INTERVALS.len() {
            return if target / (INTERVALS[i - 1].0 as f64) < YEAR_MS / target {
                INTERVALS[i - 1].1
            } else {
                Self::Years(1)
            };
        }
        let (lo, hi) = (INTERVALS[i - 1], INTERVALS[i]);
        if target / (lo.0 as f64) < (hi.0 as f64) / target { lo.1 } else { hi.1 }
    }

    /// Boundaries of this interval inside `[start, end]`.
    pub fn ticks(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<NaiveDateTime> {
        let mut out = Vec::new();
        match *self {
            Self::Millis(step) => {
                let s = start.and_utc().timestamp_millis();
                let e = end.and_utc().timestamp_millis();
                let mut t = s.div_euclid(step) * step;
                if t < s {
                    t += step;
                }
                while t <= e {
                    if let Some(d) = chrono::DateTime::from_timestamp_millis(t) {
                        out.push(d.naive_utc());
                    }
                    t += step;
                }
            }
            Self::Days(n) => {
                let mut d = ceil_to_day(start);
                while d <= end {
                    if (d.day() - 1) % n == 0 {
                        out.push(d);
                    }
                    d += Duration::days(1);
                }
            }
            Self::Week => {
                let mut d = ceil_to_day(start);
                while d.weekday().num_days_from_sunday() != 0 {
                    d += Duration::days(1);
                }
                while d <= end {
                    out.push(d);
                    d += Duration::days(7);
                }
            }
            Self::Months(n) => {
                let (mut y, mut m) = (start.year(), start.month0());
                loop {
                    let Some(d) = month_start(y, m) else { break };
                    if d > end {
                        break;
                    }
                    if d >= start && m % n == 0 {
                        out.push(d);
                    }
                    m += 1;
                    if m == 12 {
                        m = 0;
                        y += 1;
                    }
                }
            }
            Self::Years(n) => {
                let mut y = start.year();
                while let Some(d) = month_start(y, 0) {
                    if d > end {
                        break;
                    }
                    if d >= start && y.rem_euclid(n) == 0 {
                        out.push(d);
                    }
                    y += 1;
                }
            }
        }
        out
    }
}

fn ceil_to_day(t: NaiveDateTime) -> NaiveDateTime {
    let midnight = t.date().and_hms_opt(0, 0, 0).unwrap_or(t);
    if midnight < t { midnight + Duration::days(1) } else { midnight }
}

fn month_start(year: i32, month0: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)?.and_hms_opt(0, 0, 0)
}

/// Ordinal scale placing each category at an evenly spaced point, in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct PointScale {
    pub left_px: f32,
    pub right_px: f32,
    categories: Vec<CategoryValue>,
    index: HashMap<CategoryKey, usize>,
}

impl PointScale {
    pub fn new(left_px: f32, right_px: f32, categories: impl IntoIterator<Item = CategoryValue>) -> Self {
        let mut out = Self { left_px, right_px, categories: Vec::new(), index: HashMap::new() };
        for c in categories {
            let key = c.key();
            if !out.index.contains_key(&key) {
                out.index.insert(key, out.categories.len());
                out.categories.push(c);
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[CategoryValue] {
        &self.categories
    }

    /// Position of the `i`-th category. A lone category sits mid-range.
    pub fn position(&self, i: usize) -> f32 {
        if self.categories.len() < 2 {
            return (self.left_px + self.right_px) * 0.5;
        }
        let step = (self.right_px - self.left_px) / (self.categories.len() - 1) as f32;
        self.left_px + step * i as f32
    }

    pub fn to_px(&self, c: &CategoryValue) -> Option<f32> {
        self.index.get(&c.key()).map(|&i| self.position(i))
    }
}

/// Horizontal mapping for categories.
#[derive(Clone, Debug, PartialEq)]
pub enum XScale {
    Time(TimeScale),
    Point(PointScale),
}

impl XScale {
    /// Continuous time scale for date categories on a continuous axis, points otherwise.
    pub fn build(points: &[DataPoint], axis_type: XAxisType, left_px: f32, right_px: f32) -> Self {
        let dates: Option<Vec<NaiveDateTime>> = points.iter().map(|p| p.category.as_date()).collect();
        let is_date = points.first().is_some_and(|p| p.category.is_date());
        match dates {
            Some(dates) if is_date && axis_type == XAxisType::Continuous => {
                let start = dates.iter().min().copied().unwrap_or_default();
                let end = dates.iter().max().copied().unwrap_or_default();
                Self::Time(TimeScale::new(left_px, right_px, start, end))
            }
            _ => Self::Point(PointScale::new(left_px, right_px, points.iter().map(|p| p.category.clone()))),
        }
    }

    pub fn to_px(&self, c: &CategoryValue) -> Option<f32> {
        match (self, c) {
            (Self::Time(s), CategoryValue::Date(d)) => Some(s.to_px(*d)),
            (Self::Time(_), _) => None,
            (Self::Point(s), _) => s.to_px(c),
        }
    }

    pub fn range(&self) -> (f32, f32) {
        match self {
            Self::Time(s) => (s.left_px, s.right_px),
            Self::Point(s) => (s.left_px, s.right_px),
        }
    }
}
