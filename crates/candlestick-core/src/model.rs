// File: crates/candlestick-core/src/model.rs
// Summary: Chart model built from host rows: data points, trend series, domain and settings.

use std::collections::HashMap;

use serde::Serialize;

use crate::data::{CategoryValue, MeasureRole};
use crate::domain::Domain;
use crate::selection::SelectionId;
use crate::settings::Settings;
use crate::types::Color;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipEntry {
    pub display_name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// One category's OHLC values. At least one of the four is present.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    pub category: CategoryValue,
    pub open: Option<f64>,
    pub close: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub format: Option<String>,
    pub selection_id: SelectionId,
    /// Category entry first, then one entry per value in column order.
    pub tooltips: Vec<TooltipEntry>,
}

impl DataPoint {
    /// Whether the whole low..high range lies inside `domain`.
    /// Points without a low or high never qualify.
    pub fn within(&self, domain: &Domain) -> bool {
        match (self.low, self.high) {
            (Some(l), Some(h)) => l >= domain.start && h <= domain.end,
            _ => false,
        }
    }

    /// Store a price value under its role; trend values are not part of a point.
    pub fn set_price(&mut self, role: MeasureRole, value: f64) {
        match role {
            MeasureRole::Open => self.open = Some(value),
            MeasureRole::Close => self.close = Some(value),
            MeasureRole::High => self.high = Some(value),
            MeasureRole::Low => self.low = Some(value),
            MeasureRole::Trend => {}
        }
    }

    pub fn is_bearish(&self) -> bool {
        matches!((self.open, self.close), (Some(o), Some(c)) if o > c)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrendPoint {
    pub x: CategoryValue,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrendSeries {
    pub name: String,
    pub points: Vec<TrendPoint>,
    pub color: Color,
    pub selection_id: SelectionId,
}

/// Trend series keyed by display name, iterated in first-seen order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrendSeriesMap {
    series: Vec<TrendSeries>,
    index: HashMap<String, usize>,
}

impl TrendSeriesMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&TrendSeries> {
        self.index.get(name).map(|&i| &self.series[i])
    }

    /// Append a point to the named series, creating it with `make` on first sight.
    pub fn push_point(
        &mut self,
        name: &str,
        point: TrendPoint,
        make: impl FnOnce() -> (Color, SelectionId),
    ) {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                let (color, selection_id) = make();
                self.series.push(TrendSeries {
                    name: name.to_string(),
                    points: Vec::new(),
                    color,
                    selection_id,
                });
                self.index.insert(name.to_string(), self.series.len() - 1);
                self.series.len() - 1
            }
        };
        self.series[i].points.push(point);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrendSeries> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl<'a> IntoIterator for &'a TrendSeriesMap {
    type Item = &'a TrendSeries;
    type IntoIter = std::slice::Iter<'a, TrendSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Everything one render needs, rebuilt from scratch on each update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartModel {
    pub data_points: Vec<DataPoint>,
    pub trends: TrendSeriesMap,
    pub domain: Domain,
    pub settings: Settings,
}

impl ChartModel {
    /// Whether the categories are dates, judged by the first data point.
    pub fn category_is_date(&self) -> bool {
        self.data_points.first().is_some_and(|p| p.category.is_date())
    }
}
