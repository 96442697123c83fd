// File: crates/candlestick-core/src/data.rs
// Summary: Tabular input supplied by the host's data binding (categories + role-tagged measures).

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};

use crate::error::ChartError;
use crate::format::format_general;
use crate::property::PropertyBag;

/// One value of the category column.
#[derive(Clone, Debug, PartialEq)]
pub enum CategoryValue {
    Date(NaiveDateTime),
    Text(String),
    Number(f64),
}

/// Hashable identity of a category value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Date(i64),
    Text(String),
    Number(u64),
}

impl CategoryValue {
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn key(&self) -> CategoryKey {
        match self {
            Self::Date(d) => CategoryKey::Date(d.and_utc().timestamp_millis()),
            Self::Text(s) => CategoryKey::Text(s.clone()),
            // Normalise -0.0 so it shares a slot with 0.0.
            Self::Number(n) => CategoryKey::Number(if *n == 0.0 { 0 } else { n.to_bits() }),
        }
    }

    /// Human readable form used in tooltips.
    pub fn readable(&self) -> String {
        match self {
            Self::Date(d) if d.time().num_seconds_from_midnight() == 0 && d.nanosecond() == 0 => {
                d.format("%m/%d/%Y").to_string()
            }
            Self::Date(d) => d.format("%m/%d/%Y %H:%M:%S").to_string(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_general(*n),
        }
    }
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.readable())
    }
}

impl From<NaiveDateTime> for CategoryValue {
    fn from(d: NaiveDateTime) -> Self {
        Self::Date(d)
    }
}

impl From<&str> for CategoryValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CategoryValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CategoryValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Semantic role a measure column is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeasureRole {
    Open,
    Close,
    High,
    Low,
    Trend,
}

impl FromStr for MeasureRole {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            "trend" | "trends" => Ok(Self::Trend),
            _ => Err(ChartError::UnknownRole(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryColumn {
    pub display_name: Option<String>,
    pub values: Vec<CategoryValue>,
}

impl CategoryColumn {
    pub fn new(display_name: impl Into<String>, values: Vec<CategoryValue>) -> Self {
        Self { display_name: Some(display_name.into()), values }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeasureColumn {
    pub display_name: String,
    /// Stable query identity, used to build selection ids for trend series.
    pub query_name: String,
    /// Value formatting hint, e.g. `#,0.00`.
    pub format: Option<String>,
    pub role: MeasureRole,
    pub values: Vec<Option<f64>>,
    /// Per-column settings (trend color override lives at `trendLines.fill`).
    pub objects: Option<PropertyBag>,
}

impl MeasureColumn {
    pub fn new(display_name: impl Into<String>, role: MeasureRole, values: Vec<Option<f64>>) -> Self {
        let display_name = display_name.into();
        Self {
            query_name: display_name.clone(),
            display_name,
            format: None,
            role,
            values,
            objects: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_query_name(mut self, query_name: impl Into<String>) -> Self {
        self.query_name = query_name.into();
        self
    }

    pub fn with_objects(mut self, objects: PropertyBag) -> Self {
        self.objects = Some(objects);
        self
    }

    /// Value at `row`; rows past the end of the column read as null.
    pub fn value_at(&self, row: usize) -> Option<f64> {
        self.values.get(row).copied().flatten().filter(|v| !v.is_nan())
    }
}

/// Categorical data view handed over on each update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataTable {
    pub category: Option<CategoryColumn>,
    pub measures: Vec<MeasureColumn>,
}

impl DataTable {
    pub fn new(category: CategoryColumn) -> Self {
        Self { category: Some(category), measures: Vec::new() }
    }

    pub fn with_measure(mut self, measure: MeasureColumn) -> Self {
        self.measures.push(measure);
        self
    }

    pub fn push_measure(&mut self, measure: MeasureColumn) {
        self.measures.push(measure);
    }

    /// Category values; a table without a category column has one unnamed category.
    pub fn categories(&self) -> Cow<'_, [CategoryValue]> {
        match &self.category {
            Some(c) => Cow::Borrowed(&c.values),
            None => Cow::Owned(vec![CategoryValue::Text(String::new())]),
        }
    }

    pub fn category_display_name(&self) -> Option<&str> {
        self.category.as_ref()?.display_name.as_deref().filter(|n| !n.is_empty())
    }
}
