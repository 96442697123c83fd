// File: crates/candlestick-core/src/settings.rs
// Summary: Typed chart settings; host overrides merged field-by-field over defaults.

use serde::Serialize;

use crate::property::PropertyBag;
use crate::types::Color;

/// Trend line interpolation modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolation {
    #[default]
    Linear,
    /// Horizontal steps switching at the midpoint between samples.
    Step,
    StepBefore,
    StepAfter,
    Basis,
    Cardinal,
    Monotone,
}

impl Interpolation {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Self::Linear),
            "step" => Some(Self::Step),
            "step-before" => Some(Self::StepBefore),
            "step-after" => Some(Self::StepAfter),
            "basis" => Some(Self::Basis),
            "cardinal" => Some(Self::Cardinal),
            "monotone" => Some(Self::Monotone),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Step => "step",
            Self::StepBefore => "step-before",
            Self::StepAfter => "step-after",
            Self::Basis => "basis",
            Self::Cardinal => "cardinal",
            Self::Monotone => "monotone",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum XAxisType {
    #[default]
    Continuous,
    Categorical,
}

impl XAxisType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "continuous" => Some(Self::Continuous),
            "categorical" => Some(Self::Categorical),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::Categorical => "categorical",
        }
    }
}

/// Color-vision simulation mode requested by the host's accessibility pane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum VisionMode {
    #[default]
    Normal,
    Protanopia,
    Protanomaly,
    Deuteranopia,
    Deuteranomaly,
    Tritanopia,
    Tritanomaly,
    Achromatopsia,
    Achromatomaly,
}

impl VisionMode {
    const ALL: [VisionMode; 9] = [
        Self::Normal,
        Self::Protanopia,
        Self::Protanomaly,
        Self::Deuteranopia,
        Self::Deuteranomaly,
        Self::Tritanopia,
        Self::Tritanomaly,
        Self::Achromatopsia,
        Self::Achromatomaly,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Protanopia => "Protanopia",
            Self::Protanomaly => "Protanomaly",
            Self::Deuteranopia => "Deuteranopia",
            Self::Deuteranomaly => "Deuteranomaly",
            Self::Tritanopia => "Tritanopia",
            Self::Tritanomaly => "Tritanomaly",
            Self::Achromatopsia => "Achromatopsia",
            Self::Achromatomaly => "Achromatomaly",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPointSettings {
    pub high_low_caps: bool,
    pub show_shadows_color: bool,
    pub shadows_fill: Color,
    pub bullish_fill: Color,
    pub bearish_fill: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrendLineSettings {
    /// Stroke width in pixels, never below 1.
    pub weight: f32,
    pub interpolation: Interpolation,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct XAxisSettings {
    pub show: bool,
    pub gridline: bool,
    #[serde(rename = "type")]
    pub axis_type: XAxisType,
    pub fill: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct YAxisSettings {
    pub show: bool,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub fill: Color,
    /// Display unit divisor; 0 picks one from the data.
    pub unit: f64,
    /// Decimal places in [0, 5]; unset keeps the format hint's own precision.
    pub precision: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorBlindSettings {
    pub vision: VisionMode,
}

/// Immutable per-render settings snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub data_point: DataPointSettings,
    pub trend_lines: TrendLineSettings,
    pub x_axis: XAxisSettings,
    pub y_axis: YAxisSettings,
    pub color_blind: ColorBlindSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let gray = Color::rgb(0x77, 0x77, 0x77);
        Self {
            data_point: DataPointSettings {
                high_low_caps: false,
                show_shadows_color: true,
                shadows_fill: gray,
                bullish_fill: Color::rgb(0x39, 0x95, 0x99),
                bearish_fill: Color::rgb(0xFD, 0x62, 0x5E),
            },
            trend_lines: TrendLineSettings { weight: 1.0, interpolation: Interpolation::Linear },
            x_axis: XAxisSettings {
                show: true,
                gridline: true,
                axis_type: XAxisType::Continuous,
                fill: gray,
            },
            y_axis: YAxisSettings {
                show: true,
                start: None,
                end: None,
                fill: gray,
                unit: 0.0,
                precision: None,
            },
            color_blind: ColorBlindSettings { vision: VisionMode::Normal },
        }
    }
}

impl Settings {
    /// Merge host overrides over the defaults. Missing, mistyped or
    /// unrecognized values keep the default; numeric values are clamped.
    pub fn resolve(bag: Option<&PropertyBag>) -> Self {
        let mut s = Self::default();
        let Some(bag) = bag else { return s };

        let dp = &mut s.data_point;
        dp.high_low_caps = bag.get_bool("dataPoint", "highLowCaps").unwrap_or(dp.high_low_caps);
        dp.show_shadows_color =
            bag.get_bool("dataPoint", "showShadowsColor").unwrap_or(dp.show_shadows_color);
        dp.shadows_fill = bag.get_fill("dataPoint", "shadowsFill").unwrap_or(dp.shadows_fill);
        dp.bullish_fill = bag.get_fill("dataPoint", "bullishFill").unwrap_or(dp.bullish_fill);
        dp.bearish_fill = bag.get_fill("dataPoint", "bearishFill").unwrap_or(dp.bearish_fill);

        let tl = &mut s.trend_lines;
        if let Some(w) = bag.get_f64("trendLines", "weight") {
            tl.weight = w as f32;
        }
        tl.interpolation = resolve_enum(bag, "trendLines", "interpolation", Interpolation::from_name)
            .unwrap_or(tl.interpolation);

        let xa = &mut s.x_axis;
        xa.show = bag.get_bool("xAxis", "show").unwrap_or(xa.show);
        xa.gridline = bag.get_bool("xAxis", "gridline").unwrap_or(xa.gridline);
        xa.axis_type = resolve_enum(bag, "xAxis", "type", XAxisType::from_name).unwrap_or(xa.axis_type);
        xa.fill = bag.get_fill("xAxis", "fill").unwrap_or(xa.fill);

        let ya = &mut s.y_axis;
        ya.show = bag.get_bool("yAxis", "show").unwrap_or(ya.show);
        ya.start = bag.get_f64("yAxis", "start").or(ya.start);
        ya.end = bag.get_f64("yAxis", "end").or(ya.end);
        ya.fill = bag.get_fill("yAxis", "fill").unwrap_or(ya.fill);
        ya.unit = bag.get_f64("yAxis", "unit").unwrap_or(ya.unit);
        let precision = bag.get_f64("yAxis", "precision");

        s.color_blind.vision = resolve_enum(bag, "colorBlind", "vision", VisionMode::from_name)
            .unwrap_or(s.color_blind.vision);

        s.clamp(precision);
        s
    }

    fn clamp(&mut self, precision: Option<f64>) {
        if self.trend_lines.weight < 1.0 {
            self.trend_lines.weight = 1.0;
        }
        if let Some(p) = precision {
            self.y_axis.precision = Some(p.clamp(0.0, 5.0).round() as u8);
        }
        if self.y_axis.unit < 0.0 {
            self.y_axis.unit = 0.0;
        }
    }
}

fn resolve_enum<T>(
    bag: &PropertyBag,
    object: &str,
    property: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = bag.get_str(object, property)?;
    let parsed = parse(raw);
    if parsed.is_none() {
        log::debug!("ignoring unrecognized {object}.{property} value `{raw}`");
    }
    parsed
}
