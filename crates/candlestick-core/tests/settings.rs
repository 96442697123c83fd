// File: crates/candlestick-core/tests/settings.rs
// Purpose: Settings resolution: defaults, typed overrides, clamps and malformed input.

use candlestick_core::{ChartError, Color, Interpolation, PropertyBag, Settings, VisionMode, XAxisType};
use serde_json::json;

#[test]
fn defaults_without_bag() {
    let s = Settings::resolve(None);
    assert_eq!(s, Settings::default());
    assert!(!s.data_point.high_low_caps);
    assert!(s.data_point.show_shadows_color);
    assert_eq!(s.data_point.shadows_fill, Color::rgb(0x77, 0x77, 0x77));
    assert_eq!(s.data_point.bullish_fill, Color::rgb(0x39, 0x95, 0x99));
    assert_eq!(s.data_point.bearish_fill, Color::rgb(0xFD, 0x62, 0x5E));
    assert_eq!(s.trend_lines.weight, 1.0);
    assert_eq!(s.trend_lines.interpolation, Interpolation::Linear);
    assert!(s.x_axis.show && s.x_axis.gridline);
    assert_eq!(s.x_axis.axis_type, XAxisType::Continuous);
    assert_eq!((s.y_axis.start, s.y_axis.end, s.y_axis.precision), (None, None, None));
    assert_eq!(s.y_axis.unit, 0.0);
    assert_eq!(s.color_blind.vision, VisionMode::Normal);
}

#[test]
fn overrides_apply_field_by_field() {
    let bag = PropertyBag::from_json_str(
        r##"{
            "dataPoint": { "highLowCaps": true, "bullishFill": { "solid": { "color": "#00ff00" } } },
            "trendLines": { "interpolation": "step-after", "weight": 3 },
            "xAxis": { "type": "categorical", "gridline": false },
            "yAxis": { "start": 5, "unit": 1000 },
            "colorBlind": { "vision": "deuteranopia" }
        }"##,
    )
    .expect("valid bag");
    let s = Settings::resolve(Some(&bag));

    assert!(s.data_point.high_low_caps);
    assert_eq!(s.data_point.bullish_fill, Color::rgb(0, 255, 0));
    // Untouched siblings keep their defaults.
    assert_eq!(s.data_point.bearish_fill, Color::rgb(0xFD, 0x62, 0x5E));
    assert_eq!(s.trend_lines.interpolation, Interpolation::StepAfter);
    assert_eq!(s.trend_lines.weight, 3.0);
    assert_eq!(s.x_axis.axis_type, XAxisType::Categorical);
    assert!(!s.x_axis.gridline);
    assert!(s.x_axis.show);
    assert_eq!(s.y_axis.start, Some(5.0));
    assert_eq!(s.y_axis.end, None);
    assert_eq!(s.y_axis.unit, 1000.0);
    assert_eq!(s.color_blind.vision, VisionMode::Deuteranopia);
}

#[test]
fn numeric_clamps() {
    let mut bag = PropertyBag::new();
    bag.set("trendLines", "weight", json!(0)).set("yAxis", "precision", json!(-3));
    let s = Settings::resolve(Some(&bag));
    assert_eq!(s.trend_lines.weight, 1.0);
    assert_eq!(s.y_axis.precision, Some(0));

    bag.set("yAxis", "precision", json!(9));
    assert_eq!(Settings::resolve(Some(&bag)).y_axis.precision, Some(5));

    bag.set("yAxis", "precision", json!(2));
    assert_eq!(Settings::resolve(Some(&bag)).y_axis.precision, Some(2));
}

#[test]
fn malformed_values_keep_defaults() {
    let bag = PropertyBag::from_json_str(
        r##"{
            "dataPoint": { "highLowCaps": "yes", "bearishFill": "not a color" },
            "trendLines": { "interpolation": "zigzag", "weight": "heavy" },
            "xAxis": { "type": 3, "show": null },
            "yAxis": 42,
            "colorBlind": { "vision": "sepia" }
        }"##,
    )
    .expect("valid json object");
    assert_eq!(Settings::resolve(Some(&bag)), Settings::default());
}

#[test]
fn bare_color_strings_are_accepted() {
    let mut bag = PropertyBag::new();
    bag.set("xAxis", "fill", json!("#abc"));
    assert_eq!(Settings::resolve(Some(&bag)).x_axis.fill, Color::rgb(0xAA, 0xBB, 0xCC));
}

#[test]
fn bag_must_be_a_json_object() {
    assert!(matches!(PropertyBag::from_json_str("[1, 2]"), Err(ChartError::SettingsShape("array"))));
    assert!(matches!(PropertyBag::from_json_str("{"), Err(ChartError::SettingsJson(_))));
    assert!(PropertyBag::from_json_str("null").expect("null is an empty bag").is_empty());
}

#[test]
fn enum_names_round_trip() {
    for mode in ["linear", "step", "step-before", "step-after", "basis", "cardinal", "monotone"] {
        let parsed = Interpolation::from_name(mode).expect("known interpolation");
        assert_eq!(parsed.name(), mode);
    }
    assert_eq!(VisionMode::from_name("ACHROMATOPSIA"), Some(VisionMode::Achromatopsia));
}
