// File: crates/candlestick-core/tests/chart.rs
// Purpose: Chart component: update cycle, settings enumeration and click selection.

use candlestick_core::geometry::Point;
use candlestick_core::selection::DIMMED_OPACITY;
use candlestick_core::{
    CandlestickChart, CategoryColumn, CategoryValue, DataTable, MeasureColumn, MeasureRole, PropertyBag,
    SelectionId, Viewport,
};
use chrono::NaiveDate;
use serde_json::json;

const VIEWPORT: Viewport = Viewport::new(500.0, 300.0);

fn dated_table() -> DataTable {
    let days: Vec<CategoryValue> = (1..=3)
        .map(|d| {
            let dt = NaiveDate::from_ymd_opt(2024, 5, d).and_then(|x| x.and_hms_opt(0, 0, 0)).expect("date");
            CategoryValue::from(dt)
        })
        .collect();
    DataTable::new(CategoryColumn::new("Date", days))
        .with_measure(MeasureColumn::new("Open", MeasureRole::Open, vec![Some(10.0), Some(12.0), Some(11.0)]))
        .with_measure(MeasureColumn::new("Close", MeasureRole::Close, vec![Some(12.0), Some(11.0), Some(13.0)]))
        .with_measure(MeasureColumn::new("High", MeasureRole::High, vec![Some(13.0), Some(12.5), Some(14.0)]))
        .with_measure(MeasureColumn::new("Low", MeasureRole::Low, vec![Some(9.0), Some(10.5), Some(10.0)]))
        .with_measure(
            MeasureColumn::new("SMA", MeasureRole::Trend, vec![Some(11.0), Some(11.5), Some(12.0)])
                .with_query_name("Sales.SMA"),
        )
}

fn text_table() -> DataTable {
    DataTable::new(CategoryColumn::new("Name", vec!["a".into(), "b".into()]))
        .with_measure(MeasureColumn::new("Open", MeasureRole::Open, vec![Some(1.0), Some(2.0)]))
}

#[test]
fn update_builds_model_and_scene() {
    let mut chart: CandlestickChart = CandlestickChart::default();
    let scene = chart.update(Some(&dated_table()), None, VIEWPORT);
    assert_eq!(scene.candles.len(), 3);
    assert!(scene.x_axis.as_ref().is_some_and(|x| !x.labels.is_empty()));
    assert_eq!(chart.model().data_points.len(), 3);
    assert!(chart.scene().is_some());

    // A fresh update replaces everything.
    let scene = chart.update(None, None, VIEWPORT);
    assert!(scene.is_empty());
    assert!(chart.model().data_points.is_empty());
}

#[test]
fn enumerate_x_axis_reports_type_only_for_dates() {
    let mut chart: CandlestickChart = CandlestickChart::default();
    chart.update(Some(&dated_table()), None, VIEWPORT);
    let x = chart.enumerate_objects("xAxis");
    assert_eq!(x.len(), 2);
    assert_eq!(x[0].properties["show"], json!(true));
    assert_eq!(x[0].properties["fill"], json!({ "solid": { "color": "#777777" } }));
    assert_eq!(x[1].properties["type"], json!("continuous"));
    assert!(x.iter().all(|o| o.selector.is_none() && o.object_name == "xAxis"));

    chart.update(Some(&text_table()), None, VIEWPORT);
    assert_eq!(chart.enumerate_objects("xAxis").len(), 1);
}

#[test]
fn enumerate_y_axis_keeps_unset_values_null() {
    let mut bag = PropertyBag::new();
    bag.set("yAxis", "start", json!(5)).set("yAxis", "precision", json!(7));
    let mut chart: CandlestickChart = CandlestickChart::default();
    chart.update(Some(&dated_table()), Some(&bag), VIEWPORT);

    let y = chart.enumerate_objects("yAxis");
    assert_eq!(y.len(), 1);
    let p = &y[0].properties;
    assert_eq!(p["start"], json!(5.0));
    assert_eq!(p["end"], json!(null));
    assert_eq!(p["precision"], json!(5));
    assert_eq!(p["unit"], json!(0.0));
}

#[test]
fn enumerate_data_point_hides_shadow_fill_when_off() {
    let mut chart: CandlestickChart = CandlestickChart::default();
    chart.update(Some(&dated_table()), None, VIEWPORT);
    let dp = chart.enumerate_objects("dataPoint");
    assert_eq!(dp.len(), 2);
    assert_eq!(dp[0].properties["bearishFill"], json!({ "solid": { "color": "#fd625e" } }));
    assert!(dp[1].properties.contains_key("shadowsFill"));

    let mut bag = PropertyBag::new();
    bag.set("dataPoint", "showShadowsColor", json!(false));
    chart.update(Some(&dated_table()), Some(&bag), VIEWPORT);
    assert_eq!(chart.enumerate_objects("dataPoint").len(), 1);
}

#[test]
fn enumerate_trend_lines_lists_each_series() {
    let mut chart: CandlestickChart = CandlestickChart::default();
    chart.update(Some(&dated_table()), None, VIEWPORT);
    let tl = chart.enumerate_objects("trendLines");
    assert_eq!(tl.len(), 2);
    assert_eq!(tl[0].properties["interpolation"], json!("linear"));
    assert_eq!(tl[0].properties["weight"], json!(1.0));

    let series = &tl[1];
    assert_eq!(series.display_name.as_deref(), Some("SMA"));
    assert_eq!(series.selector, Some(json!({ "metadata": "Sales.SMA" })));
    let color = chart.model().trends.get("SMA").expect("series").color;
    assert_eq!(series.properties["fill"], json!({ "solid": { "color": color.to_hex() } }));
}

#[test]
fn enumerate_color_blind_and_unknown() {
    let mut chart: CandlestickChart = CandlestickChart::default();
    chart.update(Some(&dated_table()), None, VIEWPORT);
    assert_eq!(chart.enumerate_objects("colorBlind")[0].properties["vision"], json!("Normal"));
    assert!(chart.enumerate_objects("legend").is_empty());
}

#[test]
fn selection_dims_other_candles_and_toggles_off() {
    let mut chart: CandlestickChart = CandlestickChart::default();
    chart.update(Some(&dated_table()), None, VIEWPORT);

    let id = SelectionId::for_category(1);
    assert_eq!(chart.select(&id), &[id.clone()]);
    let opacities: Vec<f32> =
        chart.scene().expect("scene").candles.iter().map(|c| c.opacity).collect();
    assert_eq!(opacities, vec![DIMMED_OPACITY, 1.0, DIMMED_OPACITY]);

    assert!(chart.select(&id).is_empty());
    assert!(chart.scene().expect("scene").candles.iter().all(|c| c.opacity == 1.0));
}

#[test]
fn click_selects_the_candle_under_the_pointer() {
    let mut chart: CandlestickChart = CandlestickChart::default();
    chart.update(Some(&dated_table()), None, VIEWPORT);
    let target = {
        let c = &chart.scene().expect("scene").candles[2];
        let body = c.body.expect("body");
        Point::new(c.x, body.top + body.height * 0.5)
    };

    assert_eq!(chart.click(target), Some(SelectionId::for_category(2)));
    assert_eq!(chart.selection().ids(), &[SelectionId::for_category(2)]);
    assert_eq!(chart.click(Point::new(-50.0, -50.0)), None);

    // New data resets the selection.
    chart.update(Some(&dated_table()), None, VIEWPORT);
    assert!(chart.selection().is_empty());
}

#[test]
fn object_instances_serialize_for_the_host() {
    let mut chart: CandlestickChart = CandlestickChart::default();
    chart.update(Some(&dated_table()), None, VIEWPORT);
    let v = serde_json::to_value(&chart.enumerate_objects("trendLines")[1]).expect("serializable");
    assert_eq!(v["objectName"], json!("trendLines"));
    assert_eq!(v["displayName"], json!("SMA"));
    assert_eq!(v["selector"]["metadata"], json!("Sales.SMA"));
}
