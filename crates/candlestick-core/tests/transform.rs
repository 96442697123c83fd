// File: crates/candlestick-core/tests/transform.rs
// Purpose: Host rows -> chart model: point creation, tooltips, trend series and the value domain.

use candlestick_core::{
    transform, CategoryColumn, CategoryValue, Color, DataTable, DefaultPalette, MeasureColumn, MeasureRole,
    PropertyBag, SelectionId, Settings,
};
use serde_json::json;

fn texts(names: &[&str]) -> Vec<CategoryValue> {
    names.iter().map(|n| CategoryValue::from(*n)).collect()
}

fn col(name: &str, role: MeasureRole, values: &[Option<f64>]) -> MeasureColumn {
    MeasureColumn::new(name, role, values.to_vec())
}

fn run(table: &DataTable) -> candlestick_core::ChartModel {
    transform(Some(table), Settings::default(), &mut DefaultPalette::new())
}

#[test]
fn points_only_for_categories_with_prices() {
    let table = DataTable::new(CategoryColumn::new("Day", texts(&["A", "B", "C", "D"])))
        .with_measure(col("Open", MeasureRole::Open, &[Some(1.0), None, Some(2.0), None]))
        .with_measure(col("Close", MeasureRole::Close, &[Some(2.0), None, None, None]))
        .with_measure(col("Trend", MeasureRole::Trend, &[Some(5.0), Some(6.0), Some(7.0), Some(8.0)]));

    let model = run(&table);
    let cats: Vec<String> = model.data_points.iter().map(|p| p.category.readable()).collect();
    assert_eq!(cats, vec!["A", "C"]);
    assert_eq!(model.data_points[1].open, Some(2.0));
    assert_eq!(model.data_points[1].close, None);
    // Row index drives selection identity.
    assert_eq!(model.data_points[1].selection_id, SelectionId::for_category(2));
}

#[test]
fn close_only_rows_still_make_points() {
    let table = DataTable::new(CategoryColumn::new("Day", texts(&["A", "B", "C"])))
        .with_measure(col("Close", MeasureRole::Close, &[Some(10.0), Some(20.0), Some(15.0)]));

    let model = run(&table);
    assert_eq!(model.data_points.len(), 3);
    assert!(model.data_points.iter().all(|p| p.low.is_none() && p.high.is_none()));
    assert_eq!((model.domain.start, model.domain.end), (10.0, 20.0));
}

#[test]
fn tooltips_start_with_category_then_follow_columns() {
    let table = DataTable::new(CategoryColumn::new("Day", texts(&["Mon"])))
        .with_measure(col("High", MeasureRole::High, &[Some(15.0)]).with_format("#,0.00"))
        .with_measure(col("Low", MeasureRole::Low, &[Some(8.0)]).with_format("#,0.00"))
        .with_measure(col("Open", MeasureRole::Open, &[Some(1234.5)]).with_format("#,0.00"));

    let model = run(&table);
    let tips = &model.data_points[0].tooltips;
    let names: Vec<&str> = tips.iter().map(|t| t.display_name.as_str()).collect();
    assert_eq!(names, vec!["Day", "High", "Low", "Open"]);
    assert_eq!(tips[0].value, "Mon");
    assert_eq!(tips[0].color, Some(Color::rgb(0x33, 0x33, 0x33)));
    assert_eq!(tips[3].value, "1,234.50");
    assert_eq!(model.data_points[0].format.as_deref(), Some("#,0.00"));
}

#[test]
fn unnamed_category_column_reads_axis() {
    let mut category = CategoryColumn::new("", texts(&["A"]));
    category.display_name = None;
    let table = DataTable::new(category).with_measure(col("Open", MeasureRole::Open, &[Some(3.0)]));
    let model = run(&table);
    assert_eq!(model.data_points[0].tooltips[0].display_name, "Axis");
}

#[test]
fn table_without_category_has_one_point() {
    let mut table = DataTable::default();
    table.push_measure(col("Open", MeasureRole::Open, &[Some(3.0)]));
    table.push_measure(col("Close", MeasureRole::Close, &[Some(4.0)]));
    let model = run(&table);
    assert_eq!(model.data_points.len(), 1);
    assert_eq!(model.data_points[0].category, CategoryValue::Text(String::new()));
}

#[test]
fn short_columns_read_as_null() {
    let table = DataTable::new(CategoryColumn::new("Day", texts(&["A", "B", "C"])))
        .with_measure(col("Open", MeasureRole::Open, &[Some(1.0)]));
    assert_eq!(run(&table).data_points.len(), 1);
}

#[test]
fn trends_accumulate_in_order_and_skip_zero() {
    let table = DataTable::new(CategoryColumn::new("Day", texts(&["A", "B", "C", "D"])))
        .with_measure(col("Open", MeasureRole::Open, &[Some(10.0), Some(11.0), Some(12.0), Some(13.0)]))
        .with_measure(col("Upper", MeasureRole::Trend, &[Some(100.0), Some(0.0), None, Some(103.0)]))
        .with_measure(col("Lower", MeasureRole::Trend, &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)]));

    let model = run(&table);
    let names: Vec<&str> = model.trends.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Upper", "Lower"]);

    let upper = model.trends.get("Upper").expect("upper series");
    let xs: Vec<String> = upper.points.iter().map(|p| p.x.readable()).collect();
    assert_eq!(xs, vec!["A", "D"]);
    assert_eq!(upper.selection_id, SelectionId::for_measure("Upper"));
    assert_ne!(upper.color, model.trends.get("Lower").expect("lower series").color);

    // Trend values never widen the domain.
    assert_eq!((model.domain.start, model.domain.end), (10.0, 13.0));
}

#[test]
fn series_color_override_comes_from_column_objects() {
    let mut objects = PropertyBag::new();
    objects.set("trendLines", "fill", json!({ "solid": { "color": "#123456" } }));
    let table = DataTable::new(CategoryColumn::new("Day", texts(&["A"])))
        .with_measure(col("Open", MeasureRole::Open, &[Some(1.0)]))
        .with_measure(col("Avg", MeasureRole::Trend, &[Some(2.0)]).with_objects(objects));

    let model = run(&table);
    assert_eq!(model.trends.get("Avg").map(|s| s.color), Some(Color::rgb(0x12, 0x34, 0x56)));
}

#[test]
fn forced_start_above_data_raises_end() {
    let mut bag = PropertyBag::new();
    bag.set("yAxis", "start", json!(100.0));
    let table = DataTable::new(CategoryColumn::new("Day", texts(&["A", "B"])))
        .with_measure(col("Close", MeasureRole::Close, &[Some(10.0), Some(20.0)]));

    let model = transform(Some(&table), Settings::resolve(Some(&bag)), &mut DefaultPalette::new());
    assert_eq!(model.domain.start, 100.0);
    assert_eq!(model.domain.end, 100.0);
    assert!(model.domain.start_forced);
    assert!(!model.domain.end_forced);
}

#[test]
fn forced_bounds_ignore_data() {
    let mut bag = PropertyBag::new();
    bag.set("yAxis", "start", json!(0)).set("yAxis", "end", json!(50));
    let table = DataTable::new(CategoryColumn::new("Day", texts(&["A"])))
        .with_measure(col("High", MeasureRole::High, &[Some(80.0)]));
    let model = transform(Some(&table), Settings::resolve(Some(&bag)), &mut DefaultPalette::new());
    assert_eq!((model.domain.start, model.domain.end), (0.0, 50.0));
}

#[test]
fn no_data_gives_zero_domain() {
    let model = transform(None, Settings::default(), &mut DefaultPalette::new());
    assert!(model.data_points.is_empty());
    assert!(model.trends.is_empty());
    assert_eq!((model.domain.start, model.domain.end), (0.0, 0.0));

    let empty = DataTable::new(CategoryColumn::new("Day", texts(&["A"])));
    assert!(run(&empty).data_points.is_empty());
}

#[test]
fn role_names_parse() {
    assert_eq!("trends".parse::<MeasureRole>().ok(), Some(MeasureRole::Trend));
    assert_eq!("open".parse::<MeasureRole>().ok(), Some(MeasureRole::Open));
    assert!("volume".parse::<MeasureRole>().is_err());
}
