// File: crates/candlestick-render-skia/tests/smoke.rs
// Purpose: End-to-end render smoke test writing a PNG through the skia backend.

use candlestick_core::{
    render, transform, CategoryColumn, CategoryValue, DataTable, DefaultPalette, MeasureColumn, MeasureRole,
    Settings, Viewport,
};
use candlestick_render_skia::{render_to_png, render_to_png_bytes_with, RenderOptions, SkiaTextMeasurer};
use chrono::NaiveDate;

fn table() -> DataTable {
    let days: Vec<CategoryValue> = (1..=5)
        .map(|d| {
            let dt = NaiveDate::from_ymd_opt(2024, 3, d).and_then(|x| x.and_hms_opt(0, 0, 0)).expect("date");
            CategoryValue::from(dt)
        })
        .collect();
    DataTable::new(CategoryColumn::new("Date", days))
        .with_measure(MeasureColumn::new("Open", MeasureRole::Open, vec![Some(10.0), Some(12.0), Some(11.0), Some(13.0), Some(12.5)]))
        .with_measure(MeasureColumn::new("Close", MeasureRole::Close, vec![Some(12.0), Some(11.0), Some(13.0), Some(12.5), Some(14.0)]))
        .with_measure(MeasureColumn::new("High", MeasureRole::High, vec![Some(13.0), Some(12.5), Some(14.0), Some(13.5), Some(15.0)]))
        .with_measure(MeasureColumn::new("Low", MeasureRole::Low, vec![Some(9.0), Some(10.5), Some(10.0), Some(12.0), Some(12.0)]))
        .with_measure(MeasureColumn::new("Avg", MeasureRole::Trend, vec![Some(11.0), Some(11.5), Some(12.0), Some(12.5), Some(13.0)]))
}

#[test]
fn render_smoke_png() {
    let measurer = SkiaTextMeasurer::new();
    let model = transform(Some(&table()), Settings::default(), &mut DefaultPalette::new());
    let scene = render(&model, Viewport::new(480.0, 320.0), &measurer);
    assert_eq!(scene.candles.len(), 5);

    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/test_out/candles.png");
    render_to_png(&scene, &opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let bytes = render_to_png_bytes_with(&scene, &opts, &measurer).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    // The surface spans the full scrollable width, not just the viewport.
    let img = image::load_from_memory(&bytes).expect("decodes");
    assert!(img.width() as f32 >= scene.width.floor());
    assert_eq!(img.height(), scene.height.max(scene.container.height).ceil() as u32);
}

#[test]
fn empty_scene_still_renders() {
    let model = transform(None, Settings::default(), &mut DefaultPalette::new());
    let scene = render(&model, Viewport::new(200.0, 100.0), &SkiaTextMeasurer::new());
    let bytes = candlestick_render_skia::render_to_png_bytes(&scene, &RenderOptions::default()).expect("render");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
}
