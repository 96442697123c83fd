// File: crates/candlestick-render-skia/tests/rgba.rs
// Purpose: Validate RGBA rendering buffer shape and the pixel under a candle body.

use candlestick_core::{
    render, transform, ApproxTextMeasurer, CategoryColumn, DataTable, DefaultPalette, MeasureColumn, MeasureRole,
    Settings, Viewport,
};
use candlestick_render_skia::{render_to_rgba8, RenderOptions};

#[test]
fn render_rgba8_buffer() {
    let table = DataTable::new(CategoryColumn::new("Name", vec!["a".into(), "b".into()]))
        .with_measure(MeasureColumn::new("Open", MeasureRole::Open, vec![Some(10.0), Some(14.0)]))
        .with_measure(MeasureColumn::new("Close", MeasureRole::Close, vec![Some(14.0), Some(10.0)]))
        .with_measure(MeasureColumn::new("High", MeasureRole::High, vec![Some(15.0), Some(15.0)]))
        .with_measure(MeasureColumn::new("Low", MeasureRole::Low, vec![Some(9.0), Some(9.0)]));
    let model = transform(Some(&table), Settings::default(), &mut DefaultPalette::new());
    let scene = render(&model, Viewport::new(300.0, 200.0), &ApproxTextMeasurer::default());

    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
    let (px, w, h, stride) = render_to_rgba8(&scene, &opts).expect("rgba render");
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // Background is opaque white.
    assert_eq!(&px[0..4], &[255, 255, 255, 255]);

    let body = scene.candles[0].body.expect("body");
    let (cx, cy) = ((body.left + body.width / 2.0) as usize, (body.top + body.height / 2.0) as usize);
    let i = cy * stride + cx * 4;
    let c = scene.candles[0].color;
    assert_eq!(&px[i..i + 3], &[c.r, c.g, c.b]);
}
