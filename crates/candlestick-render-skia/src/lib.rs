// File: crates/candlestick-render-skia/src/lib.rs
// Summary: Skia backend for candlestick scenes: font-accurate text measurement and CPU raster output.

mod painter;
mod text;

pub use painter::{render_to_png, render_to_png_bytes, render_to_png_bytes_with, render_to_rgba8, RenderOptions};
pub use text::SkiaTextMeasurer;
