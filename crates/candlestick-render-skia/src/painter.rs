// File: crates/candlestick-render-skia/src/painter.rs
// Summary: Headless rasterization of a candlestick scene using Skia CPU raster surfaces.

use anyhow::{Context, Result};
use candlestick_core::scene::{DrawCommand, PathCommand, Scene};
use candlestick_core::Color;
use skia_safe as skia;

use crate::text::SkiaTextMeasurer;

pub struct RenderOptions {
    pub background: skia::Color,
    /// Skip text; keeps pixel tests independent of installed fonts.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: skia::Color::WHITE,
            draw_labels: true,
        }
    }
}

pub(crate) fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

/// Pixel size of the raster: the whole scrollable surface, never smaller than the visible container.
fn surface_size(scene: &Scene) -> (i32, i32) {
    let w = scene.width.max(scene.container.width).ceil().max(1.0);
    let h = scene.height.max(scene.container.height).ceil().max(1.0);
    (w as i32, h as i32)
}

fn paint_scene(scene: &Scene, opts: &RenderOptions, text: &SkiaTextMeasurer) -> Result<skia::Surface> {
    let (w, h) = surface_size(scene);
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| anyhow::anyhow!("failed to create {w}x{h} raster surface"))?;
    let canvas = surface.canvas();
    canvas.clear(opts.background);

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);

    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);

    let commands = scene.commands();
    for cmd in &commands {
        match cmd {
            DrawCommand::Line(l) => {
                stroke.set_color(to_skia(l.color));
                stroke.set_alpha_f(l.opacity);
                stroke.set_stroke_width(l.width);
                canvas.draw_line((l.from.x, l.from.y), (l.to.x, l.to.y), &stroke);
            }
            DrawCommand::Rect(r) => {
                let rect = skia::Rect::from_xywh(r.rect.left, r.rect.top, r.rect.width, r.rect.height);
                if let Some(c) = r.fill {
                    fill.set_color(to_skia(c));
                    fill.set_alpha_f(r.opacity);
                    canvas.draw_rect(rect, &fill);
                }
                if let Some(c) = r.stroke {
                    stroke.set_color(to_skia(c));
                    stroke.set_alpha_f(r.opacity);
                    stroke.set_stroke_width(1.0);
                    canvas.draw_rect(rect, &stroke);
                }
            }
            DrawCommand::Path(p) => {
                let mut path = skia::Path::new();
                for c in &p.commands {
                    match *c {
                        PathCommand::MoveTo(a) => {
                            path.move_to((a.x, a.y));
                        }
                        PathCommand::LineTo(a) => {
                            path.line_to((a.x, a.y));
                        }
                        PathCommand::CubicTo(a, b, e) => {
                            path.cubic_to((a.x, a.y), (b.x, b.y), (e.x, e.y));
                        }
                    }
                }
                stroke.set_color(to_skia(p.stroke));
                stroke.set_stroke_width(p.width);
                canvas.draw_path(&path, &stroke);
            }
            DrawCommand::Text(t) if opts.draw_labels => text.draw(canvas, t, 1.0),
            DrawCommand::Text(_) => {}
        }
    }
    log::debug!("painted {} commands onto {w}x{h}", commands.len());
    Ok(surface)
}

/// Rasterize `scene` and return PNG bytes.
pub fn render_to_png_bytes(scene: &Scene, opts: &RenderOptions) -> Result<Vec<u8>> {
    render_to_png_bytes_with(scene, opts, &SkiaTextMeasurer::new())
}

/// Same as [`render_to_png_bytes`] reusing an existing font collection.
pub fn render_to_png_bytes_with(scene: &Scene, opts: &RenderOptions, text: &SkiaTextMeasurer) -> Result<Vec<u8>> {
    let mut surface = paint_scene(scene, opts, text)?;
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Rasterize `scene` into a PNG file, creating parent directories as needed.
pub fn render_to_png(scene: &Scene, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
    let path = output_png_path.as_ref();
    let bytes = render_to_png_bytes(scene, opts)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Rasterize into an unpremultiplied RGBA8 buffer: `(pixels, width, height, row_bytes)`.
pub fn render_to_rgba8(scene: &Scene, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
    let mut surface = paint_scene(scene, opts, &SkiaTextMeasurer::new())?;
    let (w, h) = (surface.width(), surface.height());
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let row_bytes = w as usize * 4;
    let mut pixels = vec![0u8; row_bytes * h as usize];
    if !surface.canvas().read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        anyhow::bail!("reading back {w}x{h} pixels failed");
    }
    Ok((pixels, w, h, row_bytes))
}
