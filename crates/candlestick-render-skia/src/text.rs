// File: crates/candlestick-render-skia/src/text.rs
// Summary: Skia textlayout-backed text measurement and label painting.

use candlestick_core::scene::{TextAnchor, TextMark};
use candlestick_core::text::{TextExtent, TextMeasurer};
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};
use skia_safe as skia;

use crate::painter::to_skia;

const FAMILIES: [&str; 6] = ["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"];

/// Shapes text with the system font manager; measurements match what [`crate::render_to_png_bytes`] draws.
pub struct SkiaTextMeasurer {
    fonts: FontCollection,
}

impl Default for SkiaTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkiaTextMeasurer {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&FAMILIES);

        let mut builder = ParagraphBuilder::new(&ParagraphStyle::new(), &self.fonts);
        builder.push_style(&ts);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Paint a label: translate to its anchor point, rotate, then lay each
    /// line's baseline at `dy + i × line_height`.
    pub fn draw(&self, canvas: &skia::Canvas, mark: &TextMark, opacity: f32) {
        let mut color = to_skia(mark.color);
        color = color.with_a((color.a() as f32 * opacity.clamp(0.0, 1.0)).round() as u8);

        canvas.save();
        canvas.translate((mark.x, mark.y));
        if mark.rotation != 0.0 {
            canvas.rotate(mark.rotation, None);
        }
        for (i, line) in mark.lines.iter().enumerate() {
            let mut p = self.layout(line, mark.font_size, color);
            let w = p.longest_line();
            let left = match mark.anchor {
                TextAnchor::Start => mark.dx,
                TextAnchor::Middle => mark.dx - w * 0.5,
                TextAnchor::End => mark.dx - w,
            };
            let baseline = mark.dy + i as f32 * mark.line_height;
            // Paragraphs paint from their top-left corner.
            p.paint(canvas, (left, baseline - p.alphabetic_baseline()));
        }
        canvas.restore();
    }
}

impl TextMeasurer for SkiaTextMeasurer {
    fn measure(&self, text: &str, font_size: f32) -> TextExtent {
        let p = self.layout(text, font_size, skia::Color::TRANSPARENT);
        TextExtent { width: p.longest_line(), height: p.height() }
    }
}
