// File: crates/candlestick-core/src/text.rs
// Summary: Text measurement interface plus truncate/wrap helpers for axis labels.

/// Rendered size of a single line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

/// Host text-measurement service. Must answer synchronously.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size: f32) -> TextExtent;

    fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        self.measure(text, font_size).width
    }

    /// Height of one line of text at `font_size`.
    fn line_height(&self, font_size: f32) -> f32 {
        self.measure("Mg", font_size).height
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font_size: f32) -> TextExtent {
        (**self).measure(text, font_size)
    }
}

/// Font-free estimate: every glyph is `advance × font_size` wide.
/// Good enough for headless layout (SVG output, tests).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproxTextMeasurer {
    pub advance: f32,
    pub line_spacing: f32,
}

impl Default for ApproxTextMeasurer {
    fn default() -> Self {
        Self { advance: 0.6, line_spacing: 1.2 }
    }
}

impl TextMeasurer for ApproxTextMeasurer {
    fn measure(&self, text: &str, font_size: f32) -> TextExtent {
        TextExtent {
            width: text.chars().count() as f32 * self.advance * font_size,
            height: font_size * self.line_spacing,
        }
    }
}

const ELLIPSIS: char = '…';

/// Shorten `text` with a trailing ellipsis until it fits `max_width`.
/// Text that already fits is returned unchanged.
pub fn truncate_to_width(m: &dyn TextMeasurer, text: &str, max_width: f32, font_size: f32) -> String {
    if m.measure_width(text, font_size) <= max_width {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    // Longest prefix that fits together with the ellipsis.
    let (mut lo, mut hi) = (0usize, chars.len());
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        let candidate: String = chars[..mid].iter().chain(std::iter::once(&ELLIPSIS)).collect();
        if m.measure_width(&candidate, font_size) <= max_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    let mut out: String = chars[..lo].iter().collect::<String>().trim_end().to_string();
    out.push(ELLIPSIS);
    out
}

/// Greedy word wrap into lines no wider than `max_width`.
/// A single word wider than the limit keeps a line of its own.
pub fn wrap_to_width(m: &dyn TextMeasurer, text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if m.measure_width(&candidate, font_size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
