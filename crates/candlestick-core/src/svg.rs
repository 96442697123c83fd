// File: crates/candlestick-core/src/svg.rs
// Summary: SVG serialization of a scene's draw list.

use std::fmt::Write as _;

use crate::scene::{DrawCommand, PathCommand, Scene, TextAnchor, TextMark};
use crate::settings::VisionMode;
use crate::types::Color;

const FONT_FAMILY: &str = "sans-serif";

impl Scene {
    /// Standalone SVG document of the scrollable surface.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}""#,
            w = num(self.width),
            h = num(self.height)
        );
        if self.vision != VisionMode::Normal {
            let _ = write!(out, r#" data-vision="{}""#, self.vision.name());
        }
        out.push_str(">\n");
        for cmd in self.commands() {
            write_command(&mut out, &cmd);
        }
        out.push_str("</svg>\n");
        out
    }
}

fn write_command(out: &mut String, cmd: &DrawCommand) {
    match cmd {
        DrawCommand::Line(l) => {
            let _ = writeln!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{}/>"#,
                num(l.from.x),
                num(l.from.y),
                num(l.to.x),
                num(l.to.y),
                l.color,
                num(l.width),
                opacity(l.opacity)
            );
        }
        DrawCommand::Rect(r) => {
            let _ = writeln!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}"{}/>"#,
                num(r.rect.left),
                num(r.rect.top),
                num(r.rect.width),
                num(r.rect.height),
                paint(r.fill),
                paint(r.stroke),
                opacity(r.opacity)
            );
        }
        DrawCommand::Path(p) => {
            let mut d = String::new();
            for c in &p.commands {
                let _ = match c {
                    PathCommand::MoveTo(a) => write!(d, "M{},{}", num(a.x), num(a.y)),
                    PathCommand::LineTo(a) => write!(d, "L{},{}", num(a.x), num(a.y)),
                    PathCommand::CubicTo(a, b, e) => write!(
                        d,
                        "C{},{},{},{},{},{}",
                        num(a.x),
                        num(a.y),
                        num(b.x),
                        num(b.y),
                        num(e.x),
                        num(e.y)
                    ),
                };
            }
            let _ = writeln!(
                out,
                r#"<path d="{d}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                p.stroke,
                num(p.width)
            );
        }
        DrawCommand::Text(t) => write_text(out, t),
    }
}

fn write_text(out: &mut String, t: &TextMark) {
    let anchor = match t.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let _ = write!(out, r#"<text transform="translate({},{})"#, num(t.x), num(t.y));
    if t.rotation != 0.0 {
        let _ = write!(out, " rotate({})", num(t.rotation));
    }
    let _ = write!(
        out,
        r#"" text-anchor="{anchor}" font-family="{FONT_FAMILY}" font-size="{}" fill="{}">"#,
        num(t.font_size),
        t.color
    );
    for (i, line) in t.lines.iter().enumerate() {
        let _ = write!(
            out,
            r#"<tspan x="{}" y="{}">{}</tspan>"#,
            num(t.dx),
            num(t.dy + i as f32 * t.line_height),
            escape(line)
        );
    }
    out.push_str("</text>\n");
}

fn paint(c: Option<Color>) -> String {
    c.map_or_else(|| "none".to_string(), |c| c.to_string())
}

fn opacity(o: f32) -> String {
    if o >= 1.0 { String::new() } else { format!(r#" opacity="{}""#, num(o)) }
}

/// Compact decimal: at most two places, no trailing zeros.
fn num(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
