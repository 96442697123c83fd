// File: crates/candlestick-core/src/palette.rs
// Summary: Host color palette interface with a memoizing default implementation.

use std::collections::HashMap;

use crate::types::Color;

/// Resolves a stable color for a series name.
pub trait Palette {
    fn color_for(&mut self, name: &str) -> Color;
}

/// Cycles through a fixed color list, handing each new name the next slot.
/// A name always gets the color it received first.
#[derive(Clone, Debug)]
pub struct DefaultPalette {
    colors: Vec<Color>,
    assigned: HashMap<String, Color>,
}

impl DefaultPalette {
    pub fn new() -> Self {
        Self::with_colors(default_colors())
    }

    pub fn with_colors(colors: Vec<Color>) -> Self {
        let colors = if colors.is_empty() { default_colors() } else { colors };
        Self { colors, assigned: HashMap::new() }
    }
}

impl Default for DefaultPalette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette for DefaultPalette {
    fn color_for(&mut self, name: &str) -> Color {
        if let Some(c) = self.assigned.get(name) {
            return *c;
        }
        let c = self.colors[self.assigned.len() % self.colors.len()];
        self.assigned.insert(name.to_string(), c);
        c
    }
}

/// Host default data colors.
pub fn default_colors() -> Vec<Color> {
    vec![
        Color::rgb(0x01, 0xB8, 0xAA),
        Color::rgb(0x37, 0x46, 0x49),
        Color::rgb(0xFD, 0x62, 0x5E),
        Color::rgb(0xF2, 0xC8, 0x0F),
        Color::rgb(0x5F, 0x6B, 0x6D),
        Color::rgb(0x8A, 0xD4, 0xEB),
        Color::rgb(0xFE, 0x96, 0x66),
        Color::rgb(0xA6, 0x69, 0x99),
        Color::rgb(0x3C, 0xB3, 0xE2),
        Color::rgb(0xDF, 0xBF, 0xBF),
    ]
}
