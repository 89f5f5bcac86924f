//! Slice colors and the cycler that hands them out.

use std::fmt;

use ratatui::style::Color;
use serde::{Serialize, Serializer};

/// An RGB slice color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SliceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SliceColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for SliceColor {
    /// `#RRGGBB`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for SliceColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<SliceColor> for Color {
    fn from(c: SliceColor) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// Slice palette, in hand-out order. The last entry is a neutral gray.
pub const PALETTE: [SliceColor; 21] = [
    SliceColor::rgb(0xFF, 0x6F, 0x61), // Coral
    SliceColor::rgb(0x6B, 0x5B, 0x93), // Ultra violet
    SliceColor::rgb(0x88, 0xB0, 0x4B), // Greenery
    SliceColor::rgb(0xFF, 0x45, 0x00), // Orange red
    SliceColor::rgb(0x92, 0xA8, 0xD1), // Serenity
    SliceColor::rgb(0x95, 0x52, 0x51), // Marsala
    SliceColor::rgb(0xB5, 0x65, 0xA7), // Radiant orchid
    SliceColor::rgb(0x00, 0x9B, 0x77), // Emerald
    SliceColor::rgb(0xD9, 0xBF, 0x77), // Sand
    SliceColor::rgb(0x1E, 0x90, 0xFF), // Dodger blue
    SliceColor::rgb(0xFF, 0xD7, 0x00), // Gold
    SliceColor::rgb(0xF7, 0xCA, 0xC9), // Rose quartz
    SliceColor::rgb(0x45, 0xB8, 0xAC), // Turquoise
    SliceColor::rgb(0xEF, 0xC0, 0x50), // Mimosa
    SliceColor::rgb(0x5B, 0x5E, 0xA6), // Blue iris
    SliceColor::rgb(0x9B, 0x23, 0x35), // Chili pepper
    SliceColor::rgb(0xDF, 0xCF, 0xBE), // Sand dollar
    SliceColor::rgb(0x55, 0xB4, 0xB0), // Blue turquoise
    SliceColor::rgb(0xE1, 0x5D, 0x44), // Tigerlily
    SliceColor::rgb(0x7F, 0xCD, 0xCD), // Aqua sky
    SliceColor::rgb(0x80, 0x80, 0x80), // Gray
];

/// Deterministic color sequence over [`PALETTE`].
///
/// Reset before building each visual so the same input order always gets
/// the same colors.
#[derive(Debug, Clone, Default)]
pub struct ColorCycler {
    cursor: usize,
}

impl ColorCycler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color at the cursor; advances the cursor, wrapping at the palette end.
    pub fn next_color(&mut self) -> SliceColor {
        let color = PALETTE[self.cursor];
        self.cursor = (self.cursor + 1) % PALETTE.len();
        color
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_palette_is_distinct() {
        let unique: HashSet<SliceColor> = PALETTE.iter().copied().collect();
        assert_eq!(unique.len(), PALETTE.len());
        assert!(PALETTE.len() >= 20);
    }

    #[test]
    fn test_cycler_restarts_after_reset() {
        let mut cycler = ColorCycler::new();
        for round in 0..3 {
            cycler.reset();
            let k = 5 + round;
            let colors: Vec<SliceColor> = (0..k).map(|_| cycler.next_color()).collect();
            assert_eq!(colors, PALETTE[..k].to_vec());
        }
    }

    #[test]
    fn test_cycler_wraps() {
        let mut cycler = ColorCycler::new();
        for _ in 0..PALETTE.len() {
            cycler.next_color();
        }
        assert_eq!(cycler.next_color(), PALETTE[0]);
        assert_eq!(cycler.next_color(), PALETTE[1]);
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(SliceColor::rgb(0xFF, 0x6F, 0x61).to_string(), "#FF6F61");
        assert_eq!(SliceColor::rgb(0, 0x0A, 0xB).to_string(), "#000A0B");
        assert_eq!(serde_json::to_string(&PALETTE[20]).unwrap(), "\"#808080\"");
    }

    #[test]
    fn test_into_terminal_color() {
        let color: Color = PALETTE[0].into();
        assert_eq!(color, Color::Rgb(0xFF, 0x6F, 0x61));
    }
}
