//! Resolution of color names to concrete colors.
//!
//! The interpreter never hardcodes a color table: it asks a [`Palette`].
//! Two palettes are provided, a named one ([`NamedPalette`], `setpc "red`)
//! and an indexed one in the classic 16-color layout ([`IndexedPalette`],
//! `setpc 4`).

use std::collections::HashMap;

/// An RGB color.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// Parses `#rgb` or `#rrggbb` (case-insensitive).
    pub fn from_hex(s: &str) -> Option<Color> {
        let digits = s.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                // Each digit is doubled: #f80 is #ff8800.
                let mut it = digits
                    .chars()
                    .filter_map(|c| c.to_digit(16))
                    .map(|v| v as u8 * 17);
                Some(Color::rgb(it.next()?, it.next()?, it.next()?))
            }
            6 => Some(Color::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub trait Palette {
    /// Looks up a color by name. `name` has already had any quotes removed.
    fn resolve(&self, name: &str) -> Option<Color>;

    /// The color used for a fresh pen, and for names that don't resolve.
    fn default_color(&self) -> Color {
        Color::BLACK
    }
}

/// Colors looked up by (case-insensitive) name.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedPalette {
    colors: HashMap<String, Color>,
}

const NAMED: &[(&str, Color)] = &[
    ("BLACK", Color::rgb(0x00, 0x00, 0x00)),
    ("WHITE", Color::rgb(0xff, 0xff, 0xff)),
    ("RED", Color::rgb(0xff, 0x00, 0x00)),
    ("GREEN", Color::rgb(0x00, 0xff, 0x00)),
    ("BLUE", Color::rgb(0x00, 0x00, 0xff)),
    ("YELLOW", Color::rgb(0xff, 0xff, 0x00)),
    ("CYAN", Color::rgb(0x00, 0xff, 0xff)),
    ("MAGENTA", Color::rgb(0xff, 0x00, 0xff)),
    ("ORANGE", Color::rgb(0xff, 0xa5, 0x00)),
    ("PURPLE", Color::rgb(0x80, 0x00, 0x80)),
    ("BROWN", Color::rgb(0xa5, 0x2a, 0x2a)),
    ("PINK", Color::rgb(0xff, 0xc0, 0xcb)),
    ("GRAY", Color::rgb(0x80, 0x80, 0x80)),
    ("GREY", Color::rgb(0x80, 0x80, 0x80)),
];

impl Default for NamedPalette {
    fn default() -> Self {
        NamedPalette {
            colors: NAMED
                .iter()
                .map(|(name, color)| (name.to_string(), *color))
                .collect(),
        }
    }
}

impl NamedPalette {
    /// A palette with no names at all; only raw `#rrggbb` colors will work.
    pub fn empty() -> Self {
        NamedPalette {
            colors: HashMap::new(),
        }
    }

    /// Adds (or overrides) a name.
    pub fn with(mut self, name: &str, color: Color) -> Self {
        self.colors.insert(name.to_uppercase(), color);
        self
    }
}

impl Palette for NamedPalette {
    fn resolve(&self, name: &str) -> Option<Color> {
        self.colors.get(&name.to_uppercase()).copied()
    }
}

/// Sixteen colors addressed by number.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedPalette {
    colors: [Color; 16],
}

impl Default for IndexedPalette {
    fn default() -> Self {
        IndexedPalette {
            colors: [
                Color::rgb(0, 0, 0),       // black
                Color::rgb(0, 0, 255),     // blue
                Color::rgb(0, 255, 0),     // green
                Color::rgb(0, 255, 255),   // cyan
                Color::rgb(255, 0, 0),     // red
                Color::rgb(255, 0, 255),   // magenta
                Color::rgb(255, 255, 0),   // yellow
                Color::rgb(255, 255, 255), // white
                Color::rgb(155, 96, 59),   // brown
                Color::rgb(197, 136, 18),  // tan
                Color::rgb(100, 162, 64),  // forest
                Color::rgb(120, 187, 187), // aqua
                Color::rgb(255, 149, 119), // salmon
                Color::rgb(144, 113, 208), // purple
                Color::rgb(255, 163, 0),   // orange
                Color::rgb(183, 183, 183), // grey
            ],
        }
    }
}

impl IndexedPalette {
    pub fn with(mut self, index: usize, color: Color) -> Self {
        if let Some(slot) = self.colors.get_mut(index) {
            *slot = color;
        }
        self
    }
}

impl Palette for IndexedPalette {
    fn resolve(&self, name: &str) -> Option<Color> {
        let index: usize = name.parse().ok()?;
        self.colors.get(index).copied()
    }

    fn default_color(&self) -> Color {
        self.colors[0]
    }
}
