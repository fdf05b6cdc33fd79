// Chunk: docs/chunks/line_model - Line data model + provider interfaces
//!
//! Style descriptors referenced by line style spans.
//!
//! The editor engine owns the style table; lines only carry [`StyleId`]s.
//! Two ids are reserved for non-glyph markers:
//! - [`StyleId::SELECTION`]: the selection background
//! - [`StyleId::FIND_HIGHLIGHT`]: find/search match highlights
//!
//! Reserved spans are painted as background rectangles and never produce
//! glyphs. Every other id is a text style with colors and a font variant.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Rgba
// =============================================================================

/// An 8-bit-per-channel color.
///
/// Serialized as `#rrggbb` (opaque) or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Normalized `[r, g, b, a]` in `0.0..=1.0`, for GPU-style surfaces.
    pub fn to_f32(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

/// Error returned when a color string is not `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}: expected #rrggbb or #rrggbbaa")]
pub struct ParseColorError(pub String);

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let a = if hex.len() == 8 { channel(6)? } else { 0xff };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Rgba {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

// =============================================================================
// StyleId and Style
// =============================================================================

/// Identifier of a style in the engine's style table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(pub u32);

impl StyleId {
    /// Selection background marker.
    pub const SELECTION: StyleId = StyleId(0);
    /// Find match highlight marker.
    pub const FIND_HIGHLIGHT: StyleId = StyleId(1);

    /// Returns true for marker styles that are painted as backgrounds only.
    pub fn is_reserved(self) -> bool {
        self.0 < 2
    }
}

/// Visual attributes of a text style.
///
/// Colors are optional: `None` means "use the theme default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground (glyph) color.
    pub fg: Option<Rgba>,
    /// Background color. For reserved styles this is the marker fill.
    pub bg: Option<Rgba>,
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Underline.
    pub underline: bool,
}

/// Read access to the engine's style table.
pub trait StyleLookup {
    /// Returns the style registered under `id`, if any.
    fn style(&self, id: StyleId) -> Option<&Style>;
}

/// A `HashMap`-backed style table.
#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    styles: HashMap<StyleId, Style>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the style for `id`.
    pub fn define(&mut self, id: StyleId, style: Style) {
        self.styles.insert(id, style);
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl StyleLookup for StyleTable {
    fn style(&self, id: StyleId) -> Option<&Style> {
        self.styles.get(&id)
    }
}
