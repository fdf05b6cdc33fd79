// Chunk: docs/chunks/view_config - Theme colors for the render passes
//!
//! Theme colors used when a style does not specify its own.
//!
//! Defaults follow the Catppuccin Mocha palette. Every color can be
//! overridden from the view config as a `#rrggbb` or `#rrggbbaa` string.

use rasterview_lines::Rgba;
use serde::{Deserialize, Serialize};

// =============================================================================
// Catppuccin Mocha Theme Colors
// =============================================================================

/// Editor background: #1e1e2e (Catppuccin Mocha base)
const BACKGROUND: Rgba = Rgba::rgb(0x1e, 0x1e, 0x2e);

/// Text foreground: #cdd6f4 (Catppuccin Mocha text)
const FOREGROUND: Rgba = Rgba::rgb(0xcd, 0xd6, 0xf4);

/// Selection: #585b70 (Catppuccin Mocha surface2) at 40% alpha
const SELECTION: Rgba = Rgba::rgba(0x58, 0x5b, 0x70, 0x66);

/// Find match highlight: #f9e2af (Catppuccin Mocha yellow) at 30% alpha
const FIND_HIGHLIGHT: Rgba = Rgba::rgba(0xf9, 0xe2, 0xaf, 0x4d);

/// Cursor bar: #f5e0dc (Catppuccin Mocha rosewater)
const CURSOR: Rgba = Rgba::rgb(0xf5, 0xe0, 0xdc);

/// Gutter background: #181825 (Catppuccin Mocha mantle)
const GUTTER_BACKGROUND: Rgba = Rgba::rgb(0x18, 0x18, 0x25);

/// Line numbers: #6c7086 (Catppuccin Mocha overlay0)
const GUTTER_FOREGROUND: Rgba = Rgba::rgb(0x6c, 0x70, 0x86);

/// Gutter separator: #313244 (Catppuccin Mocha surface0)
const GUTTER_SEPARATOR: Rgba = Rgba::rgb(0x31, 0x32, 0x44);

// =============================================================================
// Theme
// =============================================================================

/// Fallback colors for the render passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Rgba,
    pub foreground: Rgba,
    /// Fill for selection spans whose style has no background
    pub selection: Rgba,
    /// Fill for find-match spans whose style has no background
    pub find_highlight: Rgba,
    pub cursor: Rgba,
    pub gutter_background: Rgba,
    pub gutter_foreground: Rgba,
    pub gutter_separator: Rgba,
}

impl Theme {
    pub fn catppuccin_mocha() -> Self {
        Self {
            background: BACKGROUND,
            foreground: FOREGROUND,
            selection: SELECTION,
            find_highlight: FIND_HIGHLIGHT,
            cursor: CURSOR,
            gutter_background: GUTTER_BACKGROUND,
            gutter_foreground: GUTTER_FOREGROUND,
            gutter_separator: GUTTER_SEPARATOR,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}
