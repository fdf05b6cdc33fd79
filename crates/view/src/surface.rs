// Chunk: docs/chunks/raster_surface - Workspace + raster surface foundation
//!
//! The raster drawing surface.
//!
//! `RasterSurface` is a small 2D-context style API: a save/restore stack,
//! a rectangular clip, a current font and fill color, and two drawing
//! primitives. All coordinates are CSS pixels; `configure` tells the surface
//! its device-pixel backing size and the scale between the two spaces.
//!
//! `RecordingSurface` records every call as a `DrawCommand`. It backs the demo
//! binary and the tests, and is what a host would replay onto a real canvas.

use rasterview_lines::Rgba;
use thiserror::Error;

/// Largest backing store dimension a surface accepts, in device pixels.
pub const MAX_SURFACE_DIMENSION: u32 = 16_384;

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Errors reported by a drawing surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// The host could not provide a drawing context.
    #[error("drawing surface unavailable: {0}")]
    Unavailable(String),
    /// The requested backing store exceeds what the surface supports.
    #[error("surface size {width}x{height} exceeds the {max}px limit")]
    TooLarge { width: u32, height: u32, max: u32 },
}

/// A 2D raster drawing target.
pub trait RasterSurface {
    /// Sizes the backing store in device pixels and sets the CSS-to-device
    /// scale. Called once at construction and again on every resize.
    fn configure(&mut self, width_px: u32, height_px: u32, scale: f32) -> Result<(), SurfaceError>;
    /// Pushes the clip, font and fill state.
    fn save(&mut self);
    /// Pops the state pushed by the matching `save`.
    fn restore(&mut self);
    /// Intersects the current clip with `rect`.
    fn clip(&mut self, rect: Rect);
    fn set_font(&mut self, font: &str);
    fn set_fill(&mut self, color: Rgba);
    /// Fills `rect` with the current fill color.
    fn fill_rect(&mut self, rect: Rect);
    /// Draws `text` with its baseline starting at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
}

// =============================================================================
// RecordingSurface
// =============================================================================

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Configure { width_px: u32, height_px: u32, scale: f32 },
    Save,
    Restore,
    Clip(Rect),
    SetFont(String),
    SetFill(Rgba),
    FillRect(Rect),
    FillText { text: String, x: f32, y: f32 },
}

/// A surface that records calls instead of rasterizing them.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    size_px: (u32, u32),
    scale: f32,
    unavailable: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            ..Self::default()
        }
    }

    /// A surface whose `configure` always fails, standing in for a host
    /// that has no drawing context.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns and clears the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Device pixel size from the last successful `configure`.
    pub fn size_px(&self) -> (u32, u32) {
        self.size_px
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Text of every `FillText`, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RasterSurface for RecordingSurface {
    fn configure(&mut self, width_px: u32, height_px: u32, scale: f32) -> Result<(), SurfaceError> {
        if self.unavailable {
            return Err(SurfaceError::Unavailable("no 2d context".to_string()));
        }
        if width_px > MAX_SURFACE_DIMENSION || height_px > MAX_SURFACE_DIMENSION {
            return Err(SurfaceError::TooLarge {
                width: width_px,
                height: height_px,
                max: MAX_SURFACE_DIMENSION,
            });
        }
        self.size_px = (width_px, height_px);
        self.scale = scale;
        self.commands.push(DrawCommand::Configure {
            width_px,
            height_px,
            scale,
        });
        Ok(())
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn clip(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clip(rect));
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::SetFont(font.to_string()));
    }

    fn set_fill(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::SetFill(color));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::FillRect(rect));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }
}
