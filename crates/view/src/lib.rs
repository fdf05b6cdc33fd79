// Chunk: docs/chunks/raster_surface - Workspace + raster surface foundation
//!
//! Viewport-relative raster rendering for an external editor engine.
//!
//! The engine owns the document, styles and cursors. This crate owns only the
//! view: scroll offsets, canvas size, the gutter and a cache of measured line
//! widths. Each render reads whatever lines the engine has delivered through
//! a [`RenderContext`] and draws them onto a [`RasterSurface`].
//!
//! # Example
//!
//! ```
//! use rasterview_lines::{LineCache, StyleTable};
//! use rasterview_view::{
//!     CanvasView, MonospaceMetrics, RecordingSurface, RenderContext, ViewBackend, ViewConfig,
//! };
//!
//! let lines = LineCache::from_text_lines(["fn main() {", "}"]);
//! let metrics = MonospaceMetrics::fixed(10.0, 24.0);
//! let styles = StyleTable::new();
//! let ctx = RenderContext::new(&lines, &metrics, &styles);
//!
//! let mut view = CanvasView::new(RecordingSurface::new(), ViewConfig::default(), 1.0).unwrap();
//! view.resize(ctx, 800.0, 600.0);
//! assert_eq!(view.surface().texts(), vec!["fn main() {", "}", "1", "2"]);
//! ```

pub mod config;
pub mod coords;
pub mod dirty_region;
pub mod drain_loop;
pub mod error;
pub mod event_channel;
pub mod font;
pub mod gutter;
pub mod line_widths;
pub mod palette;
pub mod renderer;
pub mod scroller;
pub mod surface;
pub mod view_event;
pub mod viewport;

pub use config::{config_file_path, ConfigError, ViewConfig};
pub use dirty_region::{DirtyRegion, InvalidationKind};
pub use drain_loop::EventDrainLoop;
pub use error::ViewError;
pub use event_channel::{
    connect_font_metrics, connect_line_cache, create_event_channel, ViewEventReceiver,
    ViewEventSender,
};
pub use font::{FontMetrics, MonospaceMetrics};
pub use gutter::GutterGeometry;
pub use line_widths::LineWidthCache;
pub use palette::Theme;
pub use renderer::{CanvasView, RenderContext, ViewBackend};
pub use scroller::AxisScroller;
pub use surface::{DrawCommand, RasterSurface, Rect, RecordingSurface, SurfaceError};
pub use view_event::ViewEvent;
pub use viewport::{LayoutMetrics, Viewport, ViewportState};
