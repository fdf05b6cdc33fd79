// Chunk: docs/chunks/line_model - Line data model + provider interfaces
//!
//! Line data model for the rasterview renderer.
//!
//! This crate holds everything the renderer reads but never writes: logical
//! lines with their style spans, cursors and index tables, the style table,
//! and the provider interfaces through which the editor engine hands that
//! data over. It has no knowledge of pixels, fonts or surfaces.
//!
//! # Example
//!
//! ```
//! use rasterview_lines::{LineCache, LineSource};
//!
//! let cache = LineCache::from_text_lines(["fn main() {", "}"]);
//! assert_eq!(cache.height(), 2);
//! assert_eq!(cache.get(0).map(|l| l.char_count()), Some(11));
//! ```

mod line;
mod notify;
mod source;
mod style;
mod types;

pub use line::{ByteRange, Line, LineError, StyleSpan};
pub use notify::{SubscriptionId, Subscribers};
pub use source::{LineCache, LineSource};
pub use style::{ParseColorError, Rgba, Style, StyleId, StyleLookup, StyleTable};
pub use types::{DirtyLines, Position};
