// Chunk: docs/chunks/raster_surface - Workspace + raster surface foundation

use thiserror::Error;

use crate::config::ConfigError;
use crate::surface::SurfaceError;

/// Errors that abort view construction.
///
/// Everything after construction degrades instead of failing: missing line
/// data is skipped, coordinates outside the document resolve to a fallback
/// position, and scroll offsets are clamped.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("cannot create view: drawing surface unavailable")]
    SurfaceUnavailable(#[source] SurfaceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
