// Chunk: docs/chunks/view_config - View configuration file
//!
//! View configuration.
//!
//! All options are optional; anything missing falls back to its default.
//!
//! ## File Location
//!
//! `load_default` reads `<config dir>/rasterview/view.json`, where the config
//! dir comes from `dirs::config_dir()`:
//! - macOS: `~/Library/Application Support/rasterview/view.json`
//! - Linux: `~/.config/rasterview/view.json`
//!
//! A missing file yields defaults. A file that cannot be read or parsed is
//! logged and also yields defaults, so a bad config never stops the view
//! from coming up.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::palette::Theme;

/// Application name used for the config directory.
const APP_NAME: &str = "rasterview";

/// Config file name.
const CONFIG_FILENAME: &str = "view.json";

/// Options applied when a view is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Draw the line-number gutter.
    pub draw_gutter: bool,
    /// Gutter padding `[x, y]` in CSS pixels. `x` is split evenly left and
    /// right of the numbers.
    pub gutter_padding: [f32; 2],
    /// Content padding `[x, y]` in CSS pixels, applied inside the content area.
    pub editor_padding: [f32; 2],
    /// Allow scrolling until the last line reaches the top of the canvas.
    pub scroll_past_end: bool,
    /// Width of cursor bars in CSS pixels.
    pub cursor_width: f32,
    pub theme: Theme,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            draw_gutter: true,
            gutter_padding: [20.0, 0.0],
            editor_padding: [5.0, 0.0],
            scroll_past_end: false,
            cursor_width: 2.0,
            theme: Theme::default(),
        }
    }
}

/// Errors reading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ViewConfig {
    /// Reads a config file. Unlike `load_default`, errors are returned.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path` if it exists, falling back to defaults on any problem.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no view config, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "ignoring view config");
                Self::default()
            }
        }
    }

    /// Reads the config from the platform config directory.
    pub fn load_default() -> Self {
        match config_file_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// Writes the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}

/// Returns the path to the config file, or `None` if the platform has no
/// config directory.
pub fn config_file_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_NAME).join(CONFIG_FILENAME))
}
