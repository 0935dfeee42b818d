//! Renderer configuration and loading logic.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Segments per curve when flattening outlines.
pub const DEFAULT_CURVE_SEGMENTS: u32 = 2;

/// Replacement character first, then a plain question mark.
pub const DEFAULT_FALLBACK_CHARS: &str = "\u{FFFD}?";

/// Per-renderer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Number of line segments each quadratic/cubic curve is split into.
    pub curve_segments: u32,
    /// Characters tried in order to build the substitute glyph for
    /// characters no font covers.
    pub fallback_chars: String,
    /// Font files, in priority order. Only used by
    /// `TextRenderer::from_config`.
    pub fonts: Vec<PathBuf>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            curve_segments: DEFAULT_CURVE_SEGMENTS,
            fallback_chars: DEFAULT_FALLBACK_CHARS.to_owned(),
            fonts: Vec::new(),
        }
    }
}

impl TextConfig {
    /// Returns `curve_segments` clamped to at least 1.
    pub fn effective_curve_segments(&self) -> u32 {
        self.curve_segments.max(1)
    }

    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads config from `path`. Returns defaults if the file doesn't exist
    /// or can't be parsed.
    pub fn load(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("config: failed to read {}: {e}", path.display());
                }
                return Self::default();
            }
        };

        match Self::from_toml(&data) {
            Ok(cfg) => {
                log::info!("config: loaded from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("config: parse error in {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
