//! Crate error type.
//!
//! Most of the pipeline is best-effort: a character nobody can render is not
//! an error. What remains here is what a caller can act on.

/// Errors surfaced by font fetching, font parsing, configuration, and meshing.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A font source rejected its fetch.
    #[error("font fetch failed: {0}")]
    Fetch(String),

    /// Binary font data could not be parsed.
    #[error("font parse error: {0}")]
    FontParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// The triangulator rejected a glyph outline.
    #[error("tessellation failed for {ch:?}: {reason}")]
    Tessellation { ch: char, reason: String },
}

impl Error {
    /// Convenience constructor for fetch failures raised by custom sources.
    pub fn fetch<T: ToString>(msg: T) -> Self {
        Self::Fetch(msg.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
