//! Text to triangle meshes for 2D vector viewers.
//!
//! Characters are resolved against an ordered list of font sources that are
//! fetched lazily, one at a time, only when the text needs them. Each glyph
//! outline is flattened, winding-normalized, triangulated, and cached per
//! character; a run of text then becomes a sequence of world-space triangle
//! primitives laid out by simple horizontal advance. There is no shaping,
//! kerning, or line breaking.

#![deny(unsafe_code)]

pub mod cache;
pub mod config;
pub mod error;
pub mod font;
pub mod mesh;
pub mod renderer;

#[cfg(test)]
pub(crate) mod test_fonts;

pub use cache::GlyphCache;
pub use config::TextConfig;
pub use error::{Error, Result};
pub use font::{
    FileFontSource, FontAdapter, FontSource, Glyph, GlyphRecord, GlyphSource, ParsedFont,
    PathCommand, TtfFont,
};
pub use mesh::{GlyphMesh, GlyphMesher};
pub use renderer::{DrawablePrimitive, Glyphs, TextRenderer, TextRun};
