//! Font backends and the glyph lookup capability shared by all of them.
//!
//! A backend answers two questions: does it cover a character, and what is
//! that character's advance and outline at unit size. Outlines come back as
//! `PathCommand`s in a y-up space where 1.0 is one em, regardless of the
//! font's native units-per-em. Curves are kept as curves; flattening happens
//! in `mesh`.

mod adapter;
mod source;
mod ttf;

pub use adapter::{FontAdapter, GlyphRecord, ParsedFont};
pub use source::{FetchFuture, FileFontSource, FontSource};
pub use ttf::TtfFont;

use lyon::math::{Point, point};

/// Units-per-em assumed when a font doesn't declare one.
pub const DEFAULT_UNITS_PER_EM: u16 = 2048;

/// One outline command with absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    Close,
}

impl PathCommand {
    /// Multiply every coordinate by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        let s = |p: Point| point(p.x * factor, p.y * factor);
        match self {
            Self::MoveTo(p) => Self::MoveTo(s(p)),
            Self::LineTo(p) => Self::LineTo(s(p)),
            Self::QuadTo { ctrl, to } => Self::QuadTo {
                ctrl: s(ctrl),
                to: s(to),
            },
            Self::CubicTo { ctrl1, ctrl2, to } => Self::CubicTo {
                ctrl1: s(ctrl1),
                ctrl2: s(ctrl2),
                to: s(to),
            },
            Self::Close => Self::Close,
        }
    }
}

/// Outline normalized to unit text size.
pub type NormalizedOutline = Vec<PathCommand>;

/// A glyph at unit size: horizontal advance plus outline.
///
/// An empty outline is a glyph with nothing to draw (e.g. space).
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub advance: f32,
    pub outline: NormalizedOutline,
}

/// Character lookup implemented by every font backend.
pub trait GlyphSource {
    /// Whether this font maps `ch` to a glyph.
    fn has_char(&self, ch: char) -> bool;

    /// Advance and normalized outline for `ch`, or `None` if not covered.
    fn glyph(&self, ch: char) -> Option<Glyph>;
}

/// Scale factor taking font units to unit text size.
pub(crate) fn em_scale(units_per_em: Option<u16>) -> f32 {
    let upem = match units_per_em {
        Some(u) if u > 0 => u,
        _ => DEFAULT_UNITS_PER_EM,
    };
    1.0 / f32::from(upem)
}
