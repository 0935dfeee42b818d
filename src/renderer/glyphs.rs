//! Drawable output and the lazy per-character emitter.

use std::sync::Arc;

use lyon::math::{Point, point};

use super::is_control;
use crate::cache::GlyphCache;
use crate::font::GlyphSource;

/// Parameters of one text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    /// Scale applied to unit-size meshes (one em).
    pub size: f32,
    /// RGBA.
    pub color: [f32; 4],
    /// Optional layer tag copied onto every primitive.
    pub layer: Option<Arc<str>>,
}

impl<'a> TextRun<'a> {
    /// White, untagged run.
    pub fn new(text: &'a str, size: f32) -> Self {
        Self {
            text,
            size,
            color: [1.0, 1.0, 1.0, 1.0],
            layer: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_layer(mut self, layer: impl Into<Arc<str>>) -> Self {
        self.layer = Some(layer.into());
        self
    }
}

/// A filled triangle mesh in world space, handed to the scene builder.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawablePrimitive {
    pub vertices: Vec<Point>,
    /// Triangle index triples into `vertices`, shared with the glyph cache.
    pub indices: Arc<[u32]>,
    pub layer: Option<Arc<str>>,
    pub color: [f32; 4],
}

/// Lazy primitive sequence for one run.
///
/// Each `next()` walks characters until one has visible geometry. Every
/// resolved character advances `position.x` by `advance * size`, drawn or
/// not. Dropping the iterator early leaves `position` after the last
/// character consumed.
pub struct Glyphs<'a> {
    chars: std::str::Chars<'a>,
    cache: &'a mut GlyphCache,
    fonts: &'a [Box<dyn GlyphSource>],
    position: &'a mut Point,
    size: f32,
    color: [f32; 4],
    layer: Option<Arc<str>>,
    /// Unfetched sources remain, so a miss may be a skipped `fetch_fonts`.
    sources_pending: bool,
}

impl<'a> Glyphs<'a> {
    pub(super) fn new(
        run: TextRun<'a>,
        cache: &'a mut GlyphCache,
        fonts: &'a [Box<dyn GlyphSource>],
        position: &'a mut Point,
        sources_pending: bool,
    ) -> Self {
        Self {
            chars: run.text.chars(),
            cache,
            fonts,
            position,
            size: run.size,
            color: run.color,
            layer: run.layer,
            sources_pending,
        }
    }
}

impl Iterator for Glyphs<'_> {
    type Item = DrawablePrimitive;

    fn next(&mut self) -> Option<DrawablePrimitive> {
        loop {
            let ch = self.chars.next()?;
            if is_control(ch) {
                continue;
            }
            if self.sources_pending
                && self.cache.get(ch).is_none()
                && !self.fonts.iter().any(|f| f.has_char(ch))
            {
                log::debug!("text_renderer: {ch:?} rendered before its fonts were fetched");
            }
            let Some(mesh) = self.cache.get_or_create(ch, self.fonts) else {
                continue;
            };

            let origin = *self.position;
            self.position.x += mesh.advance() * self.size;

            if let Some(vertices) = mesh.vertices() {
                let size = self.size;
                return Some(DrawablePrimitive {
                    vertices: vertices
                        .iter()
                        .map(|v| point(v.x * size + origin.x, v.y * size + origin.y))
                        .collect(),
                    indices: Arc::clone(mesh.indices()),
                    layer: self.layer.clone(),
                    color: self.color,
                });
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.chars.size_hint().1)
    }
}
