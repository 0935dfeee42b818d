//! Binary TrueType/OpenType backend built on `ttf_parser` (via `rustybuzz`).

use std::collections::HashMap;
use std::sync::Arc;

use lyon::math::{Point, point};
use rustybuzz::ttf_parser::{Face, GlyphId, OutlineBuilder};

use super::{Glyph, GlyphSource, NormalizedOutline, PathCommand, em_scale};
use crate::error::{Error, Result};

/// Font backed by raw font file bytes.
///
/// The bytes are kept in an `Arc` and a `Face` is parsed transiently per
/// outline request, so the font can be held without borrowing.
pub struct TtfFont {
    bytes: Arc<Vec<u8>>,
    /// Index within a .ttc collection (0 for single-font files).
    face_index: u32,
    /// Char to glyph id, from every Unicode cmap subtable.
    chars: HashMap<char, GlyphId>,
    scale: f32,
}

impl TtfFont {
    /// Parse `bytes` and index its character map.
    pub fn from_bytes(bytes: Vec<u8>, face_index: u32) -> Result<Self> {
        let bytes = Arc::new(bytes);
        let face =
            Face::parse(&bytes, face_index).map_err(|e| Error::FontParse(e.to_string()))?;

        let mut chars = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|cp| {
                    let Some(ch) = char::from_u32(cp) else {
                        return;
                    };
                    // Glyph 0 is .notdef: unmapped.
                    if let Some(gid) = subtable.glyph_index(cp).filter(|gid| gid.0 != 0) {
                        chars.insert(ch, gid);
                    }
                });
            }
        }

        let scale = em_scale(Some(face.units_per_em()));
        log::debug!(
            "ttf_font: parsed face {face_index} ({} chars, {} units/em)",
            chars.len(),
            face.units_per_em()
        );

        Ok(Self {
            bytes,
            face_index,
            chars,
            scale,
        })
    }

    /// Number of characters this font covers.
    pub fn char_count(&self) -> usize {
        self.chars.len()
    }
}

impl GlyphSource for TtfFont {
    fn has_char(&self, ch: char) -> bool {
        self.chars.contains_key(&ch)
    }

    fn glyph(&self, ch: char) -> Option<Glyph> {
        let gid = *self.chars.get(&ch)?;
        let face = Face::parse(&self.bytes, self.face_index).ok()?;
        let mut sink = OutlineSink {
            commands: Vec::new(),
            scale: self.scale,
        };
        // Glyphs without contours (space) leave the sink empty.
        let _ = face.outline_glyph(gid, &mut sink);
        let advance = face.glyph_hor_advance(gid).map_or(0.0, f32::from) * self.scale;
        Some(Glyph {
            advance,
            outline: sink.commands,
        })
    }
}

/// Collects `ttf_parser` outline callbacks as scaled `PathCommand`s.
pub(super) struct OutlineSink {
    pub(super) commands: NormalizedOutline,
    pub(super) scale: f32,
}

impl OutlineSink {
    fn at(&self, x: f32, y: f32) -> Point {
        point(x * self.scale, y * self.scale)
    }
}

impl OutlineBuilder for OutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.at(x, y);
        self.commands.push(PathCommand::MoveTo(p));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.at(x, y);
        self.commands.push(PathCommand::LineTo(p));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let ctrl = self.at(x1, y1);
        let to = self.at(x, y);
        self.commands.push(PathCommand::QuadTo { ctrl, to });
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let ctrl1 = self.at(x1, y1);
        let ctrl2 = self.at(x2, y2);
        let to = self.at(x, y);
        self.commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
    }

    fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }
}
