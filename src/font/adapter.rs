//! Adapter over record-based parsed fonts.
//!
//! A `ParsedFont` is what an upstream font parser hands over: units-per-em
//! and a flat list of glyph records in font units. `FontAdapter` indexes the
//! records by code point once and normalizes outlines on request.

use std::collections::HashMap;

use super::{Glyph, GlyphSource, PathCommand, em_scale};

/// One glyph as stored in the font, in font units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphRecord {
    /// Unicode code point, if the glyph is reachable from text at all.
    pub code_point: Option<u32>,
    pub advance: f32,
    pub commands: Vec<PathCommand>,
}

/// An already-parsed font.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedFont {
    /// Units per em. `None` means the font doesn't say; 2048 is assumed.
    pub units_per_em: Option<u16>,
    pub glyphs: Vec<GlyphRecord>,
}

/// Code point index plus normalization over one `ParsedFont`.
#[derive(Debug, Clone)]
pub struct FontAdapter {
    font: ParsedFont,
    /// Char to index into `font.glyphs`. Later records win on duplicates.
    chars: HashMap<char, usize>,
    scale: f32,
}

impl FontAdapter {
    /// Index `font`. Records without a valid code point are left out.
    pub fn new(font: ParsedFont) -> Self {
        let chars: HashMap<char, usize> = font
            .glyphs
            .iter()
            .enumerate()
            .filter_map(|(i, g)| g.code_point.and_then(char::from_u32).map(|ch| (ch, i)))
            .collect();
        let scale = em_scale(font.units_per_em);
        log::debug!(
            "font_adapter: indexed {} of {} glyphs",
            chars.len(),
            font.glyphs.len()
        );
        Self { font, chars, scale }
    }

    /// Number of characters this font covers.
    pub fn char_count(&self) -> usize {
        self.chars.len()
    }
}

impl GlyphSource for FontAdapter {
    fn has_char(&self, ch: char) -> bool {
        self.chars.contains_key(&ch)
    }

    fn glyph(&self, ch: char) -> Option<Glyph> {
        let record = self.chars.get(&ch).and_then(|&i| self.font.glyphs.get(i))?;
        Some(Glyph {
            advance: record.advance * self.scale,
            outline: record
                .commands
                .iter()
                .map(|cmd| cmd.scaled(self.scale))
                .collect(),
        })
    }
}
