//! Fixture fonts shared by unit tests.
//!
//! All fixtures use 1000 units per em, so font units divide by 1000 to get
//! unit-size coordinates.

use std::cell::Cell;
use std::rc::Rc;

use lyon::math::point;

use crate::error::Error;
use crate::font::{FontAdapter, FontSource, GlyphRecord, GlyphSource, ParsedFont, PathCommand};

pub(crate) const UNITS_PER_EM: u16 = 1000;

/// Axis-aligned rectangle contour. Clockwise means y-up clockwise.
pub(crate) fn rect(x0: f32, y0: f32, x1: f32, y1: f32, clockwise: bool) -> Vec<PathCommand> {
    let corners = if clockwise {
        [(x0, y0), (x0, y1), (x1, y1), (x1, y0)]
    } else {
        [(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
    };
    let mut cmds = vec![PathCommand::MoveTo(point(corners[0].0, corners[0].1))];
    cmds.extend(
        corners[1..]
            .iter()
            .map(|&(x, y)| PathCommand::LineTo(point(x, y))),
    );
    cmds.push(PathCommand::Close);
    cmds
}

pub(crate) fn record(ch: char, advance: f32, commands: Vec<PathCommand>) -> GlyphRecord {
    GlyphRecord {
        code_point: Some(ch as u32),
        advance,
        commands,
    }
}

pub(crate) fn font(glyphs: Vec<GlyphRecord>) -> ParsedFont {
    ParsedFont {
        units_per_em: Some(UNITS_PER_EM),
        glyphs,
    }
}

/// 'A' triangle, 'B' box, 'O' box with a hole, 'i' stem + dot, 'c' curve,
/// and an empty space.
pub(crate) fn latin() -> ParsedFont {
    let mut o = rect(0.0, 0.0, 900.0, 1000.0, true);
    o.extend(rect(300.0, 300.0, 600.0, 700.0, false));
    let mut i = rect(100.0, 0.0, 300.0, 600.0, true);
    i.extend(rect(100.0, 800.0, 300.0, 1000.0, true));
    font(vec![
        record(
            'A',
            1100.0,
            vec![
                PathCommand::MoveTo(point(0.0, 0.0)),
                PathCommand::LineTo(point(500.0, 1000.0)),
                PathCommand::LineTo(point(1000.0, 0.0)),
                PathCommand::Close,
            ],
        ),
        record('B', 900.0, rect(0.0, 0.0, 800.0, 1000.0, true)),
        record('O', 1000.0, o),
        record('i', 400.0, i),
        record(
            'c',
            600.0,
            vec![
                PathCommand::MoveTo(point(0.0, 0.0)),
                PathCommand::QuadTo {
                    ctrl: point(250.0, 1000.0),
                    to: point(500.0, 0.0),
                },
                PathCommand::Close,
            ],
        ),
        record(' ', 300.0, Vec::new()),
    ])
}

/// One 500-unit box glyph per character of `chars`.
pub(crate) fn boxes(chars: &str) -> ParsedFont {
    font(
        chars
            .chars()
            .map(|ch| record(ch, 500.0, rect(0.0, 0.0, 400.0, 700.0, true)))
            .collect(),
    )
}

pub(crate) fn adapters(fonts: Vec<ParsedFont>) -> Vec<Box<dyn GlyphSource>> {
    fonts
        .into_iter()
        .map(|f| Box::new(FontAdapter::new(f)) as Box<dyn GlyphSource>)
        .collect()
}

/// Source yielding `font`, bumping `fetches` when fetched.
pub(crate) fn counting_source(font: ParsedFont, fetches: &Rc<Cell<usize>>) -> Box<dyn FontSource> {
    let fetches = Rc::clone(fetches);
    Box::new(move || {
        fetches.set(fetches.get() + 1);
        let adapter = FontAdapter::new(font);
        async move { Ok::<_, Error>(Box::new(adapter) as Box<dyn GlyphSource>) }
    })
}

/// Source whose fetch always fails, bumping `fetches` when fetched.
pub(crate) fn failing_source(fetches: &Rc<Cell<usize>>) -> Box<dyn FontSource> {
    let fetches = Rc::clone(fetches);
    Box::new(move || {
        fetches.set(fetches.get() + 1);
        async { Err::<Box<dyn GlyphSource>, _>(Error::fetch("font server unreachable")) }
    })
}

fn push_u16(out: &mut Vec<u8>, values: &[u16]) {
    for v in values {
        out.extend(v.to_be_bytes());
    }
}

fn push_i16(out: &mut Vec<u8>, values: &[i16]) {
    for v in values {
        out.extend(v.to_be_bytes());
    }
}

fn push_u32(out: &mut Vec<u8>, values: &[u32]) {
    for v in values {
        out.extend(v.to_be_bytes());
    }
}

/// Minimal TrueType file at `UNITS_PER_EM`.
///
/// Glyph 0 is an empty .notdef, glyph 1 ('A', advance 600) one contour with
/// on (0,0), off (250,1000), on (500,0), glyph 2 (' ', advance 250) empty.
/// Chars map through a single Windows full-repertoire format 12 cmap, which
/// also points '!' at .notdef.
pub(crate) fn ttf_bytes() -> Vec<u8> {
    let mut glyf = Vec::new();
    push_i16(&mut glyf, &[1, 0, 0, 500, 1000]); // contours, bbox
    push_u16(&mut glyf, &[2, 0]); // last point index, no instructions
    glyf.extend([0x01, 0x00, 0x01]); // on, off, on; long deltas
    push_i16(&mut glyf, &[0, 250, 250]);
    push_i16(&mut glyf, &[0, 1000, -1000]);
    glyf.resize(glyf.len().next_multiple_of(2), 0);

    let end = (glyf.len() / 2) as u16;
    let mut loca = Vec::new();
    push_u16(&mut loca, &[0, 0, end, end]);

    let mut head = Vec::new();
    push_u32(&mut head, &[0x0001_0000, 0x0001_0000, 0, 0x5F0F_3CF5]);
    push_u16(&mut head, &[0, UNITS_PER_EM]);
    head.extend([0; 16]); // created, modified
    push_i16(&mut head, &[0, 0, 500, 1000]);
    push_u16(&mut head, &[0, 8]); // mac style, lowest ppem
    push_i16(&mut head, &[2, 0, 0]); // direction hint, short loca, glyph format

    let mut hhea = Vec::new();
    push_u32(&mut hhea, &[0x0001_0000]);
    push_i16(&mut hhea, &[800, -200, 0]);
    push_u16(&mut hhea, &[600]);
    push_i16(&mut hhea, &[0, 0, 500, 1, 0, 0, 0, 0, 0, 0, 0]);
    push_u16(&mut hhea, &[3]);

    let mut hmtx = Vec::new();
    push_u16(&mut hmtx, &[500, 0, 600, 0, 250, 0]);

    let mut maxp = Vec::new();
    push_u32(&mut maxp, &[0x0000_5000]);
    push_u16(&mut maxp, &[3]);

    let mut cmap = Vec::new();
    push_u16(&mut cmap, &[0, 1, 3, 10]);
    push_u32(&mut cmap, &[12]);
    push_u16(&mut cmap, &[12, 0]);
    push_u32(&mut cmap, &[52, 0, 3]);
    push_u32(&mut cmap, &[0x20, 0x20, 2, 0x21, 0x21, 0, 0x41, 0x41, 1]);

    // Table records must be sorted by tag.
    let tables = [
        (b"cmap", cmap),
        (b"glyf", glyf),
        (b"head", head),
        (b"hhea", hhea),
        (b"hmtx", hmtx),
        (b"loca", loca),
        (b"maxp", maxp),
    ];
    let header_len = 12 + 16 * tables.len();
    let mut font = Vec::new();
    push_u32(&mut font, &[0x0001_0000]);
    push_u16(&mut font, &[tables.len() as u16, 64, 2, 48]);
    let mut body = Vec::new();
    for (tag, data) in &tables {
        font.extend_from_slice(*tag);
        push_u32(
            &mut font,
            &[0, (header_len + body.len()) as u32, data.len() as u32],
        );
        body.extend_from_slice(data);
        body.resize(body.len().next_multiple_of(4), 0);
    }
    font.extend(body);
    font
}
