//! Glyph outline to triangle mesh.
//!
//! `GlyphMesher` flattens an outline into rings, groups them into
//! boundary+holes shapes with normalized winding, and triangulates each shape
//! with lyon's fill tessellator. All shapes of a glyph (the stem and dot of
//! "i", say) land in one vertex buffer with indices offset accordingly.

pub(crate) mod ring;

use std::sync::Arc;

use lyon::math::Point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};

use crate::config::DEFAULT_CURVE_SEGMENTS;
use crate::error::{Error, Result};
use crate::font::Glyph;

use ring::Shape;

/// Triangulated glyph at unit size. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMesh {
    /// `None` for glyphs with nothing to draw; the advance still applies.
    vertices: Option<Vec<Point>>,
    /// Triangle index triples into `vertices`.
    indices: Arc<[u32]>,
    advance: f32,
}

impl GlyphMesh {
    /// A mesh that only advances the cursor.
    pub fn empty(advance: f32) -> Self {
        Self {
            vertices: None,
            indices: Arc::from(Vec::new()),
            advance,
        }
    }

    pub fn vertices(&self) -> Option<&[Point]> {
        self.vertices.as_deref()
    }

    /// Index list, shared with any primitive emitted from this mesh.
    pub fn indices(&self) -> &Arc<[u32]> {
        &self.indices
    }

    /// Horizontal advance at size 1.
    pub fn advance(&self) -> f32 {
        self.advance
    }

    /// Whether there is no visible geometry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_none()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Pure outline-to-mesh transform.
#[derive(Debug, Clone, Copy)]
pub struct GlyphMesher {
    curve_segments: u32,
}

impl Default for GlyphMesher {
    fn default() -> Self {
        Self::new(DEFAULT_CURVE_SEGMENTS)
    }
}

impl GlyphMesher {
    /// Mesher splitting every curve into `curve_segments` lines (at least 1).
    pub fn new(curve_segments: u32) -> Self {
        Self {
            curve_segments: curve_segments.max(1),
        }
    }

    pub fn curve_segments(&self) -> u32 {
        self.curve_segments
    }

    /// Build the mesh for `glyph`. `ch` only labels errors.
    pub fn mesh(&self, ch: char, glyph: &Glyph) -> Result<GlyphMesh> {
        if glyph.outline.is_empty() {
            return Ok(GlyphMesh::empty(glyph.advance));
        }

        let rings = ring::flatten(&glyph.outline, self.curve_segments);
        if rings.iter().flatten().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(Error::Tessellation {
                ch,
                reason: "non-finite outline coordinate".to_owned(),
            });
        }
        let mut tessellator = FillTessellator::new();
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for shape in ring::shapes(rings) {
            let buffers = tessellate_shape(&mut tessellator, &shape).map_err(|reason| {
                Error::Tessellation { ch, reason }
            })?;
            let base = vertices.len() as u32;
            vertices.extend(buffers.vertices);
            indices.extend(buffers.indices.iter().map(|i| i + base));
        }

        if vertices.is_empty() {
            return Ok(GlyphMesh::empty(glyph.advance));
        }
        Ok(GlyphMesh {
            vertices: Some(vertices),
            indices: Arc::from(indices),
            advance: glyph.advance,
        })
    }
}

/// Triangulate one boundary with its holes.
///
/// The boundary goes in first, then each hole, as closed sub-paths of one
/// path. Non-zero fill leaves the counter-clockwise holes empty.
fn tessellate_shape(
    tessellator: &mut FillTessellator,
    shape: &Shape,
) -> std::result::Result<VertexBuffers<Point, u32>, String> {
    let mut builder = Path::builder();
    for ring in std::iter::once(&shape.boundary).chain(&shape.holes) {
        let Some((&first, rest)) = ring.split_first() else {
            continue;
        };
        builder.begin(first);
        for &p in rest {
            builder.line_to(p);
        }
        builder.end(true);
    }
    let path = builder.build();

    let mut buffers = VertexBuffers::<Point, u32>::new();
    tessellator
        .tessellate_path(
            &path,
            &FillOptions::default().with_fill_rule(FillRule::NonZero),
            &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex<'_>| vertex.position()),
        )
        .map_err(|e| format!("{e:?}"))?;
    Ok(buffers)
}
