//! Per-renderer glyph mesh cache.
//!
//! Meshes are built on first use and kept for the renderer's lifetime. A
//! character no fetched font covers is not cached, so a font fetched later
//! can still supply it; until then the shared fallback mesh stands in. A
//! character whose outline fails to triangulate is remembered and goes
//! straight to the fallback.

use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::Result;
use crate::font::{Glyph, GlyphSource};
use crate::mesh::{GlyphMesh, GlyphMesher};

/// Char-to-mesh memo plus the substitute mesh for unrenderable characters.
pub struct GlyphCache {
    meshes: HashMap<char, Arc<GlyphMesh>>,
    /// Characters whose outline the mesher rejected.
    failed: HashSet<char>,
    /// Settled at most once, by `settle_fallback`. Inner `None`: no fallback
    /// character was renderable.
    fallback: OnceCell<Option<Arc<GlyphMesh>>>,
    fallback_chars: Vec<char>,
    mesher: GlyphMesher,
}

impl GlyphCache {
    /// Empty cache. `fallback_chars` are tried in order for the fallback mesh.
    pub fn new(mesher: GlyphMesher, fallback_chars: &str) -> Self {
        Self {
            meshes: HashMap::new(),
            failed: HashSet::new(),
            fallback: OnceCell::new(),
            fallback_chars: fallback_chars.chars().collect(),
            mesher,
        }
    }

    /// Cached mesh for `ch`, building it from `fonts` on a miss.
    ///
    /// Falls back to the fallback mesh when no font covers `ch` or its
    /// outline fails to triangulate. `None` if the fallback hasn't been
    /// settled yet or there is none; this never settles it.
    pub fn get_or_create(
        &mut self,
        ch: char,
        fonts: &[Box<dyn GlyphSource>],
    ) -> Option<Arc<GlyphMesh>> {
        if let Some(mesh) = self.meshes.get(&ch) {
            return Some(Arc::clone(mesh));
        }
        if self.failed.contains(&ch) {
            return self.fallback().cloned();
        }
        match self.build(ch, fonts) {
            Ok(Some(mesh)) => {
                self.meshes.insert(ch, Arc::clone(&mesh));
                Some(mesh)
            }
            Ok(None) => self.fallback().cloned(),
            Err(e) => {
                log::warn!("glyph_cache: {e}");
                self.failed.insert(ch);
                self.fallback().cloned()
            }
        }
    }

    /// Already-built mesh for `ch`, without building anything.
    pub fn get(&self, ch: char) -> Option<&Arc<GlyphMesh>> {
        self.meshes.get(&ch)
    }

    /// The fallback mesh, if settled and renderable.
    pub fn fallback(&self) -> Option<&Arc<GlyphMesh>> {
        self.fallback.get().and_then(Option::as_ref)
    }

    pub fn fallback_settled(&self) -> bool {
        self.fallback.get().is_some()
    }

    /// Resolve the fallback mesh against `fonts`, on first call only.
    ///
    /// Later calls return the first answer even if `fonts` has grown since.
    pub fn settle_fallback(&self, fonts: &[Box<dyn GlyphSource>]) -> Option<&Arc<GlyphMesh>> {
        self.fallback
            .get_or_init(|| {
                let found = self.fallback_chars.iter().find_map(|&ch| {
                    match self.build(ch, fonts) {
                        Ok(mesh) => mesh.map(|mesh| (ch, mesh)),
                        Err(e) => {
                            log::warn!("glyph_cache: {e}");
                            None
                        }
                    }
                });
                match found {
                    Some((ch, mesh)) => {
                        log::debug!("glyph_cache: using {ch:?} as fallback glyph");
                        Some(mesh)
                    }
                    None => {
                        log::info!("glyph_cache: no fallback glyph available");
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Characters tried for the fallback mesh, in priority order.
    pub fn fallback_chars(&self) -> &[char] {
        &self.fallback_chars
    }

    /// Number of cached character meshes (the fallback not included).
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// `Ok(None)` when no font covers `ch`.
    fn build(&self, ch: char, fonts: &[Box<dyn GlyphSource>]) -> Result<Option<Arc<GlyphMesh>>> {
        let Some(glyph) = resolve(ch, fonts) else {
            return Ok(None);
        };
        Ok(Some(Arc::new(self.mesher.mesh(ch, &glyph)?)))
    }
}

/// Glyph for `ch` from the first font in `fonts` that covers it.
pub fn resolve(ch: char, fonts: &[Box<dyn GlyphSource>]) -> Option<Glyph> {
    fonts.iter().find(|f| f.has_char(ch))?.glyph(ch)
}
