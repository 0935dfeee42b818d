//! Text renderer: lazy font fetching, glyph resolution, and run emission.
//!
//! Two phases per run. `fetch_fonts` (async) pulls in as many pending font
//! sources as the text needs, in order, each at most once. `render` (sync)
//! then turns the text into drawable primitives from already-fetched fonts.
//! Calls to `fetch_fonts` on one renderer must not overlap; `&mut self`
//! enforces that for safe callers.

mod glyphs;

pub use glyphs::{DrawablePrimitive, Glyphs, TextRun};

use std::collections::VecDeque;

use lyon::math::Point;

use crate::cache::GlyphCache;
use crate::config::TextConfig;
use crate::error::Result;
use crate::font::{FileFontSource, FontSource, GlyphSource};
use crate::mesh::GlyphMesher;

/// Characters below U+0020 are ignored entirely: never fetched, drawn, or
/// advanced over.
pub(crate) fn is_control(ch: char) -> bool {
    (ch as u32) < 0x20
}

/// Owns font sources, fetched fonts, and the glyph cache for one document.
pub struct TextRenderer {
    /// Sources not fetched yet, in priority order. `None` when the renderer
    /// was built without any source list at all.
    pending: Option<VecDeque<Box<dyn FontSource>>>,
    /// Fetched fonts, searched in fetch order.
    fonts: Vec<Box<dyn GlyphSource>>,
    cache: GlyphCache,
    /// Whether the fallback characters have had their fonts fetched.
    fallback_fetched: bool,
}

impl TextRenderer {
    /// Renderer over `sources`, fetched lazily in the given order.
    pub fn new(
        sources: impl IntoIterator<Item = Box<dyn FontSource>>,
        config: &TextConfig,
    ) -> Self {
        let mut renderer = Self::without_sources(config);
        renderer.pending = Some(sources.into_iter().collect());
        renderer
    }

    /// Renderer with no font source list. Nothing is ever renderable.
    pub fn without_sources(config: &TextConfig) -> Self {
        let mesher = GlyphMesher::new(config.effective_curve_segments());
        Self {
            pending: None,
            fonts: Vec::new(),
            cache: GlyphCache::new(mesher, &config.fallback_chars),
            fallback_fetched: false,
        }
    }

    /// Renderer over the font files listed in `config.fonts`.
    pub fn from_config(config: &TextConfig) -> Self {
        let sources = config
            .fonts
            .iter()
            .map(|path| Box::new(FileFontSource::new(path.clone())) as Box<dyn FontSource>);
        Self::new(sources, config)
    }

    /// Whether at least one font has been fetched.
    pub fn can_render(&self) -> bool {
        !self.fonts.is_empty()
    }

    pub fn fetched_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.as_ref().map_or(0, VecDeque::len)
    }

    pub fn cache(&self) -> &GlyphCache {
        &self.cache
    }

    /// Fetch whatever fonts `text` needs.
    ///
    /// Returns `true` iff every non-control character of `text` is covered by
    /// a fetched font. Characters that stay unresolved don't stop the scan.
    /// The first call also fetches for the fallback characters and settles
    /// the fallback mesh; until then misses render as nothing. Fetch errors
    /// propagate unchanged; the failed source is consumed all the same.
    #[allow(clippy::future_not_send)]
    pub async fn fetch_fonts(&mut self, text: &str) -> Result<bool> {
        if !self.fallback_fetched {
            self.fallback_fetched = true;
            let fetched = self.fetch_fallback_fonts().await;
            // Settled even on a failed fetch, against whatever did arrive.
            self.cache.settle_fallback(&self.fonts);
            fetched?;
        }

        let mut all_resolved = true;
        for ch in text.chars().filter(|&ch| !is_control(ch)) {
            if self.pending.is_none() && !self.covered(ch) {
                return Ok(false);
            }
            if !self.fetch_char(ch).await? {
                all_resolved = false;
            }
        }
        Ok(all_resolved)
    }

    /// `fetch_fonts` for synchronous callers.
    pub fn fetch_fonts_blocking(&mut self, text: &str) -> Result<bool> {
        pollster::block_on(self.fetch_fonts(text))
    }

    /// Primitives for `run`, starting at `position` and advancing it.
    ///
    /// Only fonts already fetched are consulted.
    pub fn render<'a>(&'a mut self, run: TextRun<'a>, position: &'a mut Point) -> Glyphs<'a> {
        let sources_pending = self.pending_count() > 0;
        Glyphs::new(run, &mut self.cache, &self.fonts, position, sources_pending)
    }

    /// Total advance of `text` at `size`, by the same rules as `render`.
    pub fn measure(&mut self, text: &str, size: f32) -> f32 {
        text.chars()
            .filter(|&ch| !is_control(ch))
            .filter_map(|ch| self.cache.get_or_create(ch, &self.fonts))
            .map(|mesh| mesh.advance() * size)
            .sum()
    }

    fn covered(&self, ch: char) -> bool {
        self.fonts.iter().any(|f| f.has_char(ch))
    }

    /// Fetch until one of the fallback characters is covered.
    #[allow(clippy::future_not_send)]
    async fn fetch_fallback_fonts(&mut self) -> Result<()> {
        let fallback_chars = self.cache.fallback_chars().to_vec();
        for ch in fallback_chars {
            if self.fetch_char(ch).await? {
                break;
            }
        }
        Ok(())
    }

    /// Make sure some fetched font covers `ch`, fetching pending sources one
    /// at a time until one does or none are left.
    #[allow(clippy::future_not_send)]
    async fn fetch_char(&mut self, ch: char) -> Result<bool> {
        if self.covered(ch) {
            return Ok(true);
        }
        let Some(pending) = self.pending.as_mut() else {
            return Ok(false);
        };
        while let Some(source) = pending.pop_front() {
            let index = self.fonts.len();
            log::debug!("text_renderer: fetching font source {index} for {ch:?}");
            let font = match source.fetch().await {
                Ok(font) => font,
                Err(e) => {
                    log::warn!("text_renderer: font source {index} failed: {e}");
                    return Err(e);
                }
            };
            let found = font.has_char(ch);
            self.fonts.push(font);
            if found {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
