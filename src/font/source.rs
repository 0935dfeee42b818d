//! Asynchronous font sources.
//!
//! A source is consumed by its single fetch. Closures returning a future are
//! sources, which keeps network or asset-pipeline loaders outside this crate.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use super::{GlyphSource, TtfFont};
use crate::error::Result;

/// Future produced by `FontSource::fetch`.
pub type FetchFuture = Pin<Box<dyn Future<Output = Result<Box<dyn GlyphSource>>>>>;

/// Something that can produce a parsed font, once.
pub trait FontSource {
    fn fetch(self: Box<Self>) -> FetchFuture;
}

impl<F, Fut> FontSource for F
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Box<dyn GlyphSource>>> + 'static,
{
    fn fetch(self: Box<Self>) -> FetchFuture {
        Box::pin((*self)())
    }
}

/// Font file on disk, read and parsed when fetched.
#[derive(Debug, Clone)]
pub struct FileFontSource {
    path: PathBuf,
    face_index: u32,
}

impl FileFontSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            face_index: 0,
        }
    }

    /// Select a face within a .ttc collection.
    #[must_use]
    pub fn with_face_index(mut self, face_index: u32) -> Self {
        self.face_index = face_index;
        self
    }
}

impl FontSource for FileFontSource {
    fn fetch(self: Box<Self>) -> FetchFuture {
        Box::pin(async move {
            let bytes = std::fs::read(&self.path)?;
            let font = TtfFont::from_bytes(bytes, self.face_index)?;
            log::debug!(
                "font_source: loaded {} ({} chars)",
                self.path.display(),
                font.char_count()
            );
            Ok(Box::new(font) as Box<dyn GlyphSource>)
        })
    }
}
