#![forbid(unsafe_code)]

//! Content resolution: opaque handles to pixels.
//!
//! The engine carries [`ContentRef`] handles and never looks inside them.
//! A [`ContentSource`] is the renderer's side of that bargain, mapping each
//! handle to an RGBA raster on demand. [`MemorySource`] is the batteries-
//! included implementation backed by a hash map; applications with asset
//! pipelines implement the trait themselves.

use ahash::AHashMap;
use decal_core::ContentRef;

use crate::error::RenderError;
use crate::pixmap::Pixmap;

/// Resolves content handles to pixel data.
///
/// `resolve` takes `&mut self` so implementations may lazily load and
/// cache. Returning [`RenderError::MissingContent`] aborts the export that
/// requested the handle.
pub trait ContentSource {
    /// Pixels for `content`, or an error if the handle is unknown.
    fn resolve(&mut self, content: &ContentRef) -> Result<Pixmap, RenderError>;
}

/// An in-memory content table.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: AHashMap<ContentRef, Pixmap>,
}

impl MemorySource {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register pixels for a handle, replacing any previous entry.
    pub fn insert(&mut self, content: impl Into<ContentRef>, pixels: Pixmap) {
        let content = content.into();
        tracing::debug!(target: "decal.render", content = %content, "content registered");
        self.entries.insert(content, pixels);
    }

    /// Register a handle from encoded image bytes.
    pub fn insert_encoded(
        &mut self,
        content: impl Into<ContentRef>,
        bytes: &[u8],
    ) -> Result<(), RenderError> {
        let pixels = Pixmap::from_bytes(bytes)?;
        self.insert(content, pixels);
        Ok(())
    }

    /// Register a solid-color rectangle; handy for fixtures and demos.
    pub fn insert_solid(
        &mut self,
        content: impl Into<ContentRef>,
        width: u32,
        height: u32,
        rgba: [u8; 4],
    ) {
        self.insert(content, Pixmap::new(width, height, rgba));
    }

    /// Whether a handle is registered.
    #[must_use]
    pub fn contains(&self, content: &ContentRef) -> bool {
        self.entries.contains_key(content)
    }

    /// Number of registered handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContentSource for MemorySource {
    fn resolve(&mut self, content: &ContentRef) -> Result<Pixmap, RenderError> {
        self.entries
            .get(content)
            .cloned()
            .ok_or_else(|| RenderError::MissingContent(content.clone()))
    }
}
