#![forbid(unsafe_code)]

//! The decoration catalog offered by a picker.
//!
//! Pure data; the picker UI itself lives outside this crate. The default
//! catalog carries the three classic stickers.

use serde::{Deserialize, Serialize};

use crate::overlay::ContentRef;

/// One pickable decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub content: ContentRef,
}

impl CatalogEntry {
    /// Create an entry whose content handle is derived from its name.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            content: ContentRef::new(format!("sticker:{name}")),
        }
    }
}

/// An ordered list of pickable decorations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from explicit entries.
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// All entries in picker order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Look up an entry's content by name.
    #[must_use]
    pub fn content(&self, name: &str) -> Option<&ContentRef> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.content)
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            CatalogEntry::named("heart"),
            CatalogEntry::named("star"),
            CatalogEntry::named("unicorn"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_three_stickers() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 3);
        let names: Vec<&str> = catalog.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["heart", "star", "unicorn"]);
    }

    #[test]
    fn content_lookup_by_name() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.content("star").map(ContentRef::as_str),
            Some("sticker:star")
        );
        assert!(catalog.content("dragon").is_none());
    }
}
