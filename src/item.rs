//! Circulating catalog items.

use crate::index::{Circulating, Record};
use serde::Serialize;

/// Format-specific details of a catalog item.
///
/// The engine never looks inside these; they ride along for whoever renders
/// the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemKind {
    /// A printed book on a shelf.
    Physical,

    /// A downloadable document.
    Electronic { format: String, file_size_mb: u32 },

    /// A journal or magazine issue.
    Periodical {
        volume: u32,
        issue: u32,
        published: String,
    },
}

impl ItemKind {
    /// Short label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Physical => "book",
            ItemKind::Electronic { .. } => "ebook",
            ItemKind::Periodical { .. } => "journal",
        }
    }
}

/// A catalog item.
///
/// # Invariants
///
/// - `available == false` exactly while an open transaction references the item
/// - Only the engine flips availability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub kind: ItemKind,
    available: bool,
}

impl Item {
    /// Creates an item that starts on the shelf.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
        kind: ItemKind,
    ) -> Self {
        Item {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            category: category.into(),
            kind,
            available: true,
        }
    }

    /// Shorthand for a physical book with no extra details.
    pub fn book(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Item::new(id, title, author, category, ItemKind::Physical)
    }

    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

impl Record for Item {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Circulating for Item {
    fn is_available(&self) -> bool {
        self.available
    }
}
