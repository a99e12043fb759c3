//! Catalog records for CSV loading.

use crate::borrower::Borrower;
use crate::item::{Item, ItemKind};
use serde::Deserialize;

/// Raw catalog row as read from CSV.
///
/// One header covers every record type; columns a type does not use are left
/// empty. For members, `name` is the person's name; for items it is the title.
#[derive(Debug, Deserialize)]
pub struct CatalogRecord {
    /// Record type: book, ebook, journal, member
    #[serde(rename = "type")]
    pub record_type: String,

    pub id: String,

    pub name: String,

    pub author: Option<String>,
    pub category: Option<String>,

    /// ebook only
    pub format: Option<String>,
    pub size_mb: Option<u32>,

    /// journal only
    pub volume: Option<u32>,
    pub issue: Option<u32>,
    pub published: Option<String>,

    /// member only
    pub contact: Option<String>,
    pub max_loans: Option<usize>,
}

/// A parsed catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEntry {
    Item(Item),
    Borrower(Borrower),
}

impl CatalogRecord {
    /// Parses the raw row into an item or a borrower.
    ///
    /// Returns `None` for an unknown type, an empty id, or a missing
    /// type-specific field (ebook format/size, journal volume/issue).
    /// Members without `max_loans` get `default_max_loans`.
    pub fn parse(&self, default_max_loans: usize) -> Option<CatalogEntry> {
        let id = self.id.trim();
        if id.is_empty() {
            return None;
        }
        let name = self.name.trim();

        let kind = match self.record_type.trim().to_lowercase().as_str() {
            "member" => {
                return Some(CatalogEntry::Borrower(Borrower::with_limit(
                    id,
                    name,
                    text(&self.contact),
                    self.max_loans.unwrap_or(default_max_loans),
                )));
            }
            "book" => ItemKind::Physical,
            "ebook" => ItemKind::Electronic {
                format: non_empty(&self.format)?,
                file_size_mb: self.size_mb?,
            },
            "journal" => ItemKind::Periodical {
                volume: self.volume?,
                issue: self.issue?,
                published: text(&self.published),
            },
            _ => return None,
        };

        Some(CatalogEntry::Item(Item::new(
            id,
            name,
            text(&self.author),
            text(&self.category),
            kind,
        )))
    }
}

fn text(field: &Option<String>) -> String {
    field.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn non_empty(field: &Option<String>) -> Option<String> {
    Some(text(field)).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{Circulating, Record};

    fn blank(record_type: &str, id: &str, name: &str) -> CatalogRecord {
        CatalogRecord {
            record_type: record_type.to_string(),
            id: id.to_string(),
            name: name.to_string(),
            author: None,
            category: None,
            format: None,
            size_mb: None,
            volume: None,
            issue: None,
            published: None,
            contact: None,
            max_loans: None,
        }
    }

    #[test]
    fn test_parse_book() {
        let mut record = blank("book", "B001", "Design Patterns");
        record.author = Some(" Erich Gamma ".to_string());
        record.category = Some("Software Engineering".to_string());

        match record.parse(3).unwrap() {
            CatalogEntry::Item(item) => {
                assert_eq!(item.id(), "B001");
                assert_eq!(item.author, "Erich Gamma");
                assert_eq!(item.kind, ItemKind::Physical);
                assert!(item.is_available());
            }
            other => panic!("Expected item, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_ebook_requires_format() {
        let mut record = blank("ebook", "EB001", "Clean Code");
        record.size_mb = Some(15);
        assert!(record.parse(3).is_none());

        record.format = Some("PDF".to_string());
        match record.parse(3).unwrap() {
            CatalogEntry::Item(item) => assert_eq!(
                item.kind,
                ItemKind::Electronic {
                    format: "PDF".to_string(),
                    file_size_mb: 15
                }
            ),
            other => panic!("Expected item, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_journal() {
        let mut record = blank("journal", "J001", "IEEE Software");
        record.volume = Some(38);
        record.issue = Some(2);
        record.published = Some("March 2023".to_string());

        match record.parse(3).unwrap() {
            CatalogEntry::Item(item) => assert_eq!(item.kind.label(), "journal"),
            other => panic!("Expected item, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_member_limits() {
        let record = blank("member", "M001", "John Doe");
        match record.parse(3).unwrap() {
            CatalogEntry::Borrower(b) => assert_eq!(b.max_loans(), 3),
            other => panic!("Expected borrower, got {:?}", other),
        }

        let mut record = blank("MEMBER", "M002", "Jane Smith");
        record.max_loans = Some(1);
        record.contact = Some("jane@example.com".to_string());
        match record.parse(3).unwrap() {
            CatalogEntry::Borrower(b) => {
                assert_eq!(b.max_loans(), 1);
                assert_eq!(b.contact, "jane@example.com");
            }
            other => panic!("Expected borrower, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_type_and_empty_id() {
        assert!(blank("librarian", "L001", "Alice").parse(3).is_none());
        assert!(blank("book", "  ", "Untitled").parse(3).is_none());
    }
}
