//! Book catalog lookup.

use crate::error::{Result, StandingError};
use crate::money::Money;
use crate::record::{read_entries, BookEntry, BookRow};
use log::debug;
use std::collections::HashMap;
use std::io::Read;

/// Descriptive record of one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: String,
    pub name: String,
    pub author: String,
    pub price: Money,
}

/// All books that can be borrowed, keyed by book id.
///
/// Built once and read-only afterwards. A later entry with a duplicate id
/// replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: HashMap<String, BookRecord>,
}

impl Catalog {
    /// Builds a catalog from entries in source order.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = BookEntry>,
    {
        let books = entries
            .into_iter()
            .map(|entry| {
                (
                    entry.book_id.clone(),
                    BookRecord {
                        id: entry.book_id,
                        name: entry.name,
                        author: entry.author,
                        price: entry.price,
                    },
                )
            })
            .collect();
        Catalog { books }
    }

    /// Reads `bookId#name#author#price` lines.
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        let catalog = Self::from_entries(read_entries::<BookRow, _>(reader)?);
        debug!("Catalog loaded with {} books", catalog.len());
        Ok(catalog)
    }

    /// Looks up a book, failing with `NotFound` if the id is unknown.
    pub fn lookup(&self, book_id: &str) -> Result<&BookRecord> {
        self.books
            .get(book_id)
            .ok_or_else(|| StandingError::NotFound {
                book_id: book_id.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
