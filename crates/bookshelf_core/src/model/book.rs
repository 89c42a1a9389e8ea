//! Book domain model.
//!
//! # Responsibility
//! - Define the stored `Book` record and its create/update inputs.
//! - Own the partial-update merge rule.
//!
//! # Invariants
//! - `id` is assigned by storage, strictly increasing, never reused.
//! - `title` and `author` are always present (possibly empty).

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier.
pub type BookId = i64;

/// One persisted catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Publication year, when known.
    pub year: Option<i64>,
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {} by {} (", self.id, self.title, self.author)?;
        match self.year {
            Some(year) => write!(f, "{year})"),
            None => write!(f, "unknown)"),
        }
    }
}

/// Field values for a book that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: Option<i64>,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: Option<i64>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }

    /// Attaches the id assigned by storage.
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            year: self.year,
        }
    }
}

/// Replacement values for an update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i64>,
}

impl BookPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }

    /// Produces the record that results from applying this patch to `current`.
    ///
    /// Each field is decided independently. An empty title/author or a year
    /// of `0` is treated the same as `None` and keeps the stored value, so
    /// this interface cannot clear a field or store year `0`.
    pub fn merge_into(&self, current: &Book) -> Book {
        Book {
            id: current.id,
            title: self
                .effective_title()
                .map_or_else(|| current.title.clone(), str::to_owned),
            author: self
                .effective_author()
                .map_or_else(|| current.author.clone(), str::to_owned),
            year: self.effective_year().or(current.year),
        }
    }

    fn effective_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|value| !value.is_empty())
    }

    fn effective_author(&self) -> Option<&str> {
        self.author.as_deref().filter(|value| !value.is_empty())
    }

    fn effective_year(&self) -> Option<i64> {
        self.year.filter(|value| *value != 0)
    }
}
