//! Book use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for core callers.
//! - Apply the partial-update rule before persisting.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::book::{Book, BookId, BookPatch, NewBook};
use crate::repo::book_repo::{BookRepository, RepoError, RepoResult};

/// Use-case service wrapper for book CRUD operations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores a new book and returns its assigned id.
    pub fn add_book(&self, book: &NewBook) -> RepoResult<BookId> {
        self.repo.create_book(book)
    }

    pub fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.repo.get_book(id)
    }

    pub fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.repo.list_books()
    }

    /// Merges `patch` into the stored record and writes the result.
    ///
    /// # Contract
    /// - Returns `RepoError::NotFound` without writing when `id` is absent.
    /// - Fields missing from `patch` keep their stored values.
    /// - Returns the record as persisted.
    pub fn apply_patch(&self, id: BookId, patch: &BookPatch) -> RepoResult<Book> {
        let current = self.repo.get_book(id)?.ok_or(RepoError::NotFound(id))?;
        let updated = patch.merge_into(&current);
        self.repo.update_book(&updated)?;
        Ok(updated)
    }

    pub fn delete_book(&self, id: BookId) -> RepoResult<()> {
        self.repo.delete_book(id)
    }
}
