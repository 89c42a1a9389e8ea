//! Book catalog store.
//!
//! # Responsibility
//! - Own the location of the catalog database file.
//! - Run every public operation as one self-contained unit of work:
//!   open, begin, execute, commit, release.
//! - Translate persistence failures into catalog-level outcomes.
//!
//! # Invariants
//! - No connection outlives the operation that opened it.
//! - A failed operation leaves no partial write behind (rollback on drop).
//! - A missing id is reported as `WriteOutcome::NotFound`, never as an error.

use crate::db::{open_db, DbError};
use crate::model::book::{Book, BookId, BookPatch, NewBook};
use crate::repo::book_repo::{RepoError, RepoResult, SqliteBookRepository};
use crate::service::book_service::BookService;
use log::{debug, error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File name of the catalog database, relative to the working directory.
pub const DEFAULT_DB_FILE_NAME: &str = "library.db";

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result of a write addressed at one existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    NotFound,
}

/// Failure of a catalog operation.
#[derive(Debug)]
pub enum CatalogError {
    /// The database could not be opened or its schema applied.
    StorageUnavailable(DbError),
    /// The `books` table exists but does not have the expected columns.
    IncompatibleSchema(RepoError),
    /// A statement or commit failed after the database was opened.
    Storage(RepoError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "catalog storage unavailable: {err}"),
            Self::IncompatibleSchema(err) => write!(f, "catalog schema is incompatible: {err}"),
            Self::Storage(err) => write!(f, "catalog storage error: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
            Self::IncompatibleSchema(err) | Self::Storage(err) => Some(err),
        }
    }
}

impl From<RepoError> for CatalogError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(value.into())
    }
}

/// File-backed book catalog.
#[derive(Debug, Clone)]
pub struct BookCatalog {
    path: PathBuf,
}

impl BookCatalog {
    /// Creates a catalog handle for `path`. Performs no I/O.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Catalog at `library.db` in the current working directory.
    pub fn default_location() -> Self {
        Self::new(DEFAULT_DB_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensures the `books` table exists with the expected columns. Safe to
    /// call repeatedly.
    ///
    /// # Errors
    /// - `StorageUnavailable` when the file cannot be opened or written.
    /// - `IncompatibleSchema` when a pre-existing `books` table lacks a
    ///   required column.
    pub fn initialize(&self) -> CatalogResult<()> {
        let started_at = Instant::now();
        let conn = self.connect()?;
        if let Err(err) = SqliteBookRepository::try_new(&conn) {
            error!(
                "event=catalog_init module=catalog status=error duration_ms={} error_code=schema_mismatch error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(CatalogError::IncompatibleSchema(err));
        }
        info!(
            "event=catalog_init module=catalog status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    /// Inserts one book and returns its assigned id.
    pub fn create(&self, title: &str, author: &str, year: Option<i64>) -> CatalogResult<BookId> {
        self.add(&NewBook::new(title, author, year))
    }

    /// Inserts one prepared book and returns its assigned id.
    pub fn add(&self, book: &NewBook) -> CatalogResult<BookId> {
        let id = self.run("book_create", |service| service.add_book(book))?;
        info!("event=book_create module=catalog status=ok book_id={id}");
        Ok(id)
    }

    /// Returns all books in ascending id order.
    pub fn list(&self) -> CatalogResult<Vec<Book>> {
        self.run("book_list", |service| service.list_books())
    }

    pub fn get(&self, id: BookId) -> CatalogResult<Option<Book>> {
        self.run("book_get", |service| service.get_book(id))
    }

    /// Applies `patch` to the book with `id`.
    ///
    /// Fields absent from `patch` (or empty/zero, see
    /// [`BookPatch::merge_into`]) keep their stored values.
    pub fn update(&self, id: BookId, patch: &BookPatch) -> CatalogResult<WriteOutcome> {
        let outcome = self.run("book_update", |service| {
            outcome_of(service.apply_patch(id, patch).map(|_| ()))
        })?;
        info!("event=book_update module=catalog status=ok book_id={id} outcome={outcome:?}");
        Ok(outcome)
    }

    /// Permanently removes the book with `id`.
    pub fn delete(&self, id: BookId) -> CatalogResult<WriteOutcome> {
        let outcome = self.run("book_delete", |service| outcome_of(service.delete_book(id)))?;
        info!("event=book_delete module=catalog status=ok book_id={id} outcome={outcome:?}");
        Ok(outcome)
    }

    fn connect(&self) -> CatalogResult<Connection> {
        open_db(&self.path).map_err(CatalogError::StorageUnavailable)
    }

    fn run<T>(
        &self,
        event: &'static str,
        op: impl FnOnce(&BookService<SqliteBookRepository<'_>>) -> RepoResult<T>,
    ) -> CatalogResult<T> {
        let started_at = Instant::now();
        let result = self.run_in_transaction(op);
        match &result {
            Ok(_) => debug!(
                "event={} module=catalog status=ok duration_ms={}",
                event,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event={} module=catalog status=error duration_ms={} error={}",
                event,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn run_in_transaction<T>(
        &self,
        op: impl FnOnce(&BookService<SqliteBookRepository<'_>>) -> RepoResult<T>,
    ) -> CatalogResult<T> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let value = {
            let service = BookService::new(SqliteBookRepository::try_new(&tx)?);
            op(&service)?
        };
        tx.commit()?;
        Ok(value)
    }
}

fn outcome_of(result: RepoResult<()>) -> RepoResult<WriteOutcome> {
    match result {
        Ok(()) => Ok(WriteOutcome::Applied),
        Err(RepoError::NotFound(_)) => Ok(WriteOutcome::NotFound),
        Err(err) => Err(err),
    }
}
