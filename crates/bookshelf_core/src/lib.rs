//! Core logic for the personal book catalog.
//! Storage, the partial-update rule and input parsing live here; the
//! interactive shell only wires user input to these APIs.

pub mod catalog;
pub mod db;
pub mod input;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use catalog::{BookCatalog, CatalogError, CatalogResult, WriteOutcome, DEFAULT_DB_FILE_NAME};
pub use input::{InputError, InputResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookId, BookPatch, NewBook};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use service::book_service::BookService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
