//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD statements over the `books` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `list_books` returns every stored row; ids are not re-validated on read.
//! - Update/delete report `NotFound` when no row was affected.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::book::{Book, BookId, NewBook};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOKS_TABLE: &str = "books";
const BOOK_COLUMNS: &[&str] = &["id", "title", "author", "year"];

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    year
FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(BookId),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind required {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for book CRUD operations.
pub trait BookRepository {
    fn create_book(&self, book: &NewBook) -> RepoResult<BookId>;
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Returns every stored book in ascending `id` order.
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Overwrites title/author/year of the row matching `book.id`.
    fn update_book(&self, book: &Book) -> RepoResult<()>;
    fn delete_book(&self, id: BookId) -> RepoResult<()>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a connection with the schema applied.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is behind this binary.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `books`
    ///   table does not have the expected shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn create_book(&self, book: &NewBook) -> RepoResult<BookId> {
        self.conn.execute(
            "INSERT INTO books (title, author, year) VALUES (?1, ?2, ?3);",
            params![book.title.as_str(), book.author.as_str(), book.year],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn update_book(&self, book: &Book) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE books
             SET
                title = ?1,
                author = ?2,
                year = ?3
             WHERE id = ?4;",
            params![book.title.as_str(), book.author.as_str(), book.year, book.id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(book.id));
        }

        Ok(())
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        year: row.get("year")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [BOOKS_TABLE],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .is_some();
    if !table_exists {
        return Err(RepoError::MissingRequiredTable(BOOKS_TABLE));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({BOOKS_TABLE});"))?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;
    for &column in BOOK_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: BOOKS_TABLE,
                column,
            });
        }
    }

    Ok(())
}
