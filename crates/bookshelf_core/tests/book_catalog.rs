use bookshelf_core::{
    Book, BookCatalog, BookPatch, CatalogError, NewBook, RepoError, WriteOutcome,
    DEFAULT_DB_FILE_NAME,
};
use rusqlite::Connection;
use tempfile::TempDir;

fn temp_catalog() -> (TempDir, BookCatalog) {
    let dir = tempfile::tempdir().unwrap();
    let catalog = BookCatalog::new(dir.path().join(DEFAULT_DB_FILE_NAME));
    catalog.initialize().unwrap();
    (dir, catalog)
}

fn book(id: i64, title: &str, author: &str, year: Option<i64>) -> Book {
    NewBook::new(title, author, year).into_book(id)
}

#[test]
fn initialize_is_idempotent() {
    let (_dir, catalog) = temp_catalog();
    catalog.initialize().unwrap();
    catalog.initialize().unwrap();

    let conn = Connection::open(catalog.path()).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'books';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 1);
}

#[test]
fn initialize_reports_storage_unavailable_for_unopenable_path() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = BookCatalog::new(dir.path().join("no-such-dir").join(DEFAULT_DB_FILE_NAME));

    let err = catalog.initialize().unwrap_err();
    assert!(matches!(err, CatalogError::StorageUnavailable(_)));

    let err = catalog.list().unwrap_err();
    assert!(matches!(err, CatalogError::StorageUnavailable(_)));
}

#[test]
fn initialize_rejects_existing_books_table_missing_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_DB_FILE_NAME);
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE books (id INTEGER PRIMARY KEY, title TEXT NOT NULL);")
        .unwrap();
    drop(conn);

    let catalog = BookCatalog::new(path);
    let err = catalog.initialize().unwrap_err();

    assert!(matches!(
        err,
        CatalogError::IncompatibleSchema(RepoError::MissingRequiredColumn {
            table: "books",
            column: "author"
        })
    ));
}

#[test]
fn create_reports_storage_error_when_insert_is_aborted() {
    let (_dir, catalog) = temp_catalog();
    let conn = Connection::open(catalog.path()).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER deny_insert BEFORE INSERT ON books
         BEGIN
            SELECT RAISE(ABORT, 'deny');
         END;",
    )
    .unwrap();
    drop(conn);

    let err = catalog.create("Dune", "Herbert", Some(1965)).unwrap_err();

    assert!(matches!(err, CatalogError::Storage(_)));
    assert!(catalog.list().unwrap().is_empty());
}

#[test]
fn default_location_uses_library_db() {
    let catalog = BookCatalog::default_location();
    assert_eq!(catalog.path(), std::path::Path::new("library.db"));
}

#[test]
fn list_after_creates_returns_inserted_books_in_id_order() {
    let (_dir, catalog) = temp_catalog();
    assert!(catalog.list().unwrap().is_empty());

    let inputs = [
        ("Dune", "Herbert", Some(1965)),
        ("1984", "Orwell", Some(1949)),
        ("Beowulf", "Unknown", None),
    ];
    let ids: Vec<_> = inputs
        .iter()
        .map(|(title, author, year)| catalog.create(title, author, *year).unwrap())
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

    let expected: Vec<_> = ids
        .iter()
        .zip(inputs.iter())
        .map(|(id, (title, author, year))| book(*id, title, author, *year))
        .collect();
    assert_eq!(catalog.list().unwrap(), expected);
}

#[test]
fn update_with_empty_patch_leaves_record_unchanged() {
    let (_dir, catalog) = temp_catalog();
    let id = catalog.create("Dune", "Herbert", Some(1965)).unwrap();

    let outcome = catalog.update(id, &BookPatch::default()).unwrap();

    assert_eq!(outcome, WriteOutcome::Applied);
    assert_eq!(
        catalog.get(id).unwrap(),
        Some(book(id, "Dune", "Herbert", Some(1965)))
    );
}

#[test]
fn update_title_only_changes_title() {
    let (_dir, catalog) = temp_catalog();
    let id = catalog.create("Dune", "Herbert", Some(1965)).unwrap();

    let outcome = catalog
        .update(id, &BookPatch::default().title("X"))
        .unwrap();

    assert_eq!(outcome, WriteOutcome::Applied);
    assert_eq!(
        catalog.get(id).unwrap(),
        Some(book(id, "X", "Herbert", Some(1965)))
    );
}

#[test]
fn update_ignores_empty_text_and_zero_year() {
    let (_dir, catalog) = temp_catalog();
    let id = catalog.create("Dune", "Herbert", Some(1965)).unwrap();

    let patch = BookPatch {
        title: Some(String::new()),
        author: Some("Frank Herbert".to_string()),
        year: Some(0),
    };
    catalog.update(id, &patch).unwrap();

    assert_eq!(
        catalog.get(id).unwrap(),
        Some(book(id, "Dune", "Frank Herbert", Some(1965)))
    );
}

#[test]
fn update_missing_id_returns_not_found_and_changes_nothing() {
    let (_dir, catalog) = temp_catalog();
    catalog.create("Dune", "Herbert", Some(1965)).unwrap();
    let before = catalog.list().unwrap();

    let outcome = catalog
        .update(404, &BookPatch::default().title("ghost").year(2000))
        .unwrap();

    assert_eq!(outcome, WriteOutcome::NotFound);
    assert_eq!(catalog.list().unwrap(), before);
}

#[test]
fn delete_existing_removes_only_that_record() {
    let (_dir, catalog) = temp_catalog();
    let first = catalog.create("Dune", "Herbert", Some(1965)).unwrap();
    let second = catalog.create("1984", "Orwell", Some(1949)).unwrap();
    let third = catalog.create("Emma", "Austen", Some(1815)).unwrap();

    assert_eq!(catalog.delete(second).unwrap(), WriteOutcome::Applied);

    let ids: Vec<_> = catalog.list().unwrap().into_iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![first, third]);
    assert!(catalog.get(second).unwrap().is_none());
}

#[test]
fn delete_missing_returns_not_found_and_changes_nothing() {
    let (_dir, catalog) = temp_catalog();
    catalog.create("Dune", "Herbert", Some(1965)).unwrap();
    let before = catalog.list().unwrap();

    assert_eq!(catalog.delete(77).unwrap(), WriteOutcome::NotFound);
    assert_eq!(catalog.list().unwrap(), before);
}

#[test]
fn ids_are_not_reused_after_deleting_newest() {
    let (_dir, catalog) = temp_catalog();
    catalog.create("a", "a", None).unwrap();
    let newest = catalog.create("b", "b", None).unwrap();
    catalog.delete(newest).unwrap();

    let next = catalog.create("c", "c", None).unwrap();
    assert!(next > newest);
}

#[test]
fn data_survives_reopening_the_catalog() {
    let (dir, catalog) = temp_catalog();
    let id = catalog.create("Dune", "Herbert", Some(1965)).unwrap();
    drop(catalog);

    let reopened = BookCatalog::new(dir.path().join(DEFAULT_DB_FILE_NAME));
    reopened.initialize().unwrap();
    assert_eq!(
        reopened.list().unwrap(),
        vec![book(id, "Dune", "Herbert", Some(1965))]
    );
}

#[test]
fn dune_and_1984_scenario() {
    let (_dir, catalog) = temp_catalog();

    assert_eq!(catalog.create("Dune", "Herbert", Some(1965)).unwrap(), 1);
    assert_eq!(catalog.create("1984", "Orwell", Some(1949)).unwrap(), 2);
    assert_eq!(
        catalog.list().unwrap(),
        vec![
            book(1, "Dune", "Herbert", Some(1965)),
            book(2, "1984", "Orwell", Some(1949)),
        ]
    );

    assert_eq!(
        catalog.update(1, &BookPatch::default().year(2021)).unwrap(),
        WriteOutcome::Applied
    );
    assert_eq!(
        catalog.list().unwrap()[0],
        book(1, "Dune", "Herbert", Some(2021))
    );

    assert_eq!(catalog.delete(2).unwrap(), WriteOutcome::Applied);
    assert_eq!(
        catalog.list().unwrap(),
        vec![book(1, "Dune", "Herbert", Some(2021))]
    );
    assert_eq!(catalog.delete(2).unwrap(), WriteOutcome::NotFound);
}
