//! Interactive menu loop over the book catalog.
//!
//! # Responsibility
//! - Prompt for menu choices and field values.
//! - Parse answers through `bookshelf_core::input` before calling the catalog.
//! - Render outcomes and errors as text, then keep looping.
//!
//! # Invariants
//! - No catalog or input error ends the loop; only `Exit` or end of input does.

use bookshelf_core::input::{parse_book_id, parse_new_book, parse_patch};
use bookshelf_core::{BookCatalog, BookId, InputError, WriteOutcome};
use log::{info, warn};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    View,
    Update,
    Delete,
    Exit,
}

impl MenuChoice {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::View),
            "3" => Some(Self::Update),
            "4" => Some(Self::Delete),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Shell<R, W> {
    catalog: BookCatalog,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(catalog: BookCatalog, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    /// Runs the menu loop until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        info!("event=shell_start module=shell status=ok");
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let flow = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Add) => self.add_book()?,
                Some(MenuChoice::View) => self.view_books()?,
                Some(MenuChoice::Update) => self.update_book()?,
                Some(MenuChoice::Delete) => self.delete_book()?,
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Goodbye!")?;
                    Flow::Exit
                }
                None => {
                    writeln!(self.output, "Invalid choice! Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }
        info!("event=shell_stop module=shell status=ok");
        self.output.flush()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Personal Library Manager")?;
        writeln!(self.output, "1 Add a Book")?;
        writeln!(self.output, "2 View All Books")?;
        writeln!(self.output, "3 Update a Book")?;
        writeln!(self.output, "4 Delete a Book")?;
        writeln!(self.output, "5 Exit")
    }

    fn add_book(&mut self) -> io::Result<Flow> {
        let Some(title) = self.prompt("Enter book title: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(author) = self.prompt("Enter author name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(year) = self.prompt("Enter publication year (optional): ")? else {
            return Ok(Flow::Exit);
        };

        let book = match parse_new_book(&title, &author, &year) {
            Ok(book) => book,
            Err(err) => return self.report_input_error(&err),
        };

        match self.catalog.add(&book) {
            Ok(id) => writeln!(
                self.output,
                "Book '{}' added with id {id}.",
                book.title
            )?,
            Err(err) => writeln!(self.output, "Error adding book: {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn view_books(&mut self) -> io::Result<Flow> {
        match self.catalog.list() {
            Ok(books) if books.is_empty() => writeln!(self.output, "No books found.")?,
            Ok(books) => {
                writeln!(self.output)?;
                writeln!(self.output, "Your Library:")?;
                for book in &books {
                    writeln!(self.output, " {book}")?;
                }
            }
            Err(err) => writeln!(self.output, "Error listing books: {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn update_book(&mut self) -> io::Result<Flow> {
        let id = match self.prompt_id("Enter book ID to update: ")? {
            Some(Ok(id)) => id,
            Some(Err(err)) => return self.report_input_error(&err),
            None => return Ok(Flow::Exit),
        };

        match self.catalog.get(id) {
            Ok(Some(book)) => writeln!(self.output, "Current: {book}")?,
            Ok(None) => {
                writeln!(self.output, "Book not found.")?;
                return Ok(Flow::Continue);
            }
            Err(err) => {
                writeln!(self.output, "Error updating book: {err}")?;
                return Ok(Flow::Continue);
            }
        }

        let Some(title) = self.prompt("New title (press enter to keep current): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(author) = self.prompt("New author (press enter to keep current): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(year) = self.prompt("New year (press enter to keep current): ")? else {
            return Ok(Flow::Exit);
        };

        let patch = match parse_patch(&title, &author, &year) {
            Ok(patch) => patch,
            Err(err) => return self.report_input_error(&err),
        };

        match self.catalog.update(id, &patch) {
            Ok(WriteOutcome::Applied) => writeln!(self.output, "Book updated successfully!")?,
            Ok(WriteOutcome::NotFound) => writeln!(self.output, "Book not found.")?,
            Err(err) => writeln!(self.output, "Error updating book: {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn delete_book(&mut self) -> io::Result<Flow> {
        let id = match self.prompt_id("Enter book ID to delete: ")? {
            Some(Ok(id)) => id,
            Some(Err(err)) => return self.report_input_error(&err),
            None => return Ok(Flow::Exit),
        };

        match self.catalog.delete(id) {
            Ok(WriteOutcome::Applied) => writeln!(self.output, "Book deleted successfully!")?,
            Ok(WriteOutcome::NotFound) => writeln!(self.output, "Book not found.")?,
            Err(err) => writeln!(self.output, "Error deleting book: {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn report_input_error(&mut self, err: &InputError) -> io::Result<Flow> {
        warn!("event=input_rejected module=shell status=error error={err}");
        writeln!(self.output, "Invalid input: {err}")?;
        Ok(Flow::Continue)
    }

    fn prompt_id(&mut self, label: &str) -> io::Result<Option<Result<BookId, InputError>>> {
        Ok(self.prompt(label)?.map(|raw| parse_book_id(&raw)))
    }

    /// Writes `label` and reads one line. `None` means input has ended.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
