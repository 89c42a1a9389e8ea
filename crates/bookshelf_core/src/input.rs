//! Parsing of raw shell input into typed catalog requests.
//!
//! # Responsibility
//! - Convert line-oriented user input into `BookId`, `NewBook` and
//!   `BookPatch` values.
//! - Report malformed input before anything reaches the catalog.
//!
//! # Invariants
//! - Empty optional input maps to `None` ("keep current" / "unknown").
//! - Free text keeps its content as typed; only numbers are trimmed.
//! - Parsing never touches storage.

use crate::model::book::{BookId, BookPatch, NewBook};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type InputResult<T> = Result<T, InputError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    InvalidId(String),
    InvalidYear(String),
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(raw) => write!(f, "`{raw}` is not a valid book id"),
            Self::InvalidYear(raw) => write!(f, "`{raw}` is not a valid year"),
        }
    }
}

impl Error for InputError {}

/// Parses a positive book id.
pub fn parse_book_id(raw: &str) -> InputResult<BookId> {
    let trimmed = raw.trim();
    match trimmed.parse::<BookId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(InputError::InvalidId(trimmed.to_string())),
    }
}

/// Parses an optional year; blank input yields `None`.
pub fn parse_optional_year(raw: &str) -> InputResult<Option<i64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| InputError::InvalidYear(trimmed.to_string()))
}

/// Returns the answer as typed, or `None` when nothing was entered.
///
/// Only the line terminator is removed, matching `parse_new_book`.
pub fn optional_text(raw: &str) -> Option<String> {
    let text = strip_line_end(raw);
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Builds a create request from raw add-book answers.
///
/// Title and author keep their inner content as typed; only the line
/// terminator is stripped.
pub fn parse_new_book(title: &str, author: &str, year: &str) -> InputResult<NewBook> {
    Ok(NewBook::new(
        strip_line_end(title),
        strip_line_end(author),
        parse_optional_year(year)?,
    ))
}

/// Builds an update request; empty answers keep the current value.
pub fn parse_patch(title: &str, author: &str, year: &str) -> InputResult<BookPatch> {
    Ok(BookPatch {
        title: optional_text(title),
        author: optional_text(author),
        year: parse_optional_year(year)?,
    })
}

fn strip_line_end(raw: &str) -> &str {
    raw.trim_end_matches(['\n', '\r'])
}
