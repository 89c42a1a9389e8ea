//! Book catalog domain model.
//!
//! # Responsibility
//! - Define the record shapes shared by repository, service and shell.
//!
//! # Invariants
//! - Every stored book is identified by a store-assigned `BookId`.
//! - Deletion is permanent; there are no tombstones.

pub mod book;
