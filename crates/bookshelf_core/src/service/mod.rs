//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep shell/catalog layers decoupled from SQL details.

pub mod book_service;
