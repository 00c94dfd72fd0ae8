//! Domain layer for the Bibliofind plugin.
//!
//! This module contains the core domain types and business rules for the
//! plugin, independent of Zellij-specific APIs or infrastructure concerns:
//! the book records consumed from the search API, the favorite projection
//! persisted to storage, and the error taxonomy.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Book record models, derived keys, and display helpers

pub mod book;
pub mod error;

pub use book::{BookRecord, FavoriteRecord};
pub use error::{BibliofindError, Result};
