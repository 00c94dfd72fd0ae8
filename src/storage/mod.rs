//! Storage layer for the persistent favorites slot.
//!
//! This module provides the persistence abstraction for the favorites
//! sequence: a single named slot holding the JSON-serialized list, fully
//! overwritten after every mutation (last-writer-wins, no merge). The
//! default backend is a JSON file with atomic writes.
//!
//! # Modules
//!
//! - `backend`: [`FavoriteStore`] trait abstraction for backend implementations
//! - `json`: JSON file-based implementation

pub mod backend;
pub mod json;

pub use backend::FavoriteStore;
pub use json::JsonFavorites;
