//! Storage backend abstraction.
//!
//! This module defines the [`FavoriteStore`] trait that abstracts over the
//! durable slot the favorites sequence is mirrored into. The trait is
//! deliberately minimal: the in-memory sequence is owned by the application
//! state, and the store is a dumb slot that is read once at startup and
//! overwritten wholesale after every mutation.

use crate::domain::{FavoriteRecord, Result};

/// Abstraction over the durable favorites slot.
///
/// # Implementations
///
/// - [`JsonFavorites`](crate::storage::JsonFavorites): JSON file with atomic
///   writes (default)
pub trait FavoriteStore: Send {
    /// Reads the stored favorites sequence.
    ///
    /// Absent, corrupt, or unparsable storage degrades to an empty sequence;
    /// parse failures are never propagated to the caller.
    fn load_favorites(&self) -> Vec<FavoriteRecord>;

    /// Overwrites the slot with the given sequence.
    ///
    /// Called after every favorites mutation. Prior content is fully
    /// replaced; there is no merge.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    fn save_favorites(&mut self, favorites: &[FavoriteRecord]) -> Result<()>;
}
