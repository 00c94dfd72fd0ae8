//! Storage location management for the Zellij sandbox environment.

use std::path::PathBuf;

/// Returns the data directory for Bibliofind storage.
///
/// The directory is located at `/host/.local/share/zellij/bibliofind` in
/// the Zellij sandbox. In Zellij's plugin environment, `/host` points to
/// the cwd of the last focused terminal, or the folder where Zellij was
/// started if that's not available; when Zellij is started from a home
/// directory terminal this resolves to
/// `~/.local/share/zellij/bibliofind`.
///
/// The favorites slot `favorites.json` and the trace file live within this
/// directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("bibliofind")
}
