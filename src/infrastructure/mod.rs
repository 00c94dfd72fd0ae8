//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module provides utilities for working with the Zellij plugin
//! sandbox environment, where the host filesystem is mounted under `/host`.

pub mod paths;

pub use paths::get_data_dir;
