//! # Storage Layer
//!
//! This module defines the storage abstraction for bonco. The [`DataStore`] trait
//! mirrors the browser's local storage: string values under string keys, read and
//! written synchronously, one writer at a time.
//!
//! ## Why so small
//!
//! Everything bonco persists lives under one well-known key (see
//! [`crate::model::WRONG_ANSWERS_KEY`]) as one serialized JSON blob. Keeping the
//! trait at the key/value level means:
//! - **Tests** run against [`memory::InMemoryStore`], no filesystem needed
//! - **Other backends** (a browser's `localStorage`, a database row) only need
//!   three methods
//! - Serialization and validation stay in one place, the command layer
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - One file per key: `<root>/<key>.json`
//!   - Writes go through a temporary file and a rename
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Concurrency
//!
//! There is none. Two processes writing the same key overwrite each other, last
//! writer wins, at the granularity of the whole blob.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract interface for key/value persistence.
pub trait DataStore {
    /// Read the value stored under `key`. `Ok(None)` when the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}
