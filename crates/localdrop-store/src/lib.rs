//! # localdrop-store
//!
//! Local persistence for localdrop.
//!
//! Every piece of state is a string value under a string key. The crate
//! exposes the [`KvStore`] seam, a SQLite-backed [`Database`] implementing it,
//! an in-memory [`MemoryStore`], and the [`codec`] that maps the file
//! collection, the chat log and the profile name onto store values.

pub mod codec;
pub mod database;
pub mod kv;
pub mod migrations;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use kv::{KvStore, MemoryStore};
