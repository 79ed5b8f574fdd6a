//! # localdrop-shared
//!
//! Entity types, limits and the small pure helpers shared by the store and
//! the client: content encoding, size formatting and invite links.

pub mod constants;
pub mod content;
pub mod error;
pub mod invite;
pub mod size;
pub mod types;

pub use types::{ChatMessage, FileRecord};
