//! Storage layer: the identity directory and the persisted session slot.

pub mod directory;
pub mod kv;
pub mod session_store;

pub use directory::Directory;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use session_store::SessionStore;
