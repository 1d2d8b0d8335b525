//! Storage abstractions for the ticket desk
//!
//! Everything persisted lives in three slots of a key-value store. The
//! stores never touch a concrete backend; they go through the
//! `KeyValueStore` trait. Two implementations are available:
//!
//! - `MemoryKvStore` - In-memory storage, with an optional byte quota
//! - `FsKvStore` - One JSON file per key under a root directory

mod decode;
mod implementations;
mod keys;
mod traits;

pub use decode::{decode_records, encode_records, DecodeError, Decoded};
pub use implementations::{FsKvStore, MemoryKvStore};
pub use keys::StorageKeys;
pub use traits::KeyValueStore;
