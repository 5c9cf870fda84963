//! # storage-adapters
//!
//! [`KeyValueStore`](domains::KeyValueStore) implementations standing in for
//! browser local storage.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryKeyValueStore;
