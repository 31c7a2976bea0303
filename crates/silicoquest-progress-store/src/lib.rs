//! SilicoQuest Progress Store: backing media for the persisted progress blob.
//!
//! Provides a JSON file store for the server and an in-memory store for
//! sessions that run without durable storage.

pub mod json_file_store;
pub mod memory_store;

pub use json_file_store::JsonFileProgressStore;
pub use memory_store::InMemoryProgressStore;
