//! Catalog loading.

pub mod loader;
