//! Catalog domain types.

pub mod catalog;
pub mod chapter;
