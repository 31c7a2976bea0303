//! Persistence and transfer of quest progress.

pub mod persistence;
pub mod transfer;
