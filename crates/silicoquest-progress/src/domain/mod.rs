//! Progress domain types.

pub mod analytics;
pub mod ledger;
pub mod state;
pub mod stats;
