//! Application-level handlers over the progression controller.

pub mod command_handlers;
pub mod query_handlers;
