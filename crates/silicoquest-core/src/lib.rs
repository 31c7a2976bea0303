//! SilicoQuest Core: shared domain abstractions.
//!
//! This crate defines the traits and types every SilicoQuest crate depends
//! on: the clock, the error taxonomy, domain event metadata, commands, the
//! mini-game and narration ports, and the progress store contract together
//! with its persisted form. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod game;
pub mod render;
pub mod store;
