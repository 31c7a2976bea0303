//! Progression domain: the controller, its commands, events and notices.

pub mod certificate;
pub mod commands;
pub mod controller;
pub mod events;
pub mod navigation;
pub mod notice;
