//! Shared test mocks and utilities for SilicoQuest.

mod clock;
mod host;
mod store;

pub use clock::{FixedClock, ManualClock};
pub use host::{HostCall, RecordingGameHost, RecordingRenderer};
pub use store::{FailingProgressStore, RecordingProgressStore};
