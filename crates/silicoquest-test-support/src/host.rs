//! Recording mini-game host and narration renderer.

use std::sync::{Arc, Mutex};

use silicoquest_core::game::{GameSession, MiniGameHost};
use silicoquest_core::render::{NarrationRenderer, StageView};

/// One call made on a `RecordingGameHost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Load(GameSession),
    Teardown,
}

/// A game host that records every call. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingGameHost {
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl RecordingGameHost {
    /// Create a host with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every recorded call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns every session that was loaded, oldest first.
    pub fn loaded_sessions(&self) -> Vec<GameSession> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Load(session) => Some(session),
                HostCall::Teardown => None,
            })
            .collect()
    }

    /// Returns the most recently loaded session.
    pub fn last_session(&self) -> Option<GameSession> {
        self.loaded_sessions().pop()
    }

    /// Number of teardown calls.
    pub fn teardown_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, HostCall::Teardown))
            .count()
    }
}

impl MiniGameHost for RecordingGameHost {
    fn load(&mut self, session: &GameSession) {
        self.calls
            .lock()
            .unwrap()
            .push(HostCall::Load(session.clone()));
    }

    fn teardown(&mut self) {
        self.calls.lock().unwrap().push(HostCall::Teardown);
    }
}

/// A narration renderer that records every stage it is asked to show.
/// Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    rendered: Arc<Mutex<Vec<StageView>>>,
}

impl RecordingRenderer {
    /// Create a renderer with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every rendered stage.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn rendered(&self) -> Vec<StageView> {
        self.rendered.lock().unwrap().clone()
    }

    /// Returns the most recently rendered stage.
    pub fn last(&self) -> Option<StageView> {
        self.rendered().pop()
    }
}

impl NarrationRenderer for RecordingRenderer {
    fn render(&mut self, stage: &StageView) {
        self.rendered.lock().unwrap().push(stage.clone());
    }
}
