//! Server-side stand-ins for the narration renderer and the mini-game host.
//!
//! Over HTTP the client draws the narration and runs the mini-games; it
//! learns about both from the quest view. These adapters only record what
//! the controller asked for in the trace log.

use silicoquest_core::game::{GameSession, MiniGameHost};
use silicoquest_core::render::{NarrationRenderer, StageView};
use tracing::{debug, info};

/// Announces mini-game sessions to remote clients.
#[derive(Debug, Default)]
pub struct ClientGameHost {
    loaded: Option<GameSession>,
}

impl ClientGameHost {
    /// Creates a host with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MiniGameHost for ClientGameHost {
    fn load(&mut self, session: &GameSession) {
        info!(
            session_id = %session.session_id,
            chapter = session.chapter,
            game = %session.game.name,
            difficulty = ?session.difficulty,
            "mini-game session handed to client"
        );
        self.loaded = Some(session.clone());
    }

    fn teardown(&mut self) {
        if let Some(session) = self.loaded.take() {
            info!(session_id = %session.session_id, "mini-game session revoked");
        }
    }
}

/// Logs each narration stage the controller shows.
#[derive(Debug, Default)]
pub struct LoggingRenderer;

impl NarrationRenderer for LoggingRenderer {
    fn render(&mut self, stage: &StageView) {
        debug!(
            chapter = stage.chapter,
            stage = stage.stage_index,
            visual = %stage.visual_id,
            "narration stage"
        );
    }
}
