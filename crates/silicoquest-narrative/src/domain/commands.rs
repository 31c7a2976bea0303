//! Commands accepted by the progression controller.

use silicoquest_core::command::Command;
use uuid::Uuid;

/// Go forward: next stage, start the game, or next chapter.
#[derive(Debug, Clone)]
pub struct Advance {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for Advance {
    fn command_type(&self) -> &'static str {
        "quest.advance"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Return to the previous chapter.
#[derive(Debug, Clone)]
pub struct GoBack {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for GoBack {
    fn command_type(&self) -> &'static str {
        "quest.go_back"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Force-complete the current chapter's game with a zero score.
#[derive(Debug, Clone)]
pub struct SkipGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for SkipGame {
    fn command_type(&self) -> &'static str {
        "quest.skip_game"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Reload the running mini-game as a new attempt.
#[derive(Debug, Clone)]
pub struct RestartGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for RestartGame {
    fn command_type(&self) -> &'static str {
        "quest.restart_game"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Dismiss the active notice.
#[derive(Debug, Clone)]
pub struct AcknowledgeNotice {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for AcknowledgeNotice {
    fn command_type(&self) -> &'static str {
        "quest.acknowledge_notice"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Clear all progress.
#[derive(Debug, Clone)]
pub struct ResetProgress {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ResetProgress {
    fn command_type(&self) -> &'static str {
        "quest.reset"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to revisit an unlocked chapter.
#[derive(Debug, Clone)]
pub struct JumpToChapter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Target chapter number.
    pub chapter: u32,
}

impl Command for JumpToChapter {
    fn command_type(&self) -> &'static str {
        "quest.jump_to"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Completion report from a mini-game host.
#[derive(Debug, Clone)]
pub struct CompleteGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Ticket of the session that finished.
    pub session_id: Uuid,
    /// `false` for progress reports that are not terminal.
    pub completed: bool,
    /// Raw score; clamped by the controller.
    pub score: i64,
}

impl Command for CompleteGame {
    fn command_type(&self) -> &'static str {
        "quest.complete_game"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace progress with an exported document.
#[derive(Debug, Clone)]
pub struct ImportProgress {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The export document as JSON text.
    pub document: String,
}

impl Command for ImportProgress {
    fn command_type(&self) -> &'static str {
        "quest.import"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
