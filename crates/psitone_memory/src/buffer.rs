use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const HUMAN_PREFIX: &str = "Human";
const AI_PREFIX: &str = "AI";

/// One completed exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub input: String,
    pub output: String,
    pub recorded_at: DateTime<Utc>,
}

/// Ordered, append-only log of turns.
///
/// Grows without bound for as long as it lives.
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    turns: Vec<ConversationTurn>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed exchange at the end of the log.
    ///
    /// Callers append only after a generation has succeeded.
    pub fn append_turn(&mut self, input: impl Into<String>, output: impl Into<String>) {
        self.turns.push(ConversationTurn {
            input: input.into(),
            output: output.into(),
            recorded_at: Utc::now(),
        });
        tracing::debug!(turns = self.turns.len(), "conversation turn appended");
    }

    /// Render every turn in insertion order as
    /// `Human: <input>\nAI: <output>`, turns separated by a newline.
    /// An empty log renders as an empty string.
    pub fn flatten_history(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("{}: {}\n{}: {}", HUMAN_PREFIX, t.input, AI_PREFIX, t.output))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
