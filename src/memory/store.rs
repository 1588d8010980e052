//! Conversation history storage
//!
//! Stores turns with timestamps. Turns are never edited, trimmed or removed
//! once recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// A single message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationTurn {
    pub turn_id: Uuid,
    pub role: TurnRole,
    pub content: String,
    /// Serialized as RFC 3339 / ISO-8601
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            turn_id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }
}

/// Conversation history for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationHistory {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            turns: Vec::new(),
        }
    }

    /// Append a turn to the end of the log
    pub fn push(&mut self, turn: ConversationTurn) {
        self.updated_at = turn.timestamp;
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Iterate over the N most recent turns, newest first
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter().rev().take(count)
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Transcript for display, one turn per line
    pub fn get_formatted_transcript(&self) -> String {
        let mut out = String::new();

        for turn in &self.turns {
            let role = match turn.role {
                TurnRole::User => "You",
                TurnRole::Assistant => "Assistant",
            };
            out.push_str(&format!(
                "[{}] {}: {}\n",
                turn.timestamp.format("%H:%M:%S"),
                role,
                turn.content
            ));
        }

        out
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}
