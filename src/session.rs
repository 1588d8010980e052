//! Chat session
//!
//! Owns everything that outlives a single message: the conversation log,
//! inferred preferences and whether the chat panel is open. One session is
//! one conversation; callers create as many as they need.

use crate::display::DisplaySurface;
use crate::ledger::{load_snapshot, TransactionSource};
use crate::memory::{ConversationHistory, ConversationTurn};
use crate::models::UserPreferences;
use crate::preferences::update_preferences;
use crate::responder::ResponseEngine;
use crate::Result;
use chrono::Utc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Shown in place of a reply when the message path fails
pub const APOLOGY: &str =
    "I apologize, but I'm having trouble processing your request. Please try again later.";

pub struct ChatSession {
    session_id: Uuid,
    user_name: String,
    engine: ResponseEngine,
    history: ConversationHistory,
    preferences: UserPreferences,
    visible: bool,
}

impl ChatSession {
    /// New session with the panel hidden
    pub fn new(user_name: impl Into<String>) -> Self {
        Self::with_engine(user_name, ResponseEngine::new())
    }

    pub fn with_engine(user_name: impl Into<String>, engine: ResponseEngine) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_name: user_name.into(),
            engine,
            history: ConversationHistory::new(),
            preferences: UserPreferences::default(),
            visible: false,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flip panel visibility; returns the new state
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        debug!(session_id = %self.session_id, visible = self.visible, "Chat panel toggled");
        self.visible
    }

    /// Raw input box entry point: trims, ignores blank input
    pub async fn submit(
        &mut self,
        raw_input: &str,
        source: &dyn TransactionSource,
        display: &mut dyn DisplaySurface,
    ) -> Option<String> {
        let message = raw_input.trim();
        if message.is_empty() {
            return None;
        }

        Some(self.process_message(message, source, display).await)
    }

    /// Handle one user message end to end; always yields the text displayed as the reply
    pub async fn process_message(
        &mut self,
        message: &str,
        source: &dyn TransactionSource,
        display: &mut dyn DisplaySurface,
    ) -> String {
        display.show(message, true).await;
        self.history.push(ConversationTurn::user(message));

        match self.generate_reply(message, source).await {
            Ok(reply) => {
                display.show(&reply, false).await;
                self.history.push(ConversationTurn::assistant(reply.clone()));

                let applied = update_preferences(&mut self.preferences, message, Utc::now());
                info!(
                    session_id = %self.session_id,
                    turns = self.history.len(),
                    preference_updates = applied,
                    "Handled chat message"
                );

                reply
            }
            Err(e) => {
                error!(session_id = %self.session_id, "Error processing message: {}", e);
                display.show(APOLOGY, false).await;
                APOLOGY.to_string()
            }
        }
    }

    async fn generate_reply(&self, message: &str, source: &dyn TransactionSource) -> Result<String> {
        let snapshot = load_snapshot(source).await?;
        Ok(self.engine.respond(message, &snapshot, &self.user_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::TranscriptDisplay;
    use crate::error::ChatError;
    use crate::ledger::InMemoryLedger;
    use crate::memory::TurnRole;
    use crate::models::{RiskTolerance, Transaction};

    struct BrokenSource;

    #[async_trait::async_trait]
    impl TransactionSource for BrokenSource {
        async fn transactions(&self) -> Result<Vec<Transaction>> {
            Err(ChatError::SourceError("ledger offline".to_string()))
        }

        async fn current_balance(&self) -> Result<String> {
            Ok("0.00".to_string())
        }

        async fn currency(&self) -> Result<String> {
            Ok("USD".to_string())
        }
    }

    #[test]
    fn test_toggle() {
        let mut session = ChatSession::new("Asha");
        assert!(!session.is_visible());
        assert!(session.toggle());
        assert!(!session.toggle());
    }

    #[tokio::test]
    async fn test_message_round_trip() {
        let ledger = InMemoryLedger::with_transactions("USD", vec![Transaction::income(100.0)]);
        let mut display = TranscriptDisplay::new();
        let mut session = ChatSession::new("Asha");

        let reply = session.process_message("hello", &ledger, &mut display).await;

        assert!(reply.starts_with("Hello Asha!"));
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().turns()[0].role, TurnRole::User);
        assert_eq!(session.history().turns()[0].content, "hello");
        assert_eq!(session.history().turns()[1].role, TurnRole::Assistant);
        assert_eq!(display.messages().len(), 2);
        assert_eq!(display.last_reply(), Some(reply.as_str()));
    }

    #[tokio::test]
    async fn test_preferences_updated_after_reply() {
        let ledger = InMemoryLedger::new("USD");
        let mut display = TranscriptDisplay::new();
        let mut session = ChatSession::new("Asha");

        session.process_message("my goal of 500", &ledger, &mut display).await;
        session
            .process_message("I want a conservative risk approach", &ledger, &mut display)
            .await;

        assert_eq!(session.preferences().financial_goals.len(), 1);
        assert_eq!(session.preferences().financial_goals[0].amount, 500);
        assert_eq!(session.preferences().risk_tolerance, RiskTolerance::Conservative);
    }

    #[tokio::test]
    async fn test_source_failure_yields_apology() {
        let mut display = TranscriptDisplay::new();
        let mut session = ChatSession::new("Asha");

        let reply = session
            .process_message("my goal of 500", &BrokenSource, &mut display)
            .await;

        assert_eq!(reply, APOLOGY);
        assert_eq!(display.last_reply(), Some(APOLOGY));
        // only the user turn is logged, preferences untouched
        assert_eq!(session.history().len(), 1);
        assert!(session.preferences().financial_goals.is_empty());
    }

    #[tokio::test]
    async fn test_submit_ignores_blank_input() {
        let ledger = InMemoryLedger::new("USD");
        let mut display = TranscriptDisplay::new();
        let mut session = ChatSession::new("Asha");

        assert!(session.submit("   ", &ledger, &mut display).await.is_none());
        assert!(session.history().is_empty());

        let reply = session.submit("  help  ", &ledger, &mut display).await;
        assert!(reply.is_some());
        assert_eq!(session.history().turns()[0].content, "help");
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let ledger = InMemoryLedger::new("USD");
        let mut display = TranscriptDisplay::new();
        let mut first = ChatSession::new("Asha");
        let second = ChatSession::new("Ravi");

        first.process_message("goal of 10", &ledger, &mut display).await;

        assert_eq!(first.history().len(), 2);
        assert!(second.history().is_empty());
        assert!(second.preferences().financial_goals.is_empty());
        assert_ne!(first.session_id(), second.session_id());
    }
}
