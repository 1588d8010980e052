//! Conversation memory
//!
//! Append-only record of every turn exchanged during a session.

pub mod store;

pub use store::{ConversationHistory, ConversationTurn, TurnRole};
