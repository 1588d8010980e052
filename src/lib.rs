//! Finance Chat Assistant
//!
//! A keyword-driven finance chat assistant that:
//! - Aggregates a read-only transaction ledger into a point-in-time snapshot
//! - Picks a canned reply by first-matching keyword, filling in snapshot figures
//! - Keeps an append-only conversation log per session
//! - Infers goals, spending categories and risk appetite from what the user types
//!
//! MESSAGE PATH:
//! INPUT → LOG → SNAPSHOT → CLASSIFY → REPLY → LOG → EXTRACT PREFERENCES

pub mod api;
pub mod classifier;
pub mod config;
pub mod display;
pub mod error;
pub mod format;
pub mod ledger;
pub mod memory;
pub mod models;
pub mod preferences;
pub mod responder;
pub mod session;
pub mod snapshot;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use classifier::{Intent, IntentClassifier};
pub use responder::{respond, ResponseEngine};
pub use session::ChatSession;
