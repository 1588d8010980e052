//! Error types for the finance chat assistant

use thiserror::Error;

/// Result type alias for chat assistant operations
pub type Result<T> = std::result::Result<T, ChatError>;

#[derive(Error, Debug)]
pub enum ChatError {

    // =============================
    // Message Path Errors
    // =============================

    #[error("Transaction source error: {0}")]
    SourceError(String),

    #[error("Ledger error: {0}")]
    LedgerError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
