//! Transaction source layer
//!
//! The assistant only ever reads the ledger. Implementations hand back the
//! transaction list plus the balance and currency the host displays.

use crate::error::ChatError;
use crate::models::{FinancialSnapshot, Transaction, TransactionKind};
use crate::snapshot::compute_snapshot;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::RwLock;
use tracing::info;

/// Read-only access to the user's ledger
#[async_trait::async_trait]
pub trait TransactionSource: Send + Sync {
    async fn transactions(&self) -> Result<Vec<Transaction>>;
    async fn current_balance(&self) -> Result<String>;
    async fn currency(&self) -> Result<String>;
}

/// Fetch everything the response engine needs and aggregate it
pub async fn load_snapshot(source: &dyn TransactionSource) -> Result<FinancialSnapshot> {
    let transactions = source.transactions().await?;
    let current_balance = source.current_balance().await?;
    let currency = source.currency().await?;

    Ok(compute_snapshot(&transactions, current_balance, currency))
}

/// On-disk ledger layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerFile {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub balance: Option<String>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// In-memory ledger, optionally seeded from a JSON file
pub struct InMemoryLedger {
    transactions: RwLock<Vec<Transaction>>,
    balance_override: Option<String>,
    currency: String,
}

impl InMemoryLedger {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            transactions: RwLock::new(Vec::new()),
            balance_override: None,
            currency: currency.into(),
        }
    }

    pub fn with_transactions(currency: impl Into<String>, transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
            balance_override: None,
            currency: currency.into(),
        }
    }

    /// Show this balance verbatim instead of deriving it from the transactions
    pub fn with_balance(mut self, balance: impl Into<String>) -> Self {
        self.balance_override = Some(balance.into());
        self
    }

    pub fn from_file(ledger: LedgerFile, default_currency: &str) -> Self {
        let currency = ledger
            .currency
            .unwrap_or_else(|| default_currency.to_string());

        Self {
            transactions: RwLock::new(ledger.transactions),
            balance_override: ledger.balance,
            currency,
        }
    }

    /// Load a JSON ledger file from disk
    pub async fn load(path: impl AsRef<Path>, default_currency: &str) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            ChatError::LedgerError(format!("Failed to read ledger {}: {}", path.display(), e))
        })?;
        let ledger: LedgerFile = serde_json::from_str(&raw)?;

        info!(
            path = %path.display(),
            transactions = ledger.transactions.len(),
            "Loaded ledger"
        );

        Ok(Self::from_file(ledger, default_currency))
    }

    /// Record a transaction (host-side; the assistant never calls this)
    pub async fn record(&self, tx: Transaction) {
        self.transactions.write().await.push(tx);
    }
}

#[async_trait::async_trait]
impl TransactionSource for InMemoryLedger {
    async fn transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.read().await.clone())
    }

    async fn current_balance(&self) -> Result<String> {
        if let Some(balance) = &self.balance_override {
            return Ok(balance.clone());
        }

        let transactions = self.transactions.read().await;
        let net: f64 = transactions
            .iter()
            .map(|tx| match tx.kind {
                TransactionKind::Income => tx.amount,
                TransactionKind::Expense => -tx.amount,
            })
            .sum();

        Ok(format!("{:.2}", net))
    }

    async fn currency(&self) -> Result<String> {
        Ok(self.currency.clone())
    }
}
