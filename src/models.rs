//! Core data models for the chat assistant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskTolerance::Conservative => "conservative",
            RiskTolerance::Moderate => "moderate",
            RiskTolerance::Aggressive => "aggressive",
        };
        write!(f, "{}", s)
    }
}

//
// ================= Transaction =================
//

/// A ledger entry as exposed by the transaction source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Transaction {
    pub fn income(amount: f64) -> Self {
        Self {
            kind: TransactionKind::Income,
            amount,
            category: None,
        }
    }

    pub fn expense(amount: f64, category: Option<&str>) -> Self {
        Self {
            kind: TransactionKind::Expense,
            amount,
            category: category.map(str::to_string),
        }
    }
}

//
// ================= Snapshot =================
//

/// Point-in-time summary of the ledger, computed fresh for every query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSnapshot {
    /// Balance exactly as the host displays it
    pub current_balance: String,
    pub currency: String,
    pub total_expenses: f64,
    pub total_income: f64,
    /// Percentage; 0 when there is no income
    pub savings_rate: f64,
    pub expense_categories: BTreeMap<String, f64>,
    pub transaction_count: usize,
    pub last_transaction: Option<Transaction>,
}

//
// ================= Preferences =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialGoal {
    pub amount: i64,
    pub timestamp: DateTime<Utc>,
}

/// Preferences inferred from what the user has typed so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub financial_goals: Vec<FinancialGoal>,
    pub spending_categories: BTreeSet<String>,
    pub monthly_budget: Option<f64>,
    pub risk_tolerance: RiskTolerance,
}
