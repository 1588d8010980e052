//! Ledger aggregation
//!
//! Folds a transaction list into a `FinancialSnapshot`. Total for every
//! input, including the empty list.

use crate::models::{FinancialSnapshot, Transaction, TransactionKind};
use std::collections::BTreeMap;

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Build a snapshot from the transactions plus the host-provided balance and currency.
pub fn compute_snapshot(
    transactions: &[Transaction],
    current_balance: impl Into<String>,
    currency: impl Into<String>,
) -> FinancialSnapshot {
    let mut total_expenses = 0.0;
    let mut total_income = 0.0;
    let mut expense_categories: BTreeMap<String, f64> = BTreeMap::new();

    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => total_income += tx.amount,
            TransactionKind::Expense => {
                total_expenses += tx.amount;
                let category = tx.category.as_deref().unwrap_or(UNCATEGORIZED);
                *expense_categories.entry(category.to_string()).or_insert(0.0) += tx.amount;
            }
        }
    }

    FinancialSnapshot {
        current_balance: current_balance.into(),
        currency: currency.into(),
        total_expenses,
        total_income,
        savings_rate: savings_rate(total_income, total_expenses),
        expense_categories,
        transaction_count: transactions.len(),
        last_transaction: transactions.last().cloned(),
    }
}

/// Percentage of income kept; exactly 0 when there is no income.
pub fn savings_rate(total_income: f64, total_expenses: f64) -> f64 {
    if total_income > 0.0 {
        100.0 * (total_income - total_expenses) / total_income
    } else {
        0.0
    }
}
