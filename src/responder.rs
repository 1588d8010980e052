//! Response engine
//!
//! Turns an utterance and a `FinancialSnapshot` into the assistant's reply.
//! Pure and total: no I/O, no clock, always returns a string.

use crate::classifier::{Intent, IntentClassifier};
use crate::format::{CurrencyFormatter, EnUsFormatter};
use crate::models::FinancialSnapshot;
use std::sync::Arc;
use tracing::debug;

const NO_EXPENSES_REPLY: &str = "I don't see any expenses recorded yet. Would you like help tracking your expenses? I can help you categorize them and identify spending patterns.";

const BUDGET_REPLY: &str = "I can help you create a personalized budget! Here's what we can do:\n1. Set up a monthly budget based on your income\n2. Review your current spending patterns\n3. Get personalized budget recommendations\n4. Set up budget alerts\n\nWould you like to start with any of these options?";

const GOALS_REPLY: &str = "Setting financial goals is important! Here's what we can do:\n1. Set a new financial goal\n2. Review your current goals\n3. Get personalized tips on achieving your goals\n4. Track your progress\n\nWhat would you like to focus on?";

const HELP_REPLY: &str = "I can help you with:\n1. Tracking expenses and income\n2. Creating and managing budgets\n3. Setting and tracking financial goals\n4. Saving strategies and tips\n5. Financial analysis and insights\n6. Investment recommendations\n\nWhat would you like to know more about?";

const FALLBACK_REPLY: &str = "I'm not sure I understand. Could you please rephrase your question? You can ask me about:\n- Your current balance and transactions\n- Expense tracking and analysis\n- Budget planning and management\n- Saving strategies and goals\n- Financial insights and recommendations";

const SAVINGS_TIPS: &str = "Here are personalized tips to help you save more:\n1. Create a monthly budget\n2. Track your expenses\n3. Set financial goals\n4. Reduce unnecessary subscriptions\n5. Look for better deals on regular expenses";

/// Tone used by the savings reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingsBand {
    /// Strictly above 20%
    Strong,
    /// Strictly above 0% up to and including 20%
    Modest,
    /// 0% or negative
    Weak,
}

impl SavingsBand {
    pub fn classify(savings_rate: f64) -> Self {
        if savings_rate > 20.0 {
            SavingsBand::Strong
        } else if savings_rate > 0.0 {
            SavingsBand::Modest
        } else {
            SavingsBand::Weak
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SavingsBand::Strong => "Great job! You're saving more than 20% of your income.",
            SavingsBand::Modest => "You're saving some money, but there's room for improvement.",
            SavingsBand::Weak => "You might want to focus on increasing your savings.",
        }
    }
}

/// Keyword-dispatch reply generator
#[derive(Clone)]
pub struct ResponseEngine {
    formatter: Arc<dyn CurrencyFormatter>,
}

impl ResponseEngine {
    pub fn new() -> Self {
        Self::with_formatter(Arc::new(EnUsFormatter))
    }

    pub fn with_formatter(formatter: Arc<dyn CurrencyFormatter>) -> Self {
        Self { formatter }
    }

    pub fn respond(&self, utterance: &str, snapshot: &FinancialSnapshot, user_name: &str) -> String {
        let intent = IntentClassifier::classify(utterance);
        debug!(?intent, "Dispatching reply");

        match intent {
            Intent::Greeting => format!(
                "Hello {}! I'm your financial assistant. I can help you track expenses, analyze spending patterns, and provide personalized financial advice. What would you like to know?",
                user_name
            ),
            Intent::Balance => self.balance_reply(snapshot),
            Intent::Expenses => self.expenses_reply(snapshot),
            Intent::Savings => savings_reply(snapshot),
            Intent::Budget => BUDGET_REPLY.to_string(),
            Intent::Goals => GOALS_REPLY.to_string(),
            Intent::Help => HELP_REPLY.to_string(),
            Intent::Thanks => format!(
                "You're welcome, {}! Let me know if you need any other help with your finances.",
                user_name
            ),
            Intent::Fallback => FALLBACK_REPLY.to_string(),
        }
    }

    fn money(&self, amount: f64, snapshot: &FinancialSnapshot) -> String {
        format!(
            "{} {}",
            self.formatter.format(amount, &snapshot.currency),
            snapshot.currency
        )
    }

    fn balance_reply(&self, snapshot: &FinancialSnapshot) -> String {
        let income_clause = if snapshot.total_income > 0.0 {
            format!(
                "You've earned {} in total income.",
                self.money(snapshot.total_income, snapshot)
            )
        } else {
            String::new()
        };

        format!(
            "Your current balance is {} {}. {} Would you like to see a breakdown of your income and expenses?",
            snapshot.current_balance, snapshot.currency, income_clause
        )
    }

    fn expenses_reply(&self, snapshot: &FinancialSnapshot) -> String {
        if snapshot.total_expenses == 0.0 || snapshot.transaction_count == 0 {
            return NO_EXPENSES_REPLY.to_string();
        }

        // Averaged over every transaction, income included
        let average = snapshot.total_expenses / snapshot.transaction_count as f64;

        format!(
            "Here's your spending analysis:\n- Total expenses: {}\n- Average expense: {}\n- Number of transactions: {}\n\nWould you like to:\n1. See spending by category\n2. Get tips to reduce expenses\n3. Set up a budget",
            self.money(snapshot.total_expenses, snapshot),
            self.money(average, snapshot),
            snapshot.transaction_count
        )
    }
}

impl Default for ResponseEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn savings_reply(snapshot: &FinancialSnapshot) -> String {
    format!(
        "{}\n\n{}\n\nYour current savings rate: {:.1}%",
        SavingsBand::classify(snapshot.savings_rate).message(),
        SAVINGS_TIPS,
        snapshot.savings_rate
    )
}

/// Reply using the default en-US formatter
pub fn respond(utterance: &str, snapshot: &FinancialSnapshot, user_name: &str) -> String {
    ResponseEngine::new().respond(utterance, snapshot, user_name)
}
