//! Preference extraction
//!
//! Scans what the user typed for goal amounts, spending categories and risk
//! appetite. Rules live in a static table so each one can be exercised on
//! its own and new ones added without touching reply dispatch. Extracted
//! values are taken as-is.

use crate::models::{FinancialGoal, RiskTolerance, UserPreferences};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref GOAL_PATTERN: Regex = Regex::new(r"(?i)(?:goal|target) of (\d+)").unwrap();
    static ref CATEGORY_PATTERN: Regex =
        Regex::new(r"(?i)(?:category|type) of ([0-9A-Za-z_\s]+)").unwrap();
}

/// A single change to apply to `UserPreferences`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceUpdate {
    AddGoal(i64),
    AddCategory(String),
    SetRiskTolerance(RiskTolerance),
}

impl PreferenceUpdate {
    pub fn apply(self, prefs: &mut UserPreferences, now: DateTime<Utc>) {
        match self {
            PreferenceUpdate::AddGoal(amount) => prefs.financial_goals.push(FinancialGoal {
                amount,
                timestamp: now,
            }),
            PreferenceUpdate::AddCategory(category) => {
                prefs.spending_categories.insert(category);
            }
            PreferenceUpdate::SetRiskTolerance(risk) => prefs.risk_tolerance = risk,
        }
    }
}

/// One extraction rule: only consulted when `guard` appears in the lower-cased message
pub struct ExtractionRule {
    pub name: &'static str,
    pub guard: &'static str,
    pub extract: fn(&str) -> Option<PreferenceUpdate>,
}

impl ExtractionRule {
    pub fn run(&self, message: &str, lowered: &str) -> Option<PreferenceUpdate> {
        if !lowered.contains(self.guard) {
            return None;
        }
        (self.extract)(message)
    }
}

pub const EXTRACTION_RULES: &[ExtractionRule] = &[
    ExtractionRule {
        name: "goal",
        guard: "goal",
        extract: extract_goal,
    },
    ExtractionRule {
        name: "category",
        guard: "category",
        extract: extract_category,
    },
    ExtractionRule {
        name: "risk",
        guard: "risk",
        extract: extract_risk,
    },
];

fn extract_goal(message: &str) -> Option<PreferenceUpdate> {
    let caps = GOAL_PATTERN.captures(message)?;
    // Digits too long for i64 are dropped
    caps[1].parse::<i64>().ok().map(PreferenceUpdate::AddGoal)
}

fn extract_category(message: &str) -> Option<PreferenceUpdate> {
    let caps = CATEGORY_PATTERN.captures(message)?;
    Some(PreferenceUpdate::AddCategory(caps[1].to_lowercase()))
}

fn extract_risk(message: &str) -> Option<PreferenceUpdate> {
    let lowered = message.to_lowercase();
    if lowered.contains("conservative") {
        Some(PreferenceUpdate::SetRiskTolerance(RiskTolerance::Conservative))
    } else if lowered.contains("aggressive") {
        Some(PreferenceUpdate::SetRiskTolerance(RiskTolerance::Aggressive))
    } else {
        None
    }
}

/// Run every rule against the message, in table order
pub fn extract_updates(message: &str) -> Vec<PreferenceUpdate> {
    let lowered = message.to_lowercase();

    EXTRACTION_RULES
        .iter()
        .filter_map(|rule| {
            let update = rule.run(message, &lowered);
            if let Some(ref u) = update {
                debug!(rule = rule.name, update = ?u, "Preference rule matched");
            }
            update
        })
        .collect()
}

/// Extract and apply all updates; returns how many were applied
pub fn update_preferences(prefs: &mut UserPreferences, message: &str, now: DateTime<Utc>) -> usize {
    let updates = extract_updates(message);
    let count = updates.len();

    for update in updates {
        update.apply(prefs, now);
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(prefs: &mut UserPreferences, message: &str) -> usize {
        update_preferences(prefs, message, Utc::now())
    }

    #[test]
    fn test_goal_amount_appended_once() {
        let mut prefs = UserPreferences::default();
        assert_eq!(apply(&mut prefs, "my goal of 500"), 1);
        assert_eq!(prefs.financial_goals.len(), 1);
        assert_eq!(prefs.financial_goals[0].amount, 500);
    }

    #[test]
    fn test_goals_not_deduplicated() {
        let mut prefs = UserPreferences::default();
        apply(&mut prefs, "goal of 500");
        apply(&mut prefs, "Goal of 500");
        assert_eq!(prefs.financial_goals.len(), 2);
    }

    #[test]
    fn test_target_needs_goal_guard() {
        let mut prefs = UserPreferences::default();
        assert_eq!(apply(&mut prefs, "a target of 900"), 0);
        assert_eq!(apply(&mut prefs, "my goal is a target of 900"), 1);
        assert_eq!(prefs.financial_goals[0].amount, 900);
    }

    #[test]
    fn test_oversized_goal_ignored() {
        let mut prefs = UserPreferences::default();
        assert_eq!(apply(&mut prefs, "goal of 99999999999999999999999"), 0);
        assert!(prefs.financial_goals.is_empty());
    }

    #[test]
    fn test_category_lowercased() {
        let mut prefs = UserPreferences::default();
        apply(&mut prefs, "add a category of Dining Out");
        assert!(prefs.spending_categories.contains("dining out"));

        apply(&mut prefs, "new category, type of Travel");
        assert!(prefs.spending_categories.contains("travel"));
    }

    #[test]
    fn test_risk_tolerance() {
        let mut prefs = UserPreferences::default();
        apply(&mut prefs, "I want a conservative risk approach");
        assert_eq!(prefs.risk_tolerance, RiskTolerance::Conservative);

        apply(&mut prefs, "go aggressive on risk");
        assert_eq!(prefs.risk_tolerance, RiskTolerance::Aggressive);

        // conservative wins when both appear
        apply(&mut prefs, "risk: conservative or aggressive?");
        assert_eq!(prefs.risk_tolerance, RiskTolerance::Conservative);
    }

    #[test]
    fn test_risk_requires_guard() {
        let mut prefs = UserPreferences::default();
        apply(&mut prefs, "I'm fairly aggressive");
        assert_eq!(prefs.risk_tolerance, RiskTolerance::Moderate);
    }

    #[test]
    fn test_individual_rules() {
        let goal = &EXTRACTION_RULES[0];
        assert_eq!(
            goal.run("goal of 42", "goal of 42"),
            Some(PreferenceUpdate::AddGoal(42))
        );
        let risk = &EXTRACTION_RULES[2];
        assert_eq!(risk.run("risk", "risk"), None);
    }
}
