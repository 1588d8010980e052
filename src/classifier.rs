//! Intent Classifier
//!
//! Maps a raw utterance to the reply category the assistant should use.
//! Categories are tested in a fixed priority order and the first one with a
//! keyword contained in the lower-cased utterance wins, so "thanks for the
//! budget help" is a `Budget` question, not `Thanks`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Greeting,
    Balance,
    Expenses,
    Savings,
    Budget,
    Goals,
    Help,
    Thanks,
    Fallback,
}

/// Static priority table — zero allocation
///
/// Order is observable behaviour. Plain substring matching means short
/// keywords such as "hi" also fire inside longer words ("this", "which");
/// that matches how the widget has always behaved.
const INTENT_TABLE: &[(Intent, &[&str])] = &[
    (Intent::Greeting, &["hello", "hi"]),
    (Intent::Balance, &["balance"]),
    (Intent::Expenses, &["expense", "spending"]),
    (Intent::Savings, &["save", "saving"]),
    (Intent::Budget, &["budget"]),
    (Intent::Goals, &["goal", "goals"]),
    (Intent::Help, &["help"]),
    (Intent::Thanks, &["thank"]),
];

/// Intent classifier
pub struct IntentClassifier;

impl IntentClassifier {
    /// Classify a raw utterance; never fails, `Fallback` when nothing matches
    pub fn classify(utterance: &str) -> Intent {
        let lowered = utterance.to_lowercase();

        INTENT_TABLE
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::Fallback)
    }
}
