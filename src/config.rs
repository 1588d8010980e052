//! Runtime configuration
//!
//! Read from the environment (`.env` is loaded by the binaries first).

use crate::error::ChatError;
use crate::Result;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Name used in greetings and thanks
    pub user_name: String,
    /// Currency code when the ledger does not specify one
    pub currency: String,
    /// Optional JSON ledger to seed the transaction source
    pub ledger_path: Option<PathBuf>,
    /// Cosmetic pause before an assistant message is rendered
    pub typing_delay: Duration,
    pub api_port: u16,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            user_name: "Guest".to_string(),
            currency: "USD".to_string(),
            ledger_path: None,
            typing_delay: Duration::from_millis(1000),
            api_port: 8080,
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(name) = get("CHAT_USER_NAME") {
            config.user_name = name;
        }
        if let Some(currency) = get("CHAT_CURRENCY") {
            config.currency = currency.trim().to_uppercase();
        }
        config.ledger_path = get("CHAT_LEDGER_PATH").map(PathBuf::from);

        if let Some(delay) = get("CHAT_TYPING_DELAY_MS") {
            let millis: u64 = delay.trim().parse().map_err(|_| {
                ChatError::ConfigError(format!("CHAT_TYPING_DELAY_MS is not a number: {}", delay))
            })?;
            config.typing_delay = Duration::from_millis(millis);
        }

        if let Some(port) = get("PORT").or_else(|| get("API_PORT")) {
            config.api_port = port
                .trim()
                .parse()
                .map_err(|_| ChatError::ConfigError(format!("Invalid port: {}", port)))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ChatConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.user_name, "Guest");
        assert_eq!(config.currency, "USD");
        assert!(config.ledger_path.is_none());
        assert_eq!(config.typing_delay, Duration::from_millis(1000));
        assert_eq!(config.api_port, 8080);
    }

    #[test]
    fn test_overrides() {
        let config = ChatConfig::from_lookup(lookup(&[
            ("CHAT_USER_NAME", "Asha"),
            ("CHAT_CURRENCY", "inr"),
            ("CHAT_LEDGER_PATH", "ledger.json"),
            ("CHAT_TYPING_DELAY_MS", "0"),
            ("API_PORT", "9000"),
        ]))
        .unwrap();

        assert_eq!(config.user_name, "Asha");
        assert_eq!(config.currency, "INR");
        assert_eq!(config.ledger_path, Some(PathBuf::from("ledger.json")));
        assert_eq!(config.typing_delay, Duration::ZERO);
        assert_eq!(config.api_port, 9000);
    }

    #[test]
    fn test_port_precedence_and_errors() {
        let config =
            ChatConfig::from_lookup(lookup(&[("PORT", "3000"), ("API_PORT", "9000")])).unwrap();
        assert_eq!(config.api_port, 3000);

        let bad = ChatConfig::from_lookup(lookup(&[("PORT", "http")]));
        assert!(matches!(bad, Err(ChatError::ConfigError(_))));

        let bad = ChatConfig::from_lookup(lookup(&[("CHAT_TYPING_DELAY_MS", "soon")]));
        assert!(matches!(bad, Err(ChatError::ConfigError(_))));
    }
}
