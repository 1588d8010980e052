//! Display surfaces
//!
//! Where rendered messages go. The session only calls `show`; animation and
//! typing delays belong to the implementation.

use serde::Serialize;

#[async_trait::async_trait]
pub trait DisplaySurface: Send {
    async fn show(&mut self, text: &str, is_user: bool);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayedMessage {
    pub text: String,
    pub is_user: bool,
}

/// Collects everything shown, in order. No delay.
#[derive(Debug, Default)]
pub struct TranscriptDisplay {
    messages: Vec<DisplayedMessage>,
}

impl TranscriptDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[DisplayedMessage] {
        &self.messages
    }

    /// Most recent non-user message, if any
    pub fn last_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| !m.is_user)
            .map(|m| m.text.as_str())
    }
}

#[async_trait::async_trait]
impl DisplaySurface for TranscriptDisplay {
    async fn show(&mut self, text: &str, is_user: bool) {
        self.messages.push(DisplayedMessage {
            text: text.to_string(),
            is_user,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_order() {
        let mut display = TranscriptDisplay::new();
        tokio_test::block_on(async {
            display.show("hello", true).await;
            display.show("Hello Guest!", false).await;
            display.show("next", true).await;
        });

        assert_eq!(display.messages().len(), 3);
        assert!(display.messages()[0].is_user);
        assert_eq!(display.last_reply(), Some("Hello Guest!"));
    }
}
