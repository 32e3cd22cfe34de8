//! Invite trigger detection.
//!
//! A chat message is an invite request when any configured token appears
//! in it, ignoring case.

use tracing::warn;

use crate::config::types::DEFAULT_TRIGGERS;

/// Classifies chat messages as invite requests.
#[derive(Debug, Clone)]
pub struct TriggerClassifier {
    /// Lower-cased, non-blank tokens.
    tokens: Vec<String>,
}

impl TriggerClassifier {
    /// Create a classifier from token strings.
    ///
    /// Blank tokens are logged and skipped; they would match every message.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens
            .into_iter()
            .filter_map(|token| {
                let token = token.as_ref();
                if token.trim().is_empty() {
                    warn!("Skipping blank invite trigger token");
                    None
                } else {
                    Some(token.to_lowercase())
                }
            })
            .collect();

        Self { tokens }
    }

    /// Returns `true` if the message contains any trigger token.
    pub fn is_invite_trigger(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let text = text.to_lowercase();
        self.tokens.iter().any(|token| text.contains(token.as_str()))
    }

    #[cfg(test)]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl Default for TriggerClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGERS)
    }
}
