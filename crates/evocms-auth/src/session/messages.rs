//! Flash messages shown on the next page the visitor sees.

use serde::{Deserialize, Serialize};

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    /// Neutral information.
    Note,
    /// Operation succeeded.
    Success,
    /// Something needs attention.
    Warning,
    /// Operation failed.
    Error,
}

/// One flash message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Severity.
    pub level: MessageLevel,
    /// Text, may contain HTML.
    pub text: String,
}

/// Ordered list of flash messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages(Vec<Message>);

impl Messages {
    /// Append a message.
    pub fn add(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.0.push(Message {
            level,
            text: text.into(),
        });
    }

    /// Append every message of `other`.
    pub fn extend(&mut self, other: Messages) {
        self.0.extend(other.0);
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Borrow the messages.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.0.iter()
    }
}
