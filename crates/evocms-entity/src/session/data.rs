//! Expiring key/value payload stored in a session row.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One stored value and its optional absolute expiry (unix seconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEntry {
    /// Unix timestamp after which the value is gone; `None` never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    /// The stored value.
    pub value: serde_json::Value,
}

impl DataEntry {
    /// Whether the entry is still readable at `now` (unix seconds).
    ///
    /// An entry expiring exactly at `now` is already expired.
    pub fn is_live(&self, now: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at > now,
            None => true,
        }
    }
}

/// The whole payload, keyed by name.
pub type SessionData = BTreeMap<String, DataEntry>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_live_boundary() {
        let entry = DataEntry {
            expires_at: Some(100),
            value: serde_json::json!(1),
        };
        assert!(entry.is_live(99));
        assert!(!entry.is_live(100));
        assert!(!entry.is_live(101));
    }

    #[test]
    fn test_no_expiry_is_always_live() {
        let entry = DataEntry {
            expires_at: None,
            value: serde_json::json!("x"),
        };
        assert!(entry.is_live(i64::MAX));
    }

    #[test]
    fn test_encoding_omits_missing_expiry() {
        let mut data = SessionData::new();
        data.insert(
            "a".to_string(),
            DataEntry {
                expires_at: None,
                value: serde_json::json!(5),
            },
        );
        let json = serde_json::to_string(&data).expect("serialize");
        assert_eq!(json, r#"{"a":{"value":5}}"#);
    }
}
