//! Query string parameters of REST requests.

use serde::Deserialize;

/// Query parameters understood by the REST controllers. Values are kept
/// as strings and parsed leniently; anything unparsable falls back to the
/// default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestQuery {
    /// Page number, 1-based.
    pub page: Option<String>,
    /// Page size.
    pub per_page: Option<String>,
    /// Comma separated item type ids.
    pub types: Option<String>,
    /// Item keywords.
    pub s: Option<String>,
    /// Item tag.
    pub tag: Option<String>,
    /// Search kinds, `all` or a comma list.
    pub kind: Option<String>,
    /// User keywords.
    pub keywords: Option<String>,
}

impl RestQuery {
    /// Requested page; 1 when missing.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }

    /// Requested page as an unsigned value, at least 1.
    pub fn page_u64(&self) -> u64 {
        self.page().max(1) as u64
    }

    /// Requested page size; `None` for the configured default.
    pub fn per_page(&self) -> Option<u64> {
        self.per_page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p > 0)
    }

    /// Item type ids; `None` when no valid id was given.
    pub fn type_ids(&self) -> Option<Vec<i32>> {
        let ids: Vec<i32> = self
            .types
            .as_deref()?
            .split(',')
            .filter_map(|t| t.trim().parse().ok())
            .collect();
        (!ids.is_empty()).then_some(ids)
    }

    /// Search kinds parameter, `all` when missing.
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or("all")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = RestQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), None);
        assert_eq!(query.type_ids(), None);
        assert_eq!(query.kind(), "all");
    }

    #[test]
    fn test_lenient_parsing() {
        let query = RestQuery {
            page: Some("-3".into()),
            per_page: Some("abc".into()),
            types: Some("1, x,3".into()),
            ..Default::default()
        };
        assert_eq!(query.page(), -3);
        assert_eq!(query.page_u64(), 1);
        assert_eq!(query.per_page(), None);
        assert_eq!(query.type_ids(), Some(vec![1, 3]));
    }
}
