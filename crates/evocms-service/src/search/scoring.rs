//! Keyword scoring.

use serde::{Deserialize, Serialize};

/// What a search result points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// An item.
    Item,
    /// A comment.
    Comment,
    /// A chapter.
    Category,
    /// A tag.
    Tag,
}

impl SearchKind {
    /// Every kind, in result tie-break order.
    pub const ALL: [SearchKind; 4] = [Self::Item, Self::Comment, Self::Category, Self::Tag];

    /// Parse `all` or a comma separated list of kind names. Unknown names
    /// are ignored; an empty selection means every kind.
    pub fn parse_list(value: &str) -> Vec<SearchKind> {
        let mut kinds: Vec<SearchKind> = Vec::new();
        for name in value.split(',').map(str::trim) {
            let kind = match name {
                "all" => return Self::ALL.to_vec(),
                "item" => Self::Item,
                "comment" => Self::Comment,
                "category" => Self::Category,
                "tag" => Self::Tag,
                _ => continue,
            };
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        if kinds.is_empty() {
            Self::ALL.to_vec()
        } else {
            kinds
        }
    }
}

/// One ranked hit, as cached in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// Kind of object.
    pub kind: SearchKind,
    /// Object id.
    pub id: i64,
    /// Relevance.
    pub score: i64,
    /// Tag name, for tag hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Tagged post count, for tag hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_count: Option<i64>,
}

/// Weight of a keyword found in a title or name.
pub const TITLE_WEIGHT: i64 = 5;
/// Weight of a keyword found in a body or description.
pub const BODY_WEIGHT: i64 = 1;

/// Split a search string into distinct lowercase keywords.
pub fn split_keywords(search: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in search.split_whitespace() {
        let word = word.trim_matches('"').to_lowercase();
        if !word.is_empty() && !keywords.contains(&word) {
            keywords.push(word);
        }
    }
    keywords
}

/// Number of occurrences of every keyword in `text`, ignoring case.
pub fn count_matches(text: &str, keywords: &[String]) -> i64 {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .map(|k| haystack.matches(k.as_str()).count() as i64)
        .sum()
}

/// Weighted score of a title and body pair.
pub fn score(title: &str, body: &str, keywords: &[String]) -> i64 {
    TITLE_WEIGHT * count_matches(title, keywords) + BODY_WEIGHT * count_matches(body, keywords)
}

/// Sort hits by descending score; ties keep kind order, then ascending id.
pub fn rank(results: &mut [ScoredResult]) {
    let kind_order = |k: SearchKind| SearchKind::ALL.iter().position(|x| *x == k);
    results.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(kind_order(a.kind).cmp(&kind_order(b.kind)))
            .then(a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(SearchKind::parse_list("all"), SearchKind::ALL.to_vec());
        assert_eq!(
            SearchKind::parse_list("tag, item,tag"),
            vec![SearchKind::Tag, SearchKind::Item]
        );
        assert_eq!(SearchKind::parse_list("bogus"), SearchKind::ALL.to_vec());
    }

    #[test]
    fn test_split_keywords() {
        assert_eq!(split_keywords("  Rust  rust \"Tokio\" "), vec!["rust", "tokio"]);
        assert!(split_keywords("   ").is_empty());
    }

    #[test]
    fn test_score_weights_title() {
        let keywords = split_keywords("rust");
        assert_eq!(score("Rust news", "rust and RUST", &keywords), 5 + 2);
        assert_eq!(score("Other", "", &keywords), 0);
    }

    #[test]
    fn test_rank_orders_by_score_then_kind() {
        let hit = |kind, id, score| ScoredResult {
            kind,
            id,
            score,
            name: None,
            post_count: None,
        };
        let mut results = vec![
            hit(SearchKind::Tag, 1, 5),
            hit(SearchKind::Item, 9, 5),
            hit(SearchKind::Comment, 2, 7),
            hit(SearchKind::Item, 3, 5),
        ];
        rank(&mut results);
        let order: Vec<(SearchKind, i64)> = results.iter().map(|r| (r.kind, r.id)).collect();
        assert_eq!(
            order,
            vec![
                (SearchKind::Comment, 2),
                (SearchKind::Item, 3),
                (SearchKind::Item, 9),
                (SearchKind::Tag, 1),
            ]
        );
    }
}
