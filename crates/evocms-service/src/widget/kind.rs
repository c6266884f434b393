//! Built-in widget kinds.

use std::fmt;

/// What a widget renders, parsed from its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetKind {
    /// Free HTML block.
    FreeHtml,
    /// Collection title linked to its front page.
    CollTitle,
    /// Embeds one container.
    Subcontainer,
    /// Embeds up to six containers as responsive columns.
    SubcontainerRow,
    /// Code with no renderer.
    Unknown(String),
}

impl WidgetKind {
    /// Parse a widget code.
    pub fn from_code(code: &str) -> Self {
        match code {
            "free_html" => Self::FreeHtml,
            "coll_title" => Self::CollTitle,
            "subcontainer" => Self::Subcontainer,
            "subcontainer_row" => Self::SubcontainerRow,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Widget code.
    pub fn code(&self) -> &str {
        match self {
            Self::FreeHtml => "free_html",
            Self::CollTitle => "coll_title",
            Self::Subcontainer => "subcontainer",
            Self::SubcontainerRow => "subcontainer_row",
            Self::Unknown(code) => code,
        }
    }

    /// Whether output may be kept in the block cache. Widgets that embed
    /// containers never are.
    pub fn allows_blockcache(&self) -> bool {
        matches!(self, Self::FreeHtml | Self::CollTitle)
    }

    /// Whether the widget embeds other containers.
    pub fn embeds_containers(&self) -> bool {
        matches!(self, Self::Subcontainer | Self::SubcontainerRow)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_codes() {
        for code in ["free_html", "coll_title", "subcontainer", "subcontainer_row", "poll"] {
            assert_eq!(WidgetKind::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_embedding_kinds_never_cache() {
        assert!(!WidgetKind::Subcontainer.allows_blockcache());
        assert!(!WidgetKind::SubcontainerRow.allows_blockcache());
        assert!(WidgetKind::FreeHtml.allows_blockcache());
        assert!(!WidgetKind::from_code("poll").allows_blockcache());
    }
}
