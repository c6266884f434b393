//! Widget instance model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use evocms_core::types::{ContainerId, WidgetId};

/// A widget placed in a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Widget {
    /// Widget identifier.
    pub id: WidgetId,
    /// Container the widget lives in.
    pub container_id: ContainerId,
    /// Position inside the container.
    pub sort_order: i32,
    /// Disabled widgets are skipped when rendering.
    pub enabled: bool,
    /// Widget kind code, e.g. `free_html`, `subcontainer_row`.
    pub code: String,
    /// Stored parameters as a JSON object.
    pub params: serde_json::Value,
}

impl Widget {
    /// Stored string parameter.
    pub fn param_str(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(|v| v.as_str())
    }

    /// Stored boolean parameter; accepts `true`, `1` and `"1"`.
    pub fn param_bool(&self, name: &str) -> Option<bool> {
        match self.params.get(name)? {
            serde_json::Value::Bool(b) => Some(*b),
            serde_json::Value::Number(n) => Some(n.as_i64() != Some(0)),
            serde_json::Value::String(s) => Some(s == "1" || s == "true"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget(params: serde_json::Value) -> Widget {
        Widget {
            id: WidgetId(1),
            container_id: ContainerId(1),
            sort_order: 1,
            enabled: true,
            code: "free_html".into(),
            params,
        }
    }

    #[test]
    fn test_param_bool_accepts_loose_values() {
        let w = widget(json!({"a": true, "b": 0, "c": "1", "d": [1]}));
        assert_eq!(w.param_bool("a"), Some(true));
        assert_eq!(w.param_bool("b"), Some(false));
        assert_eq!(w.param_bool("c"), Some(true));
        assert_eq!(w.param_bool("d"), None);
        assert_eq!(w.param_bool("missing"), None);
    }
}
