//! Display parameters and editable parameter definitions.

use serde::Serialize;

use evocms_entity::widget::{Widget, WidgetContainer};

use super::kind::WidgetKind;

/// Number of columns of a `subcontainer_row`.
pub const COLUMN_COUNT: usize = 6;
/// Default classes of a `subcontainer_row` column.
pub const DEFAULT_COLUMN_CLASS: &str = "col-lg-4 col-md-6 col-sm-6 col-xs-12";
/// Placeholder in `rwd_block_start` replaced by the column classes.
pub const RWD_BLOCK_CLASS_PLACEHOLDER: &str = "$wi_rwd_block_class$";
/// Placeholder in `block_start` replaced by the widget class.
pub const WIDGET_CLASS_PLACEHOLDER: &str = "$wi_class$";

/// HTML fragments wrapped around a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayParams {
    /// Opens the widget block.
    pub block_start: String,
    /// Closes the widget block.
    pub block_end: String,
    /// Opens the title.
    pub block_title_start: String,
    /// Closes the title.
    pub block_title_end: String,
    /// Opens the body.
    pub block_body_start: String,
    /// Closes the body.
    pub block_body_end: String,
    /// Opens a responsive row.
    pub rwd_start: String,
    /// Closes a responsive row.
    pub rwd_end: String,
    /// Opens a responsive column.
    pub rwd_block_start: String,
    /// Closes a responsive column.
    pub rwd_block_end: String,
}

impl Default for DisplayParams {
    fn default() -> Self {
        Self {
            block_start: format!(r#"<div class="evo_widget {WIDGET_CLASS_PLACEHOLDER}">"#),
            block_end: "</div>".to_string(),
            block_title_start: "<h3>".to_string(),
            block_title_end: "</h3>".to_string(),
            block_body_start: String::new(),
            block_body_end: String::new(),
            rwd_start: r#"<div class="row">"#.to_string(),
            rwd_end: "</div>".to_string(),
            rwd_block_start: format!(r#"<div class="{RWD_BLOCK_CLASS_PLACEHOLDER}">"#),
            rwd_block_end: "</div>".to_string(),
        }
    }
}

impl DisplayParams {
    /// Defaults overridden by the widget's stored string params.
    pub fn for_widget(widget: &Widget) -> Self {
        let mut params = Self::default();
        let fields: [(&str, &mut String); 10] = [
            ("block_start", &mut params.block_start),
            ("block_end", &mut params.block_end),
            ("block_title_start", &mut params.block_title_start),
            ("block_title_end", &mut params.block_title_end),
            ("block_body_start", &mut params.block_body_start),
            ("block_body_end", &mut params.block_body_end),
            ("rwd_start", &mut params.rwd_start),
            ("rwd_end", &mut params.rwd_end),
            ("rwd_block_start", &mut params.rwd_block_start),
            ("rwd_block_end", &mut params.rwd_block_end),
        ];
        for (name, field) in fields {
            if let Some(value) = widget.param_str(name) {
                *field = value.to_string();
            }
        }
        params.block_start = params
            .block_start
            .replace(WIDGET_CLASS_PLACEHOLDER, &format!("widget_core_{}", widget.code));
        params
    }

    /// Column opener with its classes filled in.
    pub fn column_start(&self, class: &str) -> String {
        self.rwd_block_start
            .replace(RWD_BLOCK_CLASS_PLACEHOLDER, class)
    }
}

/// Input type of an editable parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamKind {
    /// Single line text.
    Text,
    /// Multi-line HTML.
    Html,
    /// Boolean checkbox.
    Checkbox,
    /// Choice among `(value, label)` options.
    Select {
        /// Options in display order.
        options: Vec<(String, String)>,
    },
}

/// One editable widget parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDefinition {
    /// Parameter name.
    pub name: String,
    /// Form label.
    pub label: String,
    /// Input type.
    #[serde(flatten)]
    pub kind: ParamKind,
    /// Default value.
    pub default: String,
    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Whether the input is read-only.
    pub disabled: bool,
}

impl ParamDefinition {
    fn new(name: impl Into<String>, label: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            default: String::new(),
            note: None,
            disabled: false,
        }
    }

    fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Select options listing `containers`, led by an empty "None" choice.
fn container_options(containers: &[WidgetContainer]) -> Vec<(String, String)> {
    std::iter::once((String::new(), "None".to_string()))
        .chain(containers.iter().map(|c| (c.code.clone(), c.name.clone())))
        .collect()
}

/// Editable parameters of a widget kind in a collection with `containers`.
pub fn definitions(kind: &WidgetKind, containers: &[WidgetContainer]) -> Vec<ParamDefinition> {
    let mut defs = Vec::new();
    match kind {
        WidgetKind::FreeHtml => {
            defs.push(ParamDefinition::new("title", "Block title", ParamKind::Text));
            defs.push(ParamDefinition::new("content", "Block content", ParamKind::Html));
        }
        WidgetKind::CollTitle => {}
        WidgetKind::Subcontainer => {
            defs.push(ParamDefinition::new("title", "Block title", ParamKind::Text));
            defs.push(
                ParamDefinition::new(
                    "container",
                    "Container",
                    ParamKind::Select {
                        options: container_options(containers),
                    },
                )
                .with_note("The container which will be embedded."),
            );
        }
        WidgetKind::SubcontainerRow => {
            defs.push(ParamDefinition::new("title", "Block title", ParamKind::Text));
            for i in 1..=COLUMN_COUNT {
                defs.push(
                    ParamDefinition::new(
                        format!("column{i}_container"),
                        format!("Column {i} Container"),
                        ParamKind::Select {
                            options: container_options(containers),
                        },
                    )
                    .with_note("The container which will be embedded."),
                );
                defs.push(
                    ParamDefinition::new(
                        format!("column{i}_class"),
                        format!("Column {i} Classes"),
                        ParamKind::Text,
                    )
                    .with_default(DEFAULT_COLUMN_CLASS)
                    .with_note("The style classes for container above."),
                );
            }
        }
        WidgetKind::Unknown(_) => {}
    }

    let mut blockcache =
        ParamDefinition::new("allow_blockcache", "Allow caching", ParamKind::Checkbox)
            .with_default("1");
    if !kind.allows_blockcache() {
        blockcache.default = "0".to_string();
        blockcache.disabled = true;
        blockcache.note = Some("This widget cannot be cached in the block cache.".to_string());
    }
    defs.push(blockcache);
    defs
}
