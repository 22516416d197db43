//! The component schema: one section variant described as data.
//!
//! Field names follow the JSON the generative service returns (camelCase),
//! so a schema round-trips through the service payload without adapters.

use serde::{Deserialize, Serialize};

/// Name of the discriminant member every synthesized data type carries.
pub const DISCRIMINANT_FIELD: &str = "template";

/// Structural description of one UI section variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSchema {
    /// Kebab-case slug; every other identifier is derived from it.
    pub component_name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Declaration order is significant: it fixes member and default order.
    pub fields: Vec<FieldSpec>,
    pub layout_type: LayoutType,
    #[serde(default)]
    pub has_image: bool,
    #[serde(default)]
    pub has_stats: bool,
    #[serde(default)]
    pub has_team_members: bool,
    /// Informational tags; synthesis ignores them.
    #[serde(default)]
    pub custom_features: Vec<String>,
}

/// One member of the synthesized data type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl FieldSpec {
    pub fn new(name: &str, ty: &str, required: bool) -> Self {
        FieldSpec {
            name: name.to_string(),
            ty: ty.to_string(),
            required,
            default: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// The default value, if present and truthy.
    ///
    /// Empty strings, `false`, zero, empty arrays/objects and `null` count as
    /// absent, so they never reach the default literal.
    pub fn effective_default(&self) -> Option<&serde_json::Value> {
        self.default.as_ref().filter(|v| is_truthy(v))
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Layout family requested by the schema.
///
/// Unrecognized values deserialize to [`LayoutType::SplitLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum LayoutType {
    SplitLayout,
    FullWidth,
    CardGrid,
    Minimal,
}

impl LayoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutType::SplitLayout => "split-layout",
            LayoutType::FullWidth => "full-width",
            LayoutType::CardGrid => "card-grid",
            LayoutType::Minimal => "minimal",
        }
    }

    /// Parse a layout name, degrading anything unknown to `split-layout`.
    pub fn parse_lossy(raw: &str) -> Self {
        match raw.trim() {
            "split-layout" => LayoutType::SplitLayout,
            "full-width" => LayoutType::FullWidth,
            "card-grid" => LayoutType::CardGrid,
            "minimal" => LayoutType::Minimal,
            other => {
                log::warn!("unknown layout type '{}', using split-layout", other);
                LayoutType::SplitLayout
            }
        }
    }
}

impl From<String> for LayoutType {
    fn from(raw: String) -> Self {
        LayoutType::parse_lossy(&raw)
    }
}

impl std::fmt::Display for LayoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
