//! Serde representation of the configuration payload, before validation.
//!
//! Sidebar nodes use the compact keys emitted by the site generator
//! (`n`, `l`, `i`, ...); the long names are accepted as aliases so that
//! hand-written TOML stays readable.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};

/// Top-level configuration object as written by the generator.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    pub sidebar: Vec<RawSidebarNode>,
    #[serde(default)]
    pub toolbar_links: Vec<ToolbarLink>,
    #[serde(default)]
    pub access: Vec<AccessLabel>,
    #[serde(default)]
    pub search: RawSearchSettings,
    #[serde(default = "default_max_history_items")]
    pub max_history_items: i64,
    #[serde(flatten)]
    pub presentation: RawPresentation,
}

impl RawConfig {
    /// Parses a JSON object.
    ///
    /// Nesting depth is unbounded: the stack grows on demand while the
    /// sidebar is read.
    pub fn from_json(content: &str) -> CoreResult<Self> {
        let mut de = serde_json::Deserializer::from_str(content);
        de.disable_recursion_limit();
        let raw = Self::deserialize(serde_stacker::Deserializer::new(&mut de))
            .map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        de.end().map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        Ok(raw)
    }

    /// Parses a TOML document.
    pub fn from_toml(content: &str) -> CoreResult<Self> {
        toml::from_str(content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Parses the generator's script payload, `var __DOCS_CONFIG__ = {...};`.
    ///
    /// Everything outside the outermost braces is ignored, so a bare JSON
    /// object is accepted too.
    pub fn from_script(content: &str) -> CoreResult<Self> {
        let start = content.find('{');
        let end = content.rfind('}');
        match (start, end) {
            (Some(start), Some(end)) if start < end => Self::from_json(&content[start..=end]),
            _ => Err(CoreError::ConfigParse(
                "no object literal found in script".to_string(),
            )),
        }
    }
}

/// One sidebar entry; `children` makes the structure recursive.
///
/// `Clone`, `PartialEq` and `Drop` walk the subtree with an explicit stack,
/// so arbitrarily deep trees never exhaust the call stack.
#[derive(Debug, Default, Deserialize)]
pub struct RawSidebarNode {
    #[serde(rename = "n", alias = "name")]
    pub name: String,
    #[serde(rename = "l", alias = "label", default)]
    pub label: Option<String>,
    #[serde(rename = "i", alias = "children", default)]
    pub children: Vec<RawSidebarNode>,
    #[serde(rename = "c", alias = "collapsed", default)]
    pub collapsed: Option<bool>,
    #[serde(rename = "o", alias = "open", default)]
    pub open: Option<bool>,
    #[serde(rename = "s", alias = "icon", default)]
    pub icon: Option<String>,
    #[serde(rename = "e", alias = "external", default)]
    pub external: Option<bool>,
    #[serde(rename = "g", alias = "language", default)]
    pub language: Option<LanguageId>,
}

impl RawSidebarNode {
    /// A leaf with the given name and label.
    pub fn leaf(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: Some(label.into()),
            children: Vec::new(),
            collapsed: None,
            open: None,
            icon: None,
            external: None,
            language: None,
        }
    }

    /// A group node with the given children.
    pub fn group(
        name: impl Into<String>,
        label: impl Into<String>,
        children: Vec<RawSidebarNode>,
    ) -> Self {
        let mut node = Self::leaf(name, label);
        node.children = children;
        node
    }

    /// Sets the language tag.
    pub fn with_language(mut self, language: LanguageId) -> Self {
        self.language = Some(language);
        self
    }

    /// Copies every field except `children`, which is set to `children`.
    fn copy_with(&self, children: Vec<RawSidebarNode>) -> Self {
        Self {
            name: self.name.clone(),
            label: self.label.clone(),
            children,
            collapsed: self.collapsed,
            open: self.open,
            icon: self.icon.clone(),
            external: self.external,
            language: self.language.clone(),
        }
    }

    fn same_fields(&self, other: &Self) -> bool {
        self.name == other.name
            && self.label == other.label
            && self.collapsed == other.collapsed
            && self.open == other.open
            && self.icon == other.icon
            && self.external == other.external
            && self.language == other.language
            && self.children.len() == other.children.len()
    }
}

impl Clone for RawSidebarNode {
    fn clone(&self) -> Self {
        // Breadth-first listing: every node comes after its parent.
        let mut order: Vec<(&RawSidebarNode, usize)> = vec![(self, 0)];
        let mut next = 0;
        while next < order.len() {
            let node = order[next].0;
            order.extend(node.children.iter().map(|child| (child, next)));
            next += 1;
        }

        // Rebuild bottom-up. Siblings arrive last-first and are reversed
        // when their parent is copied.
        let mut built: Vec<Vec<RawSidebarNode>> = order.iter().map(|_| Vec::new()).collect();
        for i in (1..order.len()).rev() {
            let (node, parent) = order[i];
            let mut children = std::mem::take(&mut built[i]);
            children.reverse();
            built[parent].push(node.copy_with(children));
        }
        let mut children = std::mem::take(&mut built[0]);
        children.reverse();
        self.copy_with(children)
    }
}

impl PartialEq for RawSidebarNode {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if !a.same_fields(b) {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Drop for RawSidebarNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// A quick-filter category shown in the toolbar.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarLink {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub short_label: Option<String>,
}

impl ToolbarLink {
    /// The label to match against, falling back to the id.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

/// A visibility tag attached to documented members.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AccessLabel {
    pub value: String,
    pub label: String,
}

/// A language identifier.
///
/// The generator writes languages as numeric codes; hand-written configs may
/// use names. Both are kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "LanguageRepr")]
pub struct LanguageId(String);

impl LanguageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LanguageRepr {
    Code(i64),
    Name(String),
}

impl From<LanguageRepr> for LanguageId {
    fn from(repr: LanguageRepr) -> Self {
        match repr {
            LanguageRepr::Code(code) => Self(code.to_string()),
            LanguageRepr::Name(name) => Self(name),
        }
    }
}

/// Search mode as written: a numeric code or a name.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RawSearchMode {
    Code(i64),
    Name(String),
}

impl Default for RawSearchMode {
    fn default() -> Self {
        Self::Code(0)
    }
}

impl std::fmt::Display for RawSearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// The `search` block, including its presentation-only fields.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchSettings {
    #[serde(default)]
    pub mode: RawSearchMode,
    #[serde(default = "default_min_chars")]
    pub min_chars: i64,
    #[serde(default = "default_max_results")]
    pub max_results: i64,
    #[serde(default)]
    pub languages: Vec<LanguageId>,
    #[serde(default)]
    pub recognize_languages: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub hotkeys: Vec<String>,
    #[serde(default)]
    pub no_results_found_msg: Option<String>,
}

impl Default for RawSearchSettings {
    fn default() -> Self {
        Self {
            mode: RawSearchMode::default(),
            min_chars: default_min_chars(),
            max_results: default_max_results(),
            languages: Vec::new(),
            recognize_languages: false,
            placeholder: None,
            hotkeys: Vec::new(),
            no_results_found_msg: None,
        }
    }
}

/// Top-level fields the engine passes through without interpreting.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawPresentation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub sidebar_filter_placeholder: Option<String>,
    #[serde(default)]
    pub toolbar_filter_placeholder: Option<String>,
    #[serde(default = "default_true")]
    pub show_sidebar_filter: bool,
    #[serde(default)]
    pub filter_not_found_msg: Option<String>,
    #[serde(default)]
    pub home_icon: Option<String>,
    /// Unknown fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_true() -> bool {
    true
}

fn default_min_chars() -> i64 {
    2
}

fn default_max_results() -> i64 {
    20
}

fn default_max_history_items() -> i64 {
    15
}
