//! The validated, immutable configuration.
//!
//! [`ConfigModel::load`] turns a [`RawConfig`] into a [`ConfigModel`] or the
//! first [`ValidationError`] found. [`ConfigModel::load_file`] adds reading
//! and parsing on top, for frontends that start from a path.

use std::collections::HashSet;
use std::path::Path;

use serde_json::{Map, Value};

use crate::config::raw::{
    AccessLabel, LanguageId, RawConfig, RawPresentation, RawSearchMode, RawSearchSettings,
    RawSidebarNode, ToolbarLink,
};
use crate::config::sidebar::{NodeId, SidebarNode, SidebarTree};
use crate::error::{CoreError, CoreResult, ValidationError};

const DEFAULT_NOT_FOUND_MSG: &str = "No member names found containing the query \"{query}\"";
const DEFAULT_NO_RESULTS_MSG: &str = "Sorry, no results found.";

/// How search queries are compared against member names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Case-insensitive substring.
    #[default]
    Exact,
    /// Case-insensitive subsequence.
    Fuzzy,
}

impl SearchMode {
    fn from_raw(raw: &RawSearchMode) -> Option<Self> {
        match raw {
            RawSearchMode::Code(0) => Some(Self::Exact),
            RawSearchMode::Code(1) => Some(Self::Fuzzy),
            RawSearchMode::Code(_) => None,
            RawSearchMode::Name(name) => match name.to_lowercase().as_str() {
                "exact" => Some(Self::Exact),
                "fuzzy" => Some(Self::Fuzzy),
                _ => None,
            },
        }
    }
}

/// Validated search settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub mode: SearchMode,
    pub min_chars: usize,
    pub max_results: usize,
    pub languages: HashSet<LanguageId>,
    pub recognize_languages: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            mode: SearchMode::Exact,
            min_chars: 2,
            max_results: 20,
            languages: HashSet::new(),
            recognize_languages: false,
        }
    }
}

/// Presentation-only fields, carried through untouched for the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Presentation {
    pub id: Option<String>,
    pub key: Option<String>,
    pub base: Option<String>,
    pub host: Option<String>,
    pub version: Option<String>,
    pub sidebar_filter_placeholder: Option<String>,
    pub toolbar_filter_placeholder: Option<String>,
    pub show_sidebar_filter: bool,
    pub filter_not_found_msg: Option<String>,
    pub home_icon: Option<String>,
    pub search_placeholder: Option<String>,
    pub search_hotkeys: Vec<String>,
    pub no_results_found_msg: Option<String>,
    pub extra: Map<String, Value>,
}

impl Presentation {
    fn from_raw(raw: RawPresentation, search: &RawSearchSettings) -> Self {
        Self {
            id: raw.id,
            key: raw.key,
            base: raw.base,
            host: raw.host,
            version: raw.version,
            sidebar_filter_placeholder: raw.sidebar_filter_placeholder,
            toolbar_filter_placeholder: raw.toolbar_filter_placeholder,
            show_sidebar_filter: raw.show_sidebar_filter,
            filter_not_found_msg: raw.filter_not_found_msg,
            home_icon: raw.home_icon,
            search_placeholder: search.placeholder.clone(),
            search_hotkeys: search.hotkeys.clone(),
            no_results_found_msg: search.no_results_found_msg.clone(),
            extra: raw.extra,
        }
    }
}

/// The configuration every other component reads from.
///
/// Constructed once and never mutated; share it with `Arc<ConfigModel>`.
#[derive(Debug, Clone)]
pub struct ConfigModel {
    sidebar: SidebarTree,
    toolbar_links: Vec<ToolbarLink>,
    access: Vec<AccessLabel>,
    search: SearchSettings,
    max_history_items: usize,
    presentation: Presentation,
}

impl ConfigModel {
    /// Validates `raw` and builds the model.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered; nothing is built
    /// from a configuration that fails validation.
    pub fn load(raw: RawConfig) -> Result<Self, ValidationError> {
        let result = Self::build(raw);
        match &result {
            Ok(model) => tracing::info!(
                nodes = model.sidebar.len(),
                toolbar_links = model.toolbar_links.len(),
                access_labels = model.access.len(),
                "configuration loaded"
            ),
            Err(e) => tracing::warn!(path = e.path(), "configuration rejected: {e}"),
        }
        result
    }

    /// Reads, parses and validates the configuration file at `path`.
    ///
    /// The format follows the extension: `.json`, `.toml`, or `.js` for the
    /// generator's script payload.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::UnsupportedFormat`] for any other extension.
    /// - [`CoreError::ConfigParse`] if the payload is malformed.
    /// - [`CoreError::Validation`] if the payload violates an invariant.
    pub fn load_file(path: &Path) -> CoreResult<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let parse: fn(&str) -> CoreResult<RawConfig> = match extension.as_str() {
            "json" => RawConfig::from_json,
            "toml" => RawConfig::from_toml,
            "js" => RawConfig::from_script,
            _ => return Err(CoreError::UnsupportedFormat(path.to_path_buf())),
        };
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        Ok(Self::load(parse(&content)?)?)
    }

    fn build(raw: RawConfig) -> Result<Self, ValidationError> {
        let search = validate_search(&raw.search)?;
        let max_history_items = usize::try_from(raw.max_history_items)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or(ValidationError::InvalidMaxHistoryItems {
                path: "maxHistoryItems".to_string(),
                value: raw.max_history_items,
            })?;
        validate_toolbar(&raw.toolbar_links)?;
        validate_access(&raw.access)?;
        let sidebar = build_sidebar(&raw.sidebar)?;
        let presentation = Presentation::from_raw(raw.presentation, &raw.search);

        Ok(Self {
            sidebar,
            toolbar_links: raw.toolbar_links,
            access: raw.access,
            search,
            max_history_items,
            presentation,
        })
    }

    pub fn sidebar(&self) -> &SidebarTree {
        &self.sidebar
    }

    pub fn toolbar_links(&self) -> &[ToolbarLink] {
        &self.toolbar_links
    }

    pub fn access(&self) -> &[AccessLabel] {
        &self.access
    }

    /// Looks up an access label by its value.
    pub fn access_label(&self, value: &str) -> Option<&AccessLabel> {
        self.access.iter().find(|a| a.value == value)
    }

    pub fn search(&self) -> &SearchSettings {
        &self.search
    }

    pub fn max_history_items(&self) -> usize {
        self.max_history_items
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// The "not found" message with `{query}` replaced by the literal query.
    pub fn not_found_message(&self, query: &str) -> String {
        self.presentation
            .filter_not_found_msg
            .as_deref()
            .unwrap_or(DEFAULT_NOT_FOUND_MSG)
            .replace("{query}", query)
    }

    /// The message shown when a search yields nothing.
    pub fn no_results_message(&self) -> &str {
        self.presentation
            .no_results_found_msg
            .as_deref()
            .unwrap_or(DEFAULT_NO_RESULTS_MSG)
    }
}

fn validate_search(raw: &RawSearchSettings) -> Result<SearchSettings, ValidationError> {
    let mode = SearchMode::from_raw(&raw.mode).ok_or_else(|| ValidationError::UnknownSearchMode {
        path: "search.mode".to_string(),
        mode: raw.mode.to_string(),
    })?;
    let min_chars =
        usize::try_from(raw.min_chars).map_err(|_| ValidationError::NegativeMinChars {
            path: "search.minChars".to_string(),
            value: raw.min_chars,
        })?;
    let max_results = usize::try_from(raw.max_results)
        .ok()
        .filter(|n| *n >= 1)
        .ok_or(ValidationError::InvalidMaxResults {
            path: "search.maxResults".to_string(),
            value: raw.max_results,
        })?;

    Ok(SearchSettings {
        mode,
        min_chars,
        max_results,
        languages: raw.languages.iter().cloned().collect(),
        recognize_languages: raw.recognize_languages,
    })
}

fn validate_toolbar(links: &[ToolbarLink]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (i, link) in links.iter().enumerate() {
        if !seen.insert(link.id.as_str()) {
            return Err(ValidationError::DuplicateToolbarId {
                path: format!("toolbarLinks[{i}].id"),
                id: link.id.clone(),
            });
        }
    }
    Ok(())
}

fn validate_access(labels: &[AccessLabel]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (i, label) in labels.iter().enumerate() {
        if !seen.insert(label.value.as_str()) {
            return Err(ValidationError::DuplicateAccessValue {
                path: format!("access[{i}].value"),
                value: label.value.clone(),
            });
        }
    }
    Ok(())
}

/// Rejects the first repeated name in one sibling list.
fn check_siblings(
    siblings: &[RawSidebarNode],
    path_of: impl Fn(usize) -> String,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (i, node) in siblings.iter().enumerate() {
        if node.name.is_empty() {
            return Err(ValidationError::EmptyNodeName {
                path: format!("{}.n", path_of(i)),
            });
        }
        if !seen.insert(node.name.as_str()) {
            return Err(ValidationError::DuplicateSidebarName {
                path: path_of(i),
                name: node.name.clone(),
            });
        }
    }
    Ok(())
}

fn is_absolute_url(name: &str) -> bool {
    name.starts_with("http://") || name.starts_with("https://")
}

/// Pending work while converting the raw tree into the arena.
struct Frame<'a> {
    raw: &'a RawSidebarNode,
    parent: Option<NodeId>,
    /// Position among its siblings.
    slot: usize,
}

/// Field path such as `sidebar[1].i[3]` for the child at `slot` of `parent`.
///
/// Only built when reporting an error; `slots` holds each node's position
/// among its siblings, by id.
fn field_path(
    tree: &SidebarTree,
    slots: &[usize],
    parent: Option<NodeId>,
    slot: usize,
) -> String {
    let mut chain = vec![slot];
    let mut current = parent;
    while let Some(id) = current {
        chain.push(slots[id.index()]);
        current = tree.get(id).and_then(SidebarNode::parent);
    }

    let mut path = String::from("sidebar");
    for (depth, slot) in chain.iter().rev().enumerate() {
        if depth == 0 {
            path.push_str(&format!("[{slot}]"));
        } else {
            path.push_str(&format!(".i[{slot}]"));
        }
    }
    path
}

fn build_sidebar(roots: &[RawSidebarNode]) -> Result<SidebarTree, ValidationError> {
    let mut tree = SidebarTree::default();
    let mut slots: Vec<usize> = Vec::new();
    check_siblings(roots, |i| field_path(&tree, &slots, None, i))?;

    let mut stack: Vec<Frame<'_>> = roots
        .iter()
        .enumerate()
        .rev()
        .map(|(slot, raw)| Frame {
            raw,
            parent: None,
            slot,
        })
        .collect();

    while let Some(frame) = stack.pop() {
        let raw = frame.raw;
        let label = match raw.label.as_deref() {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => raw.name.clone(),
        };
        let collapsed = raw.collapsed.unwrap_or(false) && !raw.open.unwrap_or(false);
        let external = raw.external.unwrap_or(false) || is_absolute_url(&raw.name);
        let id = tree.push(SidebarNode::new(
            raw.name.clone(),
            label,
            frame.parent,
            collapsed,
            external,
            raw.icon.clone(),
            raw.language.clone(),
        ));
        slots.push(frame.slot);

        check_siblings(&raw.children, |i| field_path(&tree, &slots, Some(id), i))?;
        if !tree.owns_key(id) {
            return Err(ValidationError::DuplicateNodeKey {
                path: field_path(&tree, &slots, frame.parent, frame.slot),
                key: tree.key_of(id).unwrap_or_default(),
            });
        }

        for (slot, child) in raw.children.iter().enumerate().rev() {
            stack.push(Frame {
                raw: child,
                parent: Some(id),
                slot,
            });
        }
    }

    Ok(tree)
}
