//! Arena storage for the validated sidebar tree.
//!
//! Nodes live in a single `Vec` in declaration (pre-)order and refer to
//! each other by [`NodeId`], so no traversal ever needs call recursion.
//! Navigation keys (`tutorials/basics`) are interned segment by segment, so
//! a chain of any depth costs one entry per node rather than one full path.

use std::collections::HashMap;

use crate::config::raw::LanguageId;

/// Index of a node inside its [`SidebarTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A validated sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarNode {
    name: String,
    label: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    collapsed_by_default: bool,
    is_external: bool,
    icon_markup: Option<String>,
    language: Option<LanguageId>,
}

impl SidebarNode {
    pub(crate) fn new(
        name: String,
        label: String,
        parent: Option<NodeId>,
        collapsed_by_default: bool,
        is_external: bool,
        icon_markup: Option<String>,
        language: Option<LanguageId>,
    ) -> Self {
        Self {
            name,
            label,
            children: Vec::new(),
            parent,
            collapsed_by_default,
            is_external,
            icon_markup,
            language,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label; equals the name when the configuration gave none.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Child ids in declaration order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// A node without children is a navigable page.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn collapsed_by_default(&self) -> bool {
        self.collapsed_by_default
    }

    pub fn is_external(&self) -> bool {
        self.is_external
    }

    pub fn icon_markup(&self) -> Option<&str> {
        self.icon_markup.as_deref()
    }

    /// The language tag declared on this node itself (not inherited).
    pub fn language(&self) -> Option<&LanguageId> {
        self.language.as_ref()
    }
}

/// Interned navigation keys.
///
/// A key is a sequence of `/`-separated segments; each distinct prefix gets
/// a small integer id. Prefix `0` is the empty key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyTrie {
    edges: Vec<HashMap<String, usize>>,
    owners: Vec<Option<NodeId>>,
}

impl Default for KeyTrie {
    fn default() -> Self {
        Self {
            edges: vec![HashMap::new()],
            owners: vec![None],
        }
    }
}

impl KeyTrie {
    const EMPTY: usize = 0;

    /// The prefix id of `prefix` followed by `/` and `name`.
    fn extend(&mut self, prefix: usize, name: &str) -> usize {
        let mut current = prefix;
        for segment in name.split('/') {
            current = match self.edges[current].get(segment) {
                Some(&next) => next,
                None => {
                    let next = self.edges.len();
                    self.edges.push(HashMap::new());
                    self.owners.push(None);
                    self.edges[current].insert(segment.to_string(), next);
                    next
                }
            };
        }
        current
    }

    /// Records `id` as the owner of `key` unless it already has one.
    fn claim(&mut self, key: usize, id: NodeId) {
        if self.owners[key].is_none() {
            self.owners[key] = Some(id);
        }
    }

    fn owner(&self, key: usize) -> Option<NodeId> {
        self.owners.get(key).copied().flatten()
    }

    /// The node whose key is exactly `key`.
    pub(crate) fn lookup(&self, key: &str) -> Option<NodeId> {
        let mut current = Self::EMPTY;
        for segment in key.split('/') {
            current = *self.edges[current].get(segment)?;
        }
        self.owner(current)
    }
}

/// The whole sidebar, roots first-level in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarTree {
    nodes: Vec<SidebarNode>,
    roots: Vec<NodeId>,
    /// Key prefix id of each node, by id.
    key_ids: Vec<usize>,
    keys: KeyTrie,
}

impl SidebarTree {
    /// Appends `node`, links it under its parent (or as a root) and
    /// registers its key. The first node to take a key keeps it.
    pub(crate) fn push(&mut self, node: SidebarNode) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let prefix = match node.parent {
            Some(parent) => {
                self.nodes[parent.0].children.push(id);
                self.key_ids[parent.0]
            }
            None => {
                self.roots.push(id);
                KeyTrie::EMPTY
            }
        };
        let key = self.keys.extend(prefix, &node.name);
        self.keys.claim(key, id);
        self.key_ids.push(key);
        self.nodes.push(node);
        id
    }

    /// Whether `id` is the node its key resolves to.
    pub(crate) fn owns_key(&self, id: NodeId) -> bool {
        self.key_ids
            .get(id.0)
            .is_some_and(|&key| self.keys.owner(key) == Some(id))
    }

    pub(crate) fn keys(&self) -> &KeyTrie {
        &self.keys
    }

    pub fn get(&self, id: NodeId) -> Option<&SidebarNode> {
        self.nodes.get(id.0)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All nodes in declaration order; `nodes()[i]` has id `i`.
    pub fn nodes(&self) -> &[SidebarNode] {
        &self.nodes
    }

    /// Resolves a navigation key such as `tutorials/basics`.
    pub fn find_by_key(&self, key: &str) -> Option<NodeId> {
        self.keys.lookup(key)
    }

    /// Names from the root down to `id`, joined with `/`.
    pub fn key_of(&self, id: NodeId) -> Option<String> {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.get(id)?;
            names.push(node.name());
            current = node.parent();
        }
        names.reverse();
        Some(names.join("/"))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
