//! Flattened, queryable view of the sidebar tree.
//!
//! [`TreeIndex`] lays the sidebar out as a pre-order sequence of
//! [`FlatNode`]s: the order nodes appear on screen. Each flat node keeps its
//! depth and parent so the hierarchy can be rebuilt for rendering and
//! breadcrumbs. Keys and parent paths grow with depth, so they are derived
//! from the parent links on request instead of being stored per node.

use std::collections::HashMap;

use crate::config::sidebar::KeyTrie;
use crate::config::{LanguageId, NodeId, SidebarTree};

/// One sidebar node together with its position in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatNode {
    /// Arena id of the node.
    pub id: NodeId,
    pub name: String,
    pub label: String,
    /// `0` for top-level entries.
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub collapsed_by_default: bool,
    pub is_external: bool,
    pub icon_markup: Option<String>,
    /// Own language tag, or the nearest ancestor's.
    pub language: Option<LanguageId>,
}

impl FlatNode {
    /// A node without children is a navigable page.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The text filters and searches match against.
    pub fn match_text(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}

/// Pre-order index over a [`SidebarTree`].
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    nodes: Vec<FlatNode>,
    /// Position in `nodes` for each arena id.
    positions: HashMap<NodeId, usize>,
    keys: KeyTrie,
}

impl TreeIndex {
    /// Flattens `tree` in declaration order.
    pub fn build(tree: &SidebarTree) -> Self {
        let mut nodes: Vec<FlatNode> = Vec::with_capacity(tree.len());
        let mut positions: HashMap<NodeId, usize> = HashMap::with_capacity(tree.len());
        let mut stack: Vec<NodeId> = tree.roots().iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let Some(node) = tree.get(id) else {
                continue;
            };
            let (depth, inherited) = match node.parent().and_then(|p| positions.get(&p)) {
                Some(&pos) => (nodes[pos].depth + 1, nodes[pos].language.clone()),
                None => (0, None),
            };

            positions.insert(id, nodes.len());
            nodes.push(FlatNode {
                id,
                name: node.name().to_string(),
                label: node.label().to_string(),
                depth,
                parent: node.parent(),
                children: node.children().to_vec(),
                collapsed_by_default: node.collapsed_by_default(),
                is_external: node.is_external(),
                icon_markup: node.icon_markup().map(str::to_string),
                language: node.language().cloned().or(inherited),
            });
            stack.extend(node.children().iter().rev().copied());
        }

        tracing::debug!(nodes = nodes.len(), "sidebar index built");
        Self {
            nodes,
            positions,
            keys: tree.keys().clone(),
        }
    }

    /// All nodes in on-screen order.
    pub fn flatten(&self) -> &[FlatNode] {
        &self.nodes
    }

    pub fn get(&self, id: NodeId) -> Option<&FlatNode> {
        self.positions.get(&id).map(|&pos| &self.nodes[pos])
    }

    /// Resolves a navigation key such as `tutorials/basics`.
    pub fn find_by_key(&self, key: &str) -> Option<&FlatNode> {
        self.keys.lookup(key).and_then(|id| self.get(id))
    }

    /// Navigation key of `id`: names from the root down, joined with `/`.
    pub fn key_of(&self, id: NodeId) -> Option<String> {
        let node = self.get(id)?;
        let mut names = self.parent_path(id);
        names.push(&node.name);
        Some(names.join("/"))
    }

    /// Names of the ancestors of `id`, root first.
    pub fn parent_path(&self, id: NodeId) -> Vec<&str> {
        self.ancestors_of(id)
            .into_iter()
            .filter_map(|a| self.get(a))
            .map(|n| n.name.as_str())
            .collect()
    }

    /// Ancestor ids of `id`, root first. Empty for top-level or unknown ids.
    pub fn ancestors_of(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.get(id).and_then(|n| n.parent);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.get(parent).and_then(|n| n.parent);
        }
        ancestors.reverse();
        ancestors
    }

    /// Labels from the root down to and including `id`.
    pub fn breadcrumb(&self, id: NodeId) -> Vec<&str> {
        let Some(node) = self.get(id) else {
            return Vec::new();
        };
        self.ancestors_of(id)
            .into_iter()
            .filter_map(|a| self.get(a))
            .chain(std::iter::once(node))
            .map(|n| n.label.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
