//! Sidebar and toolbar filtering.
//!
//! Matching is a case-insensitive substring test on the display label.
//! The sidebar filter keeps the ancestors of every match so the filtered
//! view is still a connected tree the reader can navigate.

use std::collections::{HashMap, HashSet};

use crate::config::{NodeId, ToolbarLink};
use crate::nav::tree::FlatNode;

/// Normalises `s` for comparison: NFC-composed, then lowercased.
pub(crate) fn fold(s: &str) -> String {
    crate::nfc_string(s).to_lowercase()
}

/// Filters `nodes` down to matches and their ancestors.
///
/// A node is kept when its label (or name, if the label is empty) contains
/// `query`, or when one of its descendants does. Kept nodes stay in input
/// order and their `children` lists are narrowed to kept children. An empty
/// or whitespace-only query returns `nodes` unchanged. Returns a **new**
/// `Vec`; the input is never mutated.
pub fn filter_sidebar(nodes: &[FlatNode], query: &str) -> Vec<FlatNode> {
    let needle = fold(query.trim());
    if needle.is_empty() {
        return nodes.to_vec();
    }

    let positions: HashMap<NodeId, usize> =
        nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();
    let mut keep = vec![false; nodes.len()];

    for (i, node) in nodes.iter().enumerate() {
        if !fold(node.match_text()).contains(&needle) {
            continue;
        }
        keep[i] = true;

        // Walk up until we reach an ancestor that is already kept; its own
        // ancestors were marked when it was.
        let mut parent = node.parent;
        while let Some(id) = parent {
            let Some(&pos) = positions.get(&id) else {
                break;
            };
            if keep[pos] {
                break;
            }
            keep[pos] = true;
            parent = nodes[pos].parent;
        }
    }

    let kept: HashSet<NodeId> = nodes
        .iter()
        .zip(&keep)
        .filter(|(_, k)| **k)
        .map(|(n, _)| n.id)
        .collect();

    let result: Vec<FlatNode> = nodes
        .iter()
        .zip(&keep)
        .filter(|(_, k)| **k)
        .map(|(n, _)| {
            let mut node = n.clone();
            node.children.retain(|c| kept.contains(c));
            node
        })
        .collect();

    tracing::debug!(query, total = nodes.len(), kept = result.len(), "sidebar filtered");
    result
}

/// Filters toolbar links whose label contains `query`, case-insensitively.
///
/// An empty or whitespace-only query returns `links` unchanged.
pub fn filter_toolbar(links: &[ToolbarLink], query: &str) -> Vec<ToolbarLink> {
    let needle = fold(query.trim());
    if needle.is_empty() {
        return links.to_vec();
    }

    let result: Vec<ToolbarLink> = links
        .iter()
        .filter(|l| fold(l.display_label()).contains(&needle))
        .cloned()
        .collect();

    tracing::debug!(query, total = links.len(), kept = result.len(), "toolbar filtered");
    result
}
