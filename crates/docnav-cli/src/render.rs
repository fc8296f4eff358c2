//! Plain-text rendering of engine results.

use docnav_core::{FlatNode, HistoryEntry, SearchHit, ToolbarLink, TreeIndex};

/// Indents each node by its depth; groups get a trailing `/`.
///
/// `nodes` may be a filtered subset of `index`; keys come from the index.
pub fn render_tree(index: &TreeIndex, nodes: &[FlatNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        let marker = if node.is_leaf() { "" } else { "/" };
        let external = if node.is_external { " ↗" } else { "" };
        let key = index.key_of(node.id).unwrap_or_default();
        out.push_str(&format!(
            "{}{}{marker}{external}  [{key}]\n",
            "  ".repeat(node.depth),
            node.label,
        ));
    }
    out
}

/// One link per line, with the short label in parentheses when present.
pub fn render_toolbar(links: &[ToolbarLink]) -> String {
    let mut out = String::new();
    for link in links {
        match &link.short_label {
            Some(short) => out.push_str(&format!("{} ({short})  [{}]\n", link.label, link.id)),
            None => out.push_str(&format!("{}  [{}]\n", link.label, link.id)),
        }
    }
    out
}

/// Numbered hit list; the language is shown when the hit has one.
pub fn render_hits(hits: &[SearchHit]) -> String {
    let mut out = String::new();
    for (i, hit) in hits.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}  [{}]", i + 1, hit.label, hit.key));
        if let Some(language) = &hit.matched_language {
            out.push_str(&format!("  ({language})"));
        }
        out.push('\n');
    }
    out
}

/// History, most recent first.
pub fn render_history(entries: &[HistoryEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!("#{:<4} {}\n", entry.visited_at_seq(), entry.target_id()));
    }
    out
}
