//! Property-based tests for the navigation engine.
//!
//! Tests validate:
//! 1. Filtering with an empty query is the identity
//! 2. Filtered sidebars stay connected and keep every direct match
//! 3. Search never scans queries shorter than `minChars` and respects `maxResults`
//! 4. History stays bounded and duplicate-free
//! 5. Duplicate sibling names are always rejected

use std::collections::HashSet;
use std::sync::Arc;

use docnav_core::{
    filter_sidebar, ConfigModel, HistoryTracker, NavigationController, RawConfig, RawSidebarNode,
    SearchEngine, TreeIndex, ValidationError,
};
use proptest::prelude::*;

// ===== Strategies =====

fn node_strategy() -> impl Strategy<Value = RawSidebarNode> {
    let leaf = ("[a-e]{1,3}", "[A-Za-z ]{0,8}")
        .prop_map(|(name, label)| RawSidebarNode::leaf(name, label));
    leaf.prop_recursive(4, 48, 5, |inner| {
        ("[a-e]{1,3}", "[A-Za-z ]{0,8}", prop::collection::vec(inner, 0..5)).prop_map(
            |(name, label, children)| RawSidebarNode::group(name, label, dedupe(children)),
        )
    })
}

fn sidebar_strategy() -> impl Strategy<Value = Vec<RawSidebarNode>> {
    prop::collection::vec(node_strategy(), 0..6).prop_map(dedupe)
}

/// Drops later siblings that repeat an earlier name.
fn dedupe(nodes: Vec<RawSidebarNode>) -> Vec<RawSidebarNode> {
    let mut seen = HashSet::new();
    nodes
        .into_iter()
        .filter(|n| seen.insert(n.name.clone()))
        .collect()
}

fn model(sidebar: Vec<RawSidebarNode>, min_chars: usize, max_results: usize) -> ConfigModel {
    let json = format!(
        r#"{{"sidebar":[],"search":{{"minChars":{min_chars},"maxResults":{max_results}}}}}"#
    );
    let raw = RawConfig::from_json(&json).unwrap();
    ConfigModel::load(RawConfig { sidebar, ..raw }).unwrap()
}

fn direct_match(text: &str, query: &str) -> bool {
    text.to_lowercase().contains(&query.to_lowercase())
}

// ===== Property 1: Identity =====

proptest! {
    #[test]
    fn empty_query_is_identity(sidebar in sidebar_strategy()) {
        let model = model(sidebar, 2, 20);
        let index = TreeIndex::build(model.sidebar());
        prop_assert_eq!(filter_sidebar(index.flatten(), ""), index.flatten().to_vec());
    }
}

// ===== Property 2: Connectivity =====

proptest! {
    #[test]
    fn filtered_nodes_match_or_lead_to_a_match(
        sidebar in sidebar_strategy(),
        query in "[a-e]{1,2}",
    ) {
        let model = model(sidebar, 2, 20);
        let index = TreeIndex::build(model.sidebar());
        let result = filter_sidebar(index.flatten(), &query);

        let matches: Vec<_> = result
            .iter()
            .filter(|n| direct_match(n.match_text(), &query))
            .collect();

        for node in &result {
            let is_match = direct_match(node.match_text(), &query);
            let leads_to_match = matches
                .iter()
                .any(|m| index.ancestors_of(m.id).contains(&node.id));
            prop_assert!(
                is_match || leads_to_match,
                "node {:?} is disconnected",
                index.key_of(node.id)
            );
        }
    }

    #[test]
    fn every_direct_match_is_kept(
        sidebar in sidebar_strategy(),
        query in "[a-e]{1,2}",
    ) {
        let model = model(sidebar, 2, 20);
        let index = TreeIndex::build(model.sidebar());
        let kept: HashSet<_> = filter_sidebar(index.flatten(), &query)
            .into_iter()
            .map(|n| n.id)
            .collect();

        for node in index.flatten() {
            if direct_match(node.match_text(), &query) {
                prop_assert!(kept.contains(&node.id));
            }
        }
    }
}

// ===== Property 3: Search guard and bounds =====

proptest! {
    #[test]
    fn short_queries_return_nothing(
        sidebar in sidebar_strategy(),
        min_chars in 1usize..6,
        query in "[a-e]{0,5}",
    ) {
        prop_assume!(query.chars().count() < min_chars);
        let model = model(sidebar, min_chars, 20);
        let index = TreeIndex::build(model.sidebar());
        let engine = SearchEngine::new(&index, model.search());
        prop_assert!(engine.search(&query).is_empty());
    }

    #[test]
    fn hits_are_bounded_and_in_tree_order(
        sidebar in sidebar_strategy(),
        max_results in 1usize..5,
        query in "[a-e]{1,2}",
    ) {
        let model = model(sidebar, 1, max_results);
        let index = TreeIndex::build(model.sidebar());
        let hits = SearchEngine::new(&index, model.search()).search(&query);

        prop_assert!(hits.len() <= max_results);
        let positions: Vec<usize> = hits.iter().map(|h| h.node_id.index()).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        prop_assert_eq!(positions, sorted);
    }
}

// ===== Property 4: History =====

proptest! {
    #[test]
    fn history_is_bounded_and_unique(
        capacity in 1usize..6,
        visits in prop::collection::vec("[a-h]", 0..40),
    ) {
        let mut history = HistoryTracker::new(capacity);
        for id in &visits {
            history.record_visit(id.as_str());
        }

        let entries = history.entries();
        prop_assert!(entries.len() <= capacity);
        let unique: HashSet<_> = entries.iter().map(|e| e.target_id()).collect();
        prop_assert_eq!(unique.len(), entries.len());
        if let Some(last) = visits.last() {
            prop_assert_eq!(entries[0].target_id(), last.as_str());
        }
        for pair in entries.windows(2) {
            prop_assert!(pair[0].visited_at_seq() > pair[1].visited_at_seq());
        }
    }

    #[test]
    fn controller_history_respects_max_history_items(
        visits in prop::collection::vec("[a-h]", 0..40),
    ) {
        let raw = RawConfig::from_json(r#"{"sidebar":[],"maxHistoryItems":4}"#).unwrap();
        let mut nav = NavigationController::new(Arc::new(ConfigModel::load(raw).unwrap()));
        for id in &visits {
            nav.record_visit(id);
        }
        prop_assert!(nav.history().len() <= 4);
    }
}

// ===== Property 5: Validation =====

proptest! {
    #[test]
    fn duplicate_sibling_names_are_rejected(
        sidebar in sidebar_strategy(),
        name in "[a-e]{1,3}",
    ) {
        let mut sidebar = sidebar;
        sidebar.push(RawSidebarNode::leaf(name.clone(), "First"));
        sidebar.push(RawSidebarNode::leaf(name.clone(), "Second"));
        let sidebar = {
            // Keep only the two appended copies of `name` at the root.
            let len = sidebar.len();
            sidebar
                .into_iter()
                .enumerate()
                .filter(|(i, n)| n.name != name || *i >= len - 2)
                .map(|(_, n)| n)
                .collect::<Vec<_>>()
        };
        let expected_path = format!("sidebar[{}]", sidebar.len() - 1);

        let raw = RawConfig::from_json(r#"{"sidebar":[]}"#).unwrap();
        let err = ConfigModel::load(RawConfig { sidebar, ..raw }).unwrap_err();
        prop_assert_eq!(
            err,
            ValidationError::DuplicateSidebarName { path: expected_path, name }
        );
    }
}
