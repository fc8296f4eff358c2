//! Member-name search over the sidebar index.
//!
//! Results come back in tree order (the order members appear in the
//! sidebar), never re-ranked, and are capped at `maxResults`. Queries
//! shorter than `minChars` return nothing without scanning.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::config::{LanguageId, NodeId, SearchMode, SearchSettings};
use crate::nav::filter::fold;
use crate::nav::tree::{FlatNode, TreeIndex};

/// A single search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub node_id: NodeId,
    /// Navigation key of the node, e.g. `tutorials/basics`.
    pub key: String,
    pub label: String,
    /// Language of the node, if it has one.
    pub matched_language: Option<LanguageId>,
}

/// Decides whether a member name matches a query.
///
/// Both arguments are already case-folded.
pub trait NameMatcher {
    fn matches(&self, haystack: &str, needle: &str) -> bool;
}

/// Substring matching.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstringMatcher;

impl NameMatcher for SubstringMatcher {
    fn matches(&self, haystack: &str, needle: &str) -> bool {
        haystack.contains(needle)
    }
}

/// Subsequence matching via the skim algorithm.
pub struct SubsequenceMatcher {
    matcher: SkimMatcherV2,
}

impl Default for SubsequenceMatcher {
    fn default() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }
}

impl std::fmt::Debug for SubsequenceMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubsequenceMatcher").finish_non_exhaustive()
    }
}

impl NameMatcher for SubsequenceMatcher {
    fn matches(&self, haystack: &str, needle: &str) -> bool {
        self.matcher.fuzzy_match(haystack, needle).is_some()
    }
}

fn matcher_for(mode: SearchMode) -> Box<dyn NameMatcher> {
    match mode {
        SearchMode::Exact => Box::new(SubstringMatcher),
        SearchMode::Fuzzy => Box::new(SubsequenceMatcher::default()),
    }
}

/// Pure query function over a [`TreeIndex`].
pub struct SearchEngine<'a> {
    index: &'a TreeIndex,
    settings: &'a SearchSettings,
    matcher: Box<dyn NameMatcher>,
}

impl<'a> SearchEngine<'a> {
    /// Creates an engine using the matcher selected by `settings.mode`.
    pub fn new(index: &'a TreeIndex, settings: &'a SearchSettings) -> Self {
        Self::with_matcher(index, settings, matcher_for(settings.mode))
    }

    /// Creates an engine with a caller-supplied matcher.
    pub fn with_matcher(
        index: &'a TreeIndex,
        settings: &'a SearchSettings,
        matcher: Box<dyn NameMatcher>,
    ) -> Self {
        Self {
            index,
            settings,
            matcher,
        }
    }

    /// Searches member labels and names for `query`.
    ///
    /// Returns an empty `Vec` when the trimmed query is empty or shorter than
    /// `minChars` characters.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let query = query.trim();
        if query.is_empty() || query.chars().count() < self.settings.min_chars {
            tracing::debug!(query, min_chars = self.settings.min_chars, "search skipped");
            return Vec::new();
        }

        let needle = fold(query);
        let hits: Vec<SearchHit> = self
            .index
            .flatten()
            .iter()
            .filter(|node| self.in_scope(node))
            .filter(|node| self.node_matches(node, &needle))
            .take(self.settings.max_results)
            .map(|node| SearchHit {
                node_id: node.id,
                key: self.index.key_of(node.id).unwrap_or_default(),
                label: node.match_text().to_string(),
                matched_language: node.language.clone(),
            })
            .collect();

        tracing::debug!(query, hits = hits.len(), "search completed");
        hits
    }

    /// Language-neutral nodes are always in scope.
    fn in_scope(&self, node: &FlatNode) -> bool {
        if !self.settings.recognize_languages {
            return true;
        }
        match &node.language {
            Some(language) => self.settings.languages.contains(language),
            None => true,
        }
    }

    fn node_matches(&self, node: &FlatNode, needle: &str) -> bool {
        self.matcher.matches(&fold(node.match_text()), needle)
            || (node.name != node.label && self.matcher.matches(&fold(&node.name), needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigModel, RawConfig, RawSidebarNode};

    fn model(sidebar: Vec<RawSidebarNode>, search: &str) -> ConfigModel {
        let raw =
            RawConfig::from_json(&format!(r#"{{"sidebar":[],"search":{search}}}"#)).unwrap();
        ConfigModel::load(RawConfig { sidebar, ..raw }).unwrap()
    }

    fn tutorials() -> Vec<RawSidebarNode> {
        vec![
            RawSidebarNode::leaf("/", "Who we are"),
            RawSidebarNode::group(
                "tutorials",
                "Tutorials",
                vec![
                    RawSidebarNode::leaf("basics", "Basics"),
                    RawSidebarNode::leaf("motoko_playground", "Motoko playground"),
                    RawSidebarNode::leaf("primitive_types", "Primitive data types"),
                    RawSidebarNode::leaf("database", "Database access"),
                ],
            ),
        ]
    }

    fn keys(hits: &[SearchHit]) -> Vec<&str> {
        hits.iter().map(|h| h.key.as_str()).collect()
    }

    #[test]
    fn query_below_min_chars_returns_nothing() {
        let model = model(tutorials(), r#"{"minChars":2,"maxResults":20}"#);
        let index = TreeIndex::build(model.sidebar());
        let engine = SearchEngine::new(&index, model.search());

        assert!(engine.search("a").is_empty());
        assert!(engine.search(" a ").is_empty());
    }

    #[test]
    fn results_follow_tree_order() {
        let model = model(tutorials(), r#"{"minChars":2,"maxResults":20}"#);
        let index = TreeIndex::build(model.sidebar());
        let engine = SearchEngine::new(&index, model.search());

        let hits = engine.search("ba");
        assert_eq!(keys(&hits), vec!["tutorials/basics", "tutorials/database"]);
        assert_eq!(hits[0].label, "Basics");
    }

    #[test]
    fn results_are_truncated_to_max_results() {
        let model = model(tutorials(), r#"{"minChars":1,"maxResults":2}"#);
        let index = TreeIndex::build(model.sidebar());
        let engine = SearchEngine::new(&index, model.search());

        let hits = engine.search("a");
        assert_eq!(keys(&hits), vec!["/", "tutorials"]);
    }

    #[test]
    fn name_is_searched_as_well_as_label() {
        let model = model(tutorials(), r#"{"minChars":2}"#);
        let index = TreeIndex::build(model.sidebar());
        let engine = SearchEngine::new(&index, model.search());

        assert_eq!(keys(&engine.search("motoko_")), vec!["tutorials/motoko_playground"]);
    }

    #[test]
    fn recognized_languages_restrict_scope() {
        let sidebar = vec![
            RawSidebarNode::leaf("motoko_basics", "Motoko basics")
                .with_language(LanguageId::new("0")),
            RawSidebarNode::leaf("rust_basics", "Rust basics")
                .with_language(LanguageId::new("1")),
            RawSidebarNode::leaf("basics", "Shared basics"),
        ];
        let model = model(
            sidebar.clone(),
            r#"{"minChars":2,"recognizeLanguages":true,"languages":[0]}"#,
        );
        let index = TreeIndex::build(model.sidebar());
        let engine = SearchEngine::new(&index, model.search());

        let hits = engine.search("basics");
        assert_eq!(keys(&hits), vec!["motoko_basics", "basics"]);
        assert_eq!(hits[0].matched_language, Some(LanguageId::new("0")));
        assert_eq!(hits[1].matched_language, None);

        let model = self::model(sidebar, r#"{"minChars":2,"languages":[0]}"#);
        let index = TreeIndex::build(model.sidebar());
        let engine = SearchEngine::new(&index, model.search());
        assert_eq!(engine.search("basics").len(), 3);
    }

    #[test]
    fn fuzzy_mode_matches_subsequences_in_tree_order() {
        let model = model(tutorials(), r#"{"mode":1,"minChars":2}"#);
        let index = TreeIndex::build(model.sidebar());
        let engine = SearchEngine::new(&index, model.search());

        let hits = engine.search("mtk");
        assert_eq!(keys(&hits), vec!["tutorials/motoko_playground"]);
    }

    #[test]
    fn exact_mode_does_not_match_subsequences() {
        let model = model(tutorials(), r#"{"mode":0,"minChars":2}"#);
        let index = TreeIndex::build(model.sidebar());
        let engine = SearchEngine::new(&index, model.search());

        assert!(engine.search("mtk").is_empty());
    }

    #[test]
    fn custom_matcher_is_used() {
        struct Prefix;
        impl NameMatcher for Prefix {
            fn matches(&self, haystack: &str, needle: &str) -> bool {
                haystack.starts_with(needle)
            }
        }

        let model = model(tutorials(), r#"{"minChars":2}"#);
        let index = TreeIndex::build(model.sidebar());
        let engine = SearchEngine::with_matcher(&index, model.search(), Box::new(Prefix));

        assert_eq!(keys(&engine.search("ba")), vec!["tutorials/basics"]);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let model = model(tutorials(), r#"{"minChars":2}"#);
        let index = TreeIndex::build(model.sidebar());
        let engine = SearchEngine::new(&index, model.search());

        assert_eq!(engine.search("  play "), engine.search("play"));
        assert_eq!(keys(&engine.search("play ")), vec!["tutorials/motoko_playground"]);
        assert!(engine.search("   ").is_empty());
        // Inner whitespace is part of the query.
        assert_eq!(keys(&engine.search("motoko p")), vec!["tutorials/motoko_playground"]);
        assert!(engine.search("motokop").is_empty());
    }

    #[test]
    fn zero_min_chars_still_ignores_empty_query() {
        let model = model(tutorials(), r#"{"minChars":0}"#);
        let index = TreeIndex::build(model.sidebar());
        let engine = SearchEngine::new(&index, model.search());

        assert!(engine.search("").is_empty());
    }
}
