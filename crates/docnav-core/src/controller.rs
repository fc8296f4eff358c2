//! Session-level orchestration.
//!
//! A [`NavigationController`] owns everything one reading session needs:
//! a shared handle on the immutable [`ConfigModel`], the sidebar
//! [`TreeIndex`] built from it, and the session's [`HistoryTracker`]. It
//! answers [`Command`]s with [`Event`]s and keeps the latest results in a
//! [`ViewState`] for the renderer.

use std::sync::Arc;

use crate::config::{ConfigModel, ToolbarLink};
use crate::event::{Command, Event, NavigationTarget, Surface};
use crate::nav::filter::{filter_sidebar, filter_toolbar};
use crate::nav::history::{HistoryEntry, HistoryTracker};
use crate::nav::tree::{FlatNode, TreeIndex};
use crate::search::{SearchEngine, SearchHit};

/// What the renderer should currently display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// The surface that received the latest query.
    pub surface: Surface,
    pub query: String,
    pub sidebar: Vec<FlatNode>,
    pub toolbar: Vec<ToolbarLink>,
    pub hits: Vec<SearchHit>,
    /// "Not found" or "no results" text for the active surface.
    pub message: Option<String>,
    /// The most recent selection.
    pub current: Option<NavigationTarget>,
}

/// Drives filtering, search and history for one session.
#[derive(Debug)]
pub struct NavigationController {
    config: Arc<ConfigModel>,
    index: TreeIndex,
    history: HistoryTracker,
    view: ViewState,
}

impl NavigationController {
    /// Starts a session with an empty history and unfiltered views.
    pub fn new(config: Arc<ConfigModel>) -> Self {
        let index = TreeIndex::build(config.sidebar());
        let history = HistoryTracker::new(config.max_history_items());
        let view = ViewState {
            sidebar: index.flatten().to_vec(),
            toolbar: config.toolbar_links().to_vec(),
            ..ViewState::default()
        };
        Self {
            config,
            index,
            history,
            view,
        }
    }

    pub fn config(&self) -> &ConfigModel {
        &self.config
    }

    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The sidebar filtered by `query`, ancestors of matches included.
    pub fn filtered_sidebar(&self, query: &str) -> Vec<FlatNode> {
        filter_sidebar(self.index.flatten(), query)
    }

    /// The toolbar links whose label contains `query`.
    pub fn filtered_toolbar(&self, query: &str) -> Vec<ToolbarLink> {
        filter_toolbar(self.config.toolbar_links(), query)
    }

    /// Member-name search using the configured settings.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        SearchEngine::new(&self.index, self.config.search()).search(query)
    }

    /// Records a visit to `target_id` without resolving it.
    pub fn record_visit(&mut self, target_id: &str) {
        let entry = self.history.record_visit(target_id);
        tracing::debug!(target_id, seq = entry.visited_at_seq(), "visit recorded");
    }

    /// Visit history, most recent first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.entries()
    }

    /// Resolves `target_id` against the sidebar.
    ///
    /// Ids that are not sidebar keys (toolbar ids, anchors, external links)
    /// resolve to a target without a node.
    pub fn resolve(&self, target_id: &str) -> NavigationTarget {
        match self.index.find_by_key(target_id) {
            Some(node) => NavigationTarget {
                target_id: target_id.to_string(),
                node_id: Some(node.id),
                ancestors: self.index.ancestors_of(node.id),
            },
            None => NavigationTarget {
                target_id: target_id.to_string(),
                node_id: None,
                ancestors: Vec::new(),
            },
        }
    }

    /// Records the visit and returns where it leads.
    pub fn select(&mut self, target_id: &str) -> NavigationTarget {
        self.record_visit(target_id);
        let target = self.resolve(target_id);
        self.view.current = Some(target.clone());
        target
    }

    /// Processes one command from the renderer.
    pub fn handle(&mut self, command: Command) -> Event {
        match command {
            Command::QueryChanged { surface, query } => self.query_changed(surface, query),
            Command::ItemSelected(target_id) => Event::Navigated(self.select(&target_id)),
        }
    }

    fn query_changed(&mut self, surface: Surface, query: String) -> Event {
        let has_query = !query.trim().is_empty();
        self.view.surface = surface;
        self.view.query = query.clone();

        match surface {
            Surface::Sidebar => {
                let nodes = self.filtered_sidebar(&query);
                let message = (has_query && nodes.is_empty())
                    .then(|| self.config.not_found_message(&query));
                self.view.sidebar = nodes.clone();
                self.view.message = message.clone();
                Event::SidebarFiltered {
                    query,
                    nodes,
                    message,
                }
            }
            Surface::Toolbar => {
                let links = self.filtered_toolbar(&query);
                let message = (has_query && links.is_empty())
                    .then(|| self.config.not_found_message(&query));
                self.view.toolbar = links.clone();
                self.view.message = message.clone();
                Event::ToolbarFiltered {
                    query,
                    links,
                    message,
                }
            }
            Surface::Search => {
                let hits = self.search(&query);
                let long_enough = query.trim().chars().count() >= self.config.search().min_chars;
                let message = (has_query && long_enough && hits.is_empty())
                    .then(|| self.config.no_results_message().to_string());
                self.view.hits = hits.clone();
                self.view.message = message.clone();
                Event::SearchCompleted {
                    query,
                    hits,
                    message,
                }
            }
        }
    }
}
