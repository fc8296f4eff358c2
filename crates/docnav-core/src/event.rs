//! Event system for communication between the renderer and the core.
//!
//! The renderer translates user input into [`Command`]s, which the
//! [`NavigationController`](crate::controller::NavigationController)
//! processes and answers with [`Event`]s. Debouncing keystrokes is the
//! renderer's business; every command is handled synchronously.

use crate::config::{NodeId, ToolbarLink};
use crate::nav::tree::FlatNode;
use crate::search::SearchHit;

/// Which input box a query was typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    /// The filter box above the sidebar.
    #[default]
    Sidebar,
    /// The filter box in the toolbar.
    Toolbar,
    /// The global search box.
    Search,
}

/// A request from the renderer.
///
/// Commands flow **Renderer → Core**. The core never creates commands itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The text in one of the input boxes changed.
    QueryChanged {
        surface: Surface,
        query: String,
    },
    /// The reader picked a navigation target (a sidebar key or any other id).
    ItemSelected(String),
}

/// Where a selection leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    /// The id that was selected.
    pub target_id: String,
    /// The sidebar node it resolved to, if any.
    pub node_id: Option<NodeId>,
    /// The node's ancestors, root first.
    pub ancestors: Vec<NodeId>,
}

/// A notification the core sends back to the renderer.
///
/// Events flow **Core → Renderer**. `message` is set when a non-empty query
/// produced no results and holds the text to show in their place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SidebarFiltered {
        query: String,
        nodes: Vec<FlatNode>,
        message: Option<String>,
    },
    ToolbarFiltered {
        query: String,
        links: Vec<ToolbarLink>,
        message: Option<String>,
    },
    SearchCompleted {
        query: String,
        hits: Vec<SearchHit>,
        message: Option<String>,
    },
    /// A target was selected and recorded in the history.
    Navigated(NavigationTarget),
}
